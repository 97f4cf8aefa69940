//! Error types for the state manager

use thiserror::Error;

/// Result type alias for state manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during registration and transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sibling with this name is already registered
    #[error("State {parent:?} already has a substate named {name:?}")]
    DuplicateName {
        /// Full path of the parent state (empty for the root)
        parent: String,
        /// The colliding name
        name: String,
    },

    /// A path segment does not resolve to a registered state
    #[error("State {parent:?} has no substate named {name:?}")]
    UnknownChild {
        /// Full path of the state the lookup ran against (empty for the root)
        parent: String,
        /// The segment that failed to resolve
        name: String,
    },

    /// State names must be non-empty
    #[error("Cannot register {path:?}: state names must not be empty")]
    EmptyName {
        /// The rejected registration path
        path: String,
    },

    /// The manager was called back into while a transition was running
    #[error("Cannot handle {path:?} while a transition is in progress")]
    ReentrantTransition {
        /// Path passed to the rejected call
        path: String,
    },

    /// A state nominates a default substate that is not one of its children
    #[error("Default substate {default:?} of {state:?} is not registered")]
    UnknownDefaultSubstate {
        /// Full path of the nominating state
        state: String,
        /// The configured default substate name
        default: String,
    },
}

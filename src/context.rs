//! Per-state capabilities: enter/exit callbacks and the default substate

use std::fmt;

/// Trait for the optional behavior attached to a registered state.
///
/// Every method has a no-op default, so an implementation only supplies
/// the capabilities it actually has. Callbacks receive the state's own
/// name (not its full path) and run synchronously inside the transition.
pub trait Stateful: Send {
    /// Called when the state is entered.
    fn on_enter(&mut self, _name: &str) {}

    /// Called when the state is exited.
    fn on_exit(&mut self, _name: &str) {}

    /// Name of the child entered automatically after this state.
    ///
    /// # Returns
    /// `None` when the state has no default substate.
    fn default_substate(&self) -> Option<&str> {
        None
    }
}

/// A state with no behavior.
impl Stateful for () {}

type Callback = Box<dyn FnMut(&str) + Send>;

/// Closure-based [`Stateful`] where each capability is either present or absent.
///
/// ```rust
/// use hierarchical_state_manager::StateContext;
///
/// let context = StateContext::new()
///     .with_enter(|name| println!("entering {name}"))
///     .with_default_substate("idle");
/// assert_eq!(context.default_substate_name(), Some("idle"));
/// ```
#[derive(Default)]
pub struct StateContext {
    enter: Option<Callback>,
    exit: Option<Callback>,
    default_substate: Option<String>,
}

impl StateContext {
    /// Create a context with no capabilities
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the enter callback
    pub fn with_enter<F>(mut self, func: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.enter = Some(Box::new(func));
        self
    }

    /// Set the exit callback
    pub fn with_exit<F>(mut self, func: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.exit = Some(Box::new(func));
        self
    }

    /// Nominate a child to enter automatically
    pub fn with_default_substate(mut self, name: impl Into<String>) -> Self {
        self.default_substate = Some(name.into());
        self
    }

    /// The configured default substate, if any
    pub fn default_substate_name(&self) -> Option<&str> {
        self.default_substate.as_deref()
    }
}

impl Stateful for StateContext {
    fn on_enter(&mut self, name: &str) {
        if let Some(enter) = self.enter.as_mut() {
            enter(name);
        }
    }

    fn on_exit(&mut self, name: &str) {
        if let Some(exit) = self.exit.as_mut() {
            exit(name);
        }
    }

    fn default_substate(&self) -> Option<&str> {
        self.default_substate.as_deref()
    }
}

impl fmt::Debug for StateContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateContext")
            .field("enter", &self.enter.is_some())
            .field("exit", &self.exit.is_some())
            .field("default_substate", &self.default_substate)
            .finish()
    }
}

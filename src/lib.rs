//! # Hierarchical State Manager
//!
//! A hierarchical finite state machine manager in Rust. States live in a
//! tree and are addressed by dot-separated paths such as `"player.alive.idle"`.
//! Changing state exits and enters only what differs between the active path
//! and the target, and follows default substates down to a leaf.
//!
//! ## Features
//!
//! - 🏗️ **Hierarchical States**: States nest to any depth under a virtual root
//! - 🔀 **Minimal Transitions**: Shared ancestors are neither exited nor re-entered
//! - ⬇️ **Default Substates**: Entering a composite state drills down to a leaf
//! - 📊 **PlantUML Export**: State tree and transition diagram (debug builds only)
//! - 🛡️ **Re-entrancy Guard**: Callbacks can hold a handle without corrupting a transition
//!
//! ## Quick Start
//!
//! ```rust
//! use hierarchical_state_manager::*;
//! use std::sync::{Arc, Mutex};
//!
//! # fn example() -> Result<()> {
//! let log = Arc::new(Mutex::new(Vec::new()));
//! let entered = Arc::clone(&log);
//!
//! let mut manager = StateManagerBuilder::new()
//!     .state("power", StateContext::new().with_default_substate("off"))
//!     .state("power.off", ())
//!     .state(
//!         "power.on",
//!         StateContext::new().with_enter(move |name| entered.lock().unwrap().push(name.to_string())),
//!     )
//!     .build()?;
//!
//! manager.change_state("power")?;
//! assert_eq!(manager.current_state(), "power.off");
//!
//! manager.change_state("power.on")?;
//! assert_eq!(*log.lock().unwrap(), vec!["on"]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

mod builder;
mod context;
mod error;
mod manager;
mod node;
mod path;
mod shared;
mod tree;

#[cfg(all(feature = "plantuml", debug_assertions))]
mod plantuml;

pub use builder::StateManagerBuilder;
pub use context::{StateContext, Stateful};
pub use error::{Error, Result};
pub use manager::StateManager;
pub use path::DEFAULT_SEPARATOR;
pub use shared::{SharedStateManager, WeakStateManager};

pub mod prelude {
    //! Prelude module for convenient imports
    pub use crate::{
        Error, Result, SharedStateManager, StateContext, StateManager, StateManagerBuilder,
        Stateful,
    };
}

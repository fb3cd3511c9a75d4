//! Loadable state and the managers that own it.
//!
//! - [`LoadingManager`]: per-region state with auto-hide of terminal states
//! - [`GlobalLoadingManager`]: mirrors the most recently published local state
//! - [`LocalScope`]: attaches a local manager to the global one on appear/disappear
//! - [`Published`]: the observable cell both managers publish through

mod global;
mod manager;
mod publisher;
mod scope;
mod snapshot;
mod timer;
pub mod transitions;
mod types;

pub use global::GlobalLoadingManager;
pub use manager::LoadingManager;
pub use publisher::{Published, Subscription};
pub use scope::{subscribe_to_global, unsubscribe_from_global, LocalScope};
pub use snapshot::StateSnapshot;
pub use timer::AutoHideTimer;
pub use transitions::{StateTransition, TimerDirective};
pub use types::{LoadableState, StateKind, SuccessMessage};

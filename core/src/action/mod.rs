//! Retryable actions consumed by error views.
//!
//! An [`Action`] wraps an async operation that yields either a value or a
//! [`LoadError`](crate::error::LoadError). Actions compose with
//! [`Action::retry`] and [`Action::fallback_to`]; the attempt index is threaded
//! through every layer and surfaced in the final [`ActionOutcome`].

#[allow(clippy::module_inception)]
mod action;
mod outcome;

pub use action::{Action, ActionFuture};
pub use outcome::ActionOutcome;

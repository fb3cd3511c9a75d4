//! Loading, success and failure overlay state with local and global scopes.
//!
//! A [`LoadingManager`](state::LoadingManager) owns the state of one UI
//! region. Terminal states expire back to idle after the provider's
//! auto-hide delay. A [`GlobalLoadingManager`](state::GlobalLoadingManager)
//! mirrors whichever subscribed manager published last, and
//! [`LocalScope`](state::LocalScope) ties that subscription to a view's
//! appear/disappear lifecycle.

pub mod action;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod overlay;
pub mod provider;
pub mod state;
pub mod util;

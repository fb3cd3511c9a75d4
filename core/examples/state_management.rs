//! Drives one local scope through loading, failure with retry and success
//! while a global manager mirrors it.

use std::time::Duration;

use anyhow::Result;
use unloader_core::action::Action;
use unloader_core::error::{AppError, NetworkError};
use unloader_core::overlay::OverlayHost;
use unloader_core::provider::{DefaultProvider, ManagerSettings};
use unloader_core::state::{GlobalLoadingManager, LocalScope};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let global = GlobalLoadingManager::new();
    let provider =
        DefaultProvider::new().with_manager_settings(ManagerSettings::new(Duration::from_millis(500)));
    let scope = LocalScope::new(provider, Some(global.clone()));
    scope.appear();

    let mut rx = global.subscribe();
    let listener = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            println!("global -> {}", state.description());
        }
    });

    let manager = scope.manager().clone();
    let host = OverlayHost::local(manager.clone());

    manager.show_loading(scope.provider().clone());
    println!("{}", host.render().unwrap_or_default());
    tokio::time::sleep(Duration::from_millis(200)).await;

    let retry_target = manager.clone();
    let retry_provider = scope.provider().clone();
    let retry = Action::simple(move || retry_target.show_loading(retry_provider.clone()));
    manager.show_failure(
        AppError::from(NetworkError::NoResponse),
        scope.provider().clone(),
        Some(retry),
    );
    println!("{}", host.render().unwrap_or_default());
    tokio::time::sleep(Duration::from_millis(200)).await;

    manager.show_success("Profile saved", scope.provider().clone());
    println!("{}", host.render().unwrap_or_default());
    tokio::time::sleep(Duration::from_millis(700)).await;

    println!("after auto-hide: {}", manager.state());
    drop(scope);
    drop(global);
    listener.abort();
    Ok(())
}

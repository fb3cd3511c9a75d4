use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use uuid::Uuid;

use super::outcome::ActionOutcome;
use crate::error::LoadError;

pub type ActionFuture<T> = BoxFuture<'static, Result<T, LoadError>>;

/// Runs the chain starting at the given attempt index.
type ChainFn<T> = dyn Fn(u32) -> BoxFuture<'static, ActionOutcome<T>> + Send + Sync;

/// A cloneable async operation with retry and fallback composition.
///
/// The first invocation of an action is attempt `0`; each retry of the same
/// action increments the index by one. A fallback runs at the index where the
/// primary gave up, so `primary.retry(2).fallback_to(fallback)` with a primary
/// that always fails settles at attempt `2`.
pub struct Action<T = ()> {
    id: Uuid,
    chain: Arc<ChainFn<T>>,
}

impl<T> Clone for Action<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            chain: Arc::clone(&self.chain),
        }
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("id", &self.id).finish()
    }
}

impl<T: Send + 'static> Action<T> {
    pub fn new<F, Fut>(operation: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, LoadError>> + Send + 'static,
    {
        let operation = Arc::new(operation);
        Self::from_chain(move |attempt| {
            let fut = operation();
            async move {
                match fut.await {
                    Ok(value) => ActionOutcome::success(value, attempt),
                    Err(err) => ActionOutcome::failure(err, attempt),
                }
            }
            .boxed()
        })
    }

    fn from_chain<F>(chain: F) -> Self
    where
        F: Fn(u32) -> BoxFuture<'static, ActionOutcome<T>> + Send + Sync + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            chain: Arc::new(chain),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn run(&self) -> ActionOutcome<T> {
        (self.chain)(0).await
    }

    /// Re-attempts this action up to `retries` more times after a failure.
    ///
    /// When every attempt fails the last failure is returned as a normal
    /// outcome.
    pub fn retry(&self, retries: u32) -> Action<T> {
        let chain = Arc::clone(&self.chain);
        Self::from_chain(move |start| {
            let chain = Arc::clone(&chain);
            async move {
                let mut attempt = start;
                loop {
                    let outcome = chain(attempt).await;
                    if outcome.is_success() || attempt >= start.saturating_add(retries) {
                        return outcome;
                    }
                    tracing::debug!(attempt, "action failed, retrying");
                    attempt += 1;
                }
            }
            .boxed()
        })
    }

    /// Runs `fallback` when this action fails.
    ///
    /// The combined outcome is whichever action settled last: the primary
    /// success, the fallback success, or the fallback failure.
    pub fn fallback_to(&self, fallback: &Action<T>) -> Action<T> {
        let primary = Arc::clone(&self.chain);
        let fallback = Arc::clone(&fallback.chain);
        Self::from_chain(move |start| {
            let primary = Arc::clone(&primary);
            let fallback = Arc::clone(&fallback);
            async move {
                let outcome = primary(start).await;
                if outcome.is_success() {
                    return outcome;
                }
                tracing::debug!(attempt = outcome.attempt_count, "action failed, running fallback");
                fallback(outcome.attempt_count).await
            }
            .boxed()
        })
    }

    /// Drops the success value, keeping attempt accounting intact.
    pub fn discard_value(&self) -> Action<()> {
        let chain = Arc::clone(&self.chain);
        Action::from_chain(move |start| {
            let fut = chain(start);
            async move {
                let outcome = fut.await;
                ActionOutcome {
                    attempt_count: outcome.attempt_count,
                    result: outcome.result.map(|_| ()),
                }
            }
            .boxed()
        })
    }

    /// Runs the action without waiting for its outcome.
    ///
    /// Inside a tokio runtime the action is spawned; otherwise it is driven to
    /// completion on the calling thread.
    pub fn perform(&self) {
        let fut = (self.chain)(0);
        let id = self.id;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let outcome = fut.await;
                    if let Some(err) = outcome.error() {
                        tracing::debug!(%id, error = %err, "action finished with failure");
                    }
                });
            }
            Err(_) => {
                let outcome = futures::executor::block_on(fut);
                if let Some(err) = outcome.error() {
                    tracing::debug!(%id, error = %err, "action finished with failure");
                }
            }
        }
    }
}

impl Action<()> {
    /// Wraps a synchronous callback that always succeeds.
    pub fn simple<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::new(move || {
            callback();
            futures::future::ready(Ok(()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn counting(fail_times: u32, calls: Arc<AtomicU32>) -> Action<&'static str> {
        Action::new(move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < fail_times {
                    Err(LoadError::msg(format!("fail #{n}")))
                } else {
                    Ok("done")
                }
            }
        })
    }

    #[tokio::test]
    async fn plain_action_reports_attempt_zero() {
        let calls = Arc::new(AtomicU32::new(0));
        let outcome = counting(0, calls.clone()).run().await;
        assert_eq!(outcome.attempt_count, 0);
        assert_eq!(outcome.value(), Some(&"done"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retry_stops_on_first_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let outcome = counting(1, calls.clone()).retry(3).run().await;
        assert!(outcome.is_success());
        assert_eq!(outcome.attempt_count, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_exhaustion_returns_last_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        let outcome = counting(u32::MAX, calls.clone()).retry(3).run().await;
        assert_eq!(outcome.attempt_count, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(outcome.error().map(|e| e.to_string()).as_deref(), Some("fail #3"));
    }

    #[tokio::test]
    async fn fallback_skipped_when_primary_succeeds() {
        let primary_calls = Arc::new(AtomicU32::new(0));
        let fallback_calls = Arc::new(AtomicU32::new(0));
        let fallback = Action::new({
            let calls = fallback_calls.clone();
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok("fallback") }
            }
        });

        let outcome = counting(0, primary_calls)
            .retry(1)
            .fallback_to(&fallback)
            .run()
            .await;

        assert_eq!(outcome.value(), Some(&"done"));
        assert_eq!(outcome.attempt_count, 0);
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failing_fallback_surfaces_its_error() {
        let primary = Action::<()>::new(|| async { Err(LoadError::msg("primary")) });
        let fallback = Action::<()>::new(|| async { Err(LoadError::msg("fallback")) });

        let outcome = primary.fallback_to(&fallback).run().await;
        assert_eq!(outcome.error().map(|e| e.to_string()).as_deref(), Some("fallback"));
        assert_eq!(outcome.attempt_count, 0);
    }

    #[tokio::test]
    async fn retries_inside_fallback_continue_counting() {
        let primary = Action::<u8>::new(|| async { Err(LoadError::msg("primary")) });
        let calls = Arc::new(AtomicU32::new(0));
        let fallback = Action::new({
            let calls = calls.clone();
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(LoadError::msg("cold"))
                    } else {
                        Ok(7u8)
                    }
                }
            }
        });

        let outcome = primary.retry(1).fallback_to(&fallback.retry(2)).run().await;
        assert_eq!(outcome.value(), Some(&7));
        assert_eq!(outcome.attempt_count, 2);
    }

    #[test]
    fn simple_action_runs_without_runtime() {
        let hits = Arc::new(AtomicU32::new(0));
        let action = Action::simple({
            let hits = hits.clone();
            move || {
                hits.fetch_add(1, Ordering::SeqCst);
            }
        });

        action.perform();
        action.perform();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn discard_value_keeps_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let outcome = counting(2, calls).retry(2).discard_value().run().await;
        assert!(outcome.is_success());
        assert_eq!(outcome.attempt_count, 2);
    }

    #[test]
    fn clones_share_identity() {
        let action = Action::simple(|| {});
        assert_eq!(action.id(), action.clone().id());
        assert_ne!(action.id(), action.retry(1).id());
    }
}

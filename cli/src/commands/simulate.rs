use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use unloader_core::action::Action;
use unloader_core::config::AppConfig;
use unloader_core::context::AppContext;
use unloader_core::error::{AppError, LoadError, NetworkError};
use unloader_core::overlay::overlay_for;
use unloader_core::state::{LoadableState, StateSnapshot};
use unloader_core::util::Atomic;

use crate::commands::cli::{Outcome, SimulateArgs};
use crate::error::CliError;

/// Fails this many times before a flaky operation succeeds.
const FLAKY_FAILURES: u32 = 2;

/// Extra wait after the auto-hide delay so the expiry is observed.
const SETTLE_MARGIN: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameSource {
    Local,
    Global,
}

impl fmt::Display for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameSource::Local => f.write_str("local"),
            FrameSource::Global => f.write_str("global"),
        }
    }
}

/// One published state as seen by one observer.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub source: FrameSource,
    pub state: StateSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub succeeded: bool,
    pub attempts: u32,
    pub frames: Vec<Frame>,
    pub final_state: StateSnapshot,
}

impl SimulationReport {
    pub fn exit_code(&self) -> i32 {
        if self.succeeded {
            0
        } else {
            1
        }
    }
}

pub fn effective_config(cfg: &AppConfig, args: &SimulateArgs) -> AppConfig {
    let mut cfg = cfg.clone();
    if let Some(ms) = args.auto_hide_ms {
        cfg.manager.auto_hide_delay_ms = ms;
    }
    if let Some(kind) = args.provider {
        cfg.provider.kind = kind.into();
    }
    cfg
}

fn frame_sink(
    source: FrameSource,
    frames: Atomic<Vec<Frame>>,
    echo: bool,
) -> impl Fn(&LoadableState) + Send + Sync + 'static {
    move |state| {
        let view = overlay_for(state, Action::simple(|| {})).map(|v| v.render());
        if echo {
            match &view {
                Some(v) => println!("[{source}] {v}"),
                None => println!("[{source}] (idle)"),
            }
        }
        frames.mutate(|f| {
            f.push(Frame {
                source,
                state: state.snapshot(),
                view,
            })
        });
    }
}

fn scripted_operation(outcome: Outcome, delay: Duration) -> Action {
    let calls = Arc::new(AtomicU32::new(0));
    Action::new(move || {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            tokio::time::sleep(delay).await;
            match outcome {
                Outcome::Success => Ok(()),
                Outcome::Failure => Err(LoadError::from(AppError::from(NetworkError::NoResponse))),
                Outcome::Flaky if n < FLAKY_FAILURES => {
                    Err(LoadError::from(AppError::from(NetworkError::Inaccessible)))
                }
                Outcome::Flaky => Ok(()),
            }
        }
    })
}

pub async fn run_simulation(ctx: &AppContext, args: &SimulateArgs, echo: bool) -> SimulationReport {
    let ctx = ctx.with_config(effective_config(ctx.cfg(), args));
    let scope = ctx.scope();
    scope.appear();

    let frames: Atomic<Vec<Frame>> = Atomic::default();
    let local_sub = scope
        .manager()
        .sink(frame_sink(FrameSource::Local, frames.clone(), echo));
    let global_sub = ctx
        .global()
        .sink(frame_sink(FrameSource::Global, frames.clone(), echo));

    let manager = scope.manager().clone();
    let provider = scope.provider().clone();
    let operation =
        scripted_operation(args.outcome, Duration::from_millis(args.delay_ms)).retry(args.retries);

    tracing::info!(outcome = ?args.outcome, retries = args.retries, "simulation started");
    manager.show_loading(provider.clone());
    let outcome = operation.run().await;
    let attempts = outcome.attempt_count;
    let succeeded = match outcome.result {
        Ok(()) => {
            manager.show_success(format!("{} (attempt {})", args.message, attempts), provider);
            true
        }
        Err(err) => {
            tracing::warn!(error = %err, attempts, "operation failed");
            manager.show_failure(err, provider, Some(operation.clone()));
            false
        }
    };

    tokio::time::sleep(manager.settings().auto_hide_delay + SETTLE_MARGIN).await;
    let final_state = manager.state().snapshot();
    tracing::info!(succeeded, attempts, state = %final_state.description, "simulation finished");

    local_sub.cancel();
    global_sub.cancel();
    scope.disappear();

    SimulationReport {
        succeeded,
        attempts,
        frames: frames.get(),
        final_state,
    }
}

pub async fn handle_simulate(ctx: &AppContext, args: SimulateArgs) -> Result<i32, CliError> {
    let report = run_simulation(ctx, &args, !args.json).await;
    if args.json {
        let out =
            serde_json::to_string_pretty(&report).map_err(|e| CliError::Command(e.to_string()))?;
        println!("{out}");
    }
    Ok(report.exit_code())
}

use std::sync::Arc;

use clap::Parser;
use unloader_cli::commands::{cli, config, simulate};
use unloader_cli::error::CliError;
use unloader_cli::logging::init_tracing;
use unloader_core::context::AppContext;
use unloader_plugins::PluginProviderFactory;

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let args = cli::Args::parse();
    let cfg = match args.config.as_deref() {
        Some(path) => {
            let mut cfg = unloader_core::config::load_from_path(path)?;
            unloader_core::config::apply_overrides(&mut cfg, |key| std::env::var(key).ok())?;
            cfg
        }
        None => unloader_core::config::load_default()?,
    };
    init_tracing(&cfg.logging, args.command.name())?;

    let ctx = AppContext::new(cfg, Some(Arc::new(PluginProviderFactory)));
    dispatch(args.command, &ctx).await
}

async fn dispatch(cmd: cli::Commands, ctx: &AppContext) -> Result<i32, CliError> {
    match cmd {
        cli::Commands::Simulate(sim_args) => simulate::handle_simulate(ctx, sim_args).await,
        cli::Commands::Config(cfg_args) => config::handle_config(ctx.cfg(), cfg_args),
    }
}

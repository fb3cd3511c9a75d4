use clap::{Args as ClapArgs, Parser, Subcommand};
use unloader_core::config::ProviderKind;

#[derive(Parser, Debug)]
#[command(name = "unloader", version, about = "Drive loading / success / failure overlays")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Load configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a scripted operation against a local manager attached to a global one.
    Simulate(SimulateArgs),
    /// Print the effective configuration.
    Config(ConfigArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Simulate(_) => "simulate",
            Commands::Config(_) => "config",
        }
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation succeeds on the first attempt.
    Success,
    /// The operation always fails.
    Failure,
    /// The operation fails twice, then succeeds.
    Flaky,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderArg {
    Text,
    Jsonl,
}

impl From<ProviderArg> for ProviderKind {
    fn from(value: ProviderArg) -> Self {
        match value {
            ProviderArg::Text => ProviderKind::Text,
            ProviderArg::Jsonl => ProviderKind::Jsonl,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SimulateArgs {
    #[arg(long, value_enum, default_value_t = Outcome::Success)]
    pub outcome: Outcome,

    /// Simulated duration of each attempt.
    #[arg(long, default_value_t = 300)]
    pub delay_ms: u64,

    /// Overrides `manager.auto_hide_delay_ms`.
    #[arg(long)]
    pub auto_hide_ms: Option<u64>,

    /// Overrides `provider.kind`.
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Extra attempts after the first failure.
    #[arg(long, default_value_t = 2)]
    pub retries: u32,

    /// Success message shown when the operation completes.
    #[arg(long, default_value = "Done")]
    pub message: String,

    /// Print a JSON report instead of the rendered frames.
    #[arg(long)]
    pub json: bool,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            outcome: Outcome::Success,
            delay_ms: 300,
            auto_hide_ms: None,
            provider: None,
            retries: 2,
            message: "Done".to_string(),
            json: false,
        }
    }
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Print as JSON instead of TOML.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simulate_flags() {
        let args = Args::parse_from([
            "unloader",
            "simulate",
            "--outcome",
            "flaky",
            "--retries",
            "3",
            "--provider",
            "jsonl",
            "--auto-hide-ms",
            "500",
        ]);
        let Commands::Simulate(sim) = args.command else {
            panic!("expected simulate");
        };
        assert_eq!(sim.outcome, Outcome::Flaky);
        assert_eq!(sim.retries, 3);
        assert_eq!(sim.provider.map(ProviderKind::from), Some(ProviderKind::Jsonl));
        assert_eq!(sim.auto_hide_ms, Some(500));
    }

    #[test]
    fn config_flag_is_global() {
        let args = Args::parse_from(["unloader", "config", "--config", "x.toml", "--json"]);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
        assert!(matches!(args.command, Commands::Config(ConfigArgs { json: true })));
    }
}

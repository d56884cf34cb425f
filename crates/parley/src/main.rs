// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parley - deterministic agent and model routing for LLM chat.
//!
//! This is the binary entry point. Every subcommand works offline: nothing
//! here calls a model provider.

mod config;
mod cost;
mod route;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use parley_core::{ParleyError, ProviderKind, RoutingStrategy};

/// Parley - deterministic agent and model routing for LLM chat.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a message to an agent kind and a model.
    Route(RouteArgs),
    /// Classify a message's agent kind and complexity tier.
    Classify {
        message: String,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Estimate the cost of a call to one model.
    Cost(CostArgs),
    /// Compare the cost of the same call across models.
    Compare {
        /// Models to compare. Defaults to every priced model.
        models: Vec<String>,
        #[arg(long, default_value_t = 1000)]
        input: u64,
        #[arg(long, default_value_t = 500)]
        output: u64,
    },
    /// Print the effective configuration with API keys redacted.
    Config,
}

#[derive(Args, Debug)]
struct RouteArgs {
    message: String,
    /// Override `routing.strategy` (cost_optimized, balanced, quality_optimized).
    #[arg(long, value_parser = RoutingStrategy::parse)]
    strategy: Option<RoutingStrategy>,
    /// Preferred provider for the balanced strategy.
    #[arg(long, value_parser = ProviderKind::parse)]
    provider: Option<ProviderKind>,
    /// Bypass selection and use this model.
    #[arg(long, value_name = "MODEL")]
    force_model: Option<String>,
    /// Provider of `--force-model`. Defaults to `routing.default_provider`.
    #[arg(long, requires = "force_model", value_parser = ProviderKind::parse)]
    force_provider: Option<ProviderKind>,
    /// Print the decision as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct CostArgs {
    #[arg(long)]
    model: String,
    /// Input (prompt) tokens.
    #[arg(long, required_unless_present = "total", conflicts_with = "total")]
    input: Option<u64>,
    /// Output (completion) tokens.
    #[arg(long, required_unless_present = "total", conflicts_with = "total")]
    output: Option<u64>,
    /// Total tokens, split 30% input and 70% output.
    #[arg(long)]
    total: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let loaded = match &cli.config {
        Some(path) => parley_config::load_and_validate_path(path),
        None => parley_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            parley_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);

    let result = match cli.command {
        Commands::Route(args) => route::run_route(&config, &args),
        Commands::Classify { message, json } => route::run_classify(&config, &message, json),
        Commands::Cost(args) => cost::run_cost(&config, &args),
        Commands::Compare {
            models,
            input,
            output,
        } => cost::run_compare(&config, &models, input, output),
        Commands::Config => config::run_config(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Install the fmt subscriber. `RUST_LOG` overrides the configured level.
///
/// Logs go to stderr so `--json` output stays machine-readable.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "parley={log_level},parley_router={log_level},parley_cost={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ParleyError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ParleyError::Internal(format!("failed to serialize output: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_with_overrides() {
        let cli = Cli::try_parse_from([
            "parley",
            "route",
            "Hola, cuál es el precio?",
            "--strategy",
            "cost_optimized",
            "--provider",
            "anthropic",
            "--json",
        ])
        .unwrap();
        let Commands::Route(args) = cli.command else {
            panic!("expected route");
        };
        assert_eq!(args.strategy, Some(RoutingStrategy::CostOptimized));
        assert_eq!(args.provider, Some(ProviderKind::Anthropic));
        assert!(args.json);
        assert!(args.force_model.is_none());
    }

    #[test]
    fn rejects_unknown_strategy() {
        let err = Cli::try_parse_from(["parley", "route", "hola", "--strategy", "cheapest"])
            .unwrap_err();
        assert!(err.to_string().contains("unknown routing strategy `cheapest`"));
    }

    #[test]
    fn force_provider_requires_force_model() {
        let result =
            Cli::try_parse_from(["parley", "route", "hola", "--force-provider", "grok"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "parley",
            "route",
            "hola",
            "--force-model",
            "grok-beta",
            "--force-provider",
            "grok",
        ])
        .unwrap();
        let Commands::Route(args) = cli.command else {
            panic!("expected route");
        };
        assert_eq!(args.force_provider, Some(ProviderKind::Grok));
    }

    #[test]
    fn cost_requires_a_token_count() {
        assert!(Cli::try_parse_from(["parley", "cost", "--model", "gpt-4o"]).is_err());
        assert!(Cli::try_parse_from(["parley", "cost", "--model", "gpt-4o", "--input", "5"]).is_err());
        assert!(
            Cli::try_parse_from([
                "parley", "cost", "--model", "gpt-4o", "--total", "5", "--input", "1", "--output",
                "1"
            ])
            .is_err()
        );
    }

    #[test]
    fn cost_accepts_split_or_total() {
        let cli = Cli::try_parse_from([
            "parley", "cost", "--model", "gpt-4o", "--input", "500", "--output", "200",
        ])
        .unwrap();
        let Commands::Cost(args) = cli.command else {
            panic!("expected cost");
        };
        assert_eq!((args.input, args.output, args.total), (Some(500), Some(200), None));

        let cli =
            Cli::try_parse_from(["parley", "cost", "--model", "gpt-4o", "--total", "1000"]).unwrap();
        let Commands::Cost(args) = cli.command else {
            panic!("expected cost");
        };
        assert_eq!(args.total, Some(1000));
    }

    #[test]
    fn compare_defaults_token_counts() {
        let cli = Cli::try_parse_from(["parley", "compare", "gpt-4o", "grok-beta"]).unwrap();
        let Commands::Compare {
            models,
            input,
            output,
        } = cli.command
        else {
            panic!("expected compare");
        };
        assert_eq!(models, vec!["gpt-4o", "grok-beta"]);
        assert_eq!((input, output), (1000, 500));
    }

    #[test]
    fn global_config_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["parley", "config", "--config", "/tmp/parley.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/parley.toml")));
    }
}

// Command line + runtime configuration
//
// Every setting can come from a flag or an environment variable; flags win.

use clap::{Parser, Subcommand};

use crate::entities::STANDARD_TIP_RATE;

#[derive(Parser, Debug)]
#[command(name = "dining-ledger")]
#[command(about = "Customers and waiters, related through the meals they share.")]
pub struct Cli {
    /// Log filter (tracing EnvFilter syntax)
    #[arg(long = "log", env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_filter: String,

    /// Start with the demo customers, waiters and meals
    #[arg(
        long = "seed",
        env = "DINING_SEED",
        global = true,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub seed_demo: bool,

    /// Tip rate used when a shell meal is tipped `auto`
    #[arg(long, env = "DINING_TIP_RATE", default_value_t = STANDARD_TIP_RATE, global = true)]
    pub tip_rate: f64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Interactive line shell (default)
    #[command(alias = "s")]
    Shell,
    /// Seed the demo data and print every relationship query
    #[command(alias = "d")]
    Demo,
    /// Print a JSON snapshot of all registries
    #[command(alias = "e")]
    Export,
    /// Browse the registries in a terminal UI
    #[command(alias = "t")]
    Tui,
}

/// Resolved settings handed to the rest of the program
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_filter: String,
    pub seed_demo: bool,
    pub tip_rate: f64,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            log_filter: cli.log_filter.clone(),
            seed_demo: cli.seed_demo,
            tip_rate: cli.tip_rate,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: "warn".to_string(),
            seed_demo: false,
            tip_rate: STANDARD_TIP_RATE,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Subcommand to run; the shell when none was given
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Shell)
    }
}

/// Install the global tracing subscriber (stderr, compact, no targets)
pub fn setup_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let cli = Cli::try_parse_from([
            "dining-ledger",
            "--log",
            "debug",
            "--seed",
            "--tip-rate",
            "0.15",
            "demo",
        ])
        .unwrap();

        assert_eq!(cli.command(), Commands::Demo);

        let config = Config::from_cli(&cli);
        assert_eq!(config.log_filter, "debug");
        assert!(config.seed_demo);
        assert_eq!(config.tip_rate, 0.15);
    }

    #[test]
    fn test_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["dining-ledger", "export", "--seed"]).unwrap();

        assert_eq!(cli.command(), Commands::Export);
        assert!(cli.seed_demo);
    }

    #[test]
    fn test_subcommand_aliases() {
        let cli = Cli::try_parse_from(["dining-ledger", "t"]).unwrap();
        assert_eq!(cli.command(), Commands::Tui);
    }

    #[test]
    fn test_bad_tip_rate_is_rejected() {
        assert!(Cli::try_parse_from(["dining-ledger", "--tip-rate", "lots"]).is_err());
    }

    #[test]
    fn test_environment_fallbacks() {
        // Only this test touches these variables; other tests pass the
        // matching flags explicitly or do not assert on them.
        std::env::set_var("DINING_SEED", "1");
        std::env::set_var("DINING_TIP_RATE", "0.15");

        let cli = Cli::try_parse_from(["dining-ledger", "export"]).unwrap();
        let config = Config::from_cli(&cli);
        assert!(config.seed_demo);
        assert_eq!(config.tip_rate, 0.15);

        std::env::set_var("DINING_SEED", "yes");
        assert!(Cli::try_parse_from(["dining-ledger"]).unwrap().seed_demo);

        std::env::set_var("DINING_SEED", "off");
        assert!(!Cli::try_parse_from(["dining-ledger"]).unwrap().seed_demo);

        std::env::remove_var("DINING_SEED");
        std::env::remove_var("DINING_TIP_RATE");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_filter, "warn");
        assert!(!config.seed_demo);
        assert_eq!(config.tip_rate, STANDARD_TIP_RATE);
    }
}

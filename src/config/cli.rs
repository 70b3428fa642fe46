use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "dinner-picker")]
#[command(about = "Picks a random dinner and limits how often each user may ask")]
pub struct CliArgs {
    #[arg(long, env = "DINNER_CONFIG_PATH", help = "Path to the TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Answer `<user_id> /dinner` lines from stdin until EOF or Ctrl-C
    Serve,
    /// Pick one dinner for a user and print the reply
    Recommend {
        #[arg(long)]
        user_id: i64,
    },
}

impl CliArgs {
    pub fn config_path(&self) -> Result<&PathBuf> {
        validate_required_field("--config or DINNER_CONFIG_PATH", &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recommend() {
        let args = CliArgs::try_parse_from([
            "dinner-picker",
            "--config",
            "dinner.toml",
            "recommend",
            "--user-id",
            "42",
        ])
        .unwrap();

        assert_eq!(args.config_path().unwrap(), &PathBuf::from("dinner.toml"));
        assert!(matches!(args.command, CliCommand::Recommend { user_id: 42 }));
    }

    #[test]
    fn test_parse_serve_verbose() {
        let args = CliArgs::try_parse_from(["dinner-picker", "--verbose", "--config", "c.toml", "serve"])
            .unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, CliCommand::Serve));
    }
}

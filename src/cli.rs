//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// folio - portfolio site backend
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(
    about = "Portfolio site backend: visitor tracking, contact messages, admin view",
    long_about = None
)]
pub struct Cli {
    /// Path to the TOML config file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Print an Argon2 hash for `admin.password_hash`
    HashPassword {
        /// Password (visible in shell history; prefer the prompt or --stdin)
        #[arg(long, conflicts_with = "stdin")]
        password: Option<String>,

        /// Read password from stdin (for scripting)
        #[arg(long)]
        stdin: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite without asking
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["folio"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["folio", "serve", "-c", "/etc/folio.toml"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Serve));
        assert_eq!(cli.config.as_deref(), Some("/etc/folio.toml"));
    }

    #[test]
    fn test_hash_password_flags() {
        let cli = Cli::try_parse_from(["folio", "hash-password", "--stdin"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::HashPassword {
                password: None,
                stdin: true
            })
        );

        assert!(
            Cli::try_parse_from(["folio", "hash-password", "--stdin", "--password", "x"]).is_err()
        );
    }

    #[test]
    fn test_config_generate() {
        let cli = Cli::try_parse_from(["folio", "config", "generate", "out.toml", "--force"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output_path: Some("out.toml".to_string()),
                    force: true
                }
            })
        );
    }
}

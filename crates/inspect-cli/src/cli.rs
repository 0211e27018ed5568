//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use inspect_domain::SubscriptionType;
use std::net::IpAddr;
use std::path::PathBuf;

/// Inspect - classify domains and check API access tokens.
#[derive(Debug, Parser)]
#[command(name = "inspect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "INSPECT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify an email address or domain
    Classify(ClassifyArgs),

    /// Check that a token grants API access
    Authorize(AuthorizeArgs),

    /// Create or update an access grant
    Grant(GrantArgs),
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Email address or domain
    pub input: String,

    /// Client address forwarded to the remote lookup
    #[arg(long, default_value = "127.0.0.1")]
    pub ip: IpAddr,
}

/// Arguments for the authorize command.
#[derive(Debug, Parser)]
pub struct AuthorizeArgs {
    /// API token
    pub token: String,
}

/// Arguments for the grant command.
#[derive(Debug, Parser)]
pub struct GrantArgs {
    /// API token
    pub token: String,

    /// Subscription plan
    #[arg(short, long, value_enum, default_value = "trial")]
    pub subscription: SubscriptionArg,

    /// Number of accesses granted
    #[arg(long, default_value = "1000")]
    pub count: u64,

    /// Seconds until the subscription expires
    #[arg(long, default_value = "2592000")]
    pub expires_in: u64,
}

/// Subscription argument (maps to domain SubscriptionType).
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SubscriptionArg {
    /// Trial plan
    Trial,
    /// Startup plan
    Startup,
    /// Business plan
    Business,
}

impl From<SubscriptionArg> for SubscriptionType {
    fn from(arg: SubscriptionArg) -> Self {
        match arg {
            SubscriptionArg::Trial => SubscriptionType::Trial,
            SubscriptionArg::Startup => SubscriptionType::Startup,
            SubscriptionArg::Business => SubscriptionType::Business,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from(["inspect", "classify", "user@example.com", "--ip", "10.1.2.3"])
            .unwrap();
        match cli.command {
            Command::Classify(args) => {
                assert_eq!(args.input, "user@example.com");
                assert_eq!(args.ip, "10.1.2.3".parse::<IpAddr>().unwrap());
            }
            other => panic!("Expected classify, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["inspect", "authorize", "tok", "--json", "-v"]).unwrap();
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_grant_defaults() {
        let cli = Cli::try_parse_from(["inspect", "grant", "tok", "-s", "business"]).unwrap();
        match cli.command {
            Command::Grant(args) => {
                assert!(matches!(args.subscription, SubscriptionArg::Business));
                assert_eq!(args.count, 1000);
                assert_eq!(args.expires_in, 2_592_000);
            }
            other => panic!("Expected grant, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_ip_rejected() {
        assert!(Cli::try_parse_from(["inspect", "classify", "a.com", "--ip", "nope"]).is_err());
    }
}

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Args, Parser, Subcommand};

use weekroster_core::config::DEFAULT_CONFIG_PATH;
use weekroster_notify::webhook::DEFAULT_TIMEOUT;

/// Four-week rotation tracker.
///
/// Works out which week type is active for any date and, when invoked by a
/// scheduler about once a minute, announces next week's type on Sunday at the
/// configured local time.
#[derive(Parser, Debug)]
#[command(name = "weekroster", version, about)]
pub struct CliArgs {
    /// Path to the rotation config JSON file
    #[arg(long, global = true, env = "WEEKROSTER_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one scheduler tick: announce next week's type if this is the send minute
    Notify(NotifyArgs),

    /// Print the current and next week type
    Status {
        /// Reference date (default: today in the configured timezone)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the roster table with the current and next rows marked
    Table {
        /// Member whose name is highlighted (overrides `user` from the config)
        #[arg(long)]
        member: Option<String>,

        /// Disable colors; matches are marked with brackets instead
        #[arg(long)]
        plain: bool,

        /// Reference date (default: today in the configured timezone)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Debug)]
pub struct NotifyArgs {
    /// Log the message instead of posting it to the webhook
    #[arg(long)]
    pub dry_run: bool,

    /// Send now, skipping the Sunday send-time check
    #[arg(long)]
    pub force: bool,

    /// Pretend the current time is this RFC 3339 timestamp
    #[arg(long)]
    pub at: Option<DateTime<FixedOffset>>,

    /// Webhook request timeout in seconds
    #[arg(
        long,
        env = "WEEKROSTER_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_notify_flags() {
        let args = CliArgs::try_parse_from([
            "weekroster",
            "notify",
            "--dry-run",
            "--at",
            "2025-09-21T09:00:00+02:00",
        ])
        .unwrap();
        match args.command {
            Command::Notify(n) => {
                assert!(n.dry_run);
                assert!(!n.force);
                assert_eq!(n.at.unwrap().to_rfc3339(), "2025-09-21T09:00:00+02:00");
            }
            other => panic!("expected notify, got {other:?}"),
        }
    }

    #[test]
    fn parses_status_date_and_global_config() {
        let args = CliArgs::try_parse_from([
            "weekroster",
            "status",
            "--date",
            "2025-10-04",
            "--config",
            "other.json",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("other.json"));
        match args.command {
            Command::Status { date } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 4));
            }
            other => panic!("expected status, got {other:?}"),
        }
    }

    #[test]
    fn timeout_defaults_to_webhook_default_and_rejects_zero() {
        let args = CliArgs::try_parse_from(["weekroster", "notify"]).unwrap();
        match args.command {
            Command::Notify(n) => assert_eq!(n.timeout, DEFAULT_TIMEOUT.as_secs()),
            other => panic!("expected notify, got {other:?}"),
        }

        assert!(CliArgs::try_parse_from(["weekroster", "notify", "--timeout", "0"]).is_err());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(CliArgs::try_parse_from(["weekroster", "status", "--date", "04/10/2025"]).is_err());
    }
}

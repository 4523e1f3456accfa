mod cli;
mod render;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;

use weekroster_core::config::load_dotenv;
use weekroster_core::{FixedTimeSource, RotationConfig, SystemTimeSource, TimeSource};
use weekroster_notify::{
    DryRunNotifier, Notifier, NotifyError, TickOutcome, WebhookNotifier, WeeklyAnnouncer,
};

use crate::cli::{CliArgs, Command, NotifyArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so table/status output stays clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    load_dotenv();
    let args = CliArgs::parse();

    let config = RotationConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    config.log_summary();

    match args.command {
        Command::Notify(notify) => run_notify(&config, notify).await,
        Command::Status { date } => {
            let date = date.unwrap_or_else(|| today(&config));
            for line in render::status_lines(&config, date) {
                println!("{line}");
            }
            Ok(())
        }
        Command::Table {
            member,
            plain,
            date,
        } => {
            let date = date.unwrap_or_else(|| today(&config));
            let pair = config.clock().current_and_next(date);
            let config = match member {
                Some(m) => RotationConfig {
                    roster: config.roster.clone().with_member(Some(m)),
                    ..config
                },
                None => config,
            };
            render::print_table(&config, pair, plain)
        }
    }
}

/// Today's date in the configured timezone.
fn today(config: &RotationConfig) -> chrono::NaiveDate {
    SystemTimeSource::new(config.timezone).local_now().date
}

async fn run_notify(config: &RotationConfig, args: NotifyArgs) -> Result<()> {
    let announcer = WeeklyAnnouncer::from_config(config);

    let time: Box<dyn TimeSource> = match args.at {
        Some(at) => Box::new(FixedTimeSource::at_utc(at.with_timezone(&Utc), config.timezone)),
        None => Box::new(SystemTimeSource::new(config.timezone)),
    };

    let timeout = Duration::from_secs(args.timeout);
    let dry_run = args.dry_run;
    info!(dry_run, force = args.force, timeout_secs = args.timeout, "running notify tick");
    let connect = move || -> Result<Box<dyn Notifier>, NotifyError> {
        if dry_run {
            Ok(Box::new(DryRunNotifier))
        } else {
            Ok(Box::new(WebhookNotifier::from_env(timeout)?))
        }
    };

    if args.force {
        let announcement = announcer
            .announce_now(time.as_ref(), connect)
            .await
            .context("failed to send announcement")?;
        println!("Sent: {}", announcement.text);
        return Ok(());
    }

    match announcer
        .tick(time.as_ref(), connect)
        .await
        .context("failed to send announcement")?
    {
        TickOutcome::Skipped { .. } => {
            println!("Not send window; skipping.");
        }
        TickOutcome::Sent(announcement) => {
            println!("Sent: {}", announcement.text);
        }
    }
    Ok(())
}

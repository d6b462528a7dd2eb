use std::io::{self, IsTerminal};
use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use adex_cli::config::{AuditConfig, load_config};
use adex_cli::pipeline::{AuditOutcome, Exports, SourceSelection, run_audit, write_exports};
use adex_report::{catalog_table, print_details, print_summary};

use crate::cli::ValidateArgs;

pub fn run_rules() {
    println!("{}", catalog_table());
}

pub fn run_validate(args: &ValidateArgs, config_path: Option<&Path>) -> Result<AuditOutcome> {
    let config = load_config(config_path)?;
    let mut options = config.validation.clone();
    if let Some(policy) = args.version_policy {
        options.version_policy = policy.into();
    }
    if let Some(mode) = args.period_conflicts {
        options.period_conflicts = mode.into();
    }

    let selection = select_source(args, &config)?;
    let source = selection.open()?;
    info!(source = %source.describe(), "Starting audit");

    let spinner = spinner("Fetching configuration snapshots...");
    let outcome = run_audit(source.as_ref(), &options, &config.source.app_key);
    spinner.finish_and_clear();
    let outcome = outcome?;

    print_summary(&outcome.report);
    if !args.summary_only {
        print_details(&outcome.report);
    }

    let exports = Exports {
        csv: args.csv.clone(),
        pdf: args.pdf.clone(),
        json: args.json.clone(),
        csv_quoting: args.csv_quoting.map_or(config.export.csv_quoting, Into::into),
    };
    if !exports.is_empty() {
        for path in write_exports(&outcome, &options, &exports)? {
            println!("Wrote {}", path.display());
        }
    }
    Ok(outcome)
}

/// Flags win over the configuration file; a directory wins over a server.
fn select_source(args: &ValidateArgs, config: &AuditConfig) -> Result<SourceSelection> {
    if let Some(dir) = &args.source_dir {
        return Ok(SourceSelection::Directory(dir.clone()));
    }
    let server = match (&args.server, &config.source.snapshot_dir, &config.source.server) {
        (Some(server), _, _) => server.clone(),
        (None, Some(dir), _) => return Ok(SourceSelection::Directory(dir.clone())),
        (None, None, Some(server)) => server.clone(),
        (None, None, None) => {
            bail!("no snapshot source: pass --source-dir or --server, or set one in the configuration file")
        }
    };
    let token_env = args.token_env.as_deref().unwrap_or(&config.source.token_env);
    let token = std::env::var(token_env).ok();
    if token.is_none() {
        info!(token_env, "No API token in environment, requests are unauthenticated");
    }
    let mut releases = config.source.release_urls();
    if let Some(url) = &args.package_release_url {
        releases.package = Some(url.clone());
    }
    if let Some(url) = &args.app_release_url {
        releases.app = Some(url.clone());
    }
    Ok(SourceSelection::Server {
        url: server,
        token,
        releases,
    })
}

fn spinner(message: &str) -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

//! `changelog` command - print the commits separating two refs.

use anyhow::{Context, Result};
use serde::Serialize;
use treesame_core::{Changelog, Config, IdentityStrategy, Report, ReportOptions, Side};
use treesame_git::{Repository, short_oid};

use super::Cli;
use crate::output;

/// A kept commit, as printed by `--json`.
#[derive(Debug, Serialize)]
struct EntryJson {
    side: &'static str,
    commit: String,
    short: String,
    merge: bool,
    subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    identity: Option<String>,
}

/// The whole report, as printed by `--json`.
#[derive(Debug, Serialize)]
struct ReportJson {
    tree: String,
    suppressed: usize,
    outside_prefix: usize,
    entries: Vec<EntryJson>,
}

/// Run the changelog command.
pub fn run(cli: &Cli) -> Result<()> {
    let repo = Repository::open(&cli.repo_path)
        .with_context(|| format!("Cannot open repository at {}", cli.repo_path.display()))?;
    let config = Config::load_from_git_dir(repo.git_dir())?;
    let short_len = cli
        .short_len
        .map_or(config.output.short_hash_len, usize::from);

    let log = Changelog::between(&repo, &cli.from_ref, &cli.to_ref)?;
    output::info(&format!(
        "shared tree {} found after expanding {} commits",
        short_oid(log.tree, short_len),
        log.expanded
    ));
    output::info(&format!(
        "{} commits removed, {} commits added",
        log.from.len(),
        log.to.len()
    ));

    let options = ReportOptions {
        prefix: cli.prefix.clone(),
        identity: identity_strategy(cli, &config),
        trailer: config.identity.trailer.clone(),
    };
    let report = Report::build(&repo, &log, &options)?;

    for warning in &report.warnings {
        output::warn(&warning.to_string());
    }
    if report.suppressed > 0 {
        output::info(&format!(
            "{} commits hidden as cherry-picks",
            report.suppressed
        ));
    }

    if cli.json {
        print_json(&report, short_len)?;
    } else {
        for line in report.lines(short_len) {
            output::essential(&line);
        }
    }

    Ok(())
}

/// Pick the identity strategy: `--cherry-picks` disables matching,
/// `--gerrit` forces trailers, otherwise the configured strategy applies.
fn identity_strategy(cli: &Cli, config: &Config) -> Option<IdentityStrategy> {
    if cli.cherry_picks {
        None
    } else if cli.gerrit {
        Some(IdentityStrategy::Trailer)
    } else {
        Some(config.identity.strategy)
    }
}

/// Print the report as JSON.
fn print_json(report: &Report, short_len: usize) -> Result<()> {
    let json = ReportJson {
        tree: report.tree.to_string(),
        suppressed: report.suppressed,
        outside_prefix: report.outside_prefix,
        entries: report
            .entries
            .iter()
            .map(|e| EntryJson {
                side: match e.side {
                    Side::From => "from",
                    Side::To => "to",
                },
                commit: e.commit.id.to_string(),
                short: e.commit.short_id(short_len),
                merge: e.commit.is_merge(),
                subject: e.commit.subject.clone(),
                identity: e.identity.as_ref().map(ToString::to_string),
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::info;

use battery_monitor::config::Config;
use battery_monitor::generator::ReportGenerator;
use battery_monitor::items::section_items;
use battery_monitor::models::{HistoryEntry, Section};
use battery_monitor::report::{format_summary, parse_report};
use battery_monitor::storage::{HistoryStore, JsonHistoryStore};

#[derive(Parser)]
#[command(
    name = "battery-monitor",
    about = "Windows battery report parser and history browser",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new battery report with powercfg and add it to the history
    Generate,
    /// List the stored report history
    History,
    /// Show the sections of a stored report (1-based history index)
    Show {
        index: usize,
        /// Section key (overview, installed, recent, battery_usage,
        /// capacity_history, usage_history, life_estimates); all when omitted
        #[arg(long)]
        section: Option<String>,
        /// Reverse the item order (the life-estimates average stays first)
        #[arg(long)]
        oldest_first: bool,
        /// Limit the number of items shown per section
        #[arg(long)]
        rows: Option<usize>,
        /// Print each item's detail text as well
        #[arg(long)]
        details: bool,
    },
    /// Delete one stored report and its HTML file (1-based history index)
    Delete { index: usize },
    /// Delete all stored reports and their HTML files
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("battery_monitor=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Arc::new(Config::load()?);
    let store = JsonHistoryStore::new(config.history_path.clone(), config.history_cap);

    match cli.command {
        Command::Generate => generate(&config, &store).await,
        Command::History => history(&store).await,
        Command::Show { index, section, oldest_first, rows, details } => {
            show(&store, index, section.as_deref(), oldest_first, rows, details).await
        }
        Command::Delete { index } => delete(&store, index).await,
        Command::Clear => clear(&store).await,
    }
}

async fn generate(config: &Arc<Config>, store: &JsonHistoryStore) -> Result<()> {
    let generator = ReportGenerator::new(config.clone());
    let (path, html) = generator.generate().await?;

    let report = parse_report(&html);
    let summary = format_summary(&report);
    info!("Report generated: {}", summary);

    let mut entries = store.load().await;
    entries.insert(
        0,
        HistoryEntry {
            summary: summary.clone(),
            path,
            info: report.clone(),
        },
    );
    store.save(&entries).await;

    println!("{}", summary);
    match (report.health_pct, report.design_mwh, report.full_mwh) {
        (Some(health), Some(design), Some(full)) => {
            use battery_monitor::report::group_thousands;
            println!(
                "Report generated. Battery health: {}% ({}/{} mWh)",
                health,
                group_thousands(full),
                group_thousands(design)
            );
        }
        _ => println!("Report generated."),
    }
    Ok(())
}

async fn history(store: &JsonHistoryStore) -> Result<()> {
    let entries = store.load().await;
    if entries.is_empty() {
        println!("No battery reports found.");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("{:3}. {}", i + 1, entry.summary);
    }
    Ok(())
}

fn entry_at(entries: &[HistoryEntry], index: usize) -> Result<&HistoryEntry> {
    if index == 0 || index > entries.len() {
        bail!("No report at index {} (history holds {})", index, entries.len());
    }
    Ok(&entries[index - 1])
}

async fn show(
    store: &JsonHistoryStore,
    index: usize,
    section: Option<&str>,
    oldest_first: bool,
    rows: Option<usize>,
    details: bool,
) -> Result<()> {
    let entries = store.load().await;
    let entry = entry_at(&entries, index)?;
    println!("{}", entry.summary);

    let sections: Vec<Section> = match section {
        Some(key) => match Section::from_key(key) {
            Some(section) => vec![section],
            None => bail!("Unknown section key: {}", key),
        },
        None => Section::ALL.to_vec(),
    };

    for section in sections {
        println!("\n== {} ==", section.title());
        let list = section_items(&entry.info, section);
        for item in list.view(oldest_first, rows) {
            println!("{}", item.line);
            if details {
                println!("    {}", item.detail.replace('\n', "\n    "));
            }
        }
    }
    Ok(())
}

async fn delete(store: &JsonHistoryStore, index: usize) -> Result<()> {
    let mut entries = store.load().await;
    entry_at(&entries, index)?;
    let entry = entries.remove(index - 1);
    if tokio::fs::remove_file(&entry.path).await.is_err() {
        info!("Report file {} was already gone", entry.path.display());
    }
    store.save(&entries).await;
    println!("Deleted: {}", entry.summary);
    Ok(())
}

async fn clear(store: &JsonHistoryStore) -> Result<()> {
    let entries = store.load().await;
    for entry in &entries {
        let _ = tokio::fs::remove_file(&entry.path).await;
    }
    store.save(&[]).await;
    println!("History cleared ({} reports removed).", entries.len());
    Ok(())
}

use chrono::NaiveDate;
use clap::Parser;
use colored::Colorize;
use scythe_core::{ResourceKind, RunConfig};
use scythe_reap::{ApiClient, RunReport, fetch_stale, run_batch};

#[derive(Parser)]
#[command(name = "scythe", version)]
#[command(about = "Sweep stale remote resources past their cutoff date", long_about = None)]
struct Cli {
    /// Base URL of the target API, e.g. https://example.com/api/v4
    #[arg(long, env = "API_BASE")]
    api_base: String,

    /// Credential presented as a bearer token
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Cutoff date (YYYY-MM-DD); only resources created strictly before it
    /// are eligible. Defaults to yesterday.
    #[arg(long, env = "DELETE_BEFORE")]
    delete_before: Option<NaiveDate>,

    /// Report what would be deleted without issuing any delete request
    #[arg(long, env = "DRY_RUN")]
    dry_run: bool,

    /// Follow the soft delete with a permanent delete
    #[arg(long, env = "PERMANENTLY_DELETE")]
    permanently_delete: bool,

    /// Resource kinds to sweep (project, group, user)
    #[arg(
        long = "kind",
        value_delimiter = ',',
        default_values_t = [ResourceKind::Project, ResourceKind::Group]
    )]
    kinds: Vec<ResourceKind>,

    /// Listing page size
    #[arg(long, default_value_t = scythe_core::config::DEFAULT_PER_PAGE)]
    per_page: u32,

    /// Safety cutoff on listing pages per kind
    #[arg(long, default_value_t = scythe_core::config::DEFAULT_MAX_PAGES)]
    max_pages: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = RunConfig::new(cli.api_base, cli.api_token);
    if let Some(date) = cli.delete_before {
        config.delete_before = date;
    }
    config.dry_run = cli.dry_run;
    config.permanently_delete = cli.permanently_delete;
    config.per_page = cli.per_page;
    config.max_pages = cli.max_pages;

    // A kind passed twice would double-process its resources
    let mut kinds: Vec<ResourceKind> = Vec::new();
    for kind in cli.kinds {
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    tracing::debug!(
        "Sweeping {:?} with cutoff {}",
        kinds,
        config.delete_before
    );
    let client = ApiClient::new(&config.api_base, &config.token);

    if config.dry_run {
        println!(
            "{}",
            "Dry run: no delete request will be issued.".yellow().bold()
        );
    }

    let mut outcomes = Vec::new();
    for kind in kinds {
        println!(
            "{}",
            format!("Sweeping {}s created before {}...", kind, config.delete_before).bold()
        );
        let resources = fetch_stale(&client, kind, &config).await?;
        println!("  {} stale {}(s) found", resources.len(), kind);
        outcomes.extend(run_batch(&client, &resources, &config).await?);
    }

    if config.dry_run {
        println!();
        println!("{}", "✓ Dry run complete.".green().bold());
        return Ok(());
    }

    let report = RunReport::from_outcomes(&outcomes);
    println!();
    println!("{report}");

    if report.has_failures() {
        println!();
        println!(
            "{}",
            "Failed deletions are retryable: re-running the sweep is safe.".dimmed()
        );
        anyhow::bail!("{} resource(s) failed to delete", report.failed().len());
    }

    Ok(())
}

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use treepledge::export::{self, DEFAULT_UTC_OFFSET_SECS, ExportOptions};
use treepledge::{CsvStore, Snapshot, Status, StatusFilter, SubmissionStore, init, report};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Submissions CSV file
    #[arg(
        short,
        long,
        global = true,
        env = "TREEPLEDGE_DATA",
        default_value = "submissions.csv"
    )]
    data: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "TREEPLEDGE_LOG", default_value = "info")]
    log_level: String,

    /// UTC offset in seconds for exported dates and times
    #[arg(
        long,
        global = true,
        env = "TREEPLEDGE_UTC_OFFSET",
        default_value_t = DEFAULT_UTC_OFFSET_SECS,
        allow_hyphen_values = true
    )]
    utc_offset: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty submissions file
    Init { file: PathBuf },
    /// Print planted, adopted and collected totals
    Summary {
        #[arg(long, value_enum, default_value_t = FilterArg::Confirmed)]
        status: FilterArg,
        #[arg(long)]
        json: bool,
    },
    /// List contributors with their aggregated totals
    People {
        #[arg(long)]
        json: bool,
    },
    /// Write a timestamped CSV export
    Export {
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Export aggregated contributors instead of submissions
        #[arg(long)]
        people: bool,
    },
    /// Generate an XLSX report
    Report {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Mark a submission pending or confirmed
    SetStatus { id: String, status: Status },
    /// Remove a submission
    Delete { id: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    Confirmed,
    Pending,
    All,
}

impl From<FilterArg> for StatusFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Confirmed => StatusFilter::Confirmed,
            FilterArg::Pending => StatusFilter::Pending,
            FilterArg::All => StatusFilter::All,
        }
    }
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    init_tracing(&args.log_level);

    let opts = ExportOptions {
        utc_offset_secs: args.utc_offset,
    };
    let mut store = CsvStore::new(&args.data);

    match args.command {
        Command::Init { file } => {
            let path =
                init::init_csv(&file).with_context(|| format!("creating {}", file.display()))?;
            println!("Created {}", path.display());
        }
        Command::Summary { status, json } => {
            let snapshot = load(&store, status.into())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                let t = &snapshot.totals;
                println!(
                    "Submissions:      {} confirmed, {} pending",
                    snapshot.counts.confirmed, snapshot.counts.pending
                );
                println!("Trees planted:    {}", t.total_planted);
                println!("Trees adopted:    {}", t.total_adopted);
                println!("Amount collected: {}", t.total_collected);
            }
        }
        Command::People { json } => {
            let snapshot = load(&store, StatusFilter::Confirmed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.people)?);
            } else {
                for p in &snapshot.people {
                    println!(
                        "{:<30} {:<10} planted {:>4}  adopted {:>4}  pledged {}  donated {}",
                        p.full_name,
                        p.designation_tier,
                        p.total_planted,
                        p.total_adopted,
                        p.total_contribution,
                        p.total_donation
                    );
                }
                let t = &snapshot.people_totals;
                println!(
                    "{} contributors, {} planted, {} adopted, {} pledged",
                    t.people, t.total_planted, t.total_adopted, t.total_contribution
                );
            }
        }
        Command::Export { out_dir, people } => {
            let snapshot = load(&store, StatusFilter::Confirmed)?;
            let path = if people {
                export::export_people(&out_dir, &snapshot.people, &opts, Utc::now())
            } else {
                export::export_submissions(&out_dir, &snapshot.submissions, &opts, Utc::now())
            }
            .with_context(|| format!("exporting to {}", out_dir.display()))?;
            println!("Exported {}", path.display());
        }
        Command::Report { output } => {
            let snapshot = load(&store, StatusFilter::Confirmed)?;
            let output = output.unwrap_or_else(|| report::default_report_path(store.path()));
            report::generate_report(&snapshot, &output, &opts, Utc::now())
                .with_context(|| format!("writing {}", output.display()))?;
            println!("Report generated: {}", output.display());
        }
        Command::SetStatus { id, status } => {
            store
                .set_status(&id, status)
                .with_context(|| format!("updating {}", id))?;
            println!("{} is now {}", id, status);
        }
        Command::Delete { id } => {
            store
                .delete_submission(&id)
                .with_context(|| format!("deleting {}", id))?;
            tracing::info!(id = %id, "submission deleted");
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

fn load(store: &CsvStore, filter: StatusFilter) -> Result<Snapshot> {
    Snapshot::load(store, filter).with_context(|| format!("reading {}", store.path().display()))
}

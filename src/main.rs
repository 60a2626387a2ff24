mod carousel;
mod client;
mod fetch;
mod models;
mod report;
mod tui;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use client::{ApiClient, JobsApi};
use models::Analytics;
use report::truncate;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";

#[derive(Parser)]
#[command(name = "hireboard")]
#[command(about = "Hiring dashboard - browse job postings and candidate analytics")]
struct Cli {
    /// API base URL (defaults to $HIREBOARD_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Company whose job postings to load
    #[arg(long, default_value = "2224")]
    company: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Dash,

    /// Print the company's job list
    Jobs,

    /// Print an analytics summary for one job
    Analytics {
        /// Job ID
        job_id: i64,
    },
}

fn resolve_base_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("HIREBOARD_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

// The dashboard owns the terminal, so its log output goes to a file under
// the XDG data directory instead of stderr.
fn init_file_logging() -> Result<()> {
    let path = if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "hireboard") {
        let dir = proj_dirs.data_dir().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        dir.join("hireboard.log")
    } else {
        std::path::PathBuf::from("hireboard.log")
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hireboard=info")),
        )
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hireboard=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_url = resolve_base_url(cli.base_url);

    match cli.command {
        Commands::Dash => {
            init_file_logging()?;
            let client = ApiClient::new(&base_url);
            tui::run_dashboard(client, cli.company)
        }

        Commands::Jobs => {
            init_stderr_logging();
            let client = ApiClient::new(&base_url);
            let jobs = client.fetch_jobs(cli.company)?;
            if jobs.is_empty() {
                println!("No jobs found.");
                return Ok(());
            }
            println!("{} Jobs Created", jobs.len());
            println!(
                "{:<8} {:<34} {:<22} {:>12} {:>14} {:>10}",
                "ID", "TITLE", "POSTED", "SUBMISSIONS", "APPLICATIONS", "COMPLETED"
            );
            println!("{}", "-".repeat(105));
            let now = Utc::now();
            for job in jobs {
                println!(
                    "{:<8} {:<34} {:<22} {:>12} {:>14} {:>10}",
                    job.job_id,
                    truncate(&job.job_title, 32),
                    report::posted_label(&job.created_date, now),
                    job.total_submissions.unwrap_or(0),
                    job.total_applications.unwrap_or(0),
                    job.completed_submissions.unwrap_or(0)
                );
            }
            Ok(())
        }

        Commands::Analytics { job_id } => {
            init_stderr_logging();
            let client = ApiClient::new(&base_url);
            let analytics = client.fetch_analytics(job_id)?;
            print_analytics(job_id, &analytics);
            Ok(())
        }
    }
}

fn print_analytics(job_id: i64, analytics: &Analytics) {
    println!("Analytics for job #{job_id}");
    println!();

    println!("Overview");
    for (stage, count) in report::stage_series(&analytics.overview) {
        println!("  {stage:<10} {count}");
    }
    println!("  {:<10} {}", "Not started", analytics.overview.not_started);
    if !analytics.timeline.is_empty() {
        let first = &analytics.timeline[0];
        let last = &analytics.timeline[analytics.timeline.len() - 1];
        println!(
            "  Timeline: {} points ({} to {})",
            analytics.timeline.len(),
            first.date,
            last.date
        );
    }

    println!();
    println!("Video Assessment");
    println!(
        "  Average score: {:.1}/10, above ideal: {}",
        analytics.video_assessment.average_score, analytics.video_assessment.above_ideal
    );
    for emotion in &analytics.video_assessment.emotional_analysis {
        println!("  {:<10} {}", emotion.emotion, emotion.count);
    }

    println!();
    println!("Resume Analysis");
    println!(
        "  Keyword match: {:.0}%, relevance: {:.0}%",
        analytics.resume_analysis.keyword_match, analytics.resume_analysis.relevance_score
    );

    println!();
    println!("MCQ Performance");
    println!(
        "  Average score: {:.1}/10, above ideal: {}",
        analytics.mcq_performance.average_score, analytics.mcq_performance.above_ideal
    );
    for level in &analytics.mcq_performance.difficulty_analysis {
        println!(
            "  {:<10} {:.0}% ({}/{})",
            level.level, level.success_rate, level.correct, level.total
        );
    }

    println!();
    println!("Case Study");
    println!(
        "  Average score: {:.1}/10, completion rate: {:.0}%",
        analytics.case_study.average_score, analytics.case_study.completion_rate
    );
    for insight in &analytics.case_study.key_insights {
        println!("  - {insight}");
    }

    println!();
    println!("Technical Insights");
    match &analytics.technical_insights {
        Some(tech) => {
            match &tech.tab_switching {
                Some(tabs) => {
                    for line in report::integrity_lines(tabs) {
                        println!("  - {line}");
                    }
                }
                None => println!("  No tab-switch data recorded"),
            }
            let pct = |value: Option<u32>| match value {
                Some(p) => format!("{p}%"),
                None => "N/A".to_string(),
            };
            println!(
                "  Screen recording success: {}",
                pct(report::success_pct(tech.screen_recording_success, tech.total_responses))
            );
            println!(
                "  Video upload success: {}",
                pct(report::success_pct(tech.video_upload_success, tech.total_responses))
            );
        }
        None => println!("  No technical data available"),
    }

    println!();
    println!("Geography");
    if analytics.geography.is_empty() {
        println!("  No location data");
    } else {
        for point in &analytics.geography {
            println!("  {:<24} {}", truncate(&point.home_address, 22), point.candidate_count);
        }
    }
}

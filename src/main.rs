use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gitready::models::{AnalysisReport, ProfileBundle};
use gitready::{
    parse_username, AnalysisPipeline, Config, Error, ErrorKind, GitHubClient, PipelineConfig,
    ScoringEngine,
};

#[derive(Parser, Debug)]
#[command(name = "gitready")]
#[command(version = "0.1.0")]
#[command(about = "Score how recruiter-ready a GitHub profile looks")]
struct Args {
    /// GitHub username or profile URL (e.g. https://github.com/octocat)
    #[arg(required_unless_present = "bundle")]
    user: Option<String>,

    /// Output format (json, text, markdown)
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,

    /// Score a saved profile bundle instead of calling GitHub
    #[arg(long)]
    bundle: Option<String>,

    /// Write the fetched profile bundle to this file
    #[arg(long, conflicts_with = "bundle")]
    dump_bundle: Option<String>,

    /// Evaluation instant in RFC 3339 (defaults to now)
    #[arg(long)]
    now: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gitready=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let config = Config::from_env()?;

    let now = match args.now {
        Some(ref raw) => DateTime::parse_from_rfc3339(raw)
            .with_context(|| format!("Invalid --now timestamp: {}", raw))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };

    let (subject, result) = match args.bundle {
        // Offline scoring never touches the network
        Some(ref path) => {
            let bundle = read_bundle(path)?;
            let login = bundle.profile.login.clone();
            (login, ScoringEngine::new().analyze_bundle(bundle, now))
        }
        None => {
            let raw = args.user.as_deref().unwrap_or_default();
            let username = parse_username(raw).ok_or_else(|| {
                anyhow!("Please enter a valid GitHub username or profile URL.")
            })?;

            let github = GitHubClient::from_config(&config)?;
            let pipeline = AnalysisPipeline::new(github, PipelineConfig::from(&config));

            tracing::info!("Starting analysis for GitHub user: {}", username);
            let result = analyze(&pipeline, &username, args.dump_bundle.as_deref(), now).await;
            (username, result)
        }
    };

    match result {
        Ok(report) => output_report(&report, &args),
        Err(err) => {
            let code = report_failure(&err, &subject, &args)?;
            std::process::exit(code);
        }
    }
}

async fn analyze(
    pipeline: &AnalysisPipeline,
    username: &str,
    dump_path: Option<&str>,
    now: DateTime<Utc>,
) -> gitready::Result<AnalysisReport> {
    let bundle = pipeline.fetch_bundle(username).await?;

    if let Some(path) = dump_path {
        std::fs::write(path, serde_json::to_string_pretty(&bundle)?)?;
        tracing::info!("Profile bundle written to: {}", path);
    }

    pipeline.analyze_bundle(bundle, now)
}

fn read_bundle(path: &str) -> anyhow::Result<ProfileBundle> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read bundle file: {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse bundle file: {}", path))
}

/// Print the failure the way the caller asked for output, returning the exit code.
fn report_failure(err: &Error, username: &str, args: &Args) -> anyhow::Result<i32> {
    if err.is_programming_error() {
        eprintln!("error: {}", err);
        return Ok(4);
    }

    let kind = err.kind();
    if kind == ErrorKind::InternalError {
        tracing::error!("Analysis error: {}", err);
    }

    let message = err.user_message(username);
    if args.format == "json" {
        let mut body = serde_json::json!({ "error": message });
        if let ErrorKind::RateLimited { retry_after } = kind {
            body["retryAfter"] = retry_after.into();
        }
        write_output(&serde_json::to_string_pretty(&body)?, args)?;
    } else {
        eprintln!("{}", message);
    }

    Ok(match kind {
        ErrorKind::NotFound => 2,
        ErrorKind::RateLimited { .. } => 3,
        ErrorKind::InternalError => 1,
    })
}

fn output_report(report: &AnalysisReport, args: &Args) -> anyhow::Result<()> {
    let output = match args.format.as_str() {
        "json" => serde_json::to_string_pretty(report)?,
        "markdown" => format_markdown(report),
        _ => format_text(report),
    };

    write_output(&output, args)
}

fn write_output(output: &str, args: &Args) -> anyhow::Result<()> {
    if let Some(ref path) = args.output {
        std::fs::write(path, output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_text(report: &AnalysisReport) -> String {
    let user = &report.user;
    let analysis = &report.analysis;
    let dims = &analysis.dimensions;
    let mut output = String::new();

    output.push_str(&format!("\n=== Portfolio Analysis: {} ===\n\n", user.login));

    if let Some(ref name) = user.name {
        output.push_str(&format!("Name: {}\n", name));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("Bio: {}\n", bio));
    }
    output.push_str(&format!(
        "Followers: {}  Following: {}\n\n",
        user.followers, user.following
    ));

    output.push_str(&format!(
        "Recruiter Readiness: {}/100 ({})\n\n",
        analysis.total_score,
        analysis.tier()
    ));

    output.push_str("Dimensions:\n");
    output.push_str(&format!("  Documentation (30%):  {}/100\n", dims.documentation.score));
    output.push_str(&format!("  Consistency (25%):    {}/100\n", dims.consistency.score));
    output.push_str(&format!("  Impact (25%):         {}/100\n", dims.impact.score));
    output.push_str(&format!("  Best Practices (20%): {}/100\n", dims.best_practices.score));

    output.push_str(&format!("\nPublic Repos: {}\n", analysis.total_repos));
    output.push_str(&format!(
        "Active Days (30d): {}\n",
        dims.consistency.details.active_days
    ));
    output.push_str(&format!("Longest Streak: {} days\n", analysis.longest_streak));

    if !analysis.top_languages.is_empty() {
        let languages: Vec<_> = analysis
            .top_languages
            .iter()
            .map(|l| format!("{} ({})", l.name, l.count))
            .collect();
        output.push_str(&format!("Top Languages: {}\n", languages.join(", ")));
    }

    output.push_str("\nStrengths:\n");
    for strength in &analysis.strengths {
        output.push_str(&format!("  + {}\n", strength));
    }

    if !analysis.red_flags.is_empty() {
        output.push_str("\nRed Flags:\n");
        for flag in &analysis.red_flags {
            output.push_str(&format!("  ! {}\n", flag));
        }
    }

    output.push_str("\nRecommendations:\n");
    for rec in &analysis.recommendations {
        output.push_str(&format!("  [{}] {}: {}\n", rec.impact, rec.title, rec.description));
    }

    output
}

fn format_markdown(report: &AnalysisReport) -> String {
    let user = &report.user;
    let analysis = &report.analysis;
    let dims = &analysis.dimensions;
    let mut output = String::new();

    output.push_str(&format!("# Portfolio Analysis: {}\n\n", user.login));

    if let Some(ref name) = user.name {
        output.push_str(&format!("**Name:** {}\n\n", name));
    }
    if let Some(ref bio) = user.bio {
        output.push_str(&format!("> {}\n\n", bio));
    }

    output.push_str(&format!(
        "**Recruiter Readiness:** {}/100 ({})\n\n",
        analysis.total_score,
        analysis.tier()
    ));

    output.push_str("## Dimensions\n\n");
    output.push_str("| Dimension | Weight | Score |\n|-----------|--------|-------|\n");
    output.push_str(&format!("| Documentation | 30% | {} |\n", dims.documentation.score));
    output.push_str(&format!("| Consistency | 25% | {} |\n", dims.consistency.score));
    output.push_str(&format!("| Impact | 25% | {} |\n", dims.impact.score));
    output.push_str(&format!("| Best Practices | 20% | {} |\n", dims.best_practices.score));

    output.push_str("\n## Activity\n\n");
    output.push_str("| Metric | Value |\n|--------|-------|\n");
    output.push_str(&format!("| Public Repos | {} |\n", analysis.total_repos));
    output.push_str(&format!(
        "| Active Days (30d) | {} |\n",
        dims.consistency.details.active_days
    ));
    output.push_str(&format!("| Longest Streak | {} days |\n", analysis.longest_streak));
    if let Some(top) = analysis.top_languages.first() {
        output.push_str(&format!("| Top Language | {} |\n", top.name));
    }

    output.push_str("\n## Strengths\n\n");
    for strength in &analysis.strengths {
        output.push_str(&format!("- {}\n", strength));
    }

    if !analysis.red_flags.is_empty() {
        output.push_str("\n## Red Flags\n\n");
        for flag in &analysis.red_flags {
            output.push_str(&format!("- {}\n", flag));
        }
    }

    output.push_str("\n## Recommendations\n\n");
    for rec in &analysis.recommendations {
        output.push_str(&format!(
            "- **{}** ({} impact): {}\n",
            rec.title, rec.impact, rec.description
        ));
    }

    output
}

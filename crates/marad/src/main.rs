//! mara daemon - math question routing agent.
//!
//! One-shot solving, an interactive loop, and inspection of the
//! activity log and store statistics, all over the same in-process
//! pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use marad::config::RouterConfig;
use marad::feedback::FeedbackLearner;
use marad::knowledge::KnowledgeBase;
use marad::orchestrator::Orchestrator;
use marad::storage::MemoryStore;
use marad::websearch::WebSearch;
use mara_shared::{MaraError, SolveResponse};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "marad", version, about = "Math question routing agent")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Solve a single problem and print the derivation
    Solve {
        /// The problem text
        problem: Vec<String>,
        /// Print the raw response envelope as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read problems from stdin until EOF
    Interactive,
    /// Show the most recent activity records
    Activity {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show store statistics and component status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("marad v{} starting", mara_shared::VERSION);

    let orchestrator = build_orchestrator().await?;

    match Cli::parse().command.unwrap_or(Command::Interactive) {
        Command::Solve { problem, json } => {
            let text = problem.join(" ");
            if text.trim().is_empty() {
                anyhow::bail!("no problem text given");
            }
            solve_one(&orchestrator, &text, json).await?;
        }
        Command::Interactive => interactive(&orchestrator).await?,
        Command::Activity { limit } => {
            for activity in orchestrator.recent_activity(limit).await {
                println!(
                    "{}  {:<20} {:<16} {}",
                    activity.created_at.format("%Y-%m-%d %H:%M:%S"),
                    activity.action,
                    activity.source,
                    activity.detail.unwrap_or_default()
                );
            }
        }
        Command::Status => {
            let report = orchestrator.status().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

async fn build_orchestrator() -> Result<Orchestrator> {
    let config = RouterConfig::from_env();
    let store = Arc::new(MemoryStore::new());
    let knowledge = Arc::new(KnowledgeBase::seeded().await);
    let search = Arc::new(
        WebSearch::new(config.search.clone()).context("failed to build search client")?,
    );
    let learner = Arc::new(FeedbackLearner::new());

    Ok(Orchestrator::new(store, knowledge, search, learner, config))
}

async fn solve_one(orchestrator: &Orchestrator, text: &str, json: bool) -> Result<()> {
    match orchestrator.solve(text).await {
        Ok(response) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                render(&response);
            }
            Ok(())
        }
        Err(e @ MaraError::InvalidInput { .. }) => {
            eprintln!("{} {}", style("rejected:").red().bold(), e);
            Ok(())
        }
        Err(e) => Err(e).context("solve failed"),
    }
}

async fn interactive(orchestrator: &Orchestrator) -> Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "{} ", style("mara>").cyan().bold())?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            break;
        }

        solve_one(orchestrator, line, false).await?;
    }

    Ok(())
}

fn render(response: &SolveResponse) {
    println!();
    println!(
        "{} [{} · {} · {:.0}% confidence · {} ms]",
        style("Solution").green().bold(),
        response.category,
        response.source,
        response.confidence_score * 100.0,
        response.response_time_ms
    );

    for step in &response.solution.steps {
        println!();
        println!(
            "  {} {}",
            style(format!("{}.", step.index)).bold(),
            style(&step.title).bold()
        );
        println!("     {}", step.content.replace('\n', "\n     "));
        println!("     {}", style(&step.explanation).dim());
    }

    println!();
    println!(
        "  {} {}",
        style("Answer:").green().bold(),
        response.solution.final_answer
    );

    if !response.solution.sources.is_empty() {
        println!();
        for source in &response.solution.sources {
            println!("  {} {} ({})", style("src").dim(), source.title, source.url);
        }
    }
    println!();
}

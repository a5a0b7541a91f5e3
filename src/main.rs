// Scoutcard entry point.
//
// Startup sequence:
// 1. Initialize tracing (stderr, so stdout stays clean for the card)
// 2. Load config (copying defaults on first run)
// 3. Build the Gemini client from credentials
// 4. One-shot mode when a query is given on the command line, otherwise an
//    interactive loop reading queries from stdin

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

use scoutcard::app::{SearchSession, USER_FACING_ERROR};
use scoutcard::config;
use scoutcard::llm::ScoutClient;
use scoutcard::render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("scoutcard starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        model = %config.gemini.model,
        temperature = config.gemini.temperature,
        "configuration loaded"
    );

    let client = Arc::new(ScoutClient::from_config(&config));
    match client.as_ref() {
        ScoutClient::Active(_) => info!("Gemini client initialized (API key configured)"),
        ScoutClient::Disabled => info!("Gemini client disabled (no API key)"),
    }

    let (events_tx, mut events_rx) = mpsc::channel(8);
    let mut session = SearchSession::new(client, events_tx);

    let argv_query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !argv_query.trim().is_empty() {
        return one_shot(&mut session, &mut events_rx, &argv_query).await;
    }

    interactive(&mut session, &mut events_rx).await
}

/// Scout a single player given on the command line, print the card, exit.
/// Exits non-zero on failure so scripts can tell the difference.
async fn one_shot(
    session: &mut SearchSession,
    events_rx: &mut mpsc::Receiver<scoutcard::app::SearchEvent>,
    query: &str,
) -> anyhow::Result<()> {
    session
        .begin_search(query)
        .context("query must not be empty")?;

    let event = events_rx
        .recv()
        .await
        .context("search task ended without reporting")?;
    session.handle_event(event);

    match session.current() {
        Some(profile) => {
            println!("{}", render::render_profile(profile));
            Ok(())
        }
        None => {
            eprintln!("{}", session.last_error().unwrap_or(USER_FACING_ERROR));
            std::process::exit(1);
        }
    }
}

/// Read queries from stdin, one per line. A new query supersedes any search
/// still in flight; only the latest generation's result is ever shown.
async fn interactive(
    session: &mut SearchSession,
    events_rx: &mut mpsc::Receiver<scoutcard::app::SearchEvent>,
) -> anyhow::Result<()> {
    println!("Type a player name to scout (e.g. \"Lamine Yamal\", \"Zidane 2002\"); \"quit\" to exit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read stdin")? {
                    None => break, // EOF
                    Some(line) => {
                        let query = line.trim();
                        if query.is_empty() {
                            continue;
                        }
                        if query.eq_ignore_ascii_case("quit") || query.eq_ignore_ascii_case("exit") {
                            break;
                        }
                        session.begin_search(query);
                        println!("Scouting {query}...");
                    }
                }
            }
            event = events_rx.recv() => {
                let Some(event) = event else { break };
                if !session.handle_event(event) {
                    continue; // stale generation, keep waiting for the latest
                }
                match session.current() {
                    Some(profile) => println!("{}", render::render_profile(profile)),
                    None => println!("{}", session.last_error().unwrap_or(USER_FACING_ERROR)),
                }
            }
        }
    }

    info!("scoutcard shut down cleanly");
    Ok(())
}

/// Initialize tracing to stderr so stdout carries only rendered output.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scoutcard=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

//! Campus - campus communication dashboard
//!
//! Opens the local record store, seeds demo data on first run, and reports
//! the dashboard for the signed-in user.

use std::sync::Arc;

use campus_core::{CampusConfig, DashboardSummary};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod state;

const DEFAULT_LOG_FILTER: &str = "info";

fn main() {
    let config = state::AppState::config_path()
        .map(CampusConfig::load)
        .unwrap_or_else(|| Ok(CampusConfig::default()));

    // Initialize logging
    let fallback = config
        .as_ref()
        .ok()
        .and_then(|c| c.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .init();

    tracing::info!("Starting Campus");

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize application state
    let app_state = match state::AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(data_dir = %app_state.data_dir().display(), "Store opened");

    if let Err(e) = run(&app_state, std::env::args().skip(1).collect()) {
        if e.is_user_facing() {
            tracing::warn!("{}", e);
        } else {
            tracing::error!("{}", e);
        }
        std::process::exit(1);
    }
}

fn run(app_state: &state::AppState, args: Vec<String>) -> campus_core::Result<()> {
    app_state.seed_if_enabled()?;

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    if args == ["logout"] {
        app_state.logout()?;
    } else {
        app_state.restore_session()?;
    }

    match args.as_slice() {
        ["login", email, password] => {
            let user = app_state.login(email, password)?;
            tracing::info!("Signed in as {} ({})", user.name, user.role);
        }
        ["logout"] => {}
        ["vote", poll_id, option_id] => {
            let (poll, outcome) = app_state.cast_vote(poll_id, option_id)?;
            tracing::info!(poll = %poll.question, "{}", outcome.message());
            for tally in campus_core::compute_tally(&poll) {
                tracing::info!(
                    "  {}: {} votes ({}%)",
                    tally.option_id,
                    tally.votes,
                    tally.percentage
                );
            }
        }
        [] => {}
        other => {
            tracing::warn!(?other, "Unknown command; expected login, logout or vote");
        }
    }

    match app_state.dashboard()? {
        Some(summary) => log_summary(&summary),
        None => tracing::info!("Not signed in"),
    }
    Ok(())
}

fn log_summary(summary: &DashboardSummary) {
    let stats = &summary.stats;
    tracing::info!(
        announcements = stats.total_announcements,
        events = stats.total_events,
        polls = stats.total_polls,
        feedback = stats.total_feedback,
        "Dashboard"
    );
    for announcement in &summary.announcements {
        tracing::info!("Announcement: {}", announcement.title);
    }
    for event in &summary.events {
        tracing::info!("Event: {} at {}", event.title, event.location);
    }
    for poll in &summary.polls {
        tracing::info!("Poll: {} ({} votes)", poll.question, poll.total_votes());
    }
    for feedback in &summary.feedback {
        tracing::info!("Feedback ({}/5): {}", feedback.rating, feedback.content);
    }
}

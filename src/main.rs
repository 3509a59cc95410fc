// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gym-Tracker console host
//!
//! Signs in with the configured access token, loads the dashboard and prints
//! the current month, the stats tiles and the recent history.

use anyhow::Context;
use gym_tracker::{
    config::{Config, LogFormat},
    date_key::DateKey,
    models::DayStatus,
    services::{CalendarCursor, Dashboard, HttpGateway, StaticSession, ViewMode},
    Tracker,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_format)?;
    tracing::info!(base_url = %config.api_base_url, "Starting Gym-Tracker");

    let session = Arc::new(StaticSession::from_config(&config));
    let gateway = match HttpGateway::connect(&config, session).await {
        Ok(gateway) => Arc::new(gateway),
        Err(e) if e.is_unauthenticated() => {
            tracing::error!("No credential available, sign in and set TRACKER_ACCESS_TOKEN");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let tracker = Arc::new(Tracker::new(config, gateway));
    let today = DateKey::today();
    let dashboard = Dashboard::new(tracker, CalendarCursor::new(today, ViewMode::Month));

    dashboard.load().await.context("Failed to load daily logs")?;

    print_calendar(&dashboard, today);
    println!();
    for (label, value) in dashboard.stats().tiles() {
        println!("{label:>14}: {value}");
    }
    println!();
    for item in dashboard.history(today) {
        println!(
            "{:<16} {:<10} {} ejercicio(s)",
            item.label,
            item.status.legend(),
            item.log.exercises.len()
        );
    }

    Ok(())
}

fn print_calendar(dashboard: &Dashboard, today: DateKey) {
    let calendar = dashboard.calendar();
    println!("{}", calendar.title());
    println!("{}", calendar.weekday_headers().join(" "));
    for week in dashboard.cells(today).chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                let mark = match cell.status {
                    DayStatus::Complete => '*',
                    DayStatus::Partial => '+',
                    DayStatus::None => ' ',
                };
                if cell.is_current_period {
                    format!("{:>2}{}", cell.date.day(), mark)
                } else {
                    "   ".to_string()
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
}

/// Initialize logging, JSON when `TRACKER_LOG_FORMAT=json`.
fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("gym_tracker=debug".parse()?)
        .add_directive("info".parse()?);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

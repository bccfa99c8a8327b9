//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `serene_core` linkage.
//! - Start logging from the resolved configuration.
//! - Print that configuration and the habit summaries it sees.

use serene_core::db::open_db;
use serene_core::{Clock, CoreConfig, HabitStore, SqliteKvStore, SystemClock};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("serene_core ping={}", serene_core::ping());
    println!("serene_core version={}", serene_core::core_version());

    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.start_logging() {
        eprintln!("logging disabled: {err}");
    }
    log::info!(
        "event=cli_start module=cli status=ok level={} time_zone={}",
        config.log_level,
        config.time_zone.label()
    );

    let now = SystemClock.now();
    println!("time_zone={}", config.time_zone.label());
    println!("today={}", config.time_zone.day_key(now));
    println!("db_path={}", config.db_path.display());
    println!("log_level={} log_dir={}", config.log_level, config.log_dir.display());

    match print_habits(&config, now) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("habit listing failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_habits(
    config: &CoreConfig,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(&config.db_path)?;
    let kv = SqliteKvStore::try_new(&conn)?;
    let store = HabitStore::with_clock(kv, SystemClock, config.time_zone)?;
    for summary in store.summaries(now) {
        println!(
            "habit id={} kind={} streak={} done_today={}",
            summary.habit.id(),
            summary.habit.kind().as_str(),
            summary.current_streak,
            summary.done_today
        );
    }
    Ok(())
}

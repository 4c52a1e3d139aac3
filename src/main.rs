use std::time::Duration;

use anyhow::Context;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use survivor_sim::config::SimConfig;
use survivor_sim::game::input_buffer::{Action, Intent};
use survivor_sim::game::performance::TickTimer;
use survivor_sim::game::state::GamePhase;
use survivor_sim::game::{SimEvent, Simulation};

/// Seconds per lap of the scripted circling path
const CIRCLE_PERIOD: f32 = 4.0;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    info!("Survivor Sim v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::load_or_default();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid simulation configuration")?;
    info!(
        "Configuration loaded: {} Hz, seed={:?}, starting weapon={:?}, run cap {}s",
        config.tick_rate, config.seed, config.starting_weapon, config.run_seconds
    );

    let mut sim = Simulation::new(&config);
    let input = sim.action_sender();
    if input.try_send(Action::Start).is_err() {
        warn!("Action queue rejected the start command");
    }

    // Shutdown signal handler
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    tokio::select! {
        _ = run(&mut sim, &config) => {}
        _ = shutdown => {
            info!("Stopping run early");
        }
    }

    match sim.last_summary() {
        Some(summary) => info!("Final summary: {}", serde_json::to_string(summary)?),
        None => info!("Run ended without a game over: {}", serde_json::to_string(&sim.hud())?),
    }
    info!("Simulation stopped");

    Ok(())
}

/// Drive frames at the configured rate until game over or the time cap
async fn run(sim: &mut Simulation, config: &SimConfig) {
    let frame_dt = 1.0 / config.tick_rate as f32;
    let mut ticker = interval(Duration::from_secs_f32(frame_dt));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut timer = TickTimer::new(config.tick_rate);
    let mut wall_clock = 0.0f32;
    let mut since_snapshot = 0.0f32;
    let mut was_over_budget = false;

    info!("Frame loop started at {} Hz", config.tick_rate);

    loop {
        ticker.tick().await;
        wall_clock += frame_dt;
        since_snapshot += frame_dt;

        timer.tick_start();
        let events = sim.frame(frame_dt, circling_intent(sim.state().elapsed));
        timer.tick_end(sim.state().entity_count());

        for event in &events {
            match event {
                SimEvent::GameOver(_) => return,
                SimEvent::BossSpawned => debug!("Boss on the field"),
                _ => {}
            }
        }

        // Scripted chooser: always take the first offer
        while sim.phase() == GamePhase::LevelUp {
            match sim.choose_reward(0) {
                Ok(reward) => debug!("Auto-picked {}", reward.label()),
                Err(e) => {
                    warn!("Auto-pick failed: {}", e);
                    break;
                }
            }
        }

        if timer.is_over_budget() && !was_over_budget {
            warn!("Tick over budget: {}", timer.status_message());
        }
        was_over_budget = timer.is_over_budget();

        if since_snapshot >= config.snapshot_interval {
            since_snapshot = 0.0;
            match serde_json::to_string(&sim.hud()) {
                Ok(json) => info!("HUD {}", json),
                Err(e) => warn!("Failed to encode HUD snapshot: {}", e),
            }
        }

        if wall_clock >= config.run_seconds {
            info!("Run cap of {}s reached", config.run_seconds);
            return;
        }
    }
}

/// Walk in a slow circle by cycling through the eight directions
fn circling_intent(elapsed: f32) -> Intent {
    let phase = (elapsed / CIRCLE_PERIOD).fract();
    let sector = (phase * 8.0) as u32 % 8;
    Intent {
        right: matches!(sector, 0 | 1 | 7),
        down: matches!(sector, 1..=3),
        left: matches!(sector, 3..=5),
        up: matches!(sector, 5..=7),
    }
}

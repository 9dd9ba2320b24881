//! Scripted combat replay.
//!
//! Composition root that assembles a [`Runtime`] from environment
//! configuration, seeds a demo character if the store has none, and plays
//! one encounter to completion with the policy in [`policy`]. Every report
//! is written to stdout as one JSON line; logs go to stderr.
//!
//! ```bash
//! REPLAY_CLASS=mage REPLAY_MONSTER=stoneheart COMBAT_RNG_SEED=7 \
//!     cargo run -p combat-replay
//! ```
mod config;
mod policy;

use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;

use combat_content::{ContentFactory, builtin_catalog};
use combat_core::{PlayerId, PlayerRecord, progression};
use combat_runtime::{
    InMemoryPlayerStore, JsonFileStore, PlayerStore, Runtime, RuntimeConfig,
};

use config::ReplayConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let replay = ReplayConfig::from_env();
    let mut runtime_config = RuntimeConfig::from_env();

    let catalog = match &replay.data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            runtime_config.rules = factory.load_rules()?;
            factory.load_catalog()?
        }
        None => builtin_catalog().context("bundled content is invalid")?,
    };

    let player = PlayerId::from(replay.player_id.as_str());
    let store = open_store(&replay, &player).await?;

    let runtime = Runtime::builder()
        .config(runtime_config)
        .catalog(Arc::new(catalog))
        .store(store)
        .enable_sweeper(false)
        .build()
        .await?;
    let service = runtime.service();

    tracing::info!(
        "Replaying {} ({}) against {}",
        player,
        replay.class,
        replay.monster
    );

    let view = service.start_combat(&player, &replay.monster).await?;
    println!("{}", serde_json::to_string(&view)?);

    let mut legal = view.legal_actions;
    for _ in 0..replay.max_actions {
        let Some(action) = policy::choose(&legal, service.catalog()) else {
            break;
        };
        let report = service.submit_action(&player, &action).await?;
        println!("{}", serde_json::to_string(&report)?);

        if report.view.outcome.is_terminal() {
            if let Some(rewards) = &report.rewards {
                tracing::info!(
                    "Victory: +{} xp, +{} gold, level {}",
                    rewards.xp,
                    rewards.gold,
                    rewards.new_level
                );
            } else {
                tracing::info!("Encounter ended: {}", report.view.outcome);
            }
            break;
        }
        legal = report.view.legal_actions;
    }

    if service.sessions().has_session(&player) {
        tracing::warn!("Action cap of {} reached, forcing exit", replay.max_actions);
        let report = service.force_exit(&player).await?;
        println!("{}", serde_json::to_string(&report)?);
    }

    runtime.shutdown().await?;
    Ok(())
}

/// Opens the configured store and seeds the demo character when missing.
async fn open_store(replay: &ReplayConfig, player: &PlayerId) -> Result<Arc<dyn PlayerStore>> {
    let store: Arc<dyn PlayerStore> = match &replay.store_dir {
        Some(dir) => Arc::new(
            JsonFileStore::new(dir)
                .await
                .with_context(|| format!("cannot open store at {}", dir.display()))?,
        ),
        None => Arc::new(InMemoryPlayerStore::new()),
    };

    if store.load(player).await?.is_none() {
        let record = demo_character(replay);
        store.commit(player, &record).await?;
        tracing::debug!("Seeded demo {} (level {})", record.class, record.level);
    }
    Ok(store)
}

/// Fresh character levelled up to `replay.level` through the regular XP curve.
fn demo_character(replay: &ReplayConfig) -> PlayerRecord {
    let mut record = PlayerRecord::new(replay.class.as_str());
    record.xp = (1..replay.level).map(progression::xp_threshold).sum();
    progression::apply_level_ups(&mut record);
    record
        .extra
        .insert("name".into(), Value::String(replay.player_id.clone()));
    record.inventory.insert("health_potion".into(), 2);
    record.inventory.insert("explosive_arrow".into(), 3);
    record
}

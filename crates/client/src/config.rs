//! Replay configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// What to play and who plays it.
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayConfig {
    pub player_id: String,
    pub class: String,
    pub level: u32,
    pub monster: String,
    /// Stop after this many submitted actions even if the fight continues.
    pub max_actions: usize,
    /// Load content from this directory instead of the bundled tables.
    pub data_dir: Option<PathBuf>,
    /// Keep player records here instead of in memory.
    pub store_dir: Option<PathBuf>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            player_id: "demo".into(),
            class: "warrior".into(),
            level: 1,
            monster: "goblin_warrior".into(),
            max_actions: 100,
            data_dir: None,
            store_dir: None,
        }
    }
}

impl ReplayConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `REPLAY_PLAYER` - Player id (default: demo)
    /// - `REPLAY_CLASS` - Class of the seeded demo character (default: warrior)
    /// - `REPLAY_LEVEL` - Level of the seeded demo character (default: 1)
    /// - `REPLAY_MONSTER` - Monster template id (default: goblin_warrior)
    /// - `REPLAY_MAX_ACTIONS` - Action cap (default: 100)
    /// - `REPLAY_DATA_DIR` - Content directory (default: bundled tables)
    /// - `REPLAY_STORE_DIR` - JSON player store directory (default: in-memory)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(player) = env::var("REPLAY_PLAYER") {
            config.player_id = player;
        }
        if let Ok(class) = env::var("REPLAY_CLASS") {
            config.class = class;
        }
        if let Some(level) = read_env::<u32>("REPLAY_LEVEL") {
            config.level = level.max(1);
        }
        if let Ok(monster) = env::var("REPLAY_MONSTER") {
            config.monster = monster;
        }
        if let Some(max) = read_env::<usize>("REPLAY_MAX_ACTIONS") {
            config.max_actions = max.max(1);
        }
        config.data_dir = env::var("REPLAY_DATA_DIR").ok().map(PathBuf::from);
        config.store_dir = env::var("REPLAY_STORE_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

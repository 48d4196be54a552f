//! Server configuration
//!
//! Loaded with figment from, in order of precedence (highest first):
//! 1. Environment variables prefixed with `COCKPIT_`, sections split on `__`
//!    (`COCKPIT_SERVER__PORT=9200`, `COCKPIT_RACE__SEED=7`)
//! 2. TOML config file at `~/.config/cockpit/config.toml`
//! 3. Default values

use crate::error::{Error, Result};
use cockpit_sim::{circuit, TickerKind};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const CONFIG_DIR_NAME: &str = "cockpit";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "COCKPIT_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub race: RaceConfig,
    pub narration: NarrationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

/// Race clock periods and session setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub engine_tick_ms: u64,
    pub tracker_tick_ms: u64,
    pub leaderboard_tick_ms: u64,
    pub radio_tick_ms: u64,
    pub start_lights_tick_ms: u64,
    pub pit_exit_tick_ms: u64,
    /// Circuit shown when the server starts
    pub circuit: String,
    /// Fixed seed for reproducible races; entropy when unset
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub enabled: bool,
    /// Speaking rate used to estimate how long a line keeps the voice busy
    pub words_per_minute: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9100,
            log_level: "info".to_string(),
        }
    }
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            engine_tick_ms: 100,
            tracker_tick_ms: 100,
            leaderboard_tick_ms: 2000,
            radio_tick_ms: 1000,
            start_lights_tick_ms: 1000,
            pit_exit_tick_ms: 3000,
            circuit: circuit::DEFAULT_CIRCUIT.to_string(),
            seed: None,
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            words_per_minute: 180,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("engine_tick_ms", self.race.engine_tick_ms),
            ("tracker_tick_ms", self.race.tracker_tick_ms),
            ("leaderboard_tick_ms", self.race.leaderboard_tick_ms),
            ("radio_tick_ms", self.race.radio_tick_ms),
            ("start_lights_tick_ms", self.race.start_lights_tick_ms),
            ("pit_exit_tick_ms", self.race.pit_exit_tick_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(Error::validation(format!("{name} must be greater than 0")));
        }

        if circuit::find(&self.race.circuit).is_none() {
            return Err(Error::validation(format!(
                "unknown circuit: {}",
                self.race.circuit
            )));
        }

        if self.narration.words_per_minute == 0 {
            return Err(Error::validation("words_per_minute must be greater than 0"));
        }

        Ok(())
    }

    /// Clock period for one race component
    pub fn period(&self, kind: TickerKind) -> Duration {
        let ms = match kind {
            TickerKind::Engine => self.race.engine_tick_ms,
            TickerKind::Tracker => self.race.tracker_tick_ms,
            TickerKind::Leaderboard => self.race.leaderboard_tick_ms,
            TickerKind::Radio => self.race.radio_tick_ms,
            TickerKind::StartLights => self.race.start_lights_tick_ms,
            TickerKind::PitExit => self.race.pit_exit_tick_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

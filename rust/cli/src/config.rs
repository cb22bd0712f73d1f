use serde::{Deserialize, Serialize};
use showdown_engine::rules::RoundConfig;
use std::fs;

pub const CONFIG_ENV: &str = "SHOWDOWN_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub duration_secs: u64,
    pub join_cutoff_secs: u64,
    pub max_participants: usize,
    pub max_bettors: usize,
    pub fee_percent: u8,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub duration_secs: ValueSource,
    pub join_cutoff_secs: ValueSource,
    pub max_participants: ValueSource,
    pub max_bettors: ValueSource,
    pub fee_percent: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            duration_secs: ValueSource::Default,
            join_cutoff_secs: ValueSource::Default,
            max_participants: ValueSource::Default,
            max_bettors: ValueSource::Default,
            fee_percent: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        let round = RoundConfig::default();
        Self {
            seed: None,
            duration_secs: 300,
            join_cutoff_secs: round.join_cutoff_secs,
            max_participants: round.max_participants,
            max_bettors: round.max_bettors,
            fee_percent: round.fee_percent,
        }
    }
}

impl Config {
    pub fn round_config(&self) -> RoundConfig {
        RoundConfig {
            join_cutoff_secs: self.join_cutoff_secs,
            max_participants: self.max_participants,
            max_bettors: self.max_bettors,
            fee_percent: self.fee_percent,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.duration_secs {
            cfg.duration_secs = v;
            sources.duration_secs = ValueSource::File;
        }
        if let Some(v) = f.join_cutoff_secs {
            cfg.join_cutoff_secs = v;
            sources.join_cutoff_secs = ValueSource::File;
        }
        if let Some(v) = f.max_participants {
            cfg.max_participants = v;
            sources.max_participants = ValueSource::File;
        }
        if let Some(v) = f.max_bettors {
            cfg.max_bettors = v;
            sources.max_bettors = ValueSource::File;
        }
        if let Some(v) = f.fee_percent {
            cfg.fee_percent = v;
            sources.fee_percent = ValueSource::File;
        }
    }

    if let Some(v) = env_value("SHOWDOWN_SEED")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value("SHOWDOWN_DURATION")? {
        cfg.duration_secs = v;
        sources.duration_secs = ValueSource::Env;
    }
    if let Some(v) = env_value("SHOWDOWN_JOIN_CUTOFF")? {
        cfg.join_cutoff_secs = v;
        sources.join_cutoff_secs = ValueSource::Env;
    }
    if let Some(v) = env_value("SHOWDOWN_MAX_PARTICIPANTS")? {
        cfg.max_participants = v;
        sources.max_participants = ValueSource::Env;
    }
    if let Some(v) = env_value("SHOWDOWN_MAX_BETTORS")? {
        cfg.max_bettors = v;
        sources.max_bettors = ValueSource::Env;
    }
    if let Some(v) = env_value("SHOWDOWN_FEE_PERCENT")? {
        cfg.fee_percent = v;
        sources.fee_percent = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    duration_secs: Option<u64>,
    #[serde(default)]
    join_cutoff_secs: Option<u64>,
    #[serde(default)]
    max_participants: Option<usize>,
    #[serde(default)]
    max_bettors: Option<usize>,
    #[serde(default)]
    fee_percent: Option<u8>,
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.is_empty() => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, raw))),
        _ => Ok(None),
    }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    cfg.round_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    if cfg.duration_secs <= cfg.join_cutoff_secs {
        return Err(ConfigError::Invalid(
            "duration_secs must exceed join_cutoff_secs".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_engine_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.round_config(), RoundConfig::default());
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn duration_must_exceed_cutoff() {
        let cfg = Config {
            duration_secs: 30,
            ..Config::default()
        };
        assert!(matches!(validate(&cfg), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn file_config_fields_are_optional() {
        let f: FileConfig = toml::from_str("fee_percent = 5").unwrap();
        assert_eq!(f.fee_percent, Some(5));
        assert!(f.seed.is_none());
    }
}

//! Plugin configuration
//!
//! The configuration is a JSON document:
//!
//! ```json
//! {
//!   "default-range": 50,
//!   "tick-interval": "5s",
//!   "beacons": { "world,10,64,-3": 120 }
//! }
//! ```
//!
//! `beacons` maps location keys to persisted radius overrides. The store
//! writes the default document when the file does not exist yet.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use beacon_core::{AnchorPos, Radius, DEFAULT_RADIUS};
use beacon_registry::RadiusLookup;

use crate::ConfigError;

/// 100 game ticks at 20 ticks per second
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(5);

/// Plugin configuration document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PluginConfig {
    /// Radius for beacons without an override
    #[serde(default = "default_range")]
    pub default_range: u32,
    /// Period of the evaluation step
    #[serde(default = "default_tick_interval", with = "humantime_duration")]
    pub tick_interval: Duration,
    /// Location key -> radius override
    #[serde(default)]
    pub beacons: BTreeMap<String, i64>,
}

fn default_range() -> u32 {
    DEFAULT_RADIUS
}

fn default_tick_interval() -> Duration {
    DEFAULT_TICK_INTERVAL
}

impl Default for PluginConfig {
    fn default() -> Self {
        PluginConfig {
            default_range: DEFAULT_RADIUS,
            tick_interval: DEFAULT_TICK_INTERVAL,
            beacons: BTreeMap::new(),
        }
    }
}

impl PluginConfig {
    pub fn with_default_range(mut self, range: u32) -> Self {
        self.default_range = range;
        self
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Add a radius override
    pub fn with_beacon(mut self, position: &AnchorPos, radius: u32) -> Self {
        self.beacons
            .insert(position.location_key(), i64::from(radius));
        self
    }

    /// Rewrite override keys into the `world,x,y,z` form lookups use
    ///
    /// Keys that do not parse are kept untouched and never match an anchor.
    /// Returns how many keys were rewritten.
    pub fn canonicalize_keys(&mut self) -> usize {
        let mut rewritten = 0;

        for (key, radius) in std::mem::take(&mut self.beacons) {
            let pos = match key.parse::<AnchorPos>() {
                Ok(pos) => pos,
                Err(e) => {
                    warn!(error = %e, "ignoring beacon override");
                    self.beacons.insert(key, radius);
                    continue;
                }
            };

            let canonical = pos.location_key();
            if canonical != key {
                warn!(%key, %canonical, "rewriting beacon override key");
                rewritten += 1;
            }
            if self.beacons.insert(canonical, radius).is_some() {
                warn!(anchor = %pos, "duplicate beacon override");
            }
        }
        rewritten
    }

    /// Check the document and resolve the default radius
    pub fn validate(&self) -> Result<Radius, ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::InvalidInterval(
                "tick interval must be non-zero".to_string(),
            ));
        }

        Ok(Radius::try_from(self.default_range)?)
    }
}

/// humantime (de)serialization for `Duration` fields
mod humantime_duration {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(de::Error::custom)
    }
}

/// Configuration store
///
/// Holds the live document and, when backed by a file, writes every change
/// back to disk.
pub struct ConfigStore {
    path: Option<PathBuf>,
    config: RwLock<PluginConfig>,
    default_radius: Radius,
    /// Serializes writers so saves land in order
    save_lock: Mutex<()>,
}

impl ConfigStore {
    /// Store that never touches the filesystem
    pub fn in_memory(mut config: PluginConfig) -> Result<Self, ConfigError> {
        config.canonicalize_keys();
        let default_radius = config.validate()?;
        Ok(ConfigStore {
            path: None,
            config: RwLock::new(config),
            default_radius,
            save_lock: Mutex::new(()),
        })
    }

    /// Open a file-backed store, writing the default document if missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();

        let mut config: PluginConfig = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            let config = PluginConfig::default();
            write_atomic(&path, &config)?;
            info!(path = %path.display(), "wrote default config");
            config
        };

        config.canonicalize_keys();
        let default_radius = config.validate()?;
        debug!(
            path = %path.display(),
            default_range = %default_radius,
            overrides = config.beacons.len(),
            "config loaded"
        );

        Ok(ConfigStore {
            path: Some(path),
            config: RwLock::new(config),
            default_radius,
            save_lock: Mutex::new(()),
        })
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Copy of the current document
    pub fn config(&self) -> PluginConfig {
        self.config.read().clone()
    }

    pub fn default_radius(&self) -> Radius {
        self.default_radius
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.read().tick_interval
    }

    /// Persist a radius override for a beacon
    pub fn set_beacon_range(&self, position: &AnchorPos, radius: Radius) -> Result<(), ConfigError> {
        self.config
            .write()
            .beacons
            .insert(position.location_key(), i64::from(radius.get()));
        self.save()
    }

    /// Write the document to the backing file
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let _guard = self.save_lock.lock();
        let snapshot = self.config();
        write_atomic(path, &snapshot)
    }
}

impl RadiusLookup for ConfigStore {
    fn configured_radius(&self, position: &AnchorPos) -> Option<Radius> {
        let value = *self.config.read().beacons.get(&position.location_key())?;
        match Radius::new(value) {
            Ok(radius) => Some(radius),
            Err(e) => {
                warn!(anchor = %position, error = %e, "ignoring beacon override");
                None
            }
        }
    }
}

/// Write to a sibling temp file, then rename over the target
fn write_atomic(path: &Path, config: &PluginConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(config)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beacon() -> AnchorPos {
        AnchorPos::new("world", 10, 64, -3)
    }

    #[test]
    fn test_default_document() {
        let config = PluginConfig::default();
        assert_eq!(config.default_range, 50);
        assert_eq!(config.tick_interval, Duration::from_secs(5));
        assert!(config.beacons.is_empty());
    }

    #[test]
    fn test_parse_document() {
        let raw = r#"{
            "default-range": 80,
            "tick-interval": "2s 500ms",
            "beacons": { "world,10,64,-3": 120 }
        }"#;
        let config: PluginConfig = serde_json::from_str(raw).unwrap();

        assert_eq!(config.default_range, 80);
        assert_eq!(config.tick_interval, Duration::from_millis(2500));
        assert_eq!(config.beacons.get("world,10,64,-3"), Some(&120));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: PluginConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_bad_interval_is_rejected() {
        let raw = r#"{ "tick-interval": "soon" }"#;
        assert!(serde_json::from_str::<PluginConfig>(raw).is_err());

        let zero = PluginConfig::default().with_tick_interval(Duration::ZERO);
        assert!(matches!(zero.validate(), Err(ConfigError::InvalidInterval(_))));
    }

    #[test]
    fn test_default_range_must_be_in_bounds() {
        let config = PluginConfig::default().with_default_range(500);
        assert!(matches!(config.validate(), Err(ConfigError::Beacon(_))));
        assert!(ConfigStore::in_memory(config).is_err());
    }

    #[test]
    fn test_lookup_override() {
        let config = PluginConfig::default().with_beacon(&beacon(), 120);
        let store = ConfigStore::in_memory(config).unwrap();

        assert_eq!(store.configured_radius(&beacon()).map(Radius::get), Some(120));
        assert_eq!(store.configured_radius(&AnchorPos::new("world", 0, 0, 0)), None);
    }

    #[test]
    fn test_lookup_ignores_out_of_range_override() {
        let mut config = PluginConfig::default();
        config.beacons.insert(beacon().location_key(), 5000);
        let store = ConfigStore::in_memory(config).unwrap();

        assert_eq!(store.configured_radius(&beacon()), None);
    }

    #[test]
    fn test_non_canonical_keys_are_rewritten() {
        for key in ["world,010,64,-3", "world,+10,64,-3", "world,10,64,-03"] {
            let mut config = PluginConfig::default();
            config.beacons.insert(key.to_string(), 120);
            let store = ConfigStore::in_memory(config).unwrap();

            assert_eq!(store.configured_radius(&beacon()).map(Radius::get), Some(120), "{key}");
            assert_eq!(store.config().beacons.keys().collect::<Vec<_>>(), vec!["world,10,64,-3"]);
        }
    }

    #[test]
    fn test_key_with_spaces_never_matches() {
        let mut config = PluginConfig::default();
        config.beacons.insert("world, 10,64,-3".to_string(), 120);

        assert_eq!(config.clone().canonicalize_keys(), 0);
        let store = ConfigStore::in_memory(config).unwrap();

        assert_eq!(store.configured_radius(&beacon()), None);
        assert!(store.config().beacons.contains_key("world, 10,64,-3"));
    }

    #[test]
    fn test_open_canonicalizes_file_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "beacons": { "world,+10,064,-3": 150 } }"#).unwrap();

        let store = ConfigStore::open(&path).unwrap();
        assert_eq!(store.configured_radius(&beacon()).map(Radius::get), Some(150));

        store.save().unwrap();
        let on_disk: PluginConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.beacons.get("world,10,64,-3"), Some(&150));
        assert_eq!(on_disk.beacons.len(), 1);
    }

    #[test]
    fn test_open_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plugins").join("config.json");

        let store = ConfigStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(store.default_radius(), Radius::DEFAULT);
        let on_disk: PluginConfig =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, PluginConfig::default());
    }

    #[test]
    fn test_set_beacon_range_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let store = ConfigStore::open(&path).unwrap();
        store
            .set_beacon_range(&beacon(), Radius::new(150).unwrap())
            .unwrap();

        let reopened = ConfigStore::open(&path).unwrap();
        assert_eq!(reopened.configured_radius(&beacon()).map(Radius::get), Some(150));
    }

    #[test]
    fn test_open_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(ConfigStore::open(&path), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_in_memory_save_is_noop() {
        let store = ConfigStore::in_memory(PluginConfig::default()).unwrap();
        store
            .set_beacon_range(&beacon(), Radius::new(20).unwrap())
            .unwrap();

        assert!(store.path().is_none());
        assert_eq!(store.config().beacons.len(), 1);
    }
}

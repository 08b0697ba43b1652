// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `Config`: profile/threshold/parallelism configuration (spec.md §6:
//! "static JSON file in the home directory; missing configuration falls
//! back to embedded defaults").
//!
//! A malformed `config.json` is a fatal configuration error at startup
//! (spec.md §7 "Configuration errors"), not silently ignored the way a
//! missing file is.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use zero_core::FreshnessThresholds;

use crate::error::DriverError;

fn default_parallelism() -> usize {
    zero_engine::scheduler::DEFAULT_PARALLELISM
}

fn default_timeout() -> Duration {
    zero_engine::scheduler::DEFAULT_TIMEOUT
}

fn default_grace_period() -> Duration {
    zero_engine::scheduler::DEFAULT_GRACE_PERIOD
}

/// A per-scanner override of the default timeout. Reserved as a
/// non-breaking extension point (spec.md §9 open question on per-scanner
/// freshness overrides); `zero-daemon` does not yet read anything out of
/// this map beyond round-tripping it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScannerOverride {
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub default_timeout: Duration,
    #[serde(default = "default_grace_period", with = "humantime_serde")]
    pub grace_period: Duration,
    #[serde(default)]
    pub freshness: FreshnessThresholds,
    #[serde(default)]
    pub per_scanner_overrides: BTreeMap<String, ScannerOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parallelism: default_parallelism(),
            default_timeout: default_timeout(),
            grace_period: default_grace_period(),
            freshness: FreshnessThresholds::default(),
            per_scanner_overrides: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load `<home>/config.json`, falling back to [`Config::default`] when
    /// the file is absent. A present-but-malformed file is a fatal error.
    pub fn load(home: &Path) -> Result<Self, DriverError> {
        let path = home.join("config.json");
        match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| DriverError::MalformedConfig { path: path.clone(), source }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(DriverError::Io(source)),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

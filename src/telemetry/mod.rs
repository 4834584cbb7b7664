//! Telemetry collaborator: a key-value provider polled by path.
//!
//! The gateway never owns the measurements. Each cycle it asks the provider
//! to refresh, then every encoder reads the paths it needs. Any path may be
//! absent at any time.
use std::collections::HashMap;

use crate::error::TelemetryError;
use crate::infra::codec::writer::FlagState;

pub mod file;
pub mod paths;

pub use file::JsonFileTelemetry;

//==================================================================================TELEMETRY_SOURCE
/// Point-in-time view over the monitored measurements.
pub trait TelemetrySource {
    /// Latest value of `path`, or `None` when the provider does not report it.
    fn get(&self, path: &str) -> Option<f64>;

    /// Pull a fresh snapshot. Called once at the start of every cycle.
    fn refresh(&mut self) -> Result<(), TelemetryError> {
        Ok(())
    }
}

/// Typed accessors used by the encoders.
pub trait TelemetryExt: TelemetrySource {
    /// Value of `path`, or [`TelemetryError::Unavailable`] when absent or not finite.
    fn require(&self, path: &'static str) -> Result<f64, TelemetryError> {
        match self.get(path) {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(TelemetryError::Unavailable { path }),
        }
    }

    /// Alarm flag at `path`: `0` is clear; anything else, including a missing
    /// value, reads as set (`11`, which RV-C also uses for "not available").
    fn alarm(&self, path: &'static str) -> FlagState {
        match self.get(path) {
            Some(value) if value == 0.0 => FlagState::Clear,
            _ => FlagState::Set,
        }
    }
}

impl<T: TelemetrySource + ?Sized> TelemetryExt for T {}

//==================================================================================MAP_TELEMETRY
/// In-memory snapshot, filled by the embedding application or by tests.
#[derive(Debug, Clone, Default)]
pub struct MapTelemetry {
    values: HashMap<String, f64>,
}

impl MapTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: &str, value: f64) -> Self {
        self.set(path, value);
        self
    }

    /// Insert or replace the value of `path`.
    pub fn set(&mut self, path: &str, value: f64) {
        self.values.insert(path.to_owned(), value);
    }

    /// Drop `path` so it reads as absent.
    pub fn remove(&mut self, path: &str) -> Option<f64> {
        self.values.remove(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TelemetrySource for MapTelemetry {
    fn get(&self, path: &str) -> Option<f64> {
        self.values.get(path).copied()
    }
}

impl FromIterator<(String, f64)> for MapTelemetry {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;

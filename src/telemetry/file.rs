//! Snapshot file provider: the monitoring side dumps the latest values as a
//! JSON object, the gateway re-reads it at the start of every cycle.
//!
//! ```json
//! { "com.victronenergy.battery.aggregate": { "/Dc/0/Voltage": 13.2, "/Alarms/LowSoc": 0 } }
//! ```
//!
//! A flat object keyed by path is accepted as well.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{debug, trace, warn};
use serde_json::{Map, Value};

use crate::error::TelemetryError;
use crate::telemetry::{paths, TelemetrySource};

/// Telemetry read from a JSON snapshot on disk.
#[derive(Debug)]
pub struct JsonFileTelemetry {
    path: PathBuf,
    service: String,
    values: HashMap<String, f64>,
}

impl JsonFileTelemetry {
    /// Provider for `path`, selecting the `service` object when present.
    /// Nothing is read until the first [`refresh`](TelemetrySource::refresh).
    pub fn new(path: impl Into<PathBuf>, service: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            service: service.into(),
            values: HashMap::new(),
        }
    }

    /// Snapshot file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a snapshot document into path → value pairs.
    pub fn parse(&self, document: &str) -> Result<HashMap<String, f64>, TelemetryError> {
        let root: Value =
            serde_json::from_str(document).map_err(|err| TelemetryError::Malformed {
                path: self.path.clone(),
                reason: err.to_string(),
            })?;
        let Value::Object(root) = root else {
            return Err(TelemetryError::Malformed {
                path: self.path.clone(),
                reason: String::from("top level is not an object"),
            });
        };
        let snapshot = match root.get(&self.service) {
            Some(Value::Object(service)) => service,
            _ => &root,
        };
        Ok(flatten(snapshot))
    }
}

fn flatten(snapshot: &Map<String, Value>) -> HashMap<String, f64> {
    snapshot
        .iter()
        .filter_map(|(path, value)| {
            let number = match value {
                Value::Number(number) => number.as_f64(),
                Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
                _ => None,
            };
            if number.is_none() {
                trace!("Ignoring non-numeric telemetry {} = {}", path, value);
            }
            number.map(|n| (path.clone(), n))
        })
        .collect()
}

impl TelemetrySource for JsonFileTelemetry {
    fn get(&self, path: &str) -> Option<f64> {
        self.values.get(path).copied()
    }

    /// On failure the previous snapshot stays in place.
    fn refresh(&mut self) -> Result<(), TelemetryError> {
        let document =
            std::fs::read_to_string(&self.path).map_err(|source| TelemetryError::Read {
                path: self.path.clone(),
                source,
            })?;
        let values = self.parse(&document)?;
        let missing = paths::ALL
            .iter()
            .filter(|path| !values.contains_key(**path))
            .count();
        if values.is_empty() {
            warn!("Telemetry snapshot {} holds no values", self.path.display());
        } else if missing > 0 {
            debug!(
                "Telemetry snapshot {}: {} values, {} monitored paths absent",
                self.path.display(),
                values.len(),
                missing
            );
        }
        self.values = values;
        Ok(())
    }
}

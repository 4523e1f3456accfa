use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::gate::{SendTime, DEFAULT_PRODUCT_NAME};
use crate::rotation::{RotationClock, RotationIndex, ROTATION_WEEKS};
use crate::roster::{Roster, ScheduleWeek};

/// Default location of the rotation config, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/rotation.json";

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

// ── Labels ────────────────────────────────────────────────────

/// Exactly one display label per week type, in rotation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationLabels([String; ROTATION_WEEKS as usize]);

impl RotationLabels {
    pub fn new(labels: Vec<String>) -> Result<Self, ConfigError> {
        let count = labels.len();
        let array: [String; ROTATION_WEEKS as usize] = labels
            .try_into()
            .map_err(|_| ConfigError::LabelCount(count))?;
        Ok(Self(array))
    }

    pub fn get(&self, index: RotationIndex) -> &str {
        &self.0[index.as_usize()]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

// ── File format ───────────────────────────────────────────────

/// The JSON document as written on disk. Required fields are optional here
/// so a missing one is reported by name instead of as a serde error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    timezone: Option<String>,
    send_time_local: Option<String>,
    anchor_date: Option<String>,
    labels: Option<Vec<String>>,
    product_name: Option<String>,
    user: Option<String>,
    #[serde(default)]
    weekdays: Vec<String>,
    #[serde(default)]
    schedule: Vec<ScheduleWeek>,
    #[serde(default)]
    highlights: Vec<String>,
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingField(field))
}

fn non_blank(value: Option<String>, field: &'static str) -> Result<String, ConfigError> {
    required(value.filter(|s| !s.trim().is_empty()), field)
}

// ── Top-level config ──────────────────────────────────────────

/// Validated rotation settings, read once at startup and passed by value to
/// whatever needs them.
#[derive(Debug, Clone)]
pub struct RotationConfig {
    pub timezone: Tz,
    pub send_time: SendTime,
    pub anchor: NaiveDate,
    pub labels: RotationLabels,
    pub product_name: String,
    pub roster: Roster,
}

impl RotationConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;

        let tz_name = non_blank(raw.timezone, "timezone")?;
        let timezone =
            Tz::from_str(tz_name.trim()).map_err(|_| ConfigError::InvalidTimezone(tz_name))?;

        let send_time = SendTime::from_str(&non_blank(raw.send_time_local, "sendTimeLocal")?)?;

        let anchor_raw = non_blank(raw.anchor_date, "anchorDate")?;
        let anchor = NaiveDate::parse_from_str(anchor_raw.trim(), "%Y-%m-%d")
            .map_err(|_| ConfigError::InvalidAnchorDate(anchor_raw))?;

        let labels = RotationLabels::new(required(raw.labels, "labels")?)?;

        let product_name = raw
            .product_name
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());

        let roster = Roster::new(raw.weekdays, raw.schedule, raw.user, raw.highlights)?;

        Ok(Self {
            timezone,
            send_time,
            anchor,
            labels,
            product_name,
            roster,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn clock(&self) -> RotationClock {
        RotationClock::new(self.anchor)
    }

    /// Print a one-glance summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!(
            timezone = %self.timezone,
            send_time = %self.send_time,
            anchor = %self.anchor,
            labels = ?self.labels.as_slice(),
            has_roster = !self.roster.is_empty(),
            "rotation config loaded"
        );
    }
}

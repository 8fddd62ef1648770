//! Dog, form history and model output.

use std::fmt;

use serde::{Serialize, Serializer};

/// Sectional (split) time of a historical run.
///
/// The upstream marks runs without a recorded split with the literal
/// string `"None"`; that sentinel is kept as [`Sectional::NotRecorded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sectional {
    Recorded(String),
    NotRecorded,
}

impl Sectional {
    /// Upstream sentinel for a missing split.
    pub const SENTINEL: &'static str = "None";

    /// Rendering of a split that was not recorded.
    pub const UNAVAILABLE: &'static str = "-";

    /// Interpret a raw upstream value. Recorded splits are kept verbatim.
    pub fn from_raw(raw: &str) -> Self {
        if raw.trim() == Self::SENTINEL {
            Self::NotRecorded
        } else {
            Self::Recorded(raw.to_string())
        }
    }
}

impl fmt::Display for Sectional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recorded(time) => f.write_str(time),
            Self::NotRecorded => f.write_str(Self::UNAVAILABLE),
        }
    }
}

impl Serialize for Sectional {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Recorded(time) => serializer.serialize_str(time),
            Self::NotRecorded => serializer.serialize_str(Self::SENTINEL),
        }
    }
}

/// One historical race line for a dog.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub date: String,
    pub track: String,
    pub distance: Option<String>,
    pub grade: Option<String>,
    /// Finishing position as reported (e.g. `"1st"`, `"3"`)
    pub position: Option<String>,
    /// Run time in seconds, as reported
    pub time: Option<String>,
    pub going: Option<String>,
    pub weight: Option<f64>,
    /// `None` when the field was absent, `Some(NotRecorded)` for the sentinel
    pub sectional: Option<Sectional>,
    pub remarks: String,
}

impl FormEntry {
    /// Split time as displayed; absent and sentinel both render unavailable.
    pub fn sectional_label(&self) -> String {
        self.sectional
            .as_ref()
            .map_or_else(|| Sectional::UNAVAILABLE.to_string(), ToString::to_string)
    }
}

/// Model output attached to each runner.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutput {
    /// Win probability in percent (0-100); not normalized across a race
    pub win_probability: f64,

    /// Average run time in seconds; `None` when not available
    pub avg_time: Option<f64>,
}

impl ModelOutput {
    pub fn probability_label(&self) -> String {
        format!("{:.1}%", self.win_probability)
    }

    pub fn avg_time_label(&self) -> String {
        match self.avg_time {
            Some(secs) if secs > 0.0 => format!("{secs:.2}s"),
            _ => "N/A".to_string(),
        }
    }
}

/// A runner in a race.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: String,
    pub name: String,
    /// Trap number, unique within a race
    pub trap: u32,
    pub form_summary: String,
    /// Most recent run first
    pub recent_form: Vec<FormEntry>,
    #[serde(rename = "ml")]
    pub model: ModelOutput,
}

//! Race data structure.

use serde::Serialize;

use crate::models::Dog;

/// A race, either as a schedule row (no runners) or a full race card.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Race {
    pub id: String,

    /// Host track name
    pub track: String,

    /// Scheduled off time
    pub time: Option<String>,

    /// Distance in metres, as reported
    pub distance: Option<String>,

    pub grade: Option<String>,

    /// Surface condition
    pub going: Option<String>,

    pub date: Option<String>,

    /// Runners in trap order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dogs: Vec<Dog>,
}

impl Race {
    /// Distance formatted for display (`"480m"`).
    pub fn distance_label(&self) -> Option<String> {
        self.distance
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(|d| format!("{d}m"))
    }
}

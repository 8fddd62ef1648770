//! Meeting data structure.

use serde::Serialize;

/// A race meeting listed on today's card.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    /// Track identifier, also used as the track page slug
    pub id: String,

    /// Display name of the meeting
    pub name: String,

    /// Number of races at this meeting
    pub race_count: u32,

    /// Start time of the earliest race
    pub first_race: Option<String>,

    /// Model's best-bet label for the meeting
    pub top_pick: Option<String>,
}

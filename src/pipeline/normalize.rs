// src/pipeline/normalize.rs

//! Response normalization.
//!
//! Reshapes raw upstream JSON into the domain models. Listing endpoints
//! degrade to empty sequences on unexpected shapes; the race-detail endpoint
//! fails with [`AppError::Malformed`] when a required field is missing.

use std::collections::HashSet;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Dog, FormEntry, Meeting, ModelOutput, Race, Sectional};

const RACE_DETAIL: &str = "race-detail";

/// Normalize the "today" response into meetings.
///
/// A missing or non-array `meetings` field yields an empty listing. Entries
/// without an identifier cannot be linked to and are dropped.
pub fn today_meetings(raw: &Value) -> Vec<Meeting> {
    array_field(raw, "meetings")
        .iter()
        .filter_map(|item| {
            let meeting = meeting(item);
            if meeting.is_none() {
                log::debug!("Dropping meeting without id: {item}");
            }
            meeting
        })
        .collect()
}

/// Normalize a track schedule into race summaries, in upstream order.
pub fn track_schedule(raw: &Value) -> Vec<Race> {
    array_field(raw, "races")
        .iter()
        .filter_map(|item| {
            let race = race_summary(item);
            if race.is_none() {
                log::debug!("Dropping race without id: {item}");
            }
            race
        })
        .collect()
}

/// Normalize a race card. Runners come back sorted by trap number.
pub fn race_detail(raw: &Value) -> Result<Race> {
    let id = identifier(raw, "raceId")
        .ok_or_else(|| AppError::malformed(RACE_DETAIL, "missing raceId"))?;
    let track = text(raw, "track")
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::malformed(RACE_DETAIL, format!("race {id} has no track")))?;
    let raw_dogs = raw
        .get("dogs")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::malformed(RACE_DETAIL, format!("race {id} has no dogs list")))?;

    let mut dogs = raw_dogs
        .iter()
        .map(|item| dog(item, &id))
        .collect::<Result<Vec<_>>>()?;

    dogs.sort_by_key(|d| d.trap);

    let mut seen = HashSet::new();
    if let Some(dup) = dogs.iter().find(|d| !seen.insert(d.trap)) {
        return Err(AppError::malformed(
            RACE_DETAIL,
            format!("race {id} has trap {} twice", dup.trap),
        ));
    }

    Ok(Race {
        time: text(raw, "time"),
        distance: text(raw, "distance"),
        grade: text(raw, "grade"),
        going: text(raw, "going"),
        date: text(raw, "date"),
        id,
        track,
        dogs,
    })
}

fn meeting(item: &Value) -> Option<Meeting> {
    let id = identifier(item, "id")?;
    Some(Meeting {
        name: text(item, "name").unwrap_or_else(|| id.clone()),
        race_count: number(item, "raceCount")
            .filter(|n| *n >= 0.0)
            .map_or(0, |n| n as u32),
        first_race: text(item, "firstRace"),
        top_pick: text(item, "topPick"),
        id,
    })
}

fn race_summary(item: &Value) -> Option<Race> {
    Some(Race {
        id: identifier(item, "id")?,
        track: text(item, "track").unwrap_or_default(),
        time: text(item, "time"),
        distance: text(item, "distance"),
        grade: text(item, "grade"),
        going: text(item, "going"),
        date: text(item, "date"),
        dogs: Vec::new(),
    })
}

fn dog(item: &Value, race_id: &str) -> Result<Dog> {
    let trap = number(item, "trap")
        .filter(|n| n.fract() == 0.0 && *n >= 1.0 && *n <= u32::MAX as f64)
        .map(|n| n as u32)
        .ok_or_else(|| {
            AppError::malformed(
                RACE_DETAIL,
                format!("race {race_id} has a runner without a valid trap"),
            )
        })?;

    let model = item.get("ml").map(model_output).unwrap_or_default();

    Ok(Dog {
        id: identifier(item, "id").unwrap_or_else(|| format!("{race_id}-trap-{trap}")),
        name: text(item, "name").unwrap_or_default(),
        trap,
        form_summary: text(item, "formSummary").unwrap_or_default(),
        recent_form: array_field(item, "recentForm")
            .iter()
            .filter(|entry| entry.is_object())
            .map(form_entry)
            .collect(),
        model,
    })
}

fn form_entry(item: &Value) -> FormEntry {
    let sectional = match item.get("sectional") {
        Some(Value::String(s)) => Some(Sectional::from_raw(s)),
        Some(Value::Number(n)) => Some(Sectional::Recorded(n.to_string())),
        _ => None,
    };

    FormEntry {
        date: text(item, "date").unwrap_or_default(),
        track: text(item, "track").unwrap_or_default(),
        distance: text(item, "distance"),
        grade: text(item, "grade"),
        position: text(item, "pos"),
        time: text(item, "time"),
        going: text(item, "going"),
        weight: number(item, "weight"),
        sectional,
        remarks: text(item, "remarks").unwrap_or_default(),
    }
}

fn model_output(ml: &Value) -> ModelOutput {
    ModelOutput {
        win_probability: number(ml, "winProbability").unwrap_or(0.0),
        avg_time: number(ml, "avgTime").filter(|t| *t > 0.0),
    }
}

// --- Field helpers ---

fn array_field<'a>(raw: &'a Value, key: &str) -> &'a [Value] {
    raw.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// String or number field as text, verbatim. Null and other types count as absent.
fn text(raw: &Value, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trimmed, non-empty text field, used for identifiers.
fn identifier(raw: &Value, key: &str) -> Option<String> {
    text(raw, key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Finite numeric field, accepting numeric strings.
fn number(raw: &Value, key: &str) -> Option<f64> {
    let n = match raw.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

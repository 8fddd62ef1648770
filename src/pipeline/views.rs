// src/pipeline/views.rs

//! Page-level view models.
//!
//! Each loader performs the upstream calls for one page and folds every
//! failure into a displayable state, so a page always renders.

use serde::Serialize;

use crate::error::AppError;
use crate::models::{Dog, FormEntry, Meeting, Race};
use crate::pipeline::normalize::{race_detail, today_meetings, track_schedule};
use crate::pipeline::rank::rank;
use crate::services::{TODAY_PATH, Upstream, race_path, track_path};

/// Form lines shown per runner before expanding.
pub const FORM_PREVIEW_LEN: usize = 5;

pub const NO_MEETINGS: &str = "No races available in the database for today.";
pub const TRACK_UNAVAILABLE: &str =
    "Unable to load the race schedule for this track at this time.";
pub const RACE_FETCH_FAILED: &str = "Failed to fetch race details.";
pub const RACE_NOT_FOUND: &str = "Unable to locate race.";

// --- Home ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HomeView {
    Meetings { meetings: Vec<Meeting> },
    NoRaces { message: String },
}

/// Load today's meetings. A failed fetch shows the same empty state as an
/// empty card; the failure itself only reaches the log.
pub async fn load_home<U>(upstream: &U) -> HomeView
where
    U: Upstream + ?Sized,
{
    let meetings = match upstream.fetch(TODAY_PATH).await {
        Ok(raw) => today_meetings(&raw),
        Err(e) => {
            log::warn!("Error loading live tracks: {e}");
            Vec::new()
        }
    };

    if meetings.is_empty() {
        HomeView::NoRaces {
            message: NO_MEETINGS.to_string(),
        }
    } else {
        HomeView::Meetings { meetings }
    }
}

// --- Track ---

/// One line of a track's race card.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceRow {
    pub id: String,
    /// Off time, `TBD` when unknown
    pub time: String,
    /// `480m`, or `N/A` when unknown
    pub distance: String,
    pub grade: Option<String>,
    pub going: Option<String>,
}

impl From<&Race> for RaceRow {
    fn from(race: &Race) -> Self {
        Self {
            id: race.id.clone(),
            time: race
                .time
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "TBD".to_string()),
            distance: race.distance_label().unwrap_or_else(|| "N/A".to_string()),
            grade: race
                .grade
                .as_deref()
                .filter(|g| !g.is_empty())
                .map(str::to_uppercase),
            going: race.going.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TrackView {
    Schedule {
        track_name: String,
        races: Vec<RaceRow>,
    },
    NoRaces {
        track_name: String,
        message: String,
    },
    Unavailable {
        track_name: String,
        message: String,
    },
}

/// Display name for a track slug (`perry-barr` → `PERRY BARR`).
pub fn track_display_name(slug: &str) -> String {
    slug.to_uppercase().replace('-', " ")
}

/// Load a track's race card, keeping the upstream race order.
pub async fn load_track<U>(upstream: &U, track_id: &str) -> TrackView
where
    U: Upstream + ?Sized,
{
    let track_name = track_display_name(track_id);

    let races = match upstream.fetch(&track_path(track_id)).await {
        Ok(raw) => track_schedule(&raw),
        Err(e) => {
            log::warn!("Error loading track races for {track_id}: {e}");
            return TrackView::Unavailable {
                track_name,
                message: TRACK_UNAVAILABLE.to_string(),
            };
        }
    };

    if races.is_empty() {
        let message = format!("No races scheduled for {track_name} today.");
        return TrackView::NoRaces {
            track_name,
            message,
        };
    }

    TrackView::Schedule {
        track_name,
        races: races.iter().map(RaceRow::from).collect(),
    }
}

// --- Race ---

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormRow {
    pub date: String,
    pub track: String,
    pub distance: String,
    pub grade: String,
    /// Split time, `-` when unavailable
    pub split: String,
    pub remarks: String,
    /// `24.61s`
    pub time: String,
    pub going: String,
    pub weight: String,
    pub position: String,
}

impl From<&FormEntry> for FormRow {
    fn from(entry: &FormEntry) -> Self {
        Self {
            date: entry.date.clone(),
            track: entry.track.clone(),
            distance: entry.distance.clone().unwrap_or_default(),
            grade: entry.grade.clone().unwrap_or_default(),
            split: entry.sectional_label(),
            remarks: entry.remarks.clone(),
            time: entry
                .time
                .as_deref()
                .map(|t| format!("{t}s"))
                .unwrap_or_default(),
            going: entry.going.clone().unwrap_or_default(),
            weight: entry.weight.map(|w| w.to_string()).unwrap_or_default(),
            position: entry.position.clone().unwrap_or_default(),
        }
    }
}

/// A runner's form block, in trap order on the card.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DogForm {
    pub trap: u32,
    pub name: String,
    pub summary: String,
    /// First [`FORM_PREVIEW_LEN`] lines, most recent first
    pub preview: Vec<FormRow>,
    pub total_runs: usize,
}

impl From<&Dog> for DogForm {
    fn from(dog: &Dog) -> Self {
        Self {
            trap: dog.trap,
            name: dog.name.clone(),
            summary: dog.form_summary.clone(),
            preview: dog
                .recent_form
                .iter()
                .take(FORM_PREVIEW_LEN)
                .map(FormRow::from)
                .collect(),
            total_runs: dog.recent_form.len(),
        }
    }
}

/// A runner's line in the predictions list, in rank order.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    /// 1-based rank
    pub position: usize,
    pub trap: u32,
    pub name: String,
    pub win_probability: f64,
    /// `23.5%`
    pub probability_label: String,
    /// Bar width in percent; never below 1 so every runner stays visible
    pub bar_width: f64,
    /// `28.90s`, or `N/A`
    pub avg_time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RaceCard {
    pub race_id: String,
    pub track: String,
    /// Track page slug
    pub track_slug: String,
    /// `Grade A3`, or `Preview` when ungraded
    pub grade_label: String,
    pub distance: Option<String>,
    pub date: Option<String>,
    pub form: Vec<DogForm>,
    pub predictions: Vec<Prediction>,
}

impl From<&Race> for RaceCard {
    fn from(race: &Race) -> Self {
        let predictions = rank(&race.dogs)
            .iter()
            .enumerate()
            .map(|(i, dog)| Prediction {
                position: i + 1,
                trap: dog.trap,
                name: dog.name.clone(),
                win_probability: dog.model.win_probability,
                probability_label: dog.model.probability_label(),
                bar_width: dog.model.win_probability.max(1.0),
                avg_time: dog.model.avg_time_label(),
            })
            .collect();

        Self {
            race_id: race.id.clone(),
            track: race.track.clone(),
            track_slug: race.track.to_lowercase(),
            grade_label: match race.grade.as_deref() {
                Some(grade) if !grade.is_empty() => format!("Grade {grade}"),
                _ => "Preview".to_string(),
            },
            distance: race.distance_label(),
            date: race.date.clone(),
            form: race.dogs.iter().map(DogForm::from).collect(),
            predictions,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RaceView {
    Card(Box<RaceCard>),
    Unavailable { message: String },
}

/// Load a race card with trap-ordered form and ranked predictions.
pub async fn load_race<U>(upstream: &U, race_id: &str) -> RaceView
where
    U: Upstream + ?Sized,
{
    let race = upstream
        .fetch(&race_path(race_id))
        .await
        .and_then(|raw| race_detail(&raw));

    match race {
        Ok(race) => RaceView::Card(Box::new(RaceCard::from(&race))),
        Err(e) => {
            log::warn!("Error loading race details for {race_id}: {e}");
            let message = match e {
                AppError::Malformed { .. } => RACE_NOT_FOUND,
                _ => RACE_FETCH_FAILED,
            };
            RaceView::Unavailable {
                message: message.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::fake::FakeUpstream;

    fn race_json() -> serde_json::Value {
        json!({
            "raceId": "r9",
            "track": "Romford",
            "distance": "400",
            "grade": "A3",
            "date": "2026-10-16",
            "dogs": [
                { "id": "c", "name": "Cee", "trap": 3, "ml": { "winProbability": 30.0, "avgTime": 24.2 } },
                { "id": "a", "name": "Ay", "trap": 1, "ml": { "winProbability": 30.0, "avgTime": 0 },
                  "recentForm": [
                      { "date": "d1", "track": "Rom", "sectional": "None", "time": "24.50", "weight": 30.0 },
                      { "date": "d2", "track": "Rom" }, { "date": "d3", "track": "Rom" },
                      { "date": "d4", "track": "Rom" }, { "date": "d5", "track": "Rom" },
                      { "date": "d6", "track": "Rom" }
                  ] },
                { "id": "b", "name": "Bee", "trap": 2, "ml": { "winProbability": 0.4 } }
            ]
        })
    }

    #[tokio::test]
    async fn test_home_lists_meetings() {
        let upstream = FakeUpstream::new().json(
            "races/today",
            json!({ "meetings": [{ "id": "romford", "name": "Romford", "raceCount": 3 }] }),
        );
        match load_home(&upstream).await {
            HomeView::Meetings { meetings } => assert_eq!(meetings[0].id, "romford"),
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_home_failure_renders_no_races() {
        let failing = FakeUpstream::new().transport("races/today", "timed out");
        let empty = FakeUpstream::new().json("races/today", json!({ "meetings": [] }));

        let expected = HomeView::NoRaces {
            message: NO_MEETINGS.to_string(),
        };
        assert_eq!(load_home(&failing).await, expected);
        assert_eq!(load_home(&empty).await, expected);
    }

    #[tokio::test]
    async fn test_track_states() {
        let upstream = FakeUpstream::new()
            .json(
                "track/perry-barr",
                json!({ "races": [
                    { "id": "2", "time": "19:02", "distance": "480", "grade": "a5" },
                    { "id": "1", "going": "Slow" }
                ] }),
            )
            .json("track/empty", json!({ "races": [] }))
            .status("track/down", 500);

        match load_track(&upstream, "perry-barr").await {
            TrackView::Schedule { track_name, races } => {
                assert_eq!(track_name, "PERRY BARR");
                assert_eq!(races[0].id, "2");
                assert_eq!(races[0].distance, "480m");
                assert_eq!(races[0].grade.as_deref(), Some("A5"));
                assert_eq!(races[1].time, "TBD");
                assert_eq!(races[1].distance, "N/A");
                assert_eq!(races[1].going.as_deref(), Some("Slow"));
            }
            other => panic!("unexpected view: {other:?}"),
        }

        assert_eq!(
            load_track(&upstream, "empty").await,
            TrackView::NoRaces {
                track_name: "EMPTY".to_string(),
                message: "No races scheduled for EMPTY today.".to_string(),
            }
        );
        assert_eq!(
            load_track(&upstream, "down").await,
            TrackView::Unavailable {
                track_name: "DOWN".to_string(),
                message: TRACK_UNAVAILABLE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_race_card_has_trap_form_and_ranked_predictions() {
        let upstream = FakeUpstream::new().json("race/r9", race_json());
        let card = match load_race(&upstream, "r9").await {
            RaceView::Card(card) => card,
            other => panic!("unexpected view: {other:?}"),
        };

        assert_eq!(card.track_slug, "romford");
        assert_eq!(card.grade_label, "Grade A3");
        assert_eq!(card.distance.as_deref(), Some("400m"));

        let form_traps: Vec<_> = card.form.iter().map(|f| f.trap).collect();
        assert_eq!(form_traps, [1, 2, 3]);

        let ranked_traps: Vec<_> = card.predictions.iter().map(|p| p.trap).collect();
        assert_eq!(ranked_traps, [1, 3, 2]);
        assert_eq!(card.predictions[0].position, 1);
        assert_eq!(card.predictions[0].avg_time, "N/A");
        assert_eq!(card.predictions[1].avg_time, "24.20s");
        assert_eq!(card.predictions[2].probability_label, "0.4%");
        assert_eq!(card.predictions[2].bar_width, 1.0);

        let ay = &card.form[0];
        assert_eq!(ay.total_runs, 6);
        assert_eq!(ay.preview.len(), FORM_PREVIEW_LEN);
        assert_eq!(ay.preview[0].split, "-");
        assert_eq!(ay.preview[0].time, "24.50s");
        assert_eq!(ay.preview[0].weight, "30");
    }

    #[tokio::test]
    async fn test_race_unavailable_messages() {
        let upstream = FakeUpstream::new()
            .status("race/gone", 404)
            .json("race/broken", json!({ "raceId": "broken", "track": "Romford" }));

        assert_eq!(
            load_race(&upstream, "gone").await,
            RaceView::Unavailable {
                message: RACE_FETCH_FAILED.to_string()
            }
        );
        assert_eq!(
            load_race(&upstream, "broken").await,
            RaceView::Unavailable {
                message: RACE_NOT_FOUND.to_string()
            }
        );
    }

    #[test]
    fn test_ungraded_race_is_preview() {
        let race = Race {
            id: "r".to_string(),
            track: "Towcester".to_string(),
            time: None,
            distance: None,
            grade: Some(String::new()),
            going: None,
            date: None,
            dogs: Vec::new(),
        };
        let card = RaceCard::from(&race);
        assert_eq!(card.grade_label, "Preview");
        assert_eq!(card.distance, None);
    }
}

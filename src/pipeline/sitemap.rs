// src/pipeline/sitemap.rs

//! Site index traversal.
//!
//! Walks today's meetings → track schedules → races and publishes one
//! absolute URL per page. A schedule fetch that fails skips that track's
//! races and nothing else.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use url::Url;

use crate::error::Result;
use crate::models::{EntryKind, IndexEntry, Meeting, Race, SiteIndex};
use crate::pipeline::normalize::{today_meetings, track_schedule};
use crate::services::{TODAY_PATH, Upstream, track_path};
use crate::utils::url::page_url;

/// Outcome of mapping a single track.
#[derive(Debug)]
pub enum BranchOutcome {
    /// Schedule fetched; races in upstream order
    Mapped { track_id: String, races: Vec<Race> },
    /// Schedule fetch failed; the track's races are left out of the index
    Skipped { track_id: String, reason: String },
}

/// Builds a [`SiteIndex`] from the live upstream.
pub struct SiteIndexBuilder<'a, U: ?Sized> {
    upstream: &'a U,
    site_origin: &'a Url,
    max_concurrent: usize,
}

impl<'a, U> SiteIndexBuilder<'a, U>
where
    U: Upstream + ?Sized,
{
    /// Create a builder publishing under `site_origin`. Tracks are mapped one at a time.
    pub fn new(upstream: &'a U, site_origin: &'a Url) -> Self {
        Self {
            upstream,
            site_origin,
            max_concurrent: 1,
        }
    }

    /// Map up to `n` tracks concurrently.
    pub fn with_concurrency(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }

    /// Build the index. Never fails; failures shrink the index instead.
    ///
    /// Entry order: home, one entry per meeting, then races grouped by
    /// meeting in meeting order.
    pub async fn build(&self) -> SiteIndex {
        let now = Utc::now();
        let mut index = SiteIndex {
            entries: vec![self.entry(EntryKind::Home, &[], now)],
            skipped_tracks: Vec::new(),
        };

        let meetings = match self.fetch_meetings().await {
            Ok(meetings) => meetings,
            Err(e) => {
                log::error!("Site index: failed to fetch today's meetings: {e}");
                return index;
            }
        };

        for meeting in &meetings {
            index
                .entries
                .push(self.entry(EntryKind::Track, &["track", &meeting.id], now));
        }

        let outcomes: Vec<BranchOutcome> = stream::iter(meetings.into_iter().map(|m| m.id))
            .map(|track_id| self.map_track(track_id))
            .buffered(self.max_concurrent)
            .collect()
            .await;

        for outcome in outcomes {
            match outcome {
                BranchOutcome::Mapped { races, .. } => {
                    for race in races {
                        index
                            .entries
                            .push(self.entry(EntryKind::Race, &["race", &race.id], now));
                    }
                }
                BranchOutcome::Skipped { track_id, reason } => {
                    log::warn!("Site index: skipping races for track {track_id}: {reason}");
                    index.skipped_tracks.push(track_id);
                }
            }
        }

        log::info!(
            "Site index built: {} tracks, {} races, {} skipped",
            index.count(EntryKind::Track),
            index.count(EntryKind::Race),
            index.skipped_tracks.len()
        );
        index
    }

    async fn fetch_meetings(&self) -> Result<Vec<Meeting>> {
        let raw = self.upstream.fetch(TODAY_PATH).await?;
        Ok(today_meetings(&raw))
    }

    /// Fetch one track's schedule, capturing any failure in the outcome.
    async fn map_track(&self, track_id: String) -> BranchOutcome {
        match self.upstream.fetch(&track_path(&track_id)).await {
            Ok(raw) => BranchOutcome::Mapped {
                track_id,
                races: track_schedule(&raw),
            },
            Err(e) => BranchOutcome::Skipped {
                track_id,
                reason: e.to_string(),
            },
        }
    }

    fn entry(&self, kind: EntryKind, segments: &[&str], now: DateTime<Utc>) -> IndexEntry {
        IndexEntry::new(kind, page_url(self.site_origin, segments), now)
    }
}

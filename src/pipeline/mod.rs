//! Pipeline stages over the upstream race data.
//!
//! - `normalize`: raw upstream JSON → domain models
//! - `rank`: presentation order by model win probability
//! - `sitemap`: meetings → tracks → races site index traversal
//! - `views`: page-level view models built from the stages above

pub mod normalize;
pub mod rank;
pub mod sitemap;
pub mod views;

pub use normalize::{race_detail, today_meetings, track_schedule};
pub use rank::rank;
pub use sitemap::{BranchOutcome, SiteIndexBuilder};
pub use views::{HomeView, RaceView, TrackView, load_home, load_race, load_track};

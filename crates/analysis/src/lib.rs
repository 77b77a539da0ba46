//! # WildTrack Analysis
//!
//! Spatial-temporal analysis of wildlife sighting records.
//!
//! ## Components
//!
//! - **geometry**: great-circle distance, coordinate validity
//! - **density**: Gaussian kernel density estimation over sighting scatters
//! - **cluster**: k-d tree + DBSCAN hotspot/corridor clustering
//! - **temporal**: time-bucketed centroids (month / season / year)
//! - **migration**: cumulative path length, seasonal ranges, corridors
//! - **habitat**: the orchestrator composing the above into habitat-preference
//!   and migration-pattern reports
//!
//! The engine is pure and synchronous: every analysis reads an immutable
//! [`SightingCollection`](wildtrack_core::SightingCollection) snapshot and
//! returns a fresh report, so callers may fan analyses out across species or
//! time buckets without synchronization. Density estimation and clustering
//! are superlinear in point count; pre-bucket very large collections by
//! species or time window first.

pub mod cluster;
pub mod density;
pub mod geometry;
pub mod habitat;
pub(crate) mod maybe_rayon;
pub mod migration;
pub mod temporal;

pub use habitat::{HabitatAnalyzer, HabitatReport, MigrationReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cluster::{dbscan, DbscanParams, KdTree, NOISE};
    pub use crate::density::KernelDensity;
    pub use crate::geometry::{haversine_distance, validate_coordinate, EARTH_RADIUS_KM};
    pub use crate::habitat::{
        Diagnostics, HabitatAnalyzer, HabitatBreakdown, HabitatMetrics, HabitatReport,
        MigrationReport,
    };
    pub use crate::migration::{
        migration_corridors, seasonal_ranges, total_distance, Corridor, SeasonalRange,
    };
    pub use crate::temporal::{centroids_by, period_key};
    pub use wildtrack_core::prelude::*;
}

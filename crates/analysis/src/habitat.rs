//! Habitat and migration analysis orchestrator.
//!
//! Composes the density estimator, cluster detector, temporal aggregator
//! and migration calculator into the two public analyses. Soft failures
//! (unknown species, empty groups, skipped density fits) are reported both
//! as `tracing` warnings and as explicit [`Diagnostics`] counters on the
//! returned report, so callers never have to scrape logs.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;
use wildtrack_core::record::{RawSighting, Sighting, SightingCollection};
use wildtrack_core::time::{Centroid, PeriodKey, Season, TimeKey};
use wildtrack_core::{Error, Result};

use crate::cluster::{dbscan, DbscanParams, NOISE};
use crate::density::KernelDensity;
use crate::migration::{migration_corridors, seasonal_ranges, total_distance, Corridor, SeasonalRange};
use crate::temporal::{centroids_by, period_key};

/// Per-call counters for conditions that are not errors but worth knowing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Groups that matched no records and produced an empty bundle
    pub empty_groups: u32,
    /// Groups whose density fit was skipped (too few or degenerate points)
    pub density_failures: u32,
}

/// Habitat-preference metrics for one group of sightings.
///
/// An empty group yields the `Default` bundle: zero counts, no density
/// surface, no hotspots.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HabitatMetrics {
    pub total_sightings: usize,
    /// Distinct (latitude, longitude) pairs
    pub unique_locations: usize,
    /// Points assigned to a non-noise cluster
    pub hotspot_count: usize,
    /// Fitted density surface; `None` when the group was too small or
    /// degenerate to fit one
    pub density: Option<KernelDensity>,
    /// The non-noise point subset
    pub hotspots: Vec<Sighting>,
}

/// Habitat metrics, either for the whole filtered set or per time bucket.
#[derive(Debug, Clone, Serialize)]
pub enum HabitatBreakdown {
    Combined(HabitatMetrics),
    ByPeriod(BTreeMap<PeriodKey, HabitatMetrics>),
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitatReport {
    pub breakdown: HabitatBreakdown,
    pub diagnostics: Diagnostics,
}

/// Migration-pattern metrics for one species.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    /// Per-period centroids, ordered by the time window's natural order
    pub centroids: Vec<Centroid>,
    /// Cumulative great-circle path length along the centroids, km
    pub total_distance_km: f64,
    pub seasonal_ranges: BTreeMap<Season, SeasonalRange>,
    pub corridors: Vec<Corridor>,
    pub diagnostics: Diagnostics,
}

/// The analysis engine over one immutable sighting collection.
///
/// Stateless across calls: every analysis reads the collection snapshot and
/// returns a freshly built report, so concurrent callers need no
/// synchronization.
#[derive(Debug, Clone)]
pub struct HabitatAnalyzer {
    collection: SightingCollection,
    cluster_params: DbscanParams,
}

impl HabitatAnalyzer {
    /// Wrap an already-typed collection. The schema is guaranteed by
    /// construction of [`SightingCollection`], so this cannot fail.
    pub fn new(collection: SightingCollection) -> Self {
        Self {
            collection,
            cluster_params: DbscanParams::default(),
        }
    }

    /// Build the analyzer from raw cleaning-pipeline rows.
    ///
    /// Performs the one-time schema check: any of the required fields
    /// absent fails with [`Error::Schema`] listing all missing names.
    pub fn from_raw(rows: &[RawSighting]) -> Result<Self> {
        Ok(Self::new(SightingCollection::from_raw(rows)?))
    }

    /// Override the clustering parameters used for hotspots and corridors.
    pub fn with_cluster_params(mut self, params: DbscanParams) -> Self {
        self.cluster_params = params;
        self
    }

    pub fn collection(&self) -> &SightingCollection {
        &self.collection
    }

    /// Habitat-preference metrics, optionally filtered to one species and
    /// optionally grouped by year or season.
    ///
    /// `time_period` of `TimeKey::Month` is not a supported grouping here
    /// and fails with [`Error::InvalidArgument`]. A filter that matches
    /// nothing is not an error: it yields an empty bundle and bumps
    /// `diagnostics.empty_groups`.
    pub fn analyze_habitat_preferences(
        &self,
        species: Option<&str>,
        time_period: Option<TimeKey>,
    ) -> Result<HabitatReport> {
        let filtered: Vec<&Sighting> = self
            .collection
            .iter()
            .filter(|r| species.is_none_or(|s| r.species == s))
            .collect();

        let mut diagnostics = Diagnostics::default();
        let breakdown = match time_period {
            None => HabitatBreakdown::Combined(self.habitat_metrics(&filtered, &mut diagnostics)),
            Some(TimeKey::Month) => {
                return Err(Error::InvalidArgument {
                    name: "time_period",
                    value: "month".to_string(),
                    expected: "year or season",
                });
            }
            Some(key) => {
                let mut groups: BTreeMap<PeriodKey, Vec<&Sighting>> = BTreeMap::new();
                for &record in &filtered {
                    groups
                        .entry(period_key(record, key))
                        .or_default()
                        .push(record);
                }
                if groups.is_empty() {
                    diagnostics.empty_groups += 1;
                    warn!(
                        species = species.unwrap_or("<all>"),
                        "no records matched the habitat-preference filter"
                    );
                }
                HabitatBreakdown::ByPeriod(
                    groups
                        .into_iter()
                        .map(|(period, records)| {
                            (period, self.habitat_metrics(&records, &mut diagnostics))
                        })
                        .collect(),
                )
            }
        };

        Ok(HabitatReport {
            breakdown,
            diagnostics,
        })
    }

    /// Migration-pattern metrics for one species over monthly or seasonal
    /// centroids.
    ///
    /// `time_window` must be `TimeKey::Month` or `TimeKey::Season`; `Year`
    /// fails with [`Error::InvalidArgument`]. An unknown species is a soft
    /// failure: the report comes back empty with a logged warning and
    /// `diagnostics.empty_groups` set.
    pub fn analyze_migration_patterns(
        &self,
        species: &str,
        time_window: TimeKey,
    ) -> Result<MigrationReport> {
        if time_window == TimeKey::Year {
            return Err(Error::InvalidArgument {
                name: "time_window",
                value: "year".to_string(),
                expected: "month or season",
            });
        }

        let filtered = self.collection.for_species(species);
        if filtered.is_empty() {
            warn!(species, "no records found for species");
            return Ok(MigrationReport {
                diagnostics: Diagnostics {
                    empty_groups: 1,
                    ..Diagnostics::default()
                },
                ..MigrationReport::default()
            });
        }

        let centroids = centroids_by(filtered.records(), time_window);
        let total_distance_km = total_distance(&centroids)?;

        Ok(MigrationReport {
            total_distance_km,
            seasonal_ranges: seasonal_ranges(filtered.records()),
            corridors: migration_corridors(filtered.records(), &self.cluster_params),
            centroids,
            diagnostics: Diagnostics::default(),
        })
    }

    /// Metrics for one group of records; never fails, records shortfalls in
    /// `diagnostics`.
    fn habitat_metrics(
        &self,
        records: &[&Sighting],
        diagnostics: &mut Diagnostics,
    ) -> HabitatMetrics {
        if records.is_empty() {
            diagnostics.empty_groups += 1;
            warn!("habitat metrics requested for an empty group");
            return HabitatMetrics::default();
        }

        let coords: Vec<(f64, f64)> = records.iter().map(|r| (r.longitude, r.latitude)).collect();

        let unique_locations = records
            .iter()
            .map(|r| (coord_key(r.latitude), coord_key(r.longitude)))
            .collect::<HashSet<_>>()
            .len();

        let labels = dbscan(&coords, &self.cluster_params);
        let hotspots: Vec<Sighting> = records
            .iter()
            .zip(&labels)
            .filter(|(_, &label)| label != NOISE)
            .map(|(r, _)| (*r).clone())
            .collect();
        let hotspot_count = hotspots.len();

        let density = match KernelDensity::fit(&coords) {
            Ok(kde) => Some(kde),
            Err(err) => {
                diagnostics.density_failures += 1;
                warn!(%err, "skipping density surface for group");
                None
            }
        };

        HabitatMetrics {
            total_sightings: records.len(),
            unique_locations,
            hotspot_count,
            density,
            hotspots,
        }
    }
}

/// Hash key for coordinate de-duplication. Folds -0.0 into 0.0 so the two
/// zeros count as one location; NaN cannot occur in validated records.
fn coord_key(value: f64) -> u64 {
    if value == 0.0 {
        0u64
    } else {
        value.to_bits()
    }
}

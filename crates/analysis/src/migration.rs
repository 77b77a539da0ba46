//! Migration metrics: cumulative path length, seasonal ranges, corridors.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use geo::{BoundingRect, MultiPoint, Point};
use serde::{Deserialize, Serialize};
use wildtrack_core::record::Sighting;
use wildtrack_core::time::{Centroid, Season};
use wildtrack_core::Result;

use crate::cluster::{dbscan, DbscanParams, NOISE};
use crate::geometry::haversine_distance;

/// Min/max latitude and longitude spanned by one season's sightings.
///
/// A bounding box over the raw scatter, not a centroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalRange {
    /// (min, max) latitude in degrees
    pub latitude: (f64, f64),
    /// (min, max) longitude in degrees
    pub longitude: (f64, f64),
}

/// One density-connected cluster of sightings, read as a migration route
/// segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    /// Member positions as (latitude, longitude), in no particular order
    pub points: Vec<(f64, f64)>,
    pub sighting_count: usize,
    /// (earliest, latest) member timestamp
    pub time_span: (NaiveDateTime, NaiveDateTime),
}

/// Cumulative great-circle path length along ordered centroids, km.
///
/// Sums the haversine distance between each consecutive pair. Fewer than
/// two centroids give 0.0. The result is a path length, never negative.
pub fn total_distance(centroids: &[Centroid]) -> Result<f64> {
    let mut total = 0.0;
    for pair in centroids.windows(2) {
        total += haversine_distance(
            pair[0].latitude,
            pair[0].longitude,
            pair[1].latitude,
            pair[1].longitude,
        )?;
    }
    Ok(total)
}

/// Bounding box of the record scatter for each season present.
pub fn seasonal_ranges(records: &[Sighting]) -> BTreeMap<Season, SeasonalRange> {
    let mut by_season: BTreeMap<Season, Vec<Point<f64>>> = BTreeMap::new();
    for record in records {
        by_season
            .entry(record.season)
            .or_default()
            .push(Point::new(record.longitude, record.latitude));
    }

    by_season
        .into_iter()
        .filter_map(|(season, points)| {
            MultiPoint::from(points).bounding_rect().map(|rect| {
                (
                    season,
                    SeasonalRange {
                        latitude: (rect.min().y, rect.max().y),
                        longitude: (rect.min().x, rect.max().x),
                    },
                )
            })
        })
        .collect()
}

/// Extract corridor descriptors from the record scatter.
///
/// Runs DBSCAN over the (longitude, latitude) scatter and emits one
/// [`Corridor`] per non-noise cluster. Corridors are unordered among
/// themselves; an all-noise scatter gives an empty result.
pub fn migration_corridors(records: &[Sighting], params: &DbscanParams) -> Vec<Corridor> {
    let coords: Vec<(f64, f64)> = records.iter().map(|r| (r.longitude, r.latitude)).collect();
    let labels = dbscan(&coords, params);
    let max_label = labels.iter().copied().max().unwrap_or(NOISE);

    let mut corridors = Vec::new();
    for label in 0..=max_label {
        let members: Vec<&Sighting> = records
            .iter()
            .zip(&labels)
            .filter(|(_, &l)| l == label)
            .map(|(r, _)| r)
            .collect();
        if members.is_empty() {
            continue;
        }

        let mut earliest = members[0].timestamp;
        let mut latest = members[0].timestamp;
        for m in &members {
            earliest = earliest.min(m.timestamp);
            latest = latest.max(m.timestamp);
        }

        corridors.push(Corridor {
            points: members.iter().map(|m| (m.latitude, m.longitude)).collect(),
            sighting_count: members.len(),
            time_span: (earliest, latest),
        });
    }
    corridors
}

//! Time-bucketed aggregation: per-period centroids and counts.

use std::collections::HashMap;

use geo::{Centroid as GeoCentroid, MultiPoint, Point};
use wildtrack_core::record::Sighting;
use wildtrack_core::time::{Centroid, PeriodKey, TimeKey};

/// The bucket a record falls into under the given time key.
pub fn period_key(record: &Sighting, key: TimeKey) -> PeriodKey {
    match key {
        TimeKey::Month => PeriodKey::Month(record.month),
        TimeKey::Season => PeriodKey::Season(record.season),
        TimeKey::Year => PeriodKey::Year(record.year),
    }
}

/// Bucket records by a time key and compute one centroid per bucket.
///
/// Centroid coordinates are the arithmetic mean of the member coordinates;
/// `sighting_count` is the member count. Output order is the natural order
/// of the key: chronological for month/year, the fixed Winter → Spring →
/// Summer → Autumn cycle for seasons. Empty input gives an empty result.
pub fn centroids_by(records: &[Sighting], key: TimeKey) -> Vec<Centroid> {
    let mut buckets: HashMap<PeriodKey, Vec<Point<f64>>> = HashMap::new();
    for record in records {
        buckets
            .entry(period_key(record, key))
            .or_default()
            .push(Point::new(record.longitude, record.latitude));
    }

    let mut centroids: Vec<Centroid> = buckets
        .into_iter()
        .filter_map(|(period, points)| {
            let sighting_count = points.len();
            MultiPoint::from(points).centroid().map(|c| Centroid {
                period,
                latitude: c.y(),
                longitude: c.x(),
                sighting_count,
            })
        })
        .collect();

    centroids.sort_by_key(|c| c.period);
    centroids
}

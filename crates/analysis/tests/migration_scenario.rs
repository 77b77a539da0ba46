//! End-to-end migration scenario: a species sighted in two seasonal
//! aggregations 30 degrees of latitude apart.

use chrono::{NaiveDate, NaiveDateTime};
use wildtrack_analysis::geometry::haversine_distance;
use wildtrack_analysis::habitat::{HabitatAnalyzer, HabitatBreakdown};
use wildtrack_analysis::prelude::*;

fn ts(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// 10 records for species "X": 5 in January around (10°N, 20°E) and 5 in
/// July around (40°N, 20°E), both groups tighter than the default eps.
fn two_site_collection() -> SightingCollection {
    let mut records = Vec::new();
    for i in 0..5 {
        let off = i as f64 * 0.08;
        records.push(
            Sighting::new("X", 10.0 + off, 20.0 - off, ts(2022, 1, 2 + i as u32), 1).unwrap(),
        );
        records.push(
            Sighting::new("X", 40.0 - off, 20.0 + off, ts(2022, 7, 2 + i as u32), 1).unwrap(),
        );
    }
    SightingCollection::new(records)
}

#[test]
fn migration_patterns_two_sites() {
    let analyzer = HabitatAnalyzer::new(two_site_collection());
    let report = analyzer
        .analyze_migration_patterns("X", TimeKey::Month)
        .unwrap();

    // Two monthly centroids, January before July
    assert_eq!(report.centroids.len(), 2);
    assert_eq!(report.centroids[0].period, PeriodKey::Month(1));
    assert_eq!(report.centroids[1].period, PeriodKey::Month(7));

    let january = &report.centroids[0];
    let july = &report.centroids[1];
    assert!((january.latitude - 10.0).abs() < 0.5, "january centroid {january:?}");
    assert!((january.longitude - 20.0).abs() < 0.5);
    assert!((july.latitude - 40.0).abs() < 0.5, "july centroid {july:?}");
    assert!((july.longitude - 20.0).abs() < 0.5);
    assert_eq!(january.sighting_count, 5);
    assert_eq!(july.sighting_count, 5);

    // Total distance is the single segment between the two centroids,
    // ~3340 km for 30 degrees of latitude
    let segment = haversine_distance(
        january.latitude,
        january.longitude,
        july.latitude,
        july.longitude,
    )
    .unwrap();
    assert!((report.total_distance_km - segment).abs() < 1e-9);
    assert!(
        (report.total_distance_km - 3340.0).abs() < 3340.0 * 0.05,
        "expected ~3340 km, got {}",
        report.total_distance_km
    );

    // Winter and Summer ranges cover the respective sites
    assert_eq!(report.seasonal_ranges.len(), 2);
    let winter = &report.seasonal_ranges[&Season::Winter];
    assert!(winter.latitude.0 >= 10.0 && winter.latitude.1 <= 10.5);
    let summer = &report.seasonal_ranges[&Season::Summer];
    assert!(summer.latitude.0 >= 39.5 && summer.latitude.1 <= 40.0);

    // Each site is one corridor with all 5 members
    assert_eq!(report.corridors.len(), 2);
    for corridor in &report.corridors {
        assert_eq!(corridor.sighting_count, 5);
        assert_eq!(corridor.points.len(), 5);
    }
}

#[test]
fn seasonal_window_collapses_to_two_centroids() {
    let analyzer = HabitatAnalyzer::new(two_site_collection());
    let report = analyzer
        .analyze_migration_patterns("X", TimeKey::Season)
        .unwrap();

    assert_eq!(report.centroids.len(), 2);
    assert_eq!(report.centroids[0].period, PeriodKey::Season(Season::Winter));
    assert_eq!(report.centroids[1].period, PeriodKey::Season(Season::Summer));
}

#[test]
fn habitat_preferences_on_the_same_collection() {
    let analyzer = HabitatAnalyzer::new(two_site_collection());
    let report = analyzer.analyze_habitat_preferences(Some("X"), None).unwrap();

    let HabitatBreakdown::Combined(metrics) = report.breakdown else {
        panic!("expected combined breakdown");
    };
    assert_eq!(metrics.total_sightings, 10);
    assert_eq!(metrics.unique_locations, 10);
    // Both sites cluster, so every point is a hotspot
    assert_eq!(metrics.hotspot_count, 10);
    assert!(metrics.density.is_some());

    let kde = metrics.density.unwrap();
    // The density surface should peak near the sites, not between them
    let at_site = kde.evaluate(20.0, 10.0);
    let between = kde.evaluate(20.0, 25.0);
    assert!(at_site > between);
}

#[test]
fn unknown_species_yields_empty_results_everywhere() {
    let analyzer = HabitatAnalyzer::new(two_site_collection());

    let habitat = analyzer
        .analyze_habitat_preferences(Some("Unknown"), None)
        .unwrap();
    assert_eq!(habitat.diagnostics.empty_groups, 1);

    let migration = analyzer
        .analyze_migration_patterns("Unknown", TimeKey::Month)
        .unwrap();
    assert!(migration.centroids.is_empty());
    assert!(migration.corridors.is_empty());
    assert_eq!(migration.total_distance_km, 0.0);
}

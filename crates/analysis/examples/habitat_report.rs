//! Run both analyses over a small synthetic humpback dataset and print the
//! reports as JSON.
//!
//! ```sh
//! cargo run --example habitat_report -p wildtrack-analysis
//! ```

use chrono::NaiveDate;
use wildtrack_analysis::prelude::*;

fn main() -> Result<()> {
    tracing_init();

    let species = "Megaptera novaeangliae";
    let mut records = Vec::new();
    // Breeding aggregation off Hawaii in February, feeding grounds off
    // Alaska in August.
    for i in 0..8 {
        let off = i as f64 * 0.07;
        let feb = NaiveDate::from_ymd_opt(2023, 2, 1 + i)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let aug = NaiveDate::from_ymd_opt(2023, 8, 1 + i)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        records.push(Sighting::new(species, 20.8 + off, -156.3 - off, feb, 2)?);
        records.push(Sighting::new(species, 58.4 - off, -151.7 + off, aug, 3)?);
    }

    let analyzer = HabitatAnalyzer::new(SightingCollection::new(records));

    let habitat = analyzer.analyze_habitat_preferences(Some(species), None)?;
    println!("habitat preferences:");
    println!("{}", serde_json::to_string_pretty(&habitat).unwrap());

    let migration = analyzer.analyze_migration_patterns(species, TimeKey::Month)?;
    println!("migration patterns:");
    println!("{}", serde_json::to_string_pretty(&migration).unwrap());
    println!(
        "total migration distance: {:.0} km over {} centroids",
        migration.total_distance_km,
        migration.centroids.len()
    );

    Ok(())
}

fn tracing_init() {
    // Examples only; the library itself never installs a subscriber.
    let _ = tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    );
}

//! Sighting records and the immutable collection the analysis engine reads.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::time::{Hemisphere, Season};

/// Column names the cleaning collaborator must supply.
pub const REQUIRED_FIELDS: [&str; 4] = ["scientificname", "latitude", "longitude", "eventdate"];

/// One row as handed over by the cleaning pipeline, before typing.
///
/// Field names follow the upstream column contract (`scientificname`,
/// `eventdate`, `individualcount`). Every field is optional here; the schema
/// check happens once, in [`SightingCollection::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSighting {
    #[serde(rename = "scientificname")]
    pub species: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "eventdate")]
    pub event_date: Option<NaiveDateTime>,
    #[serde(rename = "individualcount", default)]
    pub individual_count: Option<u32>,
}

/// A validated sighting record.
///
/// The calendar fields (`year`, `month`, `season`, `hemisphere`) are derived
/// once at construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sighting {
    pub species: String,
    /// Degrees, -90..=90
    pub latitude: f64,
    /// Degrees, -180..=180
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
    /// Number of individuals observed; at least 1.
    pub individual_count: u32,
    pub year: i32,
    pub month: u32,
    pub season: Season,
    pub hemisphere: Hemisphere,
}

impl Sighting {
    /// Build a sighting, validating coordinate ranges and deriving the
    /// calendar fields. An `individual_count` of 0 is clamped to 1.
    pub fn new(
        species: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timestamp: NaiveDateTime,
        individual_count: u32,
    ) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self {
            species: species.into(),
            latitude,
            longitude,
            timestamp,
            individual_count: individual_count.max(1),
            year: timestamp.year(),
            month: timestamp.month(),
            season: Season::from_month(timestamp.month()),
            hemisphere: Hemisphere::from_latitude(latitude),
        })
    }
}

/// An immutable collection of sightings.
///
/// Analyses never mutate a collection; filtering produces a new one.
/// Insertion order does not affect any analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightingCollection {
    records: Vec<Sighting>,
}

impl SightingCollection {
    pub fn new(records: Vec<Sighting>) -> Self {
        Self { records }
    }

    /// Convert raw cleaning-pipeline rows into a typed collection.
    ///
    /// The schema is checked once, up front: a required field counts as
    /// missing if any row lacks it, and all missing fields are reported
    /// together in [`Error::Schema`]. `individualcount` is optional and
    /// defaults to 1.
    pub fn from_raw(rows: &[RawSighting]) -> Result<Self> {
        let mut absent = [false; REQUIRED_FIELDS.len()];
        for row in rows {
            absent[0] |= row.species.is_none();
            absent[1] |= row.latitude.is_none();
            absent[2] |= row.longitude.is_none();
            absent[3] |= row.event_date.is_none();
        }
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .zip(absent)
            .filter(|(_, a)| *a)
            .map(|(name, _)| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Schema { missing });
        }

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let (Some(species), Some(lat), Some(lon), Some(ts)) = (
                row.species.as_ref(),
                row.latitude,
                row.longitude,
                row.event_date,
            ) else {
                continue; // unreachable after the schema check above
            };
            records.push(Sighting::new(
                species.clone(),
                lat,
                lon,
                ts,
                row.individual_count.unwrap_or(1),
            )?);
        }
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Sighting] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sighting> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct species names, sorted.
    pub fn species_list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.iter().map(|r| r.species.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// A new collection holding only the given species' records.
    pub fn for_species(&self, species: &str) -> SightingCollection {
        SightingCollection::new(
            self.records
                .iter()
                .filter(|r| r.species == species)
                .cloned()
                .collect(),
        )
    }
}

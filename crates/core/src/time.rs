//! Calendar keys for bucketing sightings: seasons, time keys, period identities.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Meteorological season.
///
/// Variant order is the fixed season cycle used when ordering per-season
/// aggregates: Winter → Spring → Summer → Autumn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Map a calendar month (1..=12) to its season:
    /// {12, 1, 2} → Winter, {3, 4, 5} → Spring, {6, 7, 8} → Summer,
    /// {9, 10, 11} → Autumn.
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Autumn,
        }
    }
}

/// Hemisphere of a sighting; Northern iff latitude >= 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    Northern,
    Southern,
}

impl Hemisphere {
    pub fn from_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Hemisphere::Northern
        } else {
            Hemisphere::Southern
        }
    }
}

/// Bucketing key for temporal aggregation.
///
/// A closed enumeration rather than a free-form string; the string boundary
/// is [`TimeKey::from_str`], which rejects unknown keys with
/// [`Error::InvalidArgument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeKey {
    Month,
    Season,
    Year,
}

impl FromStr for TimeKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "month" => Ok(TimeKey::Month),
            "season" => Ok(TimeKey::Season),
            "year" => Ok(TimeKey::Year),
            other => Err(Error::InvalidArgument {
                name: "time_key",
                value: other.to_string(),
                expected: "month, season or year",
            }),
        }
    }
}

/// The identity of one time bucket.
///
/// Ordering within a variant is the natural bucket order: numeric for months
/// (1..=12) and years, the fixed season cycle for seasons. Aggregations never
/// mix variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum PeriodKey {
    Month(u32),
    Season(Season),
    Year(i32),
}

/// Mean position of all sightings in one time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub period: PeriodKey,
    pub latitude: f64,
    pub longitude: f64,
    pub sighting_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_from_month_table() {
        assert_eq!(Season::from_month(12), Season::Winter);
        assert_eq!(Season::from_month(1), Season::Winter);
        assert_eq!(Season::from_month(2), Season::Winter);
        assert_eq!(Season::from_month(3), Season::Spring);
        assert_eq!(Season::from_month(5), Season::Spring);
        assert_eq!(Season::from_month(6), Season::Summer);
        assert_eq!(Season::from_month(8), Season::Summer);
        assert_eq!(Season::from_month(9), Season::Autumn);
        assert_eq!(Season::from_month(11), Season::Autumn);
    }

    #[test]
    fn test_season_cycle_order() {
        assert!(Season::Winter < Season::Spring);
        assert!(Season::Spring < Season::Summer);
        assert!(Season::Summer < Season::Autumn);
    }

    #[test]
    fn test_hemisphere_equator_is_northern() {
        assert_eq!(Hemisphere::from_latitude(0.0), Hemisphere::Northern);
        assert_eq!(Hemisphere::from_latitude(-0.1), Hemisphere::Southern);
        assert_eq!(Hemisphere::from_latitude(45.0), Hemisphere::Northern);
    }

    #[test]
    fn test_time_key_parse() {
        assert_eq!("month".parse::<TimeKey>().unwrap(), TimeKey::Month);
        assert_eq!("season".parse::<TimeKey>().unwrap(), TimeKey::Season);
        assert_eq!("year".parse::<TimeKey>().unwrap(), TimeKey::Year);
    }

    #[test]
    fn test_time_key_parse_rejects_unknown() {
        let err = "week".parse::<TimeKey>().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_period_key_month_order_is_numeric() {
        // December sorts after January within a year of monthly buckets.
        assert!(PeriodKey::Month(1) < PeriodKey::Month(7));
        assert!(PeriodKey::Month(7) < PeriodKey::Month(12));
    }

    #[test]
    fn test_period_key_year_order() {
        assert!(PeriodKey::Year(2019) < PeriodKey::Year(2023));
    }
}

//! Flamingo rating: a 0-10 sunbathing score for a single forecast period.

use serde::Serialize;

use crate::types::ForecastPeriod;

/// Rate a forecast period for sunbathing.
pub fn rate(period: &ForecastPeriod) -> u8 {
    flamingo_rating(period.temperature, &period.short_forecast)
}

/// Sum of the temperature and sky sub-scores.
///
/// Temperatures are taken as degrees Fahrenheit.
pub fn flamingo_rating(temperature: i32, short_forecast: &str) -> u8 {
    temperature_score(temperature) + sky_score(short_forecast)
}

fn temperature_score(temperature: i32) -> u8 {
    match temperature {
        75..=85 => 5,
        t if t > 85 => 3,
        65..=74 => 2,
        _ => 1,
    }
}

fn sky_score(short_forecast: &str) -> u8 {
    let sky = short_forecast.to_lowercase();

    if sky.contains("sunny") && !sky.contains("partly") {
        5
    } else if sky.contains("sunny") || sky.contains("clear") {
        4
    } else if sky.contains("cloud") {
        3
    } else if sky.contains("rain") || sky.contains("storm") {
        1
    } else {
        0
    }
}

/// Legend band for a rating. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingBand {
    Great,
    Good,
    Fair,
    Poor,
    StayInside,
}

impl RatingBand {
    pub const ALL: [RatingBand; 5] = [
        RatingBand::Great,
        RatingBand::Good,
        RatingBand::Fair,
        RatingBand::Poor,
        RatingBand::StayInside,
    ];

    pub fn from_rating(rating: u8) -> Self {
        match rating {
            8..=u8::MAX => Self::Great,
            6..=7 => Self::Good,
            4..=5 => Self::Fair,
            2..=3 => Self::Poor,
            _ => Self::StayInside,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Great => "Great",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::StayInside => "Stay inside",
        }
    }

    /// Inclusive rating range covered by the band
    pub fn range(&self) -> (u8, u8) {
        match self {
            Self::Great => (8, 10),
            Self::Good => (6, 7),
            Self::Fair => (4, 5),
            Self::Poor => (2, 3),
            Self::StayInside => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(flamingo_rating(80, "Sunny"), 10);
        assert_eq!(flamingo_rating(90, "Partly Cloudy"), 6);
        assert_eq!(flamingo_rating(60, "Thunderstorms"), 2);
        assert_eq!(flamingo_rating(70, "Overcast Fog"), 2);
    }

    #[test]
    fn test_temperature_boundaries() {
        assert_eq!(temperature_score(64), 1);
        assert_eq!(temperature_score(65), 2);
        assert_eq!(temperature_score(74), 2);
        assert_eq!(temperature_score(75), 5);
        assert_eq!(temperature_score(85), 5);
        assert_eq!(temperature_score(86), 3);
        assert_eq!(temperature_score(-40), 1);
    }

    #[test]
    fn test_sky_rules_first_match_wins() {
        assert_eq!(sky_score("Mostly Sunny"), 5);
        assert_eq!(sky_score("Partly Sunny"), 4);
        assert_eq!(sky_score("Mostly Clear"), 4);
        // "cloud" outranks "rain"
        assert_eq!(sky_score("Cloudy with Rain"), 3);
        assert_eq!(sky_score("Chance Rain Showers"), 1);
        assert_eq!(sky_score("Patchy Fog"), 0);
    }

    #[test]
    fn test_sky_is_case_insensitive() {
        assert_eq!(sky_score("SUNNY"), sky_score("sunny"));
        assert_eq!(sky_score("pArTlY cLoUdY"), 3);
    }

    #[test]
    fn test_rating_always_in_range() {
        let skies = ["Sunny", "Partly Sunny", "Cloudy", "Rain", "Fog", "", "ÜBER"];
        for t in (-100..=150).step_by(5) {
            for sky in skies {
                let r = flamingo_rating(t, sky);
                assert!((1..=10).contains(&r), "rating {} for {} / {}", r, t, sky);
                assert_eq!(r, flamingo_rating(t, sky));
            }
        }
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(RatingBand::from_rating(10), RatingBand::Great);
        assert_eq!(RatingBand::from_rating(8), RatingBand::Great);
        assert_eq!(RatingBand::from_rating(7), RatingBand::Good);
        assert_eq!(RatingBand::from_rating(4), RatingBand::Fair);
        assert_eq!(RatingBand::from_rating(3), RatingBand::Poor);
        assert_eq!(RatingBand::from_rating(0), RatingBand::StayInside);
    }

    #[test]
    fn test_band_ranges_cover_scale() {
        for rating in 0..=10u8 {
            let band = RatingBand::from_rating(rating);
            let (lo, hi) = band.range();
            assert!(lo <= rating && rating <= hi);
        }
    }
}

//! Fixed table of supported beach cities.

use crate::types::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// Display name, "City, ST"
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

pub const CITIES: &[City] = &[
    City {
        name: "Naples, FL",
        latitude: 26.142,
        longitude: -81.7948,
    },
    City {
        name: "Fort Lauderdale, FL",
        latitude: 26.1224,
        longitude: -80.1373,
    },
    City {
        name: "Miami, FL",
        latitude: 25.7617,
        longitude: -80.1918,
    },
    City {
        name: "San Juan, PR",
        latitude: 18.4655,
        longitude: -66.1057,
    },
];

/// Look up a city by its exact display name (surrounding whitespace ignored).
pub fn find_city(name: &str) -> Option<&'static City> {
    let name = name.trim();
    CITIES.iter().find(|city| city.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_city() {
        let city = find_city("Miami, FL").unwrap();
        assert_eq!(city.latitude, 25.7617);
        assert_eq!(city.longitude, -80.1918);
    }

    #[test]
    fn test_find_trims_whitespace() {
        assert!(find_city("  Naples, FL ").is_some());
    }

    #[test]
    fn test_unknown_city() {
        assert!(find_city("Atlantis, XX").is_none());
        assert!(find_city("").is_none());
    }

    #[test]
    fn test_all_coordinates_are_valid() {
        for city in CITIES {
            let coords = city.coordinates();
            assert!(Coordinates::new(coords.latitude, coords.longitude).is_ok(), "{}", city.name);
        }
    }
}

//! Display glyphs for sky conditions and wind speed.
//!
//! Both resolvers are best effort and never fail: unknown text falls back to a
//! default glyph.

const SUNNY: &str = "☀️";
const PARTLY: &str = "⛅";
const MOSTLY_CLOUDY: &str = "🌥️";
const CLOUDY: &str = "☁️";
const LIGHT_RAIN: &str = "🌦️";
const RAIN: &str = "🌧️";
const STORM: &str = "⛈️";

/// Known short-forecast phrases, matched before any heuristic
const CONDITION_ICONS: &[(&str, &str)] = &[
    ("Sunny", SUNNY),
    ("Mostly Sunny", "🌤️"),
    ("Partly Sunny", PARTLY),
    ("Clear", "🌙"),
    ("Mostly Clear", "🌙"),
    ("Partly Cloudy", PARTLY),
    ("Mostly Cloudy", MOSTLY_CLOUDY),
    ("Cloudy", CLOUDY),
    ("Overcast", CLOUDY),
    ("Fog", "🌫️"),
    ("Patchy Fog", "🌫️"),
    ("Areas Of Fog", "🌫️"),
    ("Haze", "🌫️"),
    ("Drizzle", LIGHT_RAIN),
    ("Light Rain", LIGHT_RAIN),
    ("Rain", RAIN),
    ("Heavy Rain", RAIN),
    ("Rain Showers", RAIN),
    ("Slight Chance Rain Showers", LIGHT_RAIN),
    ("Chance Rain Showers", LIGHT_RAIN),
    ("Scattered Showers", LIGHT_RAIN),
    ("Thunderstorms", STORM),
    ("Scattered Thunderstorms", STORM),
    ("Showers And Thunderstorms", STORM),
    ("Chance Showers And Thunderstorms", STORM),
    ("Windy", "🌬️"),
    ("Snow", "🌨️"),
];

/// Glyph for a short forecast such as "Partly Cloudy".
pub fn weather_icon(description: &str) -> &'static str {
    let trimmed = description.trim();

    if let Some(&(_, icon)) = CONDITION_ICONS.iter().find(|(phrase, _)| *phrase == trimmed) {
        return icon;
    }

    if let Some(&(_, icon)) = CONDITION_ICONS
        .iter()
        .find(|(phrase, _)| phrase.eq_ignore_ascii_case(trimmed))
    {
        return icon;
    }

    let text = trimmed.to_lowercase();

    if text.contains("sun") || text.contains("clear") {
        return if text.contains("partly") { PARTLY } else { SUNNY };
    }

    if text.contains("cloud") {
        return if text.contains("partly") || text.contains("scattered") {
            PARTLY
        } else if text.contains("mostly") {
            MOSTLY_CLOUDY
        } else {
            CLOUDY
        };
    }

    if text.contains("rain") || text.contains("shower") {
        return if text.contains("chance") || text.contains("scattered") {
            LIGHT_RAIN
        } else {
            RAIN
        };
    }

    if text.contains("thunder") || text.contains("storm") {
        return STORM;
    }

    tracing::debug!("No icon for forecast '{}', using default", description);
    SUNNY
}

const CALM: &str = "🌫️";
const DEFAULT_WIND: &str = "🌬️";

/// Upper wind speed in mph from text like "5 mph" or "10 to 15 mph".
pub fn wind_speed_mph(wind_speed: &str) -> Option<u32> {
    let mut words = wind_speed.split_whitespace();
    let first = words.next()?.parse::<u32>().ok()?;

    match words.next() {
        Some(word) if word.eq_ignore_ascii_case("to") => words.next()?.parse().ok(),
        _ => Some(first),
    }
}

/// Glyph scale for wind speed text. Unparseable text gets a plain wind glyph.
pub fn wind_icon(wind_speed: &str) -> &'static str {
    match wind_speed_mph(wind_speed) {
        Some(0) => CALM,
        Some(1..=5) => "🍃",
        Some(6..=10) => "💨",
        Some(11..=15) => "💨💨",
        Some(16..=20) => "💨💨💨",
        Some(_) => "💨💨💨💨",
        None => DEFAULT_WIND,
    }
}

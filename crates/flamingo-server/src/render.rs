//! HTML for the city form and the forecast fragment.

use flamingo_weather::{
    day_flamingo_rating, day_flamingos, evaluate_day, is_sunbathing_day, DayForecast, RatingBand, ScoredPeriod,
    SunbathingCriteria, CITIES,
};

/// Value of the select option that switches to custom coordinates
pub const CUSTOM_LOCATION: &str = "Other";

const FLAMINGO: &str = "🦩";

/// Escape text for HTML element and attribute content
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn flamingos(rating: u8) -> String {
    FLAMINGO.repeat(usize::from(rating))
}

fn legend() -> String {
    let mut html = String::from("<ul class=\"legend\">");
    for band in RatingBand::ALL {
        let (lo, hi) = band.range();
        html.push_str(&format!(
            "<li><span class=\"band\">{}</span> {}–{} {}</li>",
            band.label(),
            lo,
            hi,
            FLAMINGO
        ));
    }
    html.push_str("</ul>");
    html
}

fn city_options() -> String {
    let mut html = String::new();
    for city in CITIES {
        let name = escape(city.name);
        html.push_str(&format!("<option value=\"{0}\">{0}</option>", name));
    }
    html.push_str(&format!(
        "<option value=\"{0}\">{0} (custom coordinates)</option>",
        CUSTOM_LOCATION
    ));
    html
}

/// The landing page with the city form
pub fn index_page() -> String {
    INDEX_TEMPLATE
        .replace("{{city_options}}", &city_options())
        .replace("{{legend}}", &legend())
        .replace("{{custom}}", CUSTOM_LOCATION)
}

fn period_card(scored: &ScoredPeriod) -> String {
    let period = &scored.period;
    let band = RatingBand::from_rating(scored.flamingo_rating);

    format!(
        concat!(
            "<div class=\"period\">",
            "<div class=\"period-title\">{icon} {name}</div>",
            "<div class=\"stat\"><strong>Temperature:</strong> {temp}°{unit}</div>",
            "<div class=\"stat\"><strong>Wind:</strong> {wind_icon} {wind} {direction}</div>",
            "<div class=\"stat\"><strong>Conditions:</strong> {sky}</div>",
            "<div class=\"flamingo\" title=\"{band}\">{flamingos} {rating}/10</div>",
            "<div class=\"detail\">{detail}</div>",
            "</div>"
        ),
        icon = scored.icon,
        name = escape(&period.name),
        temp = period.temperature,
        unit = escape(&period.temperature_unit),
        wind_icon = scored.wind_icon,
        wind = escape(&period.wind_speed),
        direction = escape(&period.wind_direction),
        sky = escape(&period.short_forecast),
        band = band.label(),
        flamingos = flamingos(scored.flamingo_rating),
        rating = scored.flamingo_rating,
        detail = escape(&period.detailed_forecast),
    )
}

fn day_verdict(day: &DayForecast, criteria: &SunbathingCriteria) -> String {
    let score = day_flamingo_rating(day, criteria);
    let count = day_flamingos(day, criteria);
    if count > 0 {
        format!(
            "<div class=\"flamingo-display\" title=\"{} of 5\">{}</div>",
            score,
            flamingos(count)
        )
    } else if is_sunbathing_day(day, criteria) {
        // Qualifying sky and temperature but no night period to score against
        "<div class=\"flamingo-display\">✅ Sunbathing day</div>".to_string()
    } else {
        "<div class=\"flamingo-display no-sunbathing\">❌ Not ideal for sunbathing</div>".to_string()
    }
}

fn day_section(day: &DayForecast, criteria: &SunbathingCriteria) -> String {
    let mut html = format!(
        concat!(
            "<section class=\"day\"><div class=\"day-header\">",
            "<div class=\"day-title\">{}</div>{}</div><ul class=\"notes\">"
        ),
        escape(&day.label),
        day_verdict(day, criteria)
    );
    for note in evaluate_day(day, criteria) {
        html.push_str(&format!("<li>{}</li>", note));
    }
    html.push_str("</ul><div class=\"periods\">");
    for period in &day.periods {
        html.push_str(&period_card(period));
    }
    html.push_str("</div></section>");
    html
}

/// Forecast fragment for one location, inserted into the page by the form script
pub fn forecast_fragment(location: &str, days: &[DayForecast], criteria: &SunbathingCriteria) -> String {
    let mut html = format!(
        "<div class=\"location-name\">{}</div>",
        escape(location)
    );
    if days.is_empty() {
        html.push_str("<p class=\"empty\">No forecast periods available.</p>");
    }
    for day in days {
        html.push_str(&day_section(day, criteria));
    }
    html
}

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Flamingo Forecast 🌞</title>
    <style>
        body { font-family: system-ui, -apple-system, sans-serif; margin: 0; padding: 20px; background: #fff5f5; color: #2c3e50; }
        .container { max-width: 1000px; margin: 0 auto; background: white; padding: 30px; border-radius: 15px; }
        h1 { color: #ff69b4; text-align: center; }
        select, input, button { font-size: 1.1em; padding: 10px; margin: 5px 0; border: 2px solid #ffb6c1; border-radius: 8px; }
        button { width: 100%; background: #ff69b4; color: white; cursor: pointer; }
        .custom { display: none; }
        .custom.active { display: block; }
        .legend { list-style: none; padding: 0; display: flex; gap: 15px; flex-wrap: wrap; }
        .band { font-weight: bold; color: #ff69b4; }
        .location-name { font-size: 1.4em; color: #ff69b4; text-align: center; margin: 20px 0; }
        .day { border: 2px solid #ffb6c1; border-radius: 10px; margin: 20px 0; padding: 15px; }
        .day-header { display: flex; justify-content: space-between; align-items: center; }
        .day-title { font-size: 1.3em; font-weight: bold; color: #ff69b4; }
        .flamingo-display { font-size: 1.6em; }
        .no-sunbathing { font-size: 0.7em; color: #c0392b; }
        .periods { display: flex; gap: 20px; flex-wrap: wrap; }
        .period { flex: 1; min-width: 250px; background: #fff0f5; padding: 15px; border-radius: 8px; }
        .period-title { font-weight: bold; margin-bottom: 10px; }
        .flamingo { font-size: 1.4em; margin: 10px 0; }
        .detail { font-style: italic; color: #666; font-size: 0.9em; }
        .error { color: #c0392b; text-align: center; }
    </style>
</head>
<body>
    <div class="container">
        <h1>Flamingo Forecast 🌞</h1>
        <form id="location-form">
            <select id="location" name="location">{{city_options}}</select>
            <div id="custom" class="custom">
                <input type="number" id="latitude" step="0.0001" placeholder="Latitude (e.g. 26.1420)">
                <input type="number" id="longitude" step="0.0001" placeholder="Longitude (e.g. -81.7948)">
            </div>
            <button type="submit">Check Weather</button>
        </form>
        {{legend}}
        <div id="results"></div>
    </div>
    <script>
        const select = document.getElementById('location');
        const custom = document.getElementById('custom');
        select.addEventListener('change', () => {
            custom.classList.toggle('active', select.value === '{{custom}}');
        });
        document.getElementById('location-form').addEventListener('submit', async (e) => {
            e.preventDefault();
            const results = document.getElementById('results');
            results.innerHTML = '<p>💅 Checking the sunshine...</p>';
            const body = { location: select.value };
            if (select.value === '{{custom}}') {
                body.latitude = parseFloat(document.getElementById('latitude').value);
                body.longitude = parseFloat(document.getElementById('longitude').value);
            }
            try {
                const response = await fetch('/', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify(body),
                });
                const data = await response.json();
                if (data.html) {
                    results.innerHTML = data.html;
                } else {
                    results.innerHTML = '';
                    const p = document.createElement('p');
                    p.className = 'error';
                    p.textContent = data.error || 'Something went wrong';
                    results.appendChild(p);
                }
            } catch (err) {
                results.innerHTML = '<p class="error">Request failed</p>';
            }
        });
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use flamingo_weather::ForecastPeriod;

    fn scored(name: &str, start: &str, is_daytime: bool, sky: &str) -> ScoredPeriod {
        ScoredPeriod::from(ForecastPeriod {
            name: name.to_string(),
            start_time: DateTime::parse_from_rfc3339(start).unwrap(),
            is_daytime,
            temperature: 80,
            temperature_unit: "F".to_string(),
            wind_speed: "5 mph".to_string(),
            wind_direction: "SE".to_string(),
            short_forecast: sky.to_string(),
            detailed_forecast: "Sunny, with a high near 80.".to_string(),
        })
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
        assert_eq!(escape("Miami, FL"), "Miami, FL");
    }

    #[test]
    fn test_flamingos() {
        assert_eq!(flamingos(0), "");
        assert_eq!(flamingos(3), "🦩🦩🦩");
    }

    #[test]
    fn test_index_lists_cities_and_custom_option() {
        let html = index_page();
        for city in CITIES {
            assert!(html.contains(city.name), "missing {}", city.name);
        }
        assert!(html.contains("value=\"Other\""));
        assert!(html.contains("Stay inside"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_fragment_renders_days_and_periods() {
        let days = flamingo_weather::group_by_day(vec![
            scored("Today", "2025-03-10T06:00:00-04:00", true, "Sunny"),
            scored("Tonight", "2025-03-10T18:00:00-04:00", false, "Clear"),
        ]);
        let html = forecast_fragment("Miami, FL", &days, &SunbathingCriteria::default());

        assert!(html.contains("Miami, FL"));
        assert!(html.contains("Monday, March 10"));
        assert!(html.contains("Today"));
        assert!(html.contains("Tonight"));
        assert!(html.contains("🦩🦩🦩🦩🦩🦩🦩🦩🦩🦩 10/10"));
        assert!(html.contains("Perfect sunny conditions!"));
    }

    #[test]
    fn test_day_header_shows_day_score() {
        // 80°F sunny day, warm night, light breeze: 0 + 0.5 + 1 + 1.5
        let days = flamingo_weather::group_by_day(vec![
            scored("Today", "2025-03-10T06:00:00-04:00", true, "Sunny"),
            scored("Tonight", "2025-03-10T18:00:00-04:00", false, "Clear"),
        ]);
        let html = day_section(&days[0], &SunbathingCriteria::default());
        assert!(html.contains("title=\"3 of 5\">🦩🦩🦩</div>"), "{}", html);
        assert!(!html.contains("Not ideal"));
    }

    #[test]
    fn test_day_header_rejects_poor_day() {
        let days = flamingo_weather::group_by_day(vec![
            scored("Today", "2025-03-10T06:00:00-04:00", true, "Thunderstorms"),
            scored("Tonight", "2025-03-10T18:00:00-04:00", false, "Rain"),
        ]);
        let html = day_section(&days[0], &SunbathingCriteria::default());
        assert!(html.contains("❌ Not ideal for sunbathing"));
    }

    #[test]
    fn test_fragment_escapes_upstream_text() {
        let days = flamingo_weather::group_by_day(vec![scored(
            "<script>",
            "2025-03-10T06:00:00-04:00",
            true,
            "Sunny",
        )]);
        let html = forecast_fragment("Miami, FL", &days, &SunbathingCriteria::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_fragment() {
        let html = forecast_fragment("Miami, FL", &[], &SunbathingCriteria::default());
        assert!(html.contains("No forecast periods"));
    }
}

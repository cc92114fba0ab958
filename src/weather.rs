/*
 * Copyright 2026 Lingua Team
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use chrono::{Duration, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_FORECAST_DAYS: u16 = 5;

pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    #[schema(value_type = String, format = Date, example = "2026-01-01")]
    pub date: NaiveDate,
    #[schema(example = 21)]
    pub temperature_c: i32,
    #[schema(example = 69)]
    pub temperature_f: i32,
    #[schema(example = "Mild")]
    pub summary: Option<String>,
}

impl WeatherForecast {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            date,
            temperature_c,
            temperature_f: fahrenheit(temperature_c),
            summary,
        }
    }
}

/// Truncating conversion, so -20C maps to -3F.
pub fn fahrenheit(celsius: i32) -> i32 {
    32 + (f64::from(celsius) / 0.5556) as i32
}

/// One forecast per day for the `days` days following `today`.
pub fn generate_forecast<R: Rng>(
    rng: &mut R,
    today: NaiveDate,
    days: u16,
) -> Vec<WeatherForecast> {
    (1..=i64::from(days))
        .map(|offset| {
            let summary = SUMMARIES[rng.gen_range(0..SUMMARIES.len())];
            WeatherForecast::new(
                today + Duration::days(offset),
                rng.gen_range(-20..55),
                Some(summary.to_string()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_fahrenheit_truncates() {
        assert_eq!(fahrenheit(0), 32);
        assert_eq!(fahrenheit(25), 76);
        assert_eq!(fahrenheit(-20), -3);
        assert_eq!(fahrenheit(54), 129);
    }

    #[test]
    fn test_generate_forecast_dates_follow_today() {
        let mut rng = StdRng::seed_from_u64(7);
        let forecast = generate_forecast(&mut rng, today(), 3);

        let dates: Vec<_> = forecast.iter().map(|f| f.date.to_string()).collect();
        assert_eq!(dates, vec!["2026-10-17", "2026-10-18", "2026-10-19"]);
    }

    #[test]
    fn test_generate_forecast_values_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let forecast = generate_forecast(&mut rng, today(), 200);

        assert_eq!(forecast.len(), 200);
        for day in &forecast {
            assert!((-20..55).contains(&day.temperature_c));
            assert_eq!(day.temperature_f, fahrenheit(day.temperature_c));
            assert!(SUMMARIES.contains(&day.summary.as_deref().unwrap()));
        }
    }

    #[test]
    fn test_zero_days() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_forecast(&mut rng, today(), 0).is_empty());
    }

    #[test]
    fn test_serialized_field_names() {
        let forecast = WeatherForecast::new(today(), 10, Some("Cool".to_string()));
        let value = serde_json::to_value(&forecast).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "date": "2026-10-16",
                "temperatureC": 10,
                "temperatureF": 49,
                "summary": "Cool"
            })
        );
    }
}

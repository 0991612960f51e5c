use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::LookHeartError;

/// One chart row, e.g. `{ "time": "09:00", "bpm": 74 }`. Shape is owned by the data provider.
pub type Record = Map<String, Value>;

// `null` in the source document reads as an empty series.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Record>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// --- 序列选择 ---
/// Per-day series that back `day` charts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DailySeries {
    HeartRate,
    Hrv,
    Stress,
    Abnormal,
    Calories,
    Steps,
}

/// Pre-aggregated series available for week, month and year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregate {
    Abnormal,
    Calories,
    Steps,
}

// --- 指标数据 (日 / 周 / 月 / 年) ---
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyStats {
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_heart_rate: Vec<Record>,
    #[serde(rename = "hourlyHRV")]
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_hrv: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_stress: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_abnormal: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_calories: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub hourly_steps: Vec<Record>,
}

impl DailyStats {
    pub fn series(&self, which: DailySeries) -> &[Record] {
        match which {
            DailySeries::HeartRate => &self.hourly_heart_rate,
            DailySeries::Hrv => &self.hourly_hrv,
            DailySeries::Stress => &self.hourly_stress,
            DailySeries::Abnormal => &self.hourly_abnormal,
            DailySeries::Calories => &self.hourly_calories,
            DailySeries::Steps => &self.hourly_steps,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeeklyStats {
    #[serde(deserialize_with = "null_as_empty")]
    pub weekly_abnormal: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub weekly_calories: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub weekly_steps: Vec<Record>,
}

impl WeeklyStats {
    pub fn series(&self, which: Aggregate) -> &[Record] {
        match which {
            Aggregate::Abnormal => &self.weekly_abnormal,
            Aggregate::Calories => &self.weekly_calories,
            Aggregate::Steps => &self.weekly_steps,
        }
    }
}

// Month charts have one bar per day.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonthlyStats {
    #[serde(deserialize_with = "null_as_empty")]
    pub daily_abnormal: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub daily_calories: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub daily_steps: Vec<Record>,
}

impl MonthlyStats {
    pub fn series(&self, which: Aggregate) -> &[Record] {
        match which {
            Aggregate::Abnormal => &self.daily_abnormal,
            Aggregate::Calories => &self.daily_calories,
            Aggregate::Steps => &self.daily_steps,
        }
    }
}

// Year charts have one bar per month.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YearlyStats {
    #[serde(deserialize_with = "null_as_empty")]
    pub monthly_abnormal: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub monthly_calories: Vec<Record>,
    #[serde(deserialize_with = "null_as_empty")]
    pub monthly_steps: Vec<Record>,
}

impl YearlyStats {
    pub fn series(&self, which: Aggregate) -> &[Record] {
        match which {
            Aggregate::Abnormal => &self.monthly_abnormal,
            Aggregate::Calories => &self.monthly_calories,
            Aggregate::Steps => &self.monthly_steps,
        }
    }
}

/// Health metrics keyed by day (`YYYY-MM-DD`), week (`YYYY-MM-DD~YYYY-MM-DD`),
/// month (`YYYY-MM`) and year (`YYYY`).
///
/// Unknown fields in the source document (summary blocks, realtime readings)
/// are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetricsStore {
    pub daily_stats: HashMap<String, DailyStats>,
    pub weekly_stats: HashMap<String, WeeklyStats>,
    pub monthly_stats: HashMap<String, MonthlyStats>,
    pub yearly_stats: HashMap<String, YearlyStats>,
}

impl MetricsStore {
    pub fn from_json_str(json: &str) -> Result<Self, LookHeartError> {
        let store: MetricsStore = serde_json::from_str(json)?;
        debug!(
            "metrics store loaded: {} days, {} weeks, {} months, {} years",
            store.daily_stats.len(),
            store.weekly_stats.len(),
            store.monthly_stats.len(),
            store.yearly_stats.len()
        );
        Ok(store)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LookHeartError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn day(&self, key: &str) -> Option<&DailyStats> {
        self.daily_stats.get(key)
    }

    pub fn week(&self, key: &str) -> Option<&WeeklyStats> {
        self.weekly_stats.get(key)
    }

    pub fn month(&self, key: &str) -> Option<&MonthlyStats> {
        self.monthly_stats.get(key)
    }

    pub fn year(&self, key: &str) -> Option<&YearlyStats> {
        self.yearly_stats.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn parses_camel_case_and_ignores_extra_fields() {
        let store = MetricsStore::from_json_str(
            r#"{
                "realtime": { "connected": { "bpm": 72 } },
                "dailyStats": {
                    "2025-12-16": {
                        "heartRate": { "avg": 74, "max": 128 },
                        "hourlyHeartRate": [{ "time": "00:00", "bpm": 61 }],
                        "hourlyHRV": [{ "time": "00:00", "ms": 48 }]
                    }
                },
                "weeklyStats": { "2025-12-15~2025-12-21": { "weeklySteps": [] } }
            }"#,
        )
        .unwrap();
        let day = store.day("2025-12-16").unwrap();
        assert_eq!(day.series(DailySeries::HeartRate).len(), 1);
        assert_eq!(day.series(DailySeries::Hrv)[0]["ms"], 48);
        assert!(day.series(DailySeries::Stress).is_empty());
        assert!(store.week("2025-12-15~2025-12-21").is_some());
        assert!(store.month("2025-12").is_none());
    }
    #[test]
    fn null_series_read_as_empty() {
        let store = MetricsStore::from_json_str(
            r#"{
                "dailyStats": {
                    "2025-12-16": { "hourlyStress": null, "hourlyHRV": null, "hourlySteps": [] }
                },
                "monthlyStats": { "2025-12": { "dailyAbnormal": null } }
            }"#,
        )
        .unwrap();
        let day = store.day("2025-12-16").unwrap();
        assert!(day.series(DailySeries::Stress).is_empty());
        assert!(day.series(DailySeries::Hrv).is_empty());
        assert!(store.month("2025-12").unwrap().series(Aggregate::Abnormal).is_empty());
    }
    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            MetricsStore::from_json_str("{ \"dailyStats\": [] }"),
            Err(LookHeartError::Json(_))
        ));
    }
}

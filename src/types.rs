// src/types.rs
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookHeartError;

// 统计页面的指标类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Heart,
    Variability,
    Abnormal,
    Stress,
    Calorie,
    Steps,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Heart,
        Category::Variability,
        Category::Abnormal,
        Category::Stress,
        Category::Calorie,
        Category::Steps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Heart => "heart",
            Category::Variability => "variability",
            Category::Abnormal => "abnormal",
            Category::Stress => "stress",
            Category::Calorie => "calorie",
            Category::Steps => "steps",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LookHeartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| LookHeartError::UnknownCategory(s.to_owned()))
    }
}

// 时间粒度 (日 / 周 / 月 / 年)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    Day,
    Week,
    Month,
    Year,
}

impl TimePeriod {
    pub const ALL: [TimePeriod; 4] = [
        TimePeriod::Day,
        TimePeriod::Week,
        TimePeriod::Month,
        TimePeriod::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimePeriod::Day => "day",
            TimePeriod::Week => "week",
            TimePeriod::Month => "month",
            TimePeriod::Year => "year",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimePeriod {
    type Err = LookHeartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimePeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| LookHeartError::UnknownPeriod(s.to_owned()))
    }
}

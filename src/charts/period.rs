//! Store keys for each time period, derived from a day key.
//!
//! Weeks run Monday to Sunday and are keyed `start~end`.

use chrono::{Datelike, Days, Local, NaiveDate};

use crate::error::LookHeartError;
use crate::types::TimePeriod;

// 日期键格式
const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_day_key(key: &str) -> Result<NaiveDate, LookHeartError> {
    NaiveDate::parse_from_str(key, DAY_FORMAT)
        .map_err(|_| LookHeartError::InvalidDateKey(key.to_owned()))
}

pub fn day_key(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodKeys {
    pub day: String,
    pub week: String,
    pub month: String,
    pub year: String,
}

impl PeriodKeys {
    pub fn for_date(date: NaiveDate) -> Self {
        let monday = date
            .checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
            .unwrap_or(date);
        let sunday = monday.checked_add_days(Days::new(6)).unwrap_or(monday);
        Self {
            day: day_key(date),
            week: format!("{}~{}", day_key(monday), day_key(sunday)),
            month: date.format("%Y-%m").to_string(),
            year: date.format("%Y").to_string(),
        }
    }

    pub fn from_day_key(key: &str) -> Result<Self, LookHeartError> {
        parse_day_key(key).map(Self::for_date)
    }

    pub fn key(&self, period: TimePeriod) -> &str {
        match period {
            TimePeriod::Day => &self.day,
            TimePeriod::Week => &self.week,
            TimePeriod::Month => &self.month,
            TimePeriod::Year => &self.year,
        }
    }
}

// --- 日期导航 ---
/// Day before `key`. There is no lower bound.
pub fn prev_day(key: &str) -> Result<String, LookHeartError> {
    let date = parse_day_key(key)?;
    date.pred_opt()
        .map(day_key)
        .ok_or_else(|| LookHeartError::InvalidDateKey(key.to_owned()))
}

/// Day after `key`, or `None` if that would be later than `today`.
pub fn next_day(key: &str, today: NaiveDate) -> Result<Option<String>, LookHeartError> {
    let date = parse_day_key(key)?;
    Ok(date.succ_opt().filter(|next| *next <= today).map(day_key))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

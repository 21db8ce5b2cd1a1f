//! Air dates embedded in daily-show file names.

use chrono::{Datelike, NaiveDate};

use super::rules::DATE;

/// An air date found in a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirDate {
    pub date: NaiveDate,
}

impl AirDate {
    pub fn year(&self) -> u32 {
        u32::try_from(self.date.year()).unwrap_or_default()
    }

    pub fn iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// Finds the first calendar-valid `YYYY-MM-DD` style date in `text`.
pub fn extract_date(text: &str) -> Option<AirDate> {
    DATE.captures_iter(text).find_map(|caps| {
        let year = caps.get(1)?.as_str().parse().ok()?;
        let month = caps.get(2)?.as_str().parse().ok()?;
        let day = caps.get(3)?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day).map(|date| AirDate { date })
    })
}

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::shared::core::clock::Clock;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartitionIdError {
    #[error("partition id `{0}` does not match <year>_Week<NN>")]
    Malformed(String),

    #[error("week {0} is out of range")]
    WeekOutOfRange(u32),
}

/// Weekly bucket identifier, `<iso year>_Week<NN>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PartitionId(String);

impl PartitionId {
    /// Names the week containing `date`.
    ///
    /// The week is aligned on its Monday and the ISO year and week number are
    /// taken from that Monday, so late December dates that belong to week 1 of
    /// the following ISO year land in that year's bucket.
    pub fn for_date(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        let iso = monday.iso_week();
        Self(format!("{}_Week{:02}", iso.year(), iso.week()))
    }

    pub fn current(clock: &dyn Clock) -> Self {
        Self::for_date(clock.now().date_naive())
    }

    pub fn parse(raw: &str) -> Result<Self, PartitionIdError> {
        let malformed = || PartitionIdError::Malformed(raw.to_string());
        let (year, week) = raw.split_once("_Week").ok_or_else(malformed)?;
        if year.len() != 4 || week.len() != 2 {
            return Err(malformed());
        }
        if !year.bytes().chain(week.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let week: u32 = week.parse().map_err(|_| malformed())?;
        if !(1..=53).contains(&week) {
            return Err(PartitionIdError::WeekOutOfRange(week));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PartitionId {
    type Error = PartitionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PartitionId> for String {
    fn from(value: PartitionId) -> Self {
        value.0
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

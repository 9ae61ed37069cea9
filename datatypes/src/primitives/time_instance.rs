use crate::error;
use crate::util::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use std::str::FromStr;

/// A point in time as UTC milliseconds since the unix epoch.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(C)]
pub struct TimeInstance(i64);

impl TimeInstance {
    pub const fn from_millis_unchecked(millis: i64) -> Self {
        Self(millis)
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub const fn inner(self) -> i64 {
        self.0
    }

    pub fn as_date_time(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }

    pub fn try_as_date_time(self) -> Result<DateTime<Utc>> {
        self.as_date_time()
            .context(error::NoDateTimeValid { time_instance: self })
    }

    /// Formats the instance as ISO 8601 with millisecond precision, e.g. `2014-04-01T12:00:00.000Z`
    pub fn to_iso_string(self) -> Result<String> {
        Ok(self
            .try_as_date_time()?
            .to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Formats the instance for humans, e.g. `01.04.2014 12:00:00`
    pub fn to_display_string(self) -> Result<String> {
        Ok(self
            .try_as_date_time()?
            .format("%d.%m.%Y %H:%M:%S")
            .to_string())
    }
}

impl From<i64> for TimeInstance {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<TimeInstance> for i64 {
    fn from(time_instance: TimeInstance) -> Self {
        time_instance.0
    }
}

impl From<DateTime<Utc>> for TimeInstance {
    fn from(date_time: DateTime<Utc>) -> Self {
        Self(date_time.timestamp_millis())
    }
}

impl FromStr for TimeInstance {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date_time = DateTime::parse_from_rfc3339(s).context(error::TimeParse { input: s })?;
        Ok(Self(date_time.timestamp_millis()))
    }
}

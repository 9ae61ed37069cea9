use std::ops::{Add, Sub};

use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};
use snafu::OptionExt;

use crate::error;
use crate::primitives::TimeInstance;
use crate::util::Result;

/// A time granularity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeGranularity {
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
    Months,
    Years,
}

/// A step in time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeStep {
    pub granularity: TimeGranularity,
    pub step: u32,
}

impl TimeStep {
    pub fn new(granularity: TimeGranularity, step: u32) -> Self {
        Self { granularity, step }
    }

    /// Shifts the `time_instance` by this step, forwards or backwards.
    /// Months and years are calendar aware, i.e. they clamp to the end of shorter months.
    fn shift(self, time_instance: TimeInstance, forward: bool) -> Result<TimeInstance> {
        let date_time = time_instance.try_as_date_time()?;
        let step = i64::from(self.step);

        let fixed = |duration: Duration| {
            if forward {
                date_time.checked_add_signed(duration)
            } else {
                date_time.checked_sub_signed(duration)
            }
        };
        let calendar = |months: u32| {
            if forward {
                date_time.checked_add_months(Months::new(months))
            } else {
                date_time.checked_sub_months(Months::new(months))
            }
        };

        let shifted = match self.granularity {
            TimeGranularity::Millis => fixed(Duration::milliseconds(step)),
            TimeGranularity::Seconds => fixed(Duration::seconds(step)),
            TimeGranularity::Minutes => fixed(Duration::minutes(step)),
            TimeGranularity::Hours => fixed(Duration::hours(step)),
            TimeGranularity::Days => fixed(Duration::days(step)),
            TimeGranularity::Months => calendar(self.step),
            TimeGranularity::Years => self.step.checked_mul(12).and_then(calendar),
        };

        shifted
            .map(TimeInstance::from)
            .context(error::NoDateTimeValid { time_instance })
    }
}

impl Add<TimeStep> for TimeInstance {
    type Output = Result<TimeInstance>;

    fn add(self, rhs: TimeStep) -> Self::Output {
        rhs.shift(self, true)
    }
}

impl Sub<TimeStep> for TimeInstance {
    type Output = Result<TimeInstance>;

    fn sub(self, rhs: TimeStep) -> Self::Output {
        rhs.shift(self, false)
    }
}

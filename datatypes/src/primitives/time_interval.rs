use crate::error;
use crate::primitives::{TimeInstance, TimeStep};
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::fmt::{Debug, Display};

/// Whether a [`Time`] is a single instant or spans an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeType {
    TimePoint,
    TimeInterval,
}

/// A time point or a time interval `[start, end]` in UTC milliseconds.
///
/// It is immutable, arithmetic returns new instances.
#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(try_from = "TimeDict", into = "TimeDict")]
pub struct Time {
    start: TimeInstance,
    end: TimeInstance,
}

/// Serialization form of a [`Time`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeDict {
    pub start: i64,
    pub end: i64,
}

impl Time {
    /// Creates a new time interval
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::primitives::Time;
    ///
    /// Time::new(0, 0).unwrap();
    /// Time::new(0, 1).unwrap();
    ///
    /// Time::new(1, 0).unwrap_err();
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if `end` is before `start`
    ///
    pub fn new<A, B>(start: A, end: B) -> Result<Self>
    where
        A: Into<TimeInstance>,
        B: Into<TimeInstance>,
    {
        let start = start.into();
        let end = end.into();

        ensure!(start <= end, error::TimeIntervalEndBeforeStart { start, end });

        Ok(Self { start, end })
    }

    /// Creates a new time point. After instantiation, start and end are equal.
    pub fn new_point<A>(start_and_end: A) -> Self
    where
        A: Into<TimeInstance>,
    {
        let start_and_end = start_and_end.into();
        Self {
            start: start_and_end,
            end: start_and_end,
        }
    }

    pub fn start(&self) -> TimeInstance {
        self.start
    }

    pub fn end(&self) -> TimeInstance {
        self.end
    }

    pub fn time_type(&self) -> TimeType {
        if self.start == self.end {
            TimeType::TimePoint
        } else {
            TimeType::TimeInterval
        }
    }

    pub fn is_point(&self) -> bool {
        self.time_type() == TimeType::TimePoint
    }

    pub fn duration_millis(&self) -> i64 {
        self.end.inner() - self.start.inner()
    }

    /// Shifts start and end by the given step
    pub fn add(&self, step: TimeStep) -> Result<Self> {
        Ok(Self {
            start: (self.start + step)?,
            end: (self.end + step)?,
        })
    }

    /// Shifts start and end back by the given step
    pub fn subtract(&self, step: TimeStep) -> Result<Self> {
        Ok(Self {
            start: (self.start - step)?,
            end: (self.end - step)?,
        })
    }

    /// Collapses an interval to its start point
    #[must_use]
    pub fn start_point(&self) -> Self {
        Self::new_point(self.start)
    }

    pub fn is_same(&self, other: &Self) -> bool {
        self == other
    }

    /// The representation used in request parameters
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::primitives::Time;
    ///
    /// assert_eq!(Time::new_point(0).as_request_string().unwrap(), "1970-01-01T00:00:00.000Z");
    /// assert_eq!(
    ///     Time::new(0, 1000).unwrap().as_request_string().unwrap(),
    ///     "1970-01-01T00:00:00.000Z/1970-01-01T00:00:01.000Z"
    /// );
    /// ```
    pub fn as_request_string(&self) -> Result<String> {
        match self.time_type() {
            TimeType::TimePoint => self.start.to_iso_string(),
            TimeType::TimeInterval => Ok(format!(
                "{}/{}",
                self.start.to_iso_string()?,
                self.end.to_iso_string()?
            )),
        }
    }

    pub fn to_dict(&self) -> TimeDict {
        (*self).into()
    }

    pub fn from_dict(dict: TimeDict) -> Result<Self> {
        dict.try_into()
    }
}

impl From<Time> for TimeDict {
    fn from(time: Time) -> Self {
        Self {
            start: time.start.inner(),
            end: time.end.inner(),
        }
    }
}

impl TryFrom<TimeDict> for Time {
    type Error = error::Error;

    fn try_from(dict: TimeDict) -> Result<Self, Self::Error> {
        Time::new(dict.start, dict.end)
    }
}

impl From<TimeInstance> for Time {
    fn from(time_instance: TimeInstance) -> Self {
        Self::new_point(time_instance)
    }
}

impl Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time [{}, {}]", self.start.inner(), self.end.inner())
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start = self
            .start
            .to_display_string()
            .map_err(|_| std::fmt::Error)?;

        match self.time_type() {
            TimeType::TimePoint => write!(f, "{start}"),
            TimeType::TimeInterval => {
                let end = self.end.to_display_string().map_err(|_| std::fmt::Error)?;
                write!(f, "{start} - {end}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::TimeGranularity;

    #[test]
    fn time_type() {
        assert_eq!(Time::new_point(42).time_type(), TimeType::TimePoint);
        assert_eq!(Time::new(0, 1).unwrap().time_type(), TimeType::TimeInterval);
    }

    #[test]
    fn arithmetic_returns_new_instances() {
        let time = Time::new(0, 3_600_000).unwrap();
        let shifted = time
            .add(TimeStep::new(TimeGranularity::Hours, 1))
            .unwrap();

        assert_eq!(time, Time::new(0, 3_600_000).unwrap());
        assert_eq!(shifted, Time::new(3_600_000, 7_200_000).unwrap());
        assert_eq!(
            shifted
                .subtract(TimeStep::new(TimeGranularity::Hours, 1))
                .unwrap(),
            time
        );
    }

    #[test]
    fn display() {
        let start: TimeInstance = "2014-04-01T12:00:00.000Z".parse().unwrap();
        let end: TimeInstance = "2014-05-01T12:00:00.000Z".parse().unwrap();

        assert_eq!(Time::new_point(start).to_string(), "01.04.2014 12:00:00");
        assert_eq!(
            Time::new(start, end).unwrap().to_string(),
            "01.04.2014 12:00:00 - 01.05.2014 12:00:00"
        );
    }

    #[test]
    fn dict_round_trip() {
        let time = Time::new(1000, 2000).unwrap();

        let json = serde_json::to_value(time).unwrap();
        assert_eq!(json, serde_json::json!({"start": 1000, "end": 2000}));

        let deserialized: Time = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, time);

        assert!(serde_json::from_value::<Time>(serde_json::json!({"start": 2, "end": 1})).is_err());
    }

    #[test]
    fn start_point() {
        let time = Time::new(1000, 2000).unwrap();

        assert_eq!(time.start_point(), Time::new_point(1000));
        assert_eq!(time.duration_millis(), 1000);
    }
}

use core::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{Granularity, OandataError};

const SECONDS_PER_DAY: u64 = 86_400;

/// Inclusive range of calendar days.
///
/// Ranges built from caller input are checked once against "today"; the
/// sub-ranges a [`SplitPlan`] derives from them are not re-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Validate `start..=end` against the current UTC date.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start > end` or `end` is in the future.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, OandataError> {
        Self::new_as_of(start, end, chrono::Utc::now().date_naive())
    }

    /// Validate `start..=end` against a caller-supplied "today".
    ///
    /// # Errors
    /// Returns `InvalidArg` when `start > end` or `end > today`.
    pub fn new_as_of(
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, OandataError> {
        if start > end {
            return Err(OandataError::InvalidArg(format!(
                "invalid date period: start {start} is after end {end}"
            )));
        }
        if end > today {
            return Err(OandataError::InvalidArg(format!(
                "invalid date period: end {end} is in the future (today is {today})"
            )));
        }
        Ok(Self { start, end })
    }

    const fn unchecked(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First day.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days covered, counting both ends. Always at least 1.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Span covered in seconds, counting both ends.
    #[must_use]
    pub fn seconds(&self) -> u64 {
        u64::try_from(self.days()).unwrap_or(0) * SECONDS_PER_DAY
    }

    /// True if `day` falls within the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Ordered, contiguous, non-overlapping sub-ranges covering a [`DateRange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPlan {
    ranges: Vec<DateRange>,
}

impl SplitPlan {
    /// Number of sub-ranges. Never zero for a plan produced by [`plan_range`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Always false for a plan produced by [`plan_range`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sub-ranges in chronological order.
    #[must_use]
    pub fn ranges(&self) -> &[DateRange] {
        &self.ranges
    }

    /// Iterate sub-ranges in chronological order.
    pub fn iter(&self) -> std::slice::Iter<'_, DateRange> {
        self.ranges.iter()
    }

    /// Take ownership of the sub-ranges.
    #[must_use]
    pub fn into_ranges(self) -> Vec<DateRange> {
        self.ranges
    }
}

impl<'a> IntoIterator for &'a SplitPlan {
    type Item = &'a DateRange;
    type IntoIter = std::slice::Iter<'a, DateRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranges.iter()
    }
}

/// Number of sub-ranges `range` is split into.
///
/// With `explicit` the caller's count is used; otherwise the count is
/// `floor(span_seconds / (granularity_seconds * point_cap)) + 1`. Either way
/// the count is capped at the number of days in the range, since a
/// sub-range is never shorter than one day.
///
/// # Errors
/// Returns `InvalidArg` when `explicit` is `Some(0)` or `point_cap` is zero.
pub fn split_count(
    range: &DateRange,
    granularity: Granularity,
    point_cap: u32,
    explicit: Option<u32>,
) -> Result<u32, OandataError> {
    if point_cap == 0 {
        return Err(OandataError::InvalidArg(
            "point cap must be positive".to_string(),
        ));
    }
    let wanted = match explicit {
        Some(0) => {
            return Err(OandataError::InvalidArg(
                "expected a positive split count, but 0 was given".to_string(),
            ));
        }
        Some(n) => u64::from(n),
        None => range.seconds() / (granularity.seconds() * u64::from(point_cap)) + 1,
    };
    let days = u64::try_from(range.days()).unwrap_or(1);
    u32::try_from(wanted.min(days))
        .map_err(|_| OandataError::InvalidArg(format!("date period {range} is too long")))
}

/// Partition an already validated range.
///
/// Each sub-range spans `floor(days / count)` days (at least one); the last
/// one absorbs the remainder and ends exactly at `range.end()`.
///
/// # Errors
/// Returns `InvalidArg` under the same conditions as [`split_count`].
pub fn plan_range(
    range: &DateRange,
    granularity: Granularity,
    point_cap: u32,
    explicit: Option<u32>,
) -> Result<SplitPlan, OandataError> {
    let count = split_count(range, granularity, point_cap, explicit)?;
    let step = (range.days() / i64::from(count)).max(1);

    let mut ranges = Vec::with_capacity(count as usize);
    let mut cursor = range.start();
    for i in 0..count {
        let end = if i + 1 == count {
            range.end()
        } else {
            (cursor + Duration::days(step - 1)).min(range.end())
        };
        ranges.push(DateRange::unchecked(cursor, end));
        if end >= range.end() {
            break;
        }
        cursor = end + Duration::days(1);
    }
    Ok(SplitPlan { ranges })
}

/// Validate `start..=end` against today's UTC date and partition it.
///
/// # Errors
/// Returns `InvalidArg` when `start > end`, `end` is in the future,
/// `explicit` is `Some(0)`, or `point_cap` is zero.
pub fn plan(
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
    point_cap: u32,
    explicit: Option<u32>,
) -> Result<SplitPlan, OandataError> {
    let range = DateRange::new(start, end)?;
    plan_range(&range, granularity, point_cap, explicit)
}

/// Like [`plan`], validating against a caller-supplied "today".
///
/// # Errors
/// Returns `InvalidArg` when `start > end`, `end > today`, `explicit` is
/// `Some(0)`, or `point_cap` is zero.
pub fn plan_as_of(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    granularity: Granularity,
    point_cap: u32,
    explicit: Option<u32>,
) -> Result<SplitPlan, OandataError> {
    let range = DateRange::new_as_of(start, end, today)?;
    plan_range(&range, granularity, point_cap, explicit)
}

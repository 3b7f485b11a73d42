use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;

use crate::config::Band;
use crate::error::SalesError;

/// An inclusive range of calendar days, never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

/// A yearly recurring `(month, day)` window, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonalWindow {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl DateRange {
    /// # Errors
    /// Errors when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, SalesError> {
        if start <= end {
            Ok(DateRange { start, end })
        } else {
            Err(SalesError::InvalidDateRange)
        }
    }

    /// The range from `span_days` days before `end` up to and including `end`.
    ///
    /// # Errors
    /// Errors when `span_days` is negative or the start date is out of chrono's range
    pub fn ending_on(end: NaiveDate, span_days: i64) -> Result<Self, SalesError> {
        if span_days < 0 {
            return Err(SalesError::InvalidDateRange);
        }
        let start = end
            .checked_sub_signed(Duration::days(span_days))
            .ok_or(SalesError::InvalidDateRange)?;
        DateRange::new(start, end)
    }

    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        std::iter::successors(Some(self.start), NaiveDate::succ_opt)
            .take_while(move |d| *d <= end)
    }

    #[must_use]
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        DateRange::new(self.start.max(other.start), self.end.min(other.end)).ok()
    }

    pub fn random_day<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let offset = rng.gen_range(0..=(self.end - self.start).num_days());
        self.start + Duration::days(offset)
    }
}

impl SeasonalWindow {
    #[must_use]
    pub const fn new(start: (u32, u32), end: (u32, u32)) -> Self {
        SeasonalWindow { start, end }
    }

    /// The window's dates in `year`, or `None` when either end does not exist that year.
    #[must_use]
    pub fn in_year(&self, year: i32) -> Option<DateRange> {
        let start = NaiveDate::from_ymd_opt(year, self.start.0, self.start.1)?;
        let end = NaiveDate::from_ymd_opt(year, self.end.0, self.end.1)?;
        DateRange::new(start, end).ok()
    }
}

/// Picks the single high-demand day of `range`.
///
/// The windows are taken in the year of the range's last day and tried in order; the first
/// one overlapping `range` wins and the day is drawn uniformly from the overlap. With no
/// overlap at all the day is drawn uniformly from the whole range.
#[must_use]
pub fn pick_peak_day<R: Rng>(
    range: &DateRange,
    windows: &[SeasonalWindow],
    rng: &mut R,
) -> NaiveDate {
    let year = range.end().year();
    windows
        .iter()
        .filter_map(|window| window.in_year(year))
        .find_map(|window| range.intersect(&window))
        .unwrap_or(*range)
        .random_day(rng)
}

/// A uniformly random second of `date` within `store_hours` (seconds from midnight).
///
/// # Errors
/// Errors when the drawn second is not a valid time of day
pub fn random_time_on<R: Rng>(
    date: NaiveDate,
    store_hours: &Band<u32>,
    rng: &mut R,
) -> Result<NaiveDateTime, SalesError> {
    let seconds = store_hours.sample(rng);
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
        .ok_or(SalesError::InvalidStoreHours)?;
    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use chrono::Timelike;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn peak_days(end: NaiveDate) -> Vec<NaiveDate> {
        let config = GeneratorConfig::default();
        let range = DateRange::ending_on(end, 365).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        (0..500)
            .map(|_| pick_peak_day(&range, &config.peak_windows(), &mut rng))
            .collect()
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::ending_on(ymd(2026, 10, 18), 365).unwrap();
        assert_eq!(range.start(), ymd(2025, 10, 18));
        assert_eq!(range.num_days(), 366);
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days.len(), 366);
        assert_eq!(days.first(), Some(&range.start()));
        assert_eq!(days.last(), Some(&range.end()));

        // leap day is counted exactly once
        let range = DateRange::ending_on(ymd(2024, 3, 1), 2).unwrap();
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days, vec![ymd(2024, 2, 28), ymd(2024, 2, 29), ymd(2024, 3, 1)]);

        let single = DateRange::ending_on(ymd(2026, 1, 1), 0).unwrap();
        assert_eq!(single.days().count(), 1);

        assert!(DateRange::new(ymd(2026, 1, 2), ymd(2026, 1, 1)).is_err());
        assert!(DateRange::ending_on(ymd(2026, 1, 1), -1).is_err());
    }

    #[test]
    fn test_intersect() {
        let range = DateRange::new(ymd(2026, 1, 1), ymd(2026, 1, 31)).unwrap();
        let other = DateRange::new(ymd(2026, 1, 20), ymd(2026, 2, 10)).unwrap();
        assert_eq!(
            range.intersect(&other),
            Some(DateRange::new(ymd(2026, 1, 20), ymd(2026, 1, 31)).unwrap())
        );
        let disjoint = DateRange::new(ymd(2026, 3, 1), ymd(2026, 3, 2)).unwrap();
        assert_eq!(range.intersect(&disjoint), None);
    }

    #[test]
    fn test_seasonal_window_in_year() {
        let window = SeasonalWindow::new((8, 15), (9, 10));
        assert_eq!(
            window.in_year(2026),
            Some(DateRange::new(ymd(2026, 8, 15), ymd(2026, 9, 10)).unwrap())
        );
        let leap_only = SeasonalWindow::new((2, 29), (3, 1));
        assert!(leap_only.in_year(2025).is_none());
        assert!(leap_only.in_year(2024).is_some());
    }

    #[test]
    fn test_peak_day_prefers_back_to_school() {
        let days = peak_days(ymd(2026, 10, 18));
        assert!(days
            .iter()
            .all(|d| (ymd(2026, 8, 15)..=ymd(2026, 9, 10)).contains(d)));
    }

    #[test]
    fn test_peak_day_clips_back_to_school_to_range() {
        let days = peak_days(ymd(2026, 8, 20));
        assert!(days
            .iter()
            .all(|d| (ymd(2026, 8, 15)..=ymd(2026, 8, 20)).contains(d)));
        assert!(days.contains(&ymd(2026, 8, 15)));
        assert!(days.contains(&ymd(2026, 8, 20)));
    }

    #[test]
    fn test_peak_day_falls_back_to_new_year() {
        let days = peak_days(ymd(2026, 3, 1));
        assert!(days
            .iter()
            .all(|d| (ymd(2026, 1, 10)..=ymd(2026, 1, 25)).contains(d)));
    }

    #[test]
    fn test_peak_day_falls_back_to_whole_range() {
        let end = ymd(2026, 1, 5);
        let range = DateRange::ending_on(end, 365).unwrap();
        let days = peak_days(end);
        assert!(days.iter().all(|d| range.contains(*d)));
        // the back-to-school window of the previous year is not considered
        assert!(days
            .iter()
            .any(|d| !(ymd(2025, 8, 15)..=ymd(2025, 9, 10)).contains(d)));
    }

    #[test]
    fn test_random_time_on_stays_in_store_hours() {
        let config = GeneratorConfig::default();
        let date = ymd(2026, 5, 4);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1_000 {
            let timestamp = random_time_on(date, &config.store_hours, &mut rng).unwrap();
            assert_eq!(timestamp.date(), date);
            let seconds = timestamp.time().num_seconds_from_midnight();
            assert!(config.store_hours.contains(&seconds));
        }

        let mut rng = StdRng::seed_from_u64(3);
        let closing = Band::new(21 * 3600 + 30 * 60, 21 * 3600 + 30 * 60);
        let timestamp = random_time_on(date, &closing, &mut rng).unwrap();
        assert_eq!(timestamp, date.and_hms_opt(21, 30, 0).unwrap());
    }
}

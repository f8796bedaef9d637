//! Time windows used to rank posts by likes.

use std::num::NonZeroU32;

use chrono::{DateTime, Months, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Default number of posts returned by a popularity query.
pub const DEFAULT_POPULAR_LIMIT: NonZeroU32 = match NonZeroU32::new(20) {
    Some(limit) => limit,
    None => NonZeroU32::MIN,
};

/// Named lower bound on post creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityWindow {
    /// The last 24 hours.
    Today,
    /// The last 7 days.
    LastWeek,
    /// Since the same day of the previous calendar month.
    LastMonth,
    /// Since the Unix epoch.
    AllTime,
}

impl PopularityWindow {
    /// Widest window last.
    pub const ALL: [Self; 4] = [Self::Today, Self::LastWeek, Self::LastMonth, Self::AllTime];

    /// Earliest creation time included in the window ending at `now`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use forum_backend::domain::PopularityWindow;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
    /// let since = PopularityWindow::LastMonth.since(now);
    /// assert_eq!(since, Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    /// ```
    pub fn since(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Today => now - TimeDelta::days(1),
            Self::LastWeek => now - TimeDelta::days(7),
            Self::LastMonth => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(DateTime::UNIX_EPOCH),
            Self::AllTime => DateTime::UNIX_EPOCH,
        }
    }
}

/// Result cap applied to every popularity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopularityPolicy {
    limit: NonZeroU32,
}

impl PopularityPolicy {
    /// Cap every window at `limit` posts.
    pub fn new(limit: NonZeroU32) -> Self {
        Self { limit }
    }

    /// Maximum number of posts per ranking.
    pub fn limit(self) -> NonZeroU32 {
        self.limit
    }
}

impl Default for PopularityPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POPULAR_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(PopularityWindow::Today, Utc.with_ymd_and_hms(2024, 6, 14, 9, 30, 0))]
    #[case(PopularityWindow::LastWeek, Utc.with_ymd_and_hms(2024, 6, 8, 9, 30, 0))]
    #[case(PopularityWindow::LastMonth, Utc.with_ymd_and_hms(2024, 5, 15, 9, 30, 0))]
    fn windows_subtract_from_now(
        now: DateTime<Utc>,
        #[case] window: PopularityWindow,
        #[case] expected: chrono::LocalResult<DateTime<Utc>>,
    ) {
        assert_eq!(Some(window.since(now)), expected.single());
    }

    #[rstest]
    fn all_time_starts_at_epoch(now: DateTime<Utc>) {
        assert_eq!(PopularityWindow::AllTime.since(now), DateTime::UNIX_EPOCH);
    }

    #[rstest]
    fn wider_windows_start_earlier(now: DateTime<Utc>) {
        let bounds: Vec<_> = PopularityWindow::ALL
            .iter()
            .map(|window| window.since(now))
            .collect();
        assert!(bounds.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[rstest]
    fn default_policy_caps_at_twenty() {
        assert_eq!(PopularityPolicy::default().limit().get(), 20);
    }

    #[rstest]
    fn windows_deserialise_from_snake_case() {
        let window: PopularityWindow =
            serde_json::from_str("\"last_week\"").expect("known window");
        assert_eq!(window, PopularityWindow::LastWeek);
    }
}

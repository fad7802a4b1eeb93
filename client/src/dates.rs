//! Read-time overlays derived from a row's dates.
//!
//! Nothing here reads a clock: callers pass "today" explicitly.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use common::subscription::SubscriptionStatus;

/// Calendar date of `now` in the given reference zone.
pub fn today_in(now: DateTime<Utc>, zone: FixedOffset) -> NaiveDate {
    now.with_timezone(&zone).date_naive()
}

/// Signed whole days from `today` until `end_date`; negative once lapsed.
pub fn remaining_days(today: NaiveDate, end_date: NaiveDate) -> i64 {
    end_date.signed_duration_since(today).num_days()
}

/// A lapsed row shows as Expired whatever its stored status says.
pub fn visual_status(remaining_days: i64, stored: SubscriptionStatus) -> SubscriptionStatus {
    if remaining_days < 0 {
        SubscriptionStatus::Expired
    } else {
        stored
    }
}

pub fn display_status(
    today: NaiveDate,
    end_date: NaiveDate,
    stored: SubscriptionStatus,
) -> SubscriptionStatus {
    visual_status(remaining_days(today, end_date), stored)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sign_follows_end_date() {
        let today = date(2024, 3, 10);
        assert_eq!(remaining_days(today, today), 0);
        assert_eq!(remaining_days(today, date(2024, 3, 9)), -1);
        assert_eq!(remaining_days(today, date(2024, 3, 11)), 1);
        assert_eq!(remaining_days(today, date(2024, 4, 10)), 31);
        assert_eq!(remaining_days(today, date(2023, 3, 10)), -366);
    }

    #[test]
    fn spans_daylight_saving_changes_in_whole_days() {
        assert_eq!(remaining_days(date(2024, 3, 30), date(2024, 4, 1)), 2);
        assert_eq!(remaining_days(date(2024, 10, 26), date(2024, 10, 28)), 2);
    }

    #[test]
    fn same_day_gives_same_result_at_every_hour() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let end = date(2024, 6, 20);
        // 2024-06-14 00:00 to 23:59 in UTC+2
        let start = Utc.with_ymd_and_hms(2024, 6, 13, 22, 0, 0).unwrap();
        for minutes in (0..24 * 60).step_by(17) {
            let now = start + chrono::Duration::minutes(minutes);
            assert_eq!(today_in(now, zone), date(2024, 6, 14));
            assert_eq!(remaining_days(today_in(now, zone), end), 6);
        }
    }

    #[test]
    fn reference_zone_decides_the_calendar_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 14, 23, 30, 0).unwrap();
        assert_eq!(today_in(now, FixedOffset::east_opt(0).unwrap()), date(2024, 6, 14));
        assert_eq!(today_in(now, FixedOffset::east_opt(3600).unwrap()), date(2024, 6, 15));
        assert_eq!(today_in(now, FixedOffset::west_opt(5 * 3600).unwrap()), date(2024, 6, 14));
    }

    #[test]
    fn lapsed_rows_show_expired() {
        for stored in SubscriptionStatus::ALL {
            assert_eq!(visual_status(-1, stored), SubscriptionStatus::Expired);
            assert_eq!(visual_status(0, stored), stored);
            assert_eq!(visual_status(30, stored), stored);
        }
    }

    #[test]
    fn display_status_combines_both_steps() {
        let today = date(2024, 3, 10);
        assert_eq!(
            display_status(today, date(2024, 3, 9), SubscriptionStatus::Cancelled),
            SubscriptionStatus::Expired
        );
        assert_eq!(
            display_status(today, today, SubscriptionStatus::Active),
            SubscriptionStatus::Active
        );
    }
}

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// Recommended gap between semen tests.
pub const RETEST_INTERVAL_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextTestInfo {
    pub next_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
}

/// Next recommended test date and countdown. `days_remaining` goes to zero
/// on the due date and negative once overdue. Calendar dates carry no time
/// component, so the subtraction is already midnight-to-midnight.
pub fn next_test_info(last_test_date: Option<NaiveDate>, today: NaiveDate) -> NextTestInfo {
    let Some(last) = last_test_date else {
        return NextTestInfo {
            next_date: None,
            days_remaining: None,
        };
    };
    let next = last + Duration::days(RETEST_INTERVAL_DAYS);
    NextTestInfo {
        next_date: Some(next),
        days_remaining: Some((next - today).num_days()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_prior_test_yields_nothing() {
        let info = next_test_info(None, date(2024, 6, 1));
        assert_eq!(info.next_date, None);
        assert_eq!(info.days_remaining, None);
    }

    #[test]
    fn next_test_is_90_days_out() {
        let info = next_test_info(Some(date(2024, 1, 1)), date(2024, 1, 1));
        assert_eq!(info.next_date, Some(date(2024, 3, 31)));
        assert_eq!(info.days_remaining, Some(90));
    }

    #[test]
    fn overdue_goes_negative() {
        let today = date(2024, 6, 1);
        let info = next_test_info(Some(today - Duration::days(95)), today);
        assert_eq!(info.days_remaining, Some(-5));
    }

    #[test]
    fn due_today_is_zero() {
        let today = date(2024, 6, 1);
        let info = next_test_info(Some(today - Duration::days(90)), today);
        assert_eq!(info.next_date, Some(today));
        assert_eq!(info.days_remaining, Some(0));
    }
}

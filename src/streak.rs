use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StreakCounters {
    pub current_streak: i32,
    pub longest_streak: i32,
}

/// Streak bookkeeping for a daily check-in. Only the transition from "no log
/// today" to "log created" extends the streak; editing an existing log for
/// the same date is a no-op. There is deliberately no reset rule for missed
/// days: the counter only ever grows.
pub fn apply_check_in(counters: StreakCounters, had_log_for_today: bool) -> StreakCounters {
    if had_log_for_today {
        return counters;
    }
    let current = counters.current_streak + 1;
    StreakCounters {
        current_streak: current,
        longest_streak: current.max(counters.longest_streak),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_in_of_day_increments() {
        let updated = apply_check_in(
            StreakCounters {
                current_streak: 4,
                longest_streak: 9,
            },
            false,
        );
        assert_eq!(updated.current_streak, 5);
        assert_eq!(updated.longest_streak, 9);
    }

    #[test]
    fn longest_follows_new_record() {
        let updated = apply_check_in(
            StreakCounters {
                current_streak: 9,
                longest_streak: 9,
            },
            false,
        );
        assert_eq!(updated.current_streak, 10);
        assert_eq!(updated.longest_streak, 10);
    }

    #[test]
    fn same_day_edit_does_not_double_count() {
        let start = StreakCounters {
            current_streak: 2,
            longest_streak: 6,
        };
        let after_create = apply_check_in(start, false);
        let after_edit = apply_check_in(after_create, true);
        assert_eq!(after_edit.current_streak, 3);
        assert_eq!(after_edit.longest_streak, 6);
    }

    #[test]
    fn longest_never_falls_below_current() {
        let mut counters = StreakCounters {
            current_streak: 0,
            longest_streak: 0,
        };
        for day in 0..30 {
            counters = apply_check_in(counters, day % 5 == 0 && day > 0);
            assert!(counters.longest_streak >= counters.current_streak);
        }
    }
}

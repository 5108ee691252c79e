//! Arithmetic behind the staff reports page.

/// Month-over-month change in percent, rounded to one decimal.
///
/// With no activity last month, any activity this month counts as a 100%
/// increase, and no activity in either month is 0%.
pub fn percent_change(current: i64, previous: i64) -> f64 {
    let change = if previous > 0 {
        (current - previous) as f64 / previous as f64 * 100.0
    } else if current > 0 {
        100.0
    } else {
        0.0
    };
    round1(change)
}

/// `part` as a percentage of `total`, rounded to one decimal; 0 for an empty total.
pub fn share(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

/// The `(year, month)` before the given one.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month > 1 {
        (year, month - 1)
    } else {
        (year - 1, 12)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_change_with_history() {
        assert_eq!(percent_change(15, 10), 50.0);
        assert_eq!(percent_change(5, 10), -50.0);
        assert_eq!(percent_change(10, 3), 233.3);
    }

    #[test]
    fn percent_change_without_history() {
        assert_eq!(percent_change(4, 0), 100.0);
        assert_eq!(percent_change(0, 0), 0.0);
    }

    #[test]
    fn share_handles_empty_total() {
        assert_eq!(share(1, 3), 33.3);
        assert_eq!(share(0, 0), 0.0);
    }

    #[test]
    fn previous_month_wraps_january() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 7), (2026, 6));
    }
}

use chrono::{DateTime, Duration, Utc};

use crate::config::DUE_SOON_WINDOW_DAYS;
use crate::types::InstallmentStatus;

/// classify a scheduled installment for display
///
/// Evaluated in priority order:
/// 1. paid
/// 2. due date already passed -> overdue
/// 3. due within the next 7 days (inclusive, today counts) -> due soon
/// 4. the earliest not-yet-paid installment -> upcoming
/// 5. otherwise -> pending
///
/// Comparison is at calendar-day granularity, so an installment due later
/// today is due soon, not overdue.
pub fn classify_installment(
    due_date: DateTime<Utc>,
    is_paid: bool,
    is_earliest_unpaid: bool,
    today: DateTime<Utc>,
) -> InstallmentStatus {
    classify_with_window(due_date, is_paid, is_earliest_unpaid, today, DUE_SOON_WINDOW_DAYS)
}

/// classifier with an explicit due-soon window, for config-driven callers
pub fn classify_with_window(
    due_date: DateTime<Utc>,
    is_paid: bool,
    is_earliest_unpaid: bool,
    today: DateTime<Utc>,
    window_days: u32,
) -> InstallmentStatus {
    if is_paid {
        return InstallmentStatus::Paid;
    }

    let due = due_date.date_naive();
    let today = today.date_naive();

    if due < today {
        InstallmentStatus::Overdue
    } else if due <= today + Duration::days(window_days as i64) {
        InstallmentStatus::DueSoon
    } else if is_earliest_unpaid {
        InstallmentStatus::Upcoming
    } else {
        InstallmentStatus::Pending
    }
}

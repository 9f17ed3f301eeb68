use chrono::{DateTime, Duration, Utc};

use crate::config::INSTALLMENT_INTERVAL_DAYS;

/// generate the repayment schedule for an agreement
///
/// Returns exactly `total_terms` dates: the first is `start + 30 days`, each
/// subsequent date exactly 30 days after the previous. The cadence is a fixed
/// 30-day step, never a calendar-month increment.
///
/// Pure and idempotent: an agreement whose precomputed schedule is missing is
/// regenerated on demand from `start_date` and `total_terms` and must land on
/// identical dates.
pub fn generate_schedule(start: DateTime<Utc>, total_terms: u32) -> Vec<DateTime<Utc>> {
    generate_schedule_with_interval(start, total_terms, INSTALLMENT_INTERVAL_DAYS)
}

/// schedule with an explicit interval, for config-driven callers
pub fn generate_schedule_with_interval(
    start: DateTime<Utc>,
    total_terms: u32,
    interval_days: u32,
) -> Vec<DateTime<Utc>> {
    (1..=total_terms)
        .map(|i| start + Duration::days(interval_days as i64 * i as i64))
        .collect()
}

/// due date of the final installment
pub fn final_due_date(start: DateTime<Utc>, total_terms: u32) -> DateTime<Utc> {
    start + Duration::days(INSTALLMENT_INTERVAL_DAYS as i64 * total_terms as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_schedule_length_and_cadence() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let schedule = generate_schedule(start, 3);

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0], start + Duration::days(30));
        assert_eq!(schedule[1], start + Duration::days(60));
        assert_eq!(schedule[2], start + Duration::days(90));
    }

    #[test]
    fn test_fixed_step_not_calendar_month() {
        // across February the gap stays 30 days, not one month
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let schedule = generate_schedule(start, 2);

        assert_eq!(schedule[0], Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(schedule[1] - schedule[0], Duration::days(30));
    }

    #[test]
    fn test_zero_terms_empty() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(generate_schedule(start, 0).is_empty());
    }

    #[test]
    fn test_idempotent_regeneration() {
        let start = Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap();
        assert_eq!(generate_schedule(start, 12), generate_schedule(start, 12));
    }

    #[test]
    fn test_final_due_date_matches_last_entry() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let schedule = generate_schedule(start, 6);
        assert_eq!(final_due_date(start, 6), *schedule.last().unwrap());
    }

    #[test]
    fn test_custom_interval() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let schedule = generate_schedule_with_interval(start, 2, 15);
        assert_eq!(schedule[0], start + Duration::days(15));
        assert_eq!(schedule[1], start + Duration::days(30));
    }
}

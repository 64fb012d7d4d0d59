use chrono::{Datelike, Days, NaiveDate};

/// Average number of days per calendar month. Used everywhere a
/// month-denominated duration has to be positioned at day granularity.
pub const AVG_DAYS_PER_MONTH: f64 = 30.44;

/// Calendar months in which on-site construction work is treated as
/// non-productive (administrative/seasonal freeze): January, April, August.
const RESTRICTED_MONTHS: [u32; 3] = [1, 4, 8];

/// Shift a date by whole calendar months, keeping the day-of-month where it
/// exists. Days past the end of a shorter target month roll forward into the
/// next month rather than clamping to the last valid day. Shifts that leave
/// the representable date range saturate at the calendar bounds.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    let first_of_month = i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month0 + 1, 1));
    match first_of_month {
        Some(first) => first
            .checked_add_days(Days::new(u64::from(date.day0())))
            .unwrap_or(NaiveDate::MAX),
        None if months >= 0 => NaiveDate::MAX,
        None => NaiveDate::MIN,
    }
}

pub fn sub_months(date: NaiveDate, months: i32) -> NaiveDate {
    add_months(date, months.saturating_neg())
}

/// Shift a date by a signed number of days, saturating at the calendar
/// bounds instead of overflowing.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Whole months from `a` to `b`, computed from (year, month) components only;
/// the day-of-month is ignored. Never negative.
pub fn diff_months(a: NaiveDate, b: NaiveDate) -> i64 {
    let from = i64::from(a.year()) * 12 + i64::from(a.month0());
    let to = i64::from(b.year()) * 12 + i64::from(b.month0());
    (to - from).max(0)
}

/// True iff the date falls in a restricted calendar month, independent of
/// year and day-of-month.
pub fn is_restricted_month(date: NaiveDate) -> bool {
    RESTRICTED_MONTHS.contains(&date.month())
}

/// Convert a month-denominated duration to a whole number of days.
pub fn months_to_days(months: f64) -> i64 {
    (months * AVG_DAYS_PER_MONTH).round() as i64
}

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// fixed average month length in days, used for pro-rata conversions
/// (365.25 / 12, not calendar-accurate)
pub const AVERAGE_MONTH_DAYS: Decimal = dec!(30.4375);

/// exact day count between two dates
pub fn days_between(a: NaiveDate, b: NaiveDate) -> Decimal {
    Decimal::from(b.signed_duration_since(a).num_days())
}

/// fractional month count under the average-month approximation
pub fn months_between(a: NaiveDate, b: NaiveDate) -> Decimal {
    days_between(a, b) / AVERAGE_MONTH_DAYS
}

/// fractional year count under the average-month approximation
pub fn years_between(a: NaiveDate, b: NaiveDate) -> Decimal {
    months_between(a, b) / Decimal::from(12)
}

/// calendar-accurate count of fully elapsed months
///
/// the trailing month only counts once the end day-of-month reaches the
/// start's
pub fn whole_calendar_months(a: NaiveDate, b: NaiveDate) -> i64 {
    let mut months =
        (b.year() - a.year()) as i64 * 12 + (b.month() as i64 - a.month() as i64);
    if b.day() < a.day() {
        months -= 1;
    }
    months
}

/// first day of the date's month
pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// last day of the month before the date's month
pub fn last_of_prev_month(d: NaiveDate) -> NaiveDate {
    first_of_month(d).pred_opt().unwrap_or(d)
}

/// first day of the month after the date's month
pub fn first_of_next_month(d: NaiveDate) -> NaiveDate {
    months_ahead(first_of_month(d), 1)
}

/// shift a date back by whole months
pub fn months_back(d: NaiveDate, n: u32) -> NaiveDate {
    d.checked_sub_months(Months::new(n)).unwrap_or(d)
}

/// shift a date forward by whole months
pub fn months_ahead(d: NaiveDate, n: u32) -> NaiveDate {
    d.checked_add_months(Months::new(n)).unwrap_or(d)
}

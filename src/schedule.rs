use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

/// months between occurrences can never drop below one
fn frequency_floor(frequency_months: i32) -> u32 {
    frequency_months.max(1) as u32
}

/// next occurrence of a recurrence anchored at `last_paid`.
///
/// calendar month addition: the month rolls over and the day of month is
/// clamped to the target month's length (2024-01-31 plus one month is
/// 2024-02-29). if the calendar cannot produce a date the anchor is
/// returned unchanged.
pub fn next_due_date(last_paid: NaiveDate, frequency_months: i32) -> NaiveDate {
    last_paid
        .checked_add_months(Months::new(frequency_floor(frequency_months)))
        .unwrap_or(last_paid)
}

/// cost of one occurrence normalized to a single month
pub fn monthly_cost_yen(amount_yen: i64, frequency_months: i32) -> Decimal {
    Decimal::from(amount_yen) / Decimal::from(frequency_floor(frequency_months))
}

/// cost of the recurrence normalized to a full year
pub fn annual_cost_yen(amount_yen: i64, frequency_months: i32) -> Decimal {
    Decimal::from(amount_yen) * Decimal::from(12) / Decimal::from(frequency_floor(frequency_months))
}

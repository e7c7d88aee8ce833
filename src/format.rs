use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::AppLanguage;

/// format whole yen with the currency symbol and thousands separators
pub fn yen(amount: i64) -> String {
    let grouped = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("-¥{grouped}")
    } else {
        format!("¥{grouped}")
    }
}

/// round a normalized cost to whole yen and format it
pub fn yen_decimal(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    yen(rounded)
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut grouped = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, c) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// calendar date in the display language
pub fn date(date: NaiveDate, language: AppLanguage) -> String {
    match language {
        AppLanguage::Ja => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        AppLanguage::En => format!("{} {}, {}", month_abbrev(date.month()), date.day(), date.year()),
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

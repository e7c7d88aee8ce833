use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule;
use crate::types::{BankAccountId, CreditCardId, PayeeId, PaymentId, PaymentMethodType};

/// a recurring payment. `last_paid_date` anchors the recurrence; the next
/// occurrence and normalized costs are derived, never stored.
///
/// the stored encoding is backward compatible: booleans missing from older
/// records decode as `true`, optionals as absent, and the method type as
/// unspecified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub name: String,
    pub amount_yen: i64,
    #[serde(deserialize_with = "clamped_frequency")]
    pub frequency_months: i32,
    pub last_paid_date: NaiveDate,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub method_type: PaymentMethodType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<BankAccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_id: Option<CreditCardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<PayeeId>,
}

fn default_true() -> bool {
    true
}

/// the frequency invariant holds on decode as well as construction
fn clamped_frequency<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = i32::deserialize(deserializer)?;
    Ok(raw.max(1))
}

impl Payment {
    /// create a new active payment with a fresh id
    pub fn new(
        name: impl Into<String>,
        amount_yen: i64,
        frequency_months: i32,
        last_paid_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount_yen,
            frequency_months: frequency_months.max(1),
            last_paid_date,
            is_active: true,
            notifications_enabled: true,
            notes: None,
            method_type: PaymentMethodType::Unspecified,
            bank_account_id: None,
            credit_card_id: None,
            payee_id: None,
        }
    }

    /// next occurrence, derived from the recurrence anchor
    pub fn next_due_date(&self) -> NaiveDate {
        schedule::next_due_date(self.last_paid_date, self.frequency_months)
    }

    pub fn monthly_cost_yen(&self) -> Decimal {
        schedule::monthly_cost_yen(self.amount_yen, self.frequency_months)
    }

    pub fn annual_cost_yen(&self) -> Decimal {
        schedule::annual_cost_yen(self.amount_yen, self.frequency_months)
    }

    /// whether the next occurrence falls on or before `reference` plus
    /// `window_days`
    pub fn due_within(&self, window_days: i64, reference: NaiveDate) -> bool {
        self.next_due_date() <= reference + Duration::days(window_days)
    }

    /// edit-time validity: a displayable name and a positive amount. a
    /// form rejects the record before it reaches the store.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.amount_yen > 0
    }
}

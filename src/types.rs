use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a payment
pub type PaymentId = Uuid;

/// unique identifier for a payee
pub type PayeeId = Uuid;

/// unique identifier for a bank account
pub type BankAccountId = Uuid;

/// unique identifier for a credit card
pub type CreditCardId = Uuid;

/// how a payment is settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethodType {
    /// no method recorded
    #[default]
    Unspecified,
    /// direct debit from a bank account
    BankTransfer,
    /// charged to a credit card
    CreditCard,
}

impl PaymentMethodType {
    pub fn uses_bank_account(&self) -> bool {
        matches!(self, PaymentMethodType::BankTransfer)
    }

    pub fn uses_credit_card(&self) -> bool {
        matches!(self, PaymentMethodType::CreditCard)
    }
}

/// display language for reminder text and date formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppLanguage {
    #[default]
    Ja,
    En,
}

impl AppLanguage {
    pub fn as_tag(&self) -> &'static str {
        match self {
            AppLanguage::Ja => "ja",
            AppLanguage::En => "en",
        }
    }

    /// parse a stored language tag; unknown tags fall back to the default
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            "en" => AppLanguage::En,
            _ => AppLanguage::Ja,
        }
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{BankAccountId, CreditCardId, PayeeId};

/// who a payment goes to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payee {
    pub id: PayeeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Payee {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            note: None,
        }
    }

    pub fn display_name(&self) -> String {
        self.name.clone()
    }
}

/// bank account used for transfers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: BankAccountId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl BankAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            detail: None,
        }
    }

    /// name with the trimmed detail appended when present
    pub fn display_name(&self) -> String {
        match self.detail.as_deref().map(str::trim) {
            Some(detail) if !detail.is_empty() => format!("{} ({})", self.name, detail),
            _ => self.name.clone(),
        }
    }
}

/// credit card a payment is charged to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: CreditCardId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
}

impl CreditCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            last4: None,
        }
    }

    /// name with the masked card number appended when present
    pub fn display_name(&self) -> String {
        match self.last4.as_deref().map(str::trim) {
            Some(last4) if !last4.is_empty() => format!("{} (****{})", self.name, last4),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payee_display_name() {
        let mut payee = Payee::new("東京電力");
        payee.note = Some("引き落とし".to_string());
        // the note never joins the display name
        assert_eq!(payee.display_name(), "東京電力");
    }

    #[test]
    fn test_bank_account_display_name() {
        let mut account = BankAccount::new("みずほ銀行");
        assert_eq!(account.display_name(), "みずほ銀行");

        account.detail = Some("普通 1234567".to_string());
        assert_eq!(account.display_name(), "みずほ銀行 (普通 1234567)");

        account.detail = Some("   ".to_string());
        assert_eq!(account.display_name(), "みずほ銀行");
    }

    #[test]
    fn test_credit_card_display_name() {
        let mut card = CreditCard::new("楽天カード");
        assert_eq!(card.display_name(), "楽天カード");

        card.last4 = Some("4242".to_string());
        assert_eq!(card.display_name(), "楽天カード (****4242)");

        card.last4 = Some(" 4242 ".to_string());
        assert_eq!(card.display_name(), "楽天カード (****4242)");
    }

    #[test]
    fn test_reference_serde_round_trip() {
        let mut card = CreditCard::new("JCB");
        card.last4 = Some("0001".to_string());
        let json = serde_json::to_string(&card).unwrap();
        let decoded: CreditCard = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, card);

        // absent secondary field decodes as none
        let payee: Payee = serde_json::from_str(
            r#"{"id":"6f9fb6f4-5829-4a3c-9e79-6ae1c87f3f50","name":"家賃"}"#,
        )
        .unwrap();
        assert_eq!(payee.note, None);
    }
}

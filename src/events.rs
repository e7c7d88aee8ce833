use chrono::NaiveDateTime;

use crate::types::{BankAccountId, CreditCardId, PayeeId, PaymentId};

/// all events that can be emitted by the store. a UI layer drains these
/// after each mutation instead of being structurally coupled to the
/// collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    // payment lifecycle
    PaymentAdded {
        payment_id: PaymentId,
    },
    PaymentUpdated {
        payment_id: PaymentId,
    },
    PaymentRemoved {
        payment_id: PaymentId,
    },

    // reference entities
    PayeeAdded {
        payee_id: PayeeId,
    },
    PayeeUpdated {
        payee_id: PayeeId,
    },
    PayeeRemoved {
        payee_id: PayeeId,
        detached_payments: usize,
    },
    BankAccountAdded {
        bank_account_id: BankAccountId,
    },
    BankAccountUpdated {
        bank_account_id: BankAccountId,
    },
    BankAccountRemoved {
        bank_account_id: BankAccountId,
        detached_payments: usize,
    },
    CreditCardAdded {
        credit_card_id: CreditCardId,
    },
    CreditCardUpdated {
        credit_card_id: CreditCardId,
    },
    CreditCardRemoved {
        credit_card_id: CreditCardId,
        detached_payments: usize,
    },

    // reminder reconciliation
    ReminderScheduled {
        payment_id: PaymentId,
        fire_at: NaiveDateTime,
    },
    ReminderCancelled {
        payment_id: PaymentId,
    },
    AllRemindersCancelled,

    SettingsChanged,
}

/// event buffer for collecting events during operations
#[derive(Debug, Default)]
pub struct EventBuffer {
    events: Vec<StoreEvent>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: StoreEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[StoreEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_take_drains_the_buffer() {
        let mut buffer = EventBuffer::new();
        let id = Uuid::new_v4();

        buffer.emit(StoreEvent::PaymentAdded { payment_id: id });
        buffer.emit(StoreEvent::SettingsChanged);
        assert_eq!(buffer.events().len(), 2);

        let drained = buffer.take_events();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0], StoreEvent::PaymentAdded { payment_id: id });
        assert!(buffer.events().is_empty());
    }
}

use std::collections::HashSet;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::events::{EventBuffer, StoreEvent};
use crate::notify::{self, ReminderOutcome, ReminderScheduler};
use crate::payment::Payment;
use crate::reference::{BankAccount, CreditCard, Payee};
use crate::settings::Settings;
use crate::storage::Storage;
use crate::types::{AppLanguage, BankAccountId, CreditCardId, PayeeId};

/// storage keys, one JSON array per collection
pub const PAYMENTS_KEY: &str = "payments_v1";
pub const PAYEES_KEY: &str = "payees_v1";
pub const BANK_ACCOUNTS_KEY: &str = "bank_accounts_v1";
pub const CREDIT_CARDS_KEY: &str = "credit_cards_v1";

/// payee names inserted into an empty collection on first run
const DEFAULT_PAYEE_NAMES: [&str; 6] = [
    "家賃",
    "電気代",
    "ガス代",
    "水道代",
    "通信費",
    "サブスクリプション",
];

/// single in-memory source of truth for payments and reference entities.
///
/// collections keep insertion order. every successful mutation persists
/// the affected collection and reconciles reminders for the touched
/// payment, then records a [`StoreEvent`] for UI layers to drain.
///
/// single-writer: the store is confined to one logical thread. wrap the
/// whole store in a mutex if it must be shared.
pub struct PaymentStore {
    payments: Vec<Payment>,
    payees: Vec<Payee>,
    bank_accounts: Vec<BankAccount>,
    credit_cards: Vec<CreditCard>,
    settings: Settings,
    storage: Box<dyn Storage>,
    scheduler: Box<dyn ReminderScheduler>,
    events: EventBuffer,
}

impl PaymentStore {
    /// load all collections and settings; a failed or corrupt load yields
    /// the empty collection. seeds default payees on first run.
    pub fn new(storage: Box<dyn Storage>, scheduler: Box<dyn ReminderScheduler>) -> Self {
        let settings = Settings::load(storage.as_ref());
        let mut store = Self {
            payments: load_collection(storage.as_ref(), PAYMENTS_KEY),
            payees: load_collection(storage.as_ref(), PAYEES_KEY),
            bank_accounts: load_collection(storage.as_ref(), BANK_ACCOUNTS_KEY),
            credit_cards: load_collection(storage.as_ref(), CREDIT_CARDS_KEY),
            settings,
            storage,
            scheduler,
            events: EventBuffer::new(),
        };
        store.seed_default_payees();
        store
    }

    // read access

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payees(&self) -> &[Payee] {
        &self.payees
    }

    pub fn bank_accounts(&self) -> &[BankAccount] {
        &self.bank_accounts
    }

    pub fn credit_cards(&self) -> &[CreditCard] {
        &self.credit_cards
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn payee(&self, id: PayeeId) -> Option<&Payee> {
        self.payees.iter().find(|p| p.id == id)
    }

    pub fn bank_account(&self, id: BankAccountId) -> Option<&BankAccount> {
        self.bank_accounts.iter().find(|a| a.id == id)
    }

    pub fn credit_card(&self, id: CreditCardId) -> Option<&CreditCard> {
        self.credit_cards.iter().find(|c| c.id == id)
    }

    /// drain events recorded since the last call
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.take_events()
    }

    // derived views, computed on demand

    pub fn active_payments(&self) -> Vec<Payment> {
        self.payments.iter().filter(|p| p.is_active).cloned().collect()
    }

    pub fn inactive_payments(&self) -> Vec<Payment> {
        self.payments.iter().filter(|p| !p.is_active).cloned().collect()
    }

    /// active payments due on or before `reference + window_days`,
    /// ascending by due date
    pub fn upcoming_payments(&self, window_days: i64, reference: NaiveDate) -> Vec<Payment> {
        let mut upcoming: Vec<Payment> = self
            .payments
            .iter()
            .filter(|p| p.is_active && p.due_within(window_days, reference))
            .cloned()
            .collect();
        upcoming.sort_by_key(Payment::next_due_date);
        upcoming
    }

    /// upcoming view against the system clock
    pub fn upcoming_payments_now(&self, window_days: i64) -> Vec<Payment> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.upcoming_payments(window_days, time.now().date_naive())
    }

    /// all active payments, ascending by due date
    pub fn payments_by_due_date(&self) -> Vec<Payment> {
        let mut sorted = self.active_payments();
        sorted.sort_by_key(Payment::next_due_date);
        sorted
    }

    pub fn monthly_total_yen(&self) -> Decimal {
        self.payments
            .iter()
            .filter(|p| p.is_active)
            .fold(Decimal::ZERO, |total, p| total + p.monthly_cost_yen())
    }

    pub fn annual_total_yen(&self) -> Decimal {
        self.payments
            .iter()
            .filter(|p| p.is_active)
            .fold(Decimal::ZERO, |total, p| total + p.annual_cost_yen())
    }

    // payment mutations

    pub fn add(&mut self, payment: Payment) {
        let payment = normalize(payment);
        self.payments.push(payment.clone());
        self.persist_payments();
        self.reconcile_reminder(&payment);
        self.events.emit(StoreEvent::PaymentAdded { payment_id: payment.id });
    }

    /// replace the entry with the same id; unknown ids are ignored
    pub fn update(&mut self, payment: Payment) {
        let payment = normalize(payment);
        let Some(slot) = self.payments.iter_mut().find(|p| p.id == payment.id) else {
            debug!("update of unknown payment {} ignored", payment.id);
            return;
        };
        *slot = payment.clone();
        self.persist_payments();
        self.reconcile_reminder(&payment);
        self.events.emit(StoreEvent::PaymentUpdated { payment_id: payment.id });
    }

    /// delete by id. the reminder is cancelled even when the predicate
    /// never held, so no orphan can stay pending.
    pub fn remove(&mut self, payment: &Payment) {
        let before = self.payments.len();
        self.payments.retain(|p| p.id != payment.id);
        self.scheduler.cancel(&notify::reminder_id(payment.id));
        if self.payments.len() == before {
            return;
        }
        self.persist_payments();
        self.events.emit(StoreEvent::ReminderCancelled { payment_id: payment.id });
        self.events.emit(StoreEvent::PaymentRemoved { payment_id: payment.id });
    }

    /// record an occurrence: move the recurrence anchor to `paid_date`
    pub fn mark_paid(&mut self, payment: &Payment, paid_date: NaiveDate) {
        let mut updated = payment.clone();
        updated.last_paid_date = paid_date;
        self.update(updated);
    }

    /// mark paid against the system clock
    pub fn mark_paid_now(&mut self, payment: &Payment) {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.mark_paid(payment, time.now().date_naive());
    }

    pub fn toggle_active(&mut self, payment: &Payment) {
        let mut updated = payment.clone();
        updated.is_active = !updated.is_active;
        self.update(updated);
    }

    pub fn toggle_notifications(&mut self, payment: &Payment) {
        let mut updated = payment.clone();
        updated.notifications_enabled = !updated.notifications_enabled;
        self.update(updated);
    }

    // payee crud

    pub fn add_payee(&mut self, payee: Payee) {
        self.payees.push(payee.clone());
        self.persist_payees();
        self.events.emit(StoreEvent::PayeeAdded { payee_id: payee.id });
    }

    pub fn update_payee(&mut self, payee: Payee) {
        let Some(slot) = self.payees.iter_mut().find(|p| p.id == payee.id) else {
            return;
        };
        *slot = payee.clone();
        self.persist_payees();
        self.events.emit(StoreEvent::PayeeUpdated { payee_id: payee.id });
    }

    /// delete the payee and null the foreign key on every payment that
    /// referenced it; the payments themselves stay
    pub fn remove_payee(&mut self, payee: &Payee) {
        let before = self.payees.len();
        self.payees.retain(|p| p.id != payee.id);
        if self.payees.len() == before {
            return;
        }
        let mut detached = 0;
        for payment in &mut self.payments {
            if payment.payee_id == Some(payee.id) {
                payment.payee_id = None;
                detached += 1;
            }
        }
        self.persist_payees();
        self.persist_payments();
        self.events.emit(StoreEvent::PayeeRemoved {
            payee_id: payee.id,
            detached_payments: detached,
        });
    }

    // bank account crud

    pub fn add_bank_account(&mut self, account: BankAccount) {
        self.bank_accounts.push(account.clone());
        self.persist_bank_accounts();
        self.events.emit(StoreEvent::BankAccountAdded { bank_account_id: account.id });
    }

    pub fn update_bank_account(&mut self, account: BankAccount) {
        let Some(slot) = self.bank_accounts.iter_mut().find(|a| a.id == account.id) else {
            return;
        };
        *slot = account.clone();
        self.persist_bank_accounts();
        self.events.emit(StoreEvent::BankAccountUpdated { bank_account_id: account.id });
    }

    pub fn remove_bank_account(&mut self, account: &BankAccount) {
        let before = self.bank_accounts.len();
        self.bank_accounts.retain(|a| a.id != account.id);
        if self.bank_accounts.len() == before {
            return;
        }
        let mut detached = 0;
        for payment in &mut self.payments {
            if payment.bank_account_id == Some(account.id) {
                payment.bank_account_id = None;
                detached += 1;
            }
        }
        self.persist_bank_accounts();
        self.persist_payments();
        self.events.emit(StoreEvent::BankAccountRemoved {
            bank_account_id: account.id,
            detached_payments: detached,
        });
    }

    // credit card crud

    pub fn add_credit_card(&mut self, card: CreditCard) {
        self.credit_cards.push(card.clone());
        self.persist_credit_cards();
        self.events.emit(StoreEvent::CreditCardAdded { credit_card_id: card.id });
    }

    pub fn update_credit_card(&mut self, card: CreditCard) {
        let Some(slot) = self.credit_cards.iter_mut().find(|c| c.id == card.id) else {
            return;
        };
        *slot = card.clone();
        self.persist_credit_cards();
        self.events.emit(StoreEvent::CreditCardUpdated { credit_card_id: card.id });
    }

    pub fn remove_credit_card(&mut self, card: &CreditCard) {
        let before = self.credit_cards.len();
        self.credit_cards.retain(|c| c.id != card.id);
        if self.credit_cards.len() == before {
            return;
        }
        let mut detached = 0;
        for payment in &mut self.payments {
            if payment.credit_card_id == Some(card.id) {
                payment.credit_card_id = None;
                detached += 1;
            }
        }
        self.persist_credit_cards();
        self.persist_payments();
        self.events.emit(StoreEvent::CreditCardRemoved {
            credit_card_id: card.id,
            detached_payments: detached,
        });
    }

    // settings and reminders

    /// flip the app-wide gate and re-derive every reminder
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.settings.notifications_enabled = enabled;
        self.settings.save(self.storage.as_ref());
        self.events.emit(StoreEvent::SettingsChanged);
        self.refresh_notifications();
    }

    pub fn set_show_amounts(&mut self, show: bool) {
        self.settings.show_amounts = show;
        self.settings.save(self.storage.as_ref());
        self.events.emit(StoreEvent::SettingsChanged);
    }

    pub fn set_language(&mut self, language: AppLanguage) {
        self.settings.language = language;
        self.settings.save(self.storage.as_ref());
        self.events.emit(StoreEvent::SettingsChanged);
    }

    /// forward to the platform; repeat calls while authorized are no-ops
    pub fn request_notification_authorization(&mut self) -> bool {
        self.scheduler.request_authorization()
    }

    /// re-derive reminder state for the whole collection. with the global
    /// gate off this purges every pending reminder in one call, which also
    /// clears reminders whose payment is no longer in the collection.
    pub fn refresh_notifications(&mut self) {
        if !self.settings.notifications_enabled {
            self.scheduler.cancel_all();
            self.events.emit(StoreEvent::AllRemindersCancelled);
            return;
        }
        let payments = self.payments.clone();
        for payment in &payments {
            self.reconcile_reminder(payment);
        }
    }

    // internals

    fn reconcile_reminder(&mut self, payment: &Payment) {
        match notify::reconcile(self.scheduler.as_mut(), payment, &self.settings) {
            ReminderOutcome::Scheduled(fire_at) => {
                self.events.emit(StoreEvent::ReminderScheduled {
                    payment_id: payment.id,
                    fire_at,
                });
            }
            ReminderOutcome::Cancelled => {
                self.events.emit(StoreEvent::ReminderCancelled { payment_id: payment.id });
            }
        }
    }

    fn seed_default_payees(&mut self) {
        if !self.payees.is_empty() {
            return;
        }
        let mut seen: HashSet<String> =
            self.payees.iter().map(|p| normalized_name(&p.name)).collect();
        let mut inserted = false;
        for name in DEFAULT_PAYEE_NAMES {
            if seen.insert(normalized_name(name)) {
                self.payees.push(Payee::new(name));
                inserted = true;
            }
        }
        if inserted {
            self.persist_payees();
        }
    }

    fn persist_payments(&self) {
        persist_collection(self.storage.as_ref(), PAYMENTS_KEY, &self.payments);
    }

    fn persist_payees(&self) {
        persist_collection(self.storage.as_ref(), PAYEES_KEY, &self.payees);
    }

    fn persist_bank_accounts(&self) {
        persist_collection(self.storage.as_ref(), BANK_ACCOUNTS_KEY, &self.bank_accounts);
    }

    fn persist_credit_cards(&self) {
        persist_collection(self.storage.as_ref(), CREDIT_CARDS_KEY, &self.credit_cards);
    }
}

/// invariants enforced on every write: the frequency floor and mutual
/// exclusivity of the method foreign keys
fn normalize(mut payment: Payment) -> Payment {
    payment.frequency_months = payment.frequency_months.max(1);
    if !payment.method_type.uses_bank_account() {
        payment.bank_account_id = None;
    }
    if !payment.method_type.uses_credit_card() {
        payment.credit_card_id = None;
    }
    payment
}

fn normalized_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// a failed load yields the empty collection; this cache is best-effort,
/// not durable
fn load_collection<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Vec<T> {
    let raw = match storage.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!("load of {key} failed: {err}");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(err) => {
            warn!("decode of {key} failed: {err}");
            Vec::new()
        }
    }
}

fn persist_collection<T: Serialize>(storage: &dyn Storage, key: &str, values: &[T]) {
    let raw = match serde_json::to_string(values) {
        Ok(raw) => raw,
        Err(err) => {
            warn!("encode of {key} failed: {err}");
            return;
        }
    };
    if let Err(err) = storage.save(key, &raw) {
        warn!("save of {key} failed: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::Duration;
    use rust_decimal_macros::dec;

    use crate::notify::ReminderRequest;
    use crate::storage::MemoryStorage;
    use crate::types::PaymentMethodType;

    #[derive(Debug, Clone, PartialEq)]
    enum SchedulerCall {
        Scheduled(ReminderRequest),
        Cancelled(String),
        CancelledAll,
    }

    struct RecordingScheduler {
        calls: Rc<RefCell<Vec<SchedulerCall>>>,
    }

    impl ReminderScheduler for RecordingScheduler {
        fn request_authorization(&mut self) -> bool {
            true
        }

        fn schedule(&mut self, request: &ReminderRequest) {
            self.calls.borrow_mut().push(SchedulerCall::Scheduled(request.clone()));
        }

        fn cancel(&mut self, id: &str) {
            self.calls.borrow_mut().push(SchedulerCall::Cancelled(id.to_string()));
        }

        fn cancel_all(&mut self) {
            self.calls.borrow_mut().push(SchedulerCall::CancelledAll);
        }
    }

    fn new_store() -> (PaymentStore, Rc<MemoryStorage>, Rc<RefCell<Vec<SchedulerCall>>>) {
        let storage = Rc::new(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let scheduler = RecordingScheduler { calls: Rc::clone(&calls) };
        let store = PaymentStore::new(Box::new(Rc::clone(&storage)), Box::new(scheduler));
        (store, storage, calls)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(name: &str, amount: i64, months: i32) -> Payment {
        Payment::new(name, amount, months, date(2024, 3, 1))
    }

    #[test]
    fn test_add_persists_and_reconciles() {
        let (mut store, storage, calls) = new_store();
        let p = payment("Netflix", 1490, 1);
        store.add(p.clone());

        let raw = storage.load(PAYMENTS_KEY).unwrap().unwrap();
        let persisted: Vec<Payment> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![p.clone()]);

        // notifications default off, so the reconciliation cancels
        assert_eq!(
            calls.borrow().last(),
            Some(&SchedulerCall::Cancelled(format!("payment-{}", p.id)))
        );
        assert!(store
            .take_events()
            .contains(&StoreEvent::PaymentAdded { payment_id: p.id }));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut store, _storage, _calls) = new_store();
        store.add(payment("gym", 7000, 1));
        store.take_events();

        store.update(payment("stranger", 1, 1));
        assert_eq!(store.payments().len(), 1);
        assert_eq!(store.payments()[0].name, "gym");
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_mark_paid_moves_anchor() {
        let (mut store, _storage, _calls) = new_store();
        let p = payment("gym", 7000, 1);
        store.add(p.clone());

        store.mark_paid(&p, date(2024, 4, 2));
        assert_eq!(store.payments()[0].last_paid_date, date(2024, 4, 2));
        assert_eq!(store.payments()[0].next_due_date(), date(2024, 5, 2));
    }

    #[test]
    fn test_remove_cancels_unconditionally() {
        let (mut store, _storage, calls) = new_store();
        let mut p = payment("gym", 7000, 1);
        p.notifications_enabled = false;
        store.add(p.clone());
        calls.borrow_mut().clear();

        store.remove(&p);
        assert!(store.payments().is_empty());
        assert_eq!(
            calls.borrow().as_slice(),
            &[SchedulerCall::Cancelled(format!("payment-{}", p.id))]
        );

        // removing again does not report another removal
        store.take_events();
        store.remove(&p);
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn test_toggle_active_updates_views_and_reminder() {
        let (mut store, _storage, calls) = new_store();
        store.set_notifications_enabled(true);
        let p = payment("Netflix", 1490, 1);
        store.add(p.clone());
        calls.borrow_mut().clear();

        store.toggle_active(&p);
        assert!(store.active_payments().is_empty());
        assert_eq!(store.inactive_payments().len(), 1);
        assert_eq!(
            calls.borrow().last(),
            Some(&SchedulerCall::Cancelled(format!("payment-{}", p.id)))
        );

        let inactive = store.inactive_payments()[0].clone();
        calls.borrow_mut().clear();
        store.toggle_active(&inactive);
        assert_eq!(store.active_payments().len(), 1);
        let calls_ref = calls.borrow();
        match calls_ref.last() {
            Some(SchedulerCall::Scheduled(request)) => {
                assert_eq!(request.id, format!("payment-{}", p.id));
                assert_eq!(request.fire_at.date(), p.next_due_date());
            }
            other => panic!("expected a schedule, got {other:?}"),
        }
    }

    #[test]
    fn test_update_is_idempotent() {
        let (mut store, _storage, calls) = new_store();
        store.set_notifications_enabled(true);
        let p = payment("Netflix", 1490, 1);
        store.add(p.clone());
        calls.borrow_mut().clear();

        store.update(p.clone());
        let state_after_first = store.payments().to_vec();
        let calls_after_first = calls.borrow().clone();

        store.update(p.clone());
        assert_eq!(store.payments(), state_after_first.as_slice());
        assert_eq!(calls.borrow()[calls_after_first.len()..], calls_after_first[..]);
    }

    #[test]
    fn test_remove_payee_detaches_references() {
        let (mut store, _storage, _calls) = new_store();
        let payee = Payee::new("東京ガス");
        store.add_payee(payee.clone());

        let mut referencing_a = payment("gas", 4000, 1);
        referencing_a.payee_id = Some(payee.id);
        let mut referencing_b = payment("gas2", 3000, 1);
        referencing_b.payee_id = Some(payee.id);
        let unrelated = payment("rent", 90000, 1);
        store.add(referencing_a);
        store.add(referencing_b);
        store.add(unrelated);
        store.take_events();

        store.remove_payee(&payee);
        assert!(store.payee(payee.id).is_none());
        assert_eq!(store.payments().len(), 3);
        assert!(store.payments().iter().all(|p| p.payee_id != Some(payee.id)));
        assert!(store.take_events().contains(&StoreEvent::PayeeRemoved {
            payee_id: payee.id,
            detached_payments: 2,
        }));
    }

    #[test]
    fn test_remove_bank_account_and_card_detach() {
        let (mut store, _storage, _calls) = new_store();
        let account = BankAccount::new("みずほ銀行");
        let card = CreditCard::new("楽天カード");
        store.add_bank_account(account.clone());
        store.add_credit_card(card.clone());

        let mut by_transfer = payment("rent", 90000, 1);
        by_transfer.method_type = PaymentMethodType::BankTransfer;
        by_transfer.bank_account_id = Some(account.id);
        let mut by_card = payment("Netflix", 1490, 1);
        by_card.method_type = PaymentMethodType::CreditCard;
        by_card.credit_card_id = Some(card.id);
        store.add(by_transfer);
        store.add(by_card);

        store.remove_bank_account(&account);
        store.remove_credit_card(&card);

        assert!(store.bank_accounts().is_empty());
        assert!(store.credit_cards().is_empty());
        assert_eq!(store.payments().len(), 2);
        assert!(store.payments().iter().all(|p| p.bank_account_id.is_none()));
        assert!(store.payments().iter().all(|p| p.credit_card_id.is_none()));
    }

    #[test]
    fn test_upcoming_window_boundary() {
        let (mut store, _storage, _calls) = new_store();
        let today = date(2024, 3, 1);

        let mut due_in_seven = payment("in window", 1000, 1);
        due_in_seven.last_paid_date = date(2024, 2, 8);
        let mut due_in_eight = payment("out of window", 1000, 1);
        due_in_eight.last_paid_date = date(2024, 2, 9);
        let mut inactive = payment("paused", 1000, 1);
        inactive.last_paid_date = date(2024, 2, 8);
        inactive.is_active = false;

        assert_eq!(due_in_seven.next_due_date(), today + Duration::days(7));
        assert_eq!(due_in_eight.next_due_date(), today + Duration::days(8));

        store.add(due_in_eight.clone());
        store.add(due_in_seven.clone());
        store.add(inactive);

        let upcoming = store.upcoming_payments(7, today);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].name, "in window");

        // widening the window pulls the later payment in, sorted ascending
        let upcoming = store.upcoming_payments(8, today);
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].name, "in window");
        assert_eq!(upcoming[1].name, "out of window");
    }

    #[test]
    fn test_totals_skip_inactive() {
        let (mut store, _storage, _calls) = new_store();
        store.add(payment("NHK", 1200, 12));
        store.add(payment("gym", 1000, 1));
        let mut paused = payment("paused", 50000, 1);
        paused.is_active = false;
        store.add(paused);

        assert_eq!(store.monthly_total_yen(), dec!(1100));
        assert_eq!(store.annual_total_yen(), dec!(13200));
    }

    #[test]
    fn test_default_payees_seeded_once() {
        let storage = Rc::new(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let store = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls: Rc::clone(&calls) }),
        );
        assert_eq!(store.payees().len(), DEFAULT_PAYEE_NAMES.len());
        drop(store);

        // second start over the same storage does not duplicate
        let again = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls }),
        );
        assert_eq!(again.payees().len(), DEFAULT_PAYEE_NAMES.len());
    }

    #[test]
    fn test_seeding_skipped_when_payees_exist() {
        let storage = Rc::new(MemoryStorage::new());
        let existing = vec![Payee::new(" 家賃 ")];
        storage
            .save(PAYEES_KEY, &serde_json::to_string(&existing).unwrap())
            .unwrap();

        let calls = Rc::new(RefCell::new(Vec::new()));
        let store = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls }),
        );
        assert_eq!(store.payees().len(), 1);
    }

    #[test]
    fn test_global_disable_purges_in_one_call() {
        let (mut store, _storage, calls) = new_store();
        store.set_notifications_enabled(true);
        store.add(payment("a", 1000, 1));
        store.add(payment("b", 2000, 1));
        calls.borrow_mut().clear();

        store.set_notifications_enabled(false);
        assert_eq!(calls.borrow().as_slice(), &[SchedulerCall::CancelledAll]);
    }

    #[test]
    fn test_enable_reschedules_eligible_payments() {
        let (mut store, _storage, calls) = new_store();
        let eligible = payment("a", 1000, 1);
        let mut opted_out = payment("b", 2000, 1);
        opted_out.notifications_enabled = false;
        store.add(eligible.clone());
        store.add(opted_out.clone());
        calls.borrow_mut().clear();

        store.set_notifications_enabled(true);
        let recorded = calls.borrow().clone();
        assert_eq!(recorded.len(), 2);
        assert!(matches!(
            &recorded[0],
            SchedulerCall::Scheduled(request) if request.id == format!("payment-{}", eligible.id)
        ));
        assert_eq!(
            recorded[1],
            SchedulerCall::Cancelled(format!("payment-{}", opted_out.id))
        );
    }

    #[test]
    fn test_method_mismatch_cleared_on_write() {
        let (mut store, _storage, _calls) = new_store();
        let account = BankAccount::new("bank");
        let card = CreditCard::new("card");

        let mut p = payment("rent", 90000, 1);
        p.method_type = PaymentMethodType::BankTransfer;
        p.bank_account_id = Some(account.id);
        p.credit_card_id = Some(card.id);
        store.add(p.clone());

        let stored = &store.payments()[0];
        assert_eq!(stored.bank_account_id, Some(account.id));
        assert_eq!(stored.credit_card_id, None);

        let mut switched = stored.clone();
        switched.method_type = PaymentMethodType::Unspecified;
        store.update(switched);
        let stored = &store.payments()[0];
        assert_eq!(stored.bank_account_id, None);
        assert_eq!(stored.credit_card_id, None);
    }

    #[test]
    fn test_frequency_clamped_on_write() {
        let (mut store, _storage, _calls) = new_store();
        let mut p = payment("broken", 1000, 1);
        p.frequency_months = 0;
        store.add(p);
        assert_eq!(store.payments()[0].frequency_months, 1);
    }

    #[test]
    fn test_reload_round_trip() {
        let storage = Rc::new(MemoryStorage::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls: Rc::clone(&calls) }),
        );
        let mut p = payment("Netflix", 1490, 1);
        p.notes = Some("家族プラン".to_string());
        store.add(p.clone());
        drop(store);

        let reloaded = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls }),
        );
        assert_eq!(reloaded.payments(), &[p]);
    }

    #[test]
    fn test_corrupt_collection_loads_empty() {
        let storage = Rc::new(MemoryStorage::new());
        storage.save(PAYMENTS_KEY, "not json at all").unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let store = PaymentStore::new(
            Box::new(Rc::clone(&storage)),
            Box::new(RecordingScheduler { calls }),
        );
        assert!(store.payments().is_empty());
    }
}

use chrono::{NaiveDateTime, NaiveTime};

use crate::format;
use crate::payment::Payment;
use crate::settings::Settings;
use crate::types::{AppLanguage, PaymentId};

/// reminders fire at a fixed local time on the due date
const FIRE_HOUR: u32 = 9;

/// a one-shot local notification. `fire_at` is wall-clock time in the
/// device timezone; a new occurrence needs a new schedule call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub id: String,
    pub fire_at: NaiveDateTime,
    pub title: String,
    pub body: String,
}

/// boundary toward the platform notification subsystem. scheduling an id
/// that is already pending replaces it, so reconciliation is idempotent.
pub trait ReminderScheduler {
    /// ask the platform for permission. may complete long after the call;
    /// asking again while already authorized is a no-op.
    fn request_authorization(&mut self) -> bool;

    fn schedule(&mut self, request: &ReminderRequest);

    fn cancel(&mut self, id: &str);

    /// drop every pending reminder, including those whose payment no
    /// longer exists
    fn cancel_all(&mut self);
}

/// scheduler that drops every request, for headless use
#[derive(Debug, Clone, Copy, Default)]
pub struct NullScheduler;

impl ReminderScheduler for NullScheduler {
    fn request_authorization(&mut self) -> bool {
        false
    }

    fn schedule(&mut self, _request: &ReminderRequest) {}

    fn cancel(&mut self, _id: &str) {}

    fn cancel_all(&mut self) {}
}

/// reminder identity derives from the payment id, 1:1
pub fn reminder_id(payment_id: PaymentId) -> String {
    format!("payment-{payment_id}")
}

/// a reminder should exist only while all three switches are on
pub fn should_schedule(payment: &Payment, settings: &Settings) -> bool {
    settings.notifications_enabled && payment.is_active && payment.notifications_enabled
}

/// what a reconciliation pass did for one payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    Scheduled(NaiveDateTime),
    Cancelled,
}

/// schedule-or-cancel a single payment's reminder per the predicate
pub fn reconcile(
    scheduler: &mut dyn ReminderScheduler,
    payment: &Payment,
    settings: &Settings,
) -> ReminderOutcome {
    if should_schedule(payment, settings) {
        let request = reminder_request(payment, settings.language);
        let fire_at = request.fire_at;
        scheduler.schedule(&request);
        ReminderOutcome::Scheduled(fire_at)
    } else {
        scheduler.cancel(&reminder_id(payment.id));
        ReminderOutcome::Cancelled
    }
}

/// build the reminder for a payment's next occurrence
pub fn reminder_request(payment: &Payment, language: AppLanguage) -> ReminderRequest {
    let due = payment.next_due_date();
    let fire_at = due.and_time(NaiveTime::from_hms_opt(FIRE_HOUR, 0, 0).unwrap_or_default());

    let amount = format::yen(payment.amount_yen);
    let due_text = format::date(due, language);

    let title = match language {
        AppLanguage::Ja => "お支払い予定".to_string(),
        AppLanguage::En => "Upcoming payment".to_string(),
    };

    let mut body = match language {
        AppLanguage::Ja => format!("{}の{}が{}に予定されています", payment.name, amount, due_text),
        AppLanguage::En => format!("{} ({}) is due on {}", payment.name, amount, due_text),
    };

    if let Some(notes) = payment.notes.as_deref().map(str::trim) {
        if !notes.is_empty() {
            let memo = match language {
                AppLanguage::Ja => format!("メモ: {notes}"),
                AppLanguage::En => format!("Note: {notes}"),
            };
            body.push('\n');
            body.push_str(&memo);
        }
    }

    ReminderRequest {
        id: reminder_id(payment.id),
        fire_at,
        title,
        body,
    }
}

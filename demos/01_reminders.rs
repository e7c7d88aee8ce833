/// reminders - wire a scheduler and watch reconciliation follow state
use payment_tracker_rs::chrono::NaiveDate;
use payment_tracker_rs::{
    MemoryStorage, Payment, PaymentStore, ReminderRequest, ReminderScheduler,
};

/// prints every scheduler call instead of talking to a platform
struct ConsoleScheduler;

impl ReminderScheduler for ConsoleScheduler {
    fn request_authorization(&mut self) -> bool {
        println!("[scheduler] authorization granted");
        true
    }

    fn schedule(&mut self, request: &ReminderRequest) {
        println!("[scheduler] schedule {} at {}", request.id, request.fire_at);
        println!("            {}: {}", request.title, request.body.replace('\n', " | "));
    }

    fn cancel(&mut self, id: &str) {
        println!("[scheduler] cancel {id}");
    }

    fn cancel_all(&mut self) {
        println!("[scheduler] cancel all");
    }
}

fn main() {
    let mut store = PaymentStore::new(Box::new(MemoryStorage::new()), Box::new(ConsoleScheduler));
    store.request_notification_authorization();

    let mut netflix = Payment::new(
        "Netflix",
        1490,
        1,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    );
    netflix.notes = Some("家族プラン".to_string());
    store.add(netflix.clone());

    println!();
    println!("-- enabling notifications globally --");
    store.set_notifications_enabled(true);

    println!();
    println!("-- marking paid moves the reminder to the next occurrence --");
    store.mark_paid(&netflix, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());

    println!();
    println!("-- pausing the payment cancels its reminder --");
    let current = store.payments()[0].clone();
    store.toggle_active(&current);

    println!();
    println!("-- global off purges everything in one call --");
    store.set_notifications_enabled(false);
}

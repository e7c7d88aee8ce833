/// time control - drive the store with a test clock
use payment_tracker_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use payment_tracker_rs::{
    MemoryStorage, NullScheduler, Payment, PaymentStore, SafeTimeProvider, TimeSource,
};

fn main() {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
    ));
    let control = time.test_control().unwrap();

    let mut store = PaymentStore::new(Box::new(MemoryStorage::new()), Box::new(NullScheduler));
    let gym = Payment::new(
        "ジム",
        7000,
        1,
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
    );
    store.add(gym.clone());

    let today = time.now().date_naive();
    println!("today: {today}");
    println!(
        "upcoming within 30 days: {}",
        store.upcoming_payments(30, today).len()
    );

    // pay on the due date
    control.advance(Duration::days(19));
    let paid_on = time.now().date_naive();
    store.mark_paid(&gym, paid_on);
    println!(
        "paid on {paid_on}, next due {}",
        store.payments()[0].next_due_date()
    );

    // the upcoming window follows the clock
    control.advance(Duration::days(25));
    let today = time.now().date_naive();
    println!("today: {today}");
    for payment in store.upcoming_payments(7, today) {
        println!("due soon: {} on {}", payment.name, payment.next_due_date());
    }
}

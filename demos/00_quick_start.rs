/// quick start - track a few recurring payments and print the totals
use payment_tracker_rs::chrono::NaiveDate;
use payment_tracker_rs::{format, MemoryStorage, NullScheduler, Payment, PaymentStore};

fn main() {
    let mut store = PaymentStore::new(Box::new(MemoryStorage::new()), Box::new(NullScheduler));

    let mut netflix = Payment::new(
        "Netflix",
        1490,
        1,
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    );
    netflix.notes = Some("プレミアムプラン".to_string());
    store.add(netflix);
    store.add(Payment::new(
        "NHK受信料",
        24185,
        12,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    ));
    store.add(Payment::new(
        "ジム",
        7000,
        1,
        NaiveDate::from_ymd_opt(2024, 2, 20).unwrap(),
    ));

    println!("=== payments by due date ===");
    for payment in store.payments_by_due_date() {
        println!(
            "{}  {}  next due {}",
            payment.name,
            format::yen(payment.amount_yen),
            payment.next_due_date()
        );
    }

    println!();
    println!("monthly total: {}", format::yen_decimal(store.monthly_total_yen()));
    println!("annual total:  {}", format::yen_decimal(store.annual_total_yen()));
}

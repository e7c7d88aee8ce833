pub mod errors;
pub mod events;
pub mod format;
pub mod notify;
pub mod payment;
pub mod reference;
pub mod schedule;
pub mod settings;
pub mod storage;
pub mod store;
pub mod types;

// re-export key types
pub use errors::{Result, StorageError};
pub use events::{EventBuffer, StoreEvent};
pub use notify::{NullScheduler, ReminderOutcome, ReminderRequest, ReminderScheduler};
pub use payment::Payment;
pub use reference::{BankAccount, CreditCard, Payee};
pub use settings::Settings;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::PaymentStore;
pub use types::{
    AppLanguage, BankAccountId, CreditCardId, PayeeId, PaymentId, PaymentMethodType,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;

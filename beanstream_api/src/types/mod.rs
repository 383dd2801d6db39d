mod transaction;
pub use self::transaction::{Adjustment, Address, CardSummary, Transaction};

mod record;
pub use self::record::{Records, TransactionRecord};

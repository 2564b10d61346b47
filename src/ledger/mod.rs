//! Typed views over the order ledger, transaction ledger and rules table.

pub mod amount;
pub mod order;
pub mod rules;
pub mod status;
pub mod transaction;

pub use amount::parse_amount;
pub use order::{InstallmentSlot, OrderRecord};
pub use rules::RuleSet;
pub use status::DueStatus;
pub use transaction::{PaymentKind, TransactionRecord};

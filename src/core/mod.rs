//! The reconciliation passes and the engine that sequences them.

pub mod balances;
pub mod due_dates;
pub mod engine;
pub mod payment_index;
pub mod period_one;
pub mod receivables;
pub mod report;

pub use balances::{BalancePropagator, PropagationOutcome, RunningBalances};
pub use due_dates::{DueDateClassifier, InstallmentStatus};
pub use engine::ReconciliationEngine;
pub use payment_index::PaymentIndex;
pub use period_one::PeriodOneSummarizer;
pub use receivables::{ReceivableAggregator, ReceivableTotals};
pub use report::{RunReport, RunWarning, WarningKind, WarningLog};

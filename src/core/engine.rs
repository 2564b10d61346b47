use chrono::{NaiveDate, Utc};
use tracing::{error, info, info_span};
use uuid::Uuid;

use crate::{
    config::{Config, Vocabulary, WorkbookLayout},
    errors::Result,
    ledger::{OrderRecord, RuleSet, TransactionRecord},
    workbook::Workbook,
};

use super::{
    balances::BalancePropagator,
    due_dates::DueDateClassifier,
    payment_index::PaymentIndex,
    period_one::PeriodOneSummarizer,
    receivables::ReceivableAggregator,
    report::{count_statuses, RunReport, WarningLog},
};

/// Runs the four reconciliation passes over a workbook.
///
/// Every derived cell is recomputed from the current ledger contents and `as_of`, so
/// running twice with the same date leaves the workbook unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationEngine {
    layout: WorkbookLayout,
    vocabulary: Vocabulary,
}

impl ReconciliationEngine {
    pub fn new(layout: WorkbookLayout, vocabulary: Vocabulary) -> Self {
        Self { layout, vocabulary }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.layout.clone(), config.vocabulary.clone())
    }

    pub fn layout(&self) -> &WorkbookLayout {
        &self.layout
    }

    /// Classifies due dates, recomputes receivables and costs, summarizes first-period
    /// collections and replays running balances, in that order.
    ///
    /// Missing sheets and invalid layouts fail before any cell is written. The workbook is
    /// mutated in place; callers should persist it only when this returns `Ok`.
    pub fn run(&self, workbook: &mut Workbook, as_of: NaiveDate) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("reconcile", %run_id, %as_of);
        let _guard = span.enter();

        self.layout.validate()?;
        let names = &self.layout.sheets;
        let tables = workbook
            .ledger_tables(&names.orders, &names.transactions, &names.rules)
            .map_err(|err| {
                error!("cannot start reconciliation: {err}");
                err
            })?;
        let started_at = Utc::now();

        let order_cols = &self.layout.orders;
        let txn_cols = &self.layout.transactions;
        let orders = OrderRecord::read_from(
            tables.orders,
            order_cols,
            order_cols.first_row.min(order_cols.status_first_row),
        );
        let transactions = TransactionRecord::read_from(
            tables.transactions,
            txn_cols,
            &self.vocabulary,
            txn_cols.first_row.min(txn_cols.balance_first_row),
        );
        let ledger_orders: Vec<&OrderRecord> = orders
            .iter()
            .filter(|o| o.row >= order_cols.first_row)
            .collect();
        let ledger_transactions: Vec<&TransactionRecord> = transactions
            .iter()
            .filter(|t| t.row >= txn_cols.first_row)
            .collect();
        let mut warnings = WarningLog::new();

        info!(
            orders = ledger_orders.len(),
            transactions = ledger_transactions.len(),
            "starting due-date classification"
        );
        let index = PaymentIndex::build(ledger_transactions.iter().copied());
        info!(entries = index.len(), "built payment index");
        let classifications = DueDateClassifier::classify_orders(
            orders
                .iter()
                .filter(|o| o.row >= order_cols.status_first_row),
            &index,
            as_of,
        );
        DueDateClassifier::apply_fills(tables.orders, &classifications);

        info!("recomputing receivables and costs");
        let totals = ReceivableAggregator::aggregate(
            ledger_transactions.iter().copied(),
            &tables.transactions.name,
            txn_cols.amount,
            &mut warnings,
        );
        let orders_updated = ReceivableAggregator::apply(
            tables.orders,
            ledger_orders.iter().copied(),
            &totals,
            order_cols,
            &mut warnings,
        );

        info!("filling first-period amounts");
        let sums = PeriodOneSummarizer::summarize(
            ledger_transactions.iter().copied(),
            &self.vocabulary.first_period,
            &tables.transactions.name,
            txn_cols.amount,
            &mut warnings,
        );
        let period_one_matches = PeriodOneSummarizer::apply(
            tables.orders,
            ledger_orders.iter().copied(),
            &sums,
            order_cols,
            &self.vocabulary.no_match,
        );

        info!("updating running balances and order details");
        let rules = RuleSet::read(tables.rules, &self.layout.rules);
        let propagation = BalancePropagator::propagate(
            tables.transactions,
            transactions
                .iter()
                .filter(|t| t.row >= txn_cols.balance_first_row),
            ledger_orders.iter().copied(),
            &rules,
            txn_cols,
            &self.vocabulary.reinvestment_card,
            &mut warnings,
        );

        let report = RunReport {
            run_id,
            as_of,
            started_at,
            status_counts: count_statuses(&classifications),
            classifications,
            payment_index_entries: index.len(),
            orders_with_receipts: totals.receivables_paid.len(),
            orders_with_costs: totals.costs.len(),
            orders_updated,
            period_one_matches,
            balance_rows_written: propagation.rows_written,
            detail_rows_copied: propagation.rows_copied,
            available_balance: propagation.balances.available,
            withdraw_balance: propagation.balances.withdraw,
            warnings: warnings.into_entries(),
        };
        info!("{}", report.headline());
        Ok(report)
    }
}

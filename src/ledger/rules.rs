use std::collections::HashSet;

use crate::{
    config::{RowRange, RulesLayout},
    workbook::Sheet,
};

/// Balance categories that move the two running balances, read fresh on every run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub available: HashSet<String>,
    pub withdraw: HashSet<String>,
}

impl RuleSet {
    pub fn read(sheet: &Sheet, layout: &RulesLayout) -> Self {
        let collect = |rows: &RowRange| {
            rows.rows()
                .filter_map(|row| sheet.get(row, layout.column).key())
                .collect::<HashSet<_>>()
        };
        Self {
            available: collect(&layout.available_rows),
            withdraw: collect(&layout.withdraw_rows),
        }
    }

    pub fn counts_toward_available(&self, category: &str) -> bool {
        self.available.contains(category)
    }

    pub fn counts_toward_withdraw(&self, category: &str) -> bool {
        self.withdraw.contains(category)
    }
}

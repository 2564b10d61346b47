use std::fmt;

use serde::{Deserialize, Serialize};

/// Payment state of one installment cell on the order ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DueStatus {
    /// The due-date cell is blank or not a date.
    Invalid,
    /// Paid after the due date.
    Late,
    /// Paid before the due date.
    Early,
    OnTime,
    /// Unpaid and due today.
    BillingDay,
    OverdueUnpaid,
    NotYetDue,
}

impl DueStatus {
    pub const ALL: [DueStatus; 7] = [
        DueStatus::Invalid,
        DueStatus::Late,
        DueStatus::Early,
        DueStatus::OnTime,
        DueStatus::BillingDay,
        DueStatus::OverdueUnpaid,
        DueStatus::NotYetDue,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DueStatus::Invalid => "Invalid",
            DueStatus::Late => "Late",
            DueStatus::Early => "Early",
            DueStatus::OnTime => "OnTime",
            DueStatus::BillingDay => "BillingDay",
            DueStatus::OverdueUnpaid => "OverdueUnpaid",
            DueStatus::NotYetDue => "NotYetDue",
        }
    }

    /// Background colour painted on the due-date cell; `None` clears any previous fill.
    pub fn fill_color(self) -> Option<&'static str> {
        match self {
            DueStatus::Late => Some("FFEB9C"),
            DueStatus::Early => Some("D9E1F2"),
            DueStatus::OnTime => Some("C6EFCE"),
            DueStatus::BillingDay => Some("F4B084"),
            DueStatus::OverdueUnpaid => Some("FFC7CE"),
            DueStatus::Invalid => Some("DEDEDE"),
            DueStatus::NotYetDue => None,
        }
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#![warn(clippy::uninlined_format_args)]

pub mod ledger;
pub mod model;
pub mod services;

pub use ledger::{Ledger, LedgerError, MembershipPolicy};
pub use model::{
    Balances, EqualContributions, Money, Participant, SharedContributions, SharedKey, SharerSet,
    Settlement, Transaction,
};
pub use services::{BalanceCalculator, SettlementCalculator};

use crate::{
    amount::{format_amount, round_to_cents},
    messages,
};
use rust_decimal::Decimal;
use splitlater_domain::{Settlement, Transaction};
use std::fmt::Write as _;

pub struct SettlementPresenter;

impl SettlementPresenter {
    /// One `"{debtor} pays {creditor} ${amount}"` line per transaction.
    /// Transactions that round to zero cents are left out.
    pub fn render(settlement: &Settlement) -> String {
        Self::render_transactions(&settlement.transactions)
    }

    pub fn render_transactions(transactions: &[Transaction]) -> String {
        let mut reply = String::with_capacity(64 * transactions.len());
        for transaction in transactions {
            if round_to_cents(transaction.amount) == Decimal::ZERO {
                continue;
            }
            let _ = writeln!(
                reply,
                "{} pays {} ${}",
                transaction.debtor,
                transaction.creditor,
                format_amount(transaction.amount)
            );
        }

        if reply.is_empty() {
            return messages::NOTHING_TO_SETTLE.to_string();
        }
        reply.truncate(reply.trim_end().len());
        reply
    }
}

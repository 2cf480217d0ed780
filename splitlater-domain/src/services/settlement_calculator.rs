use crate::model::{Balances, Money, Participant, Transaction};

/// Greedy settlement of net balances into payment instructions.
pub struct SettlementCalculator;

impl SettlementCalculator {
    /// Calculate settlement transactions
    ///
    /// Debtors are visited in balance order; each one pays creditors, also in
    /// balance order, until their debt is cleared. Amounts are carried at full
    /// precision between iterations.
    ///
    /// # Arguments
    /// * `balances` - Net balance table (positive: owed money, negative: owes money)
    ///
    /// # Returns
    /// Transactions in the order they were matched. Every debtor pays exactly
    /// their debt in total and every creditor receives exactly their credit,
    /// in at most `debtors + creditors - 1` transactions.
    pub fn calculate(&self, balances: &Balances) -> Vec<Transaction> {
        let mut creditors: Vec<(&Participant, Money)> = Vec::new();
        let mut debtors: Vec<(&Participant, Money)> = Vec::new();
        for (participant, &balance) in balances {
            if balance.is_positive() {
                creditors.push((participant, balance));
            } else if balance.is_negative() {
                debtors.push((participant, balance));
            }
        }

        let mut transactions = Vec::new();

        for (debtor, debtor_balance) in &mut debtors {
            for (creditor, creditor_balance) in &mut creditors {
                if debtor_balance.is_zero() {
                    break;
                }
                if creditor_balance.is_zero() {
                    continue;
                }

                let amount = (-*debtor_balance).min(*creditor_balance);
                *debtor_balance += amount;
                *creditor_balance -= amount;
                transactions.push(Transaction {
                    debtor: (*debtor).clone(),
                    creditor: (*creditor).clone(),
                    amount,
                });
            }
        }

        transactions
    }
}

use crate::model::{Balances, EqualContributions, Money, Participant, SharedContributions};

/// Turns accumulated contributions into net balances.
pub struct BalanceCalculator;

impl BalanceCalculator {
    /// Mean of the equal contributions, or zero when nobody has contributed.
    pub fn average(equal: &EqualContributions) -> Money {
        if equal.is_empty() {
            return Money::ZERO;
        }
        equal.values().sum::<Money>().share(equal.len())
    }

    /// Calculate net balances
    ///
    /// Equal contributions are measured against their average first, then
    /// every shared contribution is split between the payer and its sharers.
    /// Participants only reachable through shared contributions are appended
    /// in the order they are first seen.
    pub fn calculate(&self, equal: &EqualContributions, shared: &SharedContributions) -> Balances {
        let average = Self::average(equal);
        let mut balances: Balances = equal
            .iter()
            .map(|(participant, paid)| (participant.clone(), *paid - average))
            .collect();

        for (key, amount) in shared {
            let share = amount.share(key.sharers.len() + 1);
            credit(&mut balances, &key.payer, share);
            for sharer in &key.sharers {
                credit(&mut balances, sharer, -share);
            }
        }

        balances
    }
}

fn credit(balances: &mut Balances, participant: &Participant, amount: Money) {
    match balances.get_mut(participant.as_str()) {
        Some(balance) => *balance += amount,
        None => {
            balances.insert(participant.clone(), amount);
        }
    }
}

use crate::{
    model::{
        Balances, EqualContributions, Money, Participant, SharedContributions, SharedKey,
        SharerSet, Settlement, Transaction,
    },
    services::{BalanceCalculator, SettlementCalculator},
};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Amount {0} is not a finite number within the accepted range")]
    InvalidAmount(f64),
    #[error("A shared expense needs at least one other participant")]
    EmptySharerSet,
    #[error("'{0}' is not a participant")]
    UnknownParticipant(Participant),
}

/// How contributions from names outside the participant set are treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MembershipPolicy {
    /// Unknown payers and sharers join the participant set.
    #[default]
    AutoRegister,
    /// Contributions naming anyone outside the participant set are rejected.
    Strict,
}

/// In-memory expense ledger for one session.
#[derive(Debug, Default)]
pub struct Ledger {
    policy: MembershipPolicy,
    participants: IndexSet<Participant, FxBuildHasher>,
    equal: EqualContributions,
    shared: SharedContributions,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MembershipPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> MembershipPolicy {
        self.policy
    }

    pub fn participants(&self) -> impl ExactSizeIterator<Item = &Participant> + '_ {
        self.participants.iter()
    }

    pub fn is_participant(&self, name: &str) -> bool {
        self.participants.contains(name)
    }

    pub fn equal_contributions(&self) -> &EqualContributions {
        &self.equal
    }

    pub fn shared_contributions(&self) -> &SharedContributions {
        &self.shared
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty() && self.equal.is_empty() && self.shared.is_empty()
    }

    /// Replaces the participant set. Every participant gets an equal-contribution
    /// entry of zero unless they already have one.
    pub fn include<I>(&mut self, participants: I)
    where
        I: IntoIterator<Item = Participant>,
    {
        self.participants = participants.into_iter().collect();
        for participant in &self.participants {
            if !self.equal.contains_key(participant.as_str()) {
                self.equal.insert(participant.clone(), Money::ZERO);
            }
        }
    }

    /// Records money `payer` spent on everyone.
    pub fn add_equal(&mut self, payer: Participant, amount: f64) -> Result<(), LedgerError> {
        let invalid = LedgerError::InvalidAmount(amount);
        let amount = Money::try_from_f64(amount).ok_or_else(|| invalid.clone())?;
        let total = self
            .equal
            .get(payer.as_str())
            .copied()
            .unwrap_or(Money::ZERO)
            .checked_add(amount)
            .ok_or(invalid)?;
        self.admit(std::iter::once(&payer))?;

        self.equal.insert(payer, total);
        Ok(())
    }

    /// Records money `payer` spent on themselves and `sharers`.
    ///
    /// The sharers are keyed as a set, so repeated calls naming the same people
    /// in any order accumulate into one entry. The payer is never one of their
    /// own sharers.
    pub fn add_shared<I>(
        &mut self,
        payer: Participant,
        amount: f64,
        sharers: I,
    ) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = Participant>,
    {
        let invalid = LedgerError::InvalidAmount(amount);
        let amount = Money::try_from_f64(amount).ok_or_else(|| invalid.clone())?;
        let mut sharers: SharerSet = sharers.into_iter().collect();
        sharers.remove(payer.as_str());
        if sharers.is_empty() {
            return Err(LedgerError::EmptySharerSet);
        }
        let key = SharedKey { payer, sharers };
        let total = self
            .shared
            .get(&key)
            .copied()
            .unwrap_or(Money::ZERO)
            .checked_add(amount)
            .ok_or(invalid)?;
        self.admit(std::iter::once(&key.payer).chain(key.sharers.iter()))?;

        self.shared.insert(key, total);
        Ok(())
    }

    /// Deletes a participant together with everything they paid, and takes
    /// them out of other people's shared expenses. Returns whether the ledger
    /// changed.
    pub fn remove(&mut self, name: &str) -> bool {
        let mut changed = self.participants.shift_remove(name);
        changed |= self.equal.shift_remove(name).is_some();

        if !self
            .shared
            .keys()
            .any(|key| key.payer.as_str() == name || key.sharers.contains(name))
        {
            return changed;
        }

        let previous = std::mem::take(&mut self.shared);
        for (mut key, amount) in previous {
            if key.payer.as_str() == name {
                continue;
            }
            key.sharers.remove(name);
            if key.sharers.is_empty() {
                continue;
            }
            *self.shared.entry(key).or_insert(Money::ZERO) += amount;
        }
        true
    }

    /// Empties the participant set and every contribution.
    pub fn clear(&mut self) {
        self.participants.clear();
        self.equal.clear();
        self.shared.clear();
    }

    pub fn average_equal_expenditure(&self) -> Money {
        BalanceCalculator::average(&self.equal)
    }

    pub fn balances(&self) -> Balances {
        BalanceCalculator.calculate(&self.equal, &self.shared)
    }

    pub fn settle(&self) -> Settlement {
        let balances = self.balances();
        let transactions = SettlementCalculator.calculate(&balances);
        Settlement {
            average: self.average_equal_expenditure(),
            balances,
            transactions,
        }
    }

    pub fn resolve(&self) -> Vec<Transaction> {
        self.settle().transactions
    }

    fn admit<'a, I>(&mut self, names: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = &'a Participant>,
    {
        match self.policy {
            MembershipPolicy::Strict => {
                if let Some(unknown) = names
                    .into_iter()
                    .find(|name| !self.participants.contains(name.as_str()))
                {
                    return Err(LedgerError::UnknownParticipant(unknown.clone()));
                }
            }
            MembershipPolicy::AutoRegister => {
                for name in names {
                    self.participants.insert(name.clone());
                }
            }
        }
        Ok(())
    }
}

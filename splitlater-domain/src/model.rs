use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use smol_str::SmolStr;
use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Net balance per participant, in the order participants were first seen.
pub type Balances = IndexMap<Participant, Money, FxBuildHasher>;

/// Money each participant paid to be split across everyone.
pub type EqualContributions = IndexMap<Participant, Money, FxBuildHasher>;

/// Money each payer paid to be split with an explicit set of sharers.
pub type SharedContributions = IndexMap<SharedKey, Money, FxBuildHasher>;

/// A named individual tracked by the ledger. Identity is exact, case-sensitive
/// string equality.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Participant(SmolStr);

impl Participant {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for Participant {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Participant {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Participant {
    fn from(value: String) -> Self {
        Self(SmolStr::from(value))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest magnitude a single contribution may have. Ledger totals stay
    /// far inside `Decimal`'s range at this bound.
    pub const MAX_AMOUNT: f64 = 1e15;

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// `num * 10^-scale`, e.g. `Money::new(1050, 2)` is 10.50.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns `None` for NaN, infinities, and magnitudes above [`Self::MAX_AMOUNT`].
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > Self::MAX_AMOUNT {
            return None;
        }
        Decimal::from_f64(value).map(Self)
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Splits the amount into `ways` equal shares. `ways` must be non-zero.
    pub fn share(self, ways: usize) -> Self {
        debug_assert!(ways > 0);
        Self(self.0 / Decimal::from(ways))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.normalize(), f)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Unordered set of participants sharing a cost with a payer.
///
/// Backed by an ordered set so that `{B, C}` and `{C, B}` produce the same key.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SharerSet(BTreeSet<Participant>);

impl SharerSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, participant: &str) -> bool {
        self.0.contains(participant)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.0.iter()
    }

    pub(crate) fn remove(&mut self, participant: &str) -> bool {
        self.0.remove(participant)
    }
}

impl FromIterator<Participant> for SharerSet {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SharerSet {
    type Item = &'a Participant;
    type IntoIter = std::collections::btree_set::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Key of a shared contribution: who paid, and who shares the cost with them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SharedKey {
    pub payer: Participant,
    pub sharers: SharerSet,
}

/// A directed payment instruction: `debtor` pays `creditor` a positive `amount`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub debtor: Participant,
    pub creditor: Participant,
    pub amount: Money,
}

#[derive(Debug, PartialEq)]
pub struct Settlement {
    pub average: Money,
    pub balances: Balances,
    pub transactions: Vec<Transaction>,
}

//! Money and percentage value objects.
//!
//! Amounts are kept in the smallest currency unit so line totals, grand totals and
//! discounts are exact integer arithmetic; only rendering produces decimals.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

const MINOR_PER_MAJOR: u64 = 100;
const BASIS_POINTS_PER_PERCENT: u32 = 100;
const MAX_BASIS_POINTS: u32 = 100 * BASIS_POINTS_PER_PERCENT;

/// An amount of money in the smallest currency unit (e.g. paisa).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    /// Whole currency units, e.g. `Money::from_major(270)` is `270.00`.
    pub const fn from_major(major: u64) -> Self {
        Self(major * MINOR_PER_MAJOR)
    }

    pub const fn minor(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal amount such as `"100"`, `"99.5"` or `"99.50"`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let minor = parse_fixed_two(input.trim(), "amount")?;
        Ok(Self(minor))
    }

    pub fn checked_add(self, other: Money) -> DomainResult<Money> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::invariant("money addition overflow"))
    }

    /// Price times quantity.
    pub fn times(self, quantity: u32) -> DomainResult<Money> {
        self.0
            .checked_mul(u64::from(quantity))
            .map(Money)
            .ok_or_else(|| DomainError::invariant("line total overflow"))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Exact sum of all amounts.
    pub fn sum<I>(amounts: I) -> DomainResult<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / MINOR_PER_MAJOR, self.0 % MINOR_PER_MAJOR)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

/// A percentage in `[0, 100]`, stored in basis points (hundredths of a percent).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percent(u32);

impl ValueObject for Percent {}

impl Percent {
    pub const ZERO: Percent = Percent(0);

    /// Whole percent, e.g. `Percent::whole(7)` is 7%.
    pub fn whole(percent: u32) -> DomainResult<Self> {
        Self::from_basis_points(percent.saturating_mul(BASIS_POINTS_PER_PERCENT))
    }

    pub fn from_basis_points(bp: u32) -> DomainResult<Self> {
        if bp > MAX_BASIS_POINTS {
            return Err(DomainError::validation(format!(
                "percentage must be between 0 and 100 (got {})",
                Percent(bp)
            )));
        }
        Ok(Self(bp))
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse `"7"`, `"7.5"` or `"12.25"`; values outside `[0, 100]` are rejected.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let bp = parse_fixed_two(input.trim(), "percentage")?;
        let bp = u32::try_from(bp)
            .map_err(|_| DomainError::validation("percentage must be between 0 and 100"))?;
        Self::from_basis_points(bp)
    }

    /// The share of `amount` this percentage represents, rounded half-up to the
    /// nearest minor unit.
    pub fn of(self, amount: Money) -> Money {
        let scaled = u128::from(amount.minor()) * u128::from(self.0);
        let half = u128::from(MAX_BASIS_POINTS / 2);
        // bp <= 10_000, so the quotient never exceeds `amount` and fits in u64.
        Money(((scaled + half) / u128::from(MAX_BASIS_POINTS)) as u64)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / BASIS_POINTS_PER_PERCENT;
        let frac = self.0 % BASIS_POINTS_PER_PERCENT;
        match frac {
            0 => write!(f, "{whole}"),
            n if n % 10 == 0 => write!(f, "{whole}.{}", n / 10),
            _ => write!(f, "{whole}.{frac:02}"),
        }
    }
}

impl FromStr for Percent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Percent::parse(s)
    }
}

impl TryFrom<u32> for Percent {
    type Error = DomainError;

    fn try_from(bp: u32) -> Result<Self, Self::Error> {
        Percent::from_basis_points(bp)
    }
}

impl From<Percent> for u32 {
    fn from(value: Percent) -> Self {
        value.0
    }
}

/// Parse a non-negative decimal with at most two fractional digits into hundredths.
fn parse_fixed_two(input: &str, what: &str) -> DomainResult<u64> {
    if input.is_empty() {
        return Err(DomainError::validation(format!("{what} is empty")));
    }

    let (whole, frac) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(DomainError::validation(format!("{what} '{input}' is not a number")));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "{what} '{input}' is not a non-negative number"
        )));
    }
    if frac.len() > 2 {
        return Err(DomainError::validation(format!(
            "{what} '{input}' has more than two decimal places"
        )));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| DomainError::validation(format!("{what} '{input}' is too large")))?
    };
    let frac: u64 = match frac.len() {
        0 => 0,
        1 => u64::from(frac.as_bytes()[0] - b'0') * 10,
        _ => frac
            .parse()
            .map_err(|_| DomainError::validation(format!("{what} '{input}' is not a number")))?,
    };

    whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(|| DomainError::validation(format!("{what} '{input}' is too large")))
}

//! Aggregation engine: grand total and discount-adjusted final total.
//!
//! Pure functions of the line totals and the discount. Nothing here is cached; the
//! session calls `Totals::compute` for every change.

use serde::{Deserialize, Serialize};

use mmbill_core::{DomainResult, Money, Percent};

/// Exact sum of every line total (zero-quantity lines contribute nothing).
pub fn grand_total<I>(line_totals: I) -> DomainResult<Money>
where
    I: IntoIterator<Item = Money>,
{
    Money::sum(line_totals)
}

/// `grand - grand * discount / 100`, with the discount share rounded half-up to the
/// smallest currency unit.
pub fn final_total(grand: Money, discount: Percent) -> Money {
    grand.saturating_sub(discount.of(grand))
}

/// Derived amounts shown under the line table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub grand_total: Money,
    pub discount: Percent,
    pub discount_amount: Money,
    pub final_total: Money,
}

impl Totals {
    pub fn compute<I>(line_totals: I, discount: Percent) -> DomainResult<Self>
    where
        I: IntoIterator<Item = Money>,
    {
        let grand = grand_total(line_totals)?;
        let final_total = final_total(grand, discount);
        Ok(Self {
            grand_total: grand,
            discount,
            discount_amount: grand.saturating_sub(final_total),
            final_total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grand_total_includes_zero_lines() {
        let lines = [Money::from_major(540), Money::ZERO, Money::from_major(815)];
        assert_eq!(grand_total(lines).unwrap(), Money::from_major(1355));
        assert_eq!(grand_total([]).unwrap(), Money::ZERO);
    }

    #[test]
    fn seven_percent_off_1355() {
        let seven = Percent::whole(7).unwrap();
        let totals = Totals::compute([Money::from_major(1355)], seven).unwrap();
        assert_eq!(totals.final_total.to_string(), "1260.15");
        assert_eq!(totals.discount_amount.to_string(), "94.85");
        assert_eq!(totals.discount, seven);
    }

    #[test]
    fn full_discount_is_free() {
        let all = Percent::whole(100).unwrap();
        assert_eq!(final_total(Money::from_major(99), all), Money::ZERO);
    }

    #[test]
    fn compute_is_idempotent() {
        let lines = vec![Money::from_minor(12345), Money::from_minor(678)];
        let pct = Percent::parse("12.5").unwrap();
        let a = Totals::compute(lines.clone(), pct).unwrap();
        let b = Totals::compute(lines, pct).unwrap();
        assert_eq!(a, b);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: grand total equals the sum of quantity times price.
            #[test]
            fn grand_total_is_sum_of_products(
                lines in prop::collection::vec((0u32..1_000, 0u64..1_000_000), 0..30)
            ) {
                let line_totals: Vec<Money> = lines
                    .iter()
                    .map(|&(q, p)| Money::from_minor(p).times(q).unwrap())
                    .collect();
                let expected: u64 = lines.iter().map(|&(q, p)| u64::from(q) * p).sum();
                prop_assert_eq!(grand_total(line_totals).unwrap().minor(), expected);
            }

            /// Property: final total is grand * (1 - d/100) to the nearest minor unit
            /// and never exceeds the grand total.
            #[test]
            fn final_total_applies_discount(
                grand in 0u64..10_000_000_000,
                bp in 0u32..=10_000
            ) {
                let grand = Money::from_minor(grand);
                let pct = Percent::from_basis_points(bp).unwrap();
                let final_total = final_total(grand, pct);
                prop_assert!(final_total <= grand);

                let exact = grand.minor() as f64 * (1.0 - f64::from(bp) / 10_000.0);
                prop_assert!((final_total.minor() as f64 - exact).abs() <= 0.5 + 1e-6);
            }
        }
    }
}

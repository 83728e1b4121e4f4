use serde::{Deserialize, Serialize};

use billkit_core::{or_zero, parse_or_zero};

use crate::line::LineItem;

/// Document-level GST rate pair, in percent.
///
/// One pair applies uniformly to every line of a document; there are no
/// per-line rate overrides. The entry form bounds rates to [0, 28] but the
/// engine accepts any numeric rate without failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxConfig {
    pub cgst_rate_percent: f64,
    pub sgst_rate_percent: f64,
}

impl TaxConfig {
    pub fn new(cgst_rate_percent: f64, sgst_rate_percent: f64) -> Self {
        Self {
            cgst_rate_percent: or_zero(Some(cgst_rate_percent)),
            sgst_rate_percent: or_zero(Some(sgst_rate_percent)),
        }
    }

    /// Build from raw form fields (zero-default on unparseable input).
    pub fn from_form(cgst_rate_percent: &str, sgst_rate_percent: &str) -> Self {
        Self::new(
            parse_or_zero(cgst_rate_percent),
            parse_or_zero(sgst_rate_percent),
        )
    }
}

/// Fully computed document totals.
///
/// Invariants (see the tests at the bottom of this file):
/// - `grand_total == taxable_amount + cgst_amount + sgst_amount + round_off`
/// - `grand_total` is an integer value within floating-point tolerance
/// - `round_off.abs() < 1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalsResult {
    pub taxable_amount: f64,
    pub cgst_amount: f64,
    pub sgst_amount: f64,
    /// Signed adjustment that brings the total to a whole amount.
    pub round_off: f64,
    pub grand_total: f64,
}

impl TotalsResult {
    pub fn zero() -> Self {
        Self {
            taxable_amount: 0.0,
            cgst_amount: 0.0,
            sgst_amount: 0.0,
            round_off: 0.0,
            grand_total: 0.0,
        }
    }
}

/// Compute document totals from scratch.
///
/// Always succeeds: an empty item list yields the all-zero result. Tax
/// amounts are kept at full precision here; rounding for display belongs to
/// the document formatting collaborators.
pub fn compute_totals(items: &[LineItem], tax: &TaxConfig) -> TotalsResult {
    let taxable_amount: f64 = items.iter().map(LineItem::amount).sum();

    let cgst_amount = taxable_amount * or_zero(Some(tax.cgst_rate_percent)) / 100.0;
    let sgst_amount = taxable_amount * or_zero(Some(tax.sgst_rate_percent)) / 100.0;

    let pre_round_total = taxable_amount + cgst_amount + sgst_amount;
    let round_off = round_off(pre_round_total);
    let grand_total = pre_round_total + round_off;

    TotalsResult {
        taxable_amount,
        cgst_amount,
        sgst_amount,
        round_off,
        grand_total,
    }
}

/// Signed round-off delta that takes `amount` to the nearest whole value,
/// half away from zero upwards (standard round-half-up).
///
/// Callers add the delta to the original amount rather than replacing it.
/// Totals are non-negative in practice; a negative input indicates a caller
/// bug (floor/ceil round-half-up semantics flip sign below zero), hence the
/// debug assertion.
pub fn round_off(amount: f64) -> f64 {
    debug_assert!(
        amount >= 0.0,
        "round_off expects a non-negative total, got {amount}"
    );

    let frac = amount - amount.floor();
    if frac == 0.0 {
        0.0
    } else if frac >= 0.5 {
        amount.ceil() - amount
    } else {
        amount.floor() - amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * (1.0 + a.abs().max(b.abs()))
    }

    #[test]
    fn empty_items_yield_all_zero_result() {
        let totals = compute_totals(&[], &TaxConfig::new(9.0, 9.0));
        assert_eq!(totals, TotalsResult::zero());
    }

    #[test]
    fn end_to_end_invoice_scenario() {
        // 2 x 500 with 10% discount at 9% + 9% GST.
        let items = vec![LineItem::new("Network switch", "8517", 2.0, 500.0, 10.0)];
        let totals = compute_totals(&items, &TaxConfig::new(9.0, 9.0));

        assert_eq!(totals.taxable_amount, 900.0);
        assert_eq!(totals.cgst_amount, 81.0);
        assert_eq!(totals.sgst_amount, 81.0);
        assert_eq!(totals.round_off, 0.0);
        assert_eq!(totals.grand_total, 1062.0);
    }

    #[test]
    fn round_off_rounds_half_up() {
        assert_eq!(round_off(1049.50), 0.50);
        assert!(approx_eq(round_off(1049.40), -0.40));
        assert_eq!(round_off(1050.0), 0.0);
        assert_eq!(round_off(0.0), 0.0);
    }

    #[test]
    fn round_off_applied_to_totals() {
        // Single line of 1049.50 with zero tax: total rounds up to 1050.
        let items = vec![LineItem::new("Oddly priced", "", 1.0, 1049.50, 0.0)];
        let totals = compute_totals(&items, &TaxConfig::new(0.0, 0.0));
        assert_eq!(totals.round_off, 0.50);
        assert_eq!(totals.grand_total, 1050.0);

        let items = vec![LineItem::new("Oddly priced", "", 1.0, 1049.40, 0.0)];
        let totals = compute_totals(&items, &TaxConfig::new(0.0, 0.0));
        assert!(approx_eq(totals.round_off, -0.40));
        assert_eq!(totals.grand_total, 1049.0);
    }

    #[test]
    fn out_of_range_rates_are_accepted() {
        let items = vec![LineItem::new("X", "", 1.0, 100.0, 0.0)];
        let totals = compute_totals(&items, &TaxConfig::new(50.0, 0.0));
        assert_eq!(totals.cgst_amount, 50.0);
    }

    #[test]
    fn totals_result_serializes_as_flat_json() {
        let totals = compute_totals(
            &[LineItem::new("X", "", 1.0, 100.0, 0.0)],
            &TaxConfig::new(9.0, 9.0),
        );
        let value = serde_json::to_value(totals).unwrap();
        assert_eq!(value["taxable_amount"], 100.0);
        assert_eq!(value["grand_total"], 118.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the published identity holds for any inputs.
        #[test]
        fn grand_total_identity(
            lines in prop::collection::vec(
                (0.0f64..1000.0, 0.0f64..10_000.0, 0.0f64..100.0),
                0..12,
            ),
            cgst in 0.0f64..28.0,
            sgst in 0.0f64..28.0,
        ) {
            let items: Vec<LineItem> = lines
                .into_iter()
                .map(|(qty, price, disc)| LineItem::new("p", "code", qty, price, disc))
                .collect();
            let totals = compute_totals(&items, &TaxConfig::new(cgst, sgst));

            let recomposed =
                totals.taxable_amount + totals.cgst_amount + totals.sgst_amount + totals.round_off;
            prop_assert!(approx_eq(totals.grand_total, recomposed));
        }

        /// Property: the grand total always lands on a whole value.
        #[test]
        fn grand_total_is_integral(
            lines in prop::collection::vec(
                (0.0f64..1000.0, 0.0f64..10_000.0, 0.0f64..100.0),
                0..12,
            ),
            cgst in 0.0f64..28.0,
            sgst in 0.0f64..28.0,
        ) {
            let items: Vec<LineItem> = lines
                .into_iter()
                .map(|(qty, price, disc)| LineItem::new("p", "code", qty, price, disc))
                .collect();
            let totals = compute_totals(&items, &TaxConfig::new(cgst, sgst));

            prop_assert!((totals.grand_total - totals.grand_total.round()).abs() < 1e-9);
            prop_assert!(totals.round_off.abs() < 1.0);
        }

        /// Property: recomputation is a pure function of its inputs.
        #[test]
        fn recomputation_is_deterministic(
            qty in 0.0f64..1000.0,
            price in 0.0f64..10_000.0,
            disc in 0.0f64..100.0,
            cgst in 0.0f64..28.0,
        ) {
            let items = vec![LineItem::new("p", "code", qty, price, disc)];
            let tax = TaxConfig::new(cgst, cgst);
            prop_assert_eq!(compute_totals(&items, &tax), compute_totals(&items, &tax));
        }
    }
}

//! # Business Calculation Module
//!
//! Deterministic arithmetic for sales economics.
//!
//! ## Formulas
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  profit            = (selling − purchase) × quantity                    │
//! │  margin %          = profit / cost × 100          (0 when cost == 0)    │
//! │  total cost        = purchase + customs + purchase × vat/100 + fees     │
//! │                                 ▲                                        │
//! │                                 └── VAT applies to the purchase price   │
//! │                                     ONLY, never to customs or fees      │
//! │  recommended price = total cost × (1 + margin/100)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Semantics
//! Nothing here panics or returns an error. Garbage in gives a documented
//! safe value out (`0`, `false`, all-zero statistics). Callers that need to
//! tell "zero because invalid" from "zero because computed" check
//! [`validate_calculation_input`] first.
//!
//! Results are NOT rounded; rounding is a display concern
//! (see [`crate::format`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Inputs
// =============================================================================

/// Inputs of a profit calculation for one sale line.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProfitCalculationInput {
    pub selling_price: f64,
    pub purchase_price: f64,
    pub quantity: f64,
}

impl ProfitCalculationInput {
    pub const fn new(selling_price: f64, purchase_price: f64, quantity: f64) -> Self {
        ProfitCalculationInput {
            selling_price,
            purchase_price,
            quantity,
        }
    }

    pub fn profit(&self) -> f64 {
        calculate_profit(self.selling_price, self.purchase_price, self.quantity)
    }

    pub fn is_valid(&self) -> bool {
        validate_calculation_input(self)
    }
}

/// Inputs of a margin calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MarginCalculationInput {
    pub profit: f64,
    pub cost: f64,
}

impl MarginCalculationInput {
    pub fn margin(&self) -> f64 {
        calculate_margin(self.profit, self.cost)
    }
}

/// Inputs of a landed-cost calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TotalCostCalculationInput {
    pub purchase_price: f64,
    pub customs_tax: f64,
    /// Percentage, 0–100.
    pub vat: f64,
    pub other_fees: f64,
}

impl TotalCostCalculationInput {
    pub fn total_cost(&self) -> f64 {
        calculate_total_cost(
            self.purchase_price,
            self.customs_tax,
            self.vat,
            self.other_fees,
        )
    }
}

/// A record carrying the three figures a sale line is priced with.
///
/// Implemented by [`Sale`](crate::types::Sale) and by
/// [`ProfitCalculationInput`]; anything the REST layer hands over can
/// implement it to feed [`calculate_sales_statistics`].
pub trait PricedLine {
    fn selling_price(&self) -> f64;
    fn purchase_price(&self) -> f64;
    fn quantity(&self) -> f64;
}

impl PricedLine for ProfitCalculationInput {
    fn selling_price(&self) -> f64 {
        self.selling_price
    }

    fn purchase_price(&self) -> f64 {
        self.purchase_price
    }

    fn quantity(&self) -> f64 {
        self.quantity
    }
}

impl<T: PricedLine + ?Sized> PricedLine for &T {
    fn selling_price(&self) -> f64 {
        (**self).selling_price()
    }

    fn purchase_price(&self) -> f64 {
        (**self).purchase_price()
    }

    fn quantity(&self) -> f64 {
        (**self).quantity()
    }
}

// =============================================================================
// Core Formulas
// =============================================================================

/// Profit of a sale line: `(selling − purchase) × quantity`.
///
/// Losses are negative and are never clamped.
///
/// ## Example
/// ```rust
/// use comptoir_core::calculation::calculate_profit;
///
/// assert_eq!(calculate_profit(100.0, 60.0, 2.0), 80.0);
/// assert_eq!(calculate_profit(50.0, 80.0, 1.0), -30.0); // sold at a loss
/// ```
#[inline]
pub fn calculate_profit(selling_price: f64, purchase_price: f64, quantity: f64) -> f64 {
    if !all_finite(&[selling_price, purchase_price, quantity]) {
        return 0.0;
    }
    finite_or_zero((selling_price - purchase_price) * quantity)
}

/// Margin as a percentage of cost, `0` when `cost == 0` or either operand
/// is not finite.
///
/// ```rust
/// use comptoir_core::calculation::calculate_margin;
///
/// assert_eq!(calculate_margin(25.0, 100.0), 25.0);
/// assert_eq!(calculate_margin(25.0, 0.0), 0.0);
/// ```
#[inline]
pub fn calculate_margin(profit: f64, cost: f64) -> f64 {
    if cost == 0.0 || !all_finite(&[profit, cost]) {
        return 0.0;
    }
    finite_or_zero((profit / cost) * 100.0)
}

/// Landed cost of a product.
///
/// ## User Workflow
/// ```text
/// Purchase 100 €, customs 10 €, VAT 20 %, transport 5 €
///      │
///      ▼
/// 100 + 10 + (100 × 20 / 100) + 5 = 135 €
///                ▲
///                └── VAT on the purchase price only
/// ```
#[inline]
pub fn calculate_total_cost(purchase_price: f64, customs_tax: f64, vat: f64, other_fees: f64) -> f64 {
    if !all_finite(&[purchase_price, customs_tax, vat, other_fees]) {
        return 0.0;
    }
    finite_or_zero(purchase_price + customs_tax + (purchase_price * vat / 100.0) + other_fees)
}

/// Selling price that yields `desired_margin_percent` over `total_cost`.
#[inline]
pub fn calculate_recommended_price(total_cost: f64, desired_margin_percent: f64) -> f64 {
    if !all_finite(&[total_cost, desired_margin_percent]) {
        return 0.0;
    }
    finite_or_zero(total_cost * (1.0 + desired_margin_percent / 100.0))
}

/// VAT amount of a price (`price × vat / 100`).
#[inline]
pub fn calculate_vat_amount(price: f64, vat: f64) -> f64 {
    if !all_finite(&[price, vat]) {
        return 0.0;
    }
    finite_or_zero(price * vat / 100.0)
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// `0` for NaN and ±∞, the value itself otherwise.
#[inline]
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// True iff both prices are finite and ≥ 0 and the quantity is finite and > 0.
///
/// ```rust
/// use comptoir_core::calculation::{validate_calculation_input, ProfitCalculationInput};
///
/// assert!(validate_calculation_input(&ProfitCalculationInput::new(10.0, 5.0, 1.0)));
/// assert!(!validate_calculation_input(&ProfitCalculationInput::new(f64::NAN, 5.0, 1.0)));
/// assert!(!validate_calculation_input(&ProfitCalculationInput::new(10.0, 5.0, 0.0)));
/// ```
pub fn validate_calculation_input<L: PricedLine + ?Sized>(input: &L) -> bool {
    let (selling, purchase, quantity) =
        (input.selling_price(), input.purchase_price(), input.quantity());

    selling.is_finite()
        && purchase.is_finite()
        && quantity.is_finite()
        && selling >= 0.0
        && purchase >= 0.0
        && quantity > 0.0
}

// =============================================================================
// Sales Statistics
// =============================================================================

/// Aggregate figures over a list of sales.
///
/// ## Immutability
/// Fields are private and there are no setters: a value of this type is a
/// frozen snapshot of the sales it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesStatistics {
    total_profit: f64,
    average_profit: f64,
    total_revenue: f64,
    average_revenue: f64,
}

impl SalesStatistics {
    pub const fn total_profit(&self) -> f64 {
        self.total_profit
    }

    pub const fn average_profit(&self) -> f64 {
        self.average_profit
    }

    pub const fn total_revenue(&self) -> f64 {
        self.total_revenue
    }

    pub const fn average_revenue(&self) -> f64 {
        self.average_revenue
    }

    /// Overall margin of the period (total profit over total cost).
    pub fn margin(&self) -> f64 {
        calculate_margin(self.total_profit, self.total_revenue - self.total_profit)
    }
}

/// Totals and averages of profit and revenue.
///
/// Profit is recomputed from each line's prices and quantity; a profit
/// value stored on the record is ignored. An empty slice yields all zeros.
/// A line with a non-finite figure contributes zero profit and zero revenue
/// but still counts in the averages.
///
/// ## Example
/// ```rust
/// use comptoir_core::calculation::{calculate_sales_statistics, ProfitCalculationInput};
///
/// let stats = calculate_sales_statistics(&[
///     ProfitCalculationInput::new(100.0, 60.0, 2.0),
///     ProfitCalculationInput::new(200.0, 120.0, 1.0),
/// ]);
/// assert_eq!(stats.total_profit(), 160.0);
/// assert_eq!(stats.average_revenue(), 200.0);
/// ```
pub fn calculate_sales_statistics<L: PricedLine>(sales: &[L]) -> SalesStatistics {
    if sales.is_empty() {
        return SalesStatistics::default();
    }

    let (total_profit, total_revenue) = sales.iter().fold((0.0, 0.0), |(profit, revenue), s| {
        (
            profit + calculate_profit(s.selling_price(), s.purchase_price(), s.quantity()),
            revenue + line_revenue(s),
        )
    });
    let count = sales.len() as f64;

    SalesStatistics {
        total_profit: finite_or_zero(total_profit),
        average_profit: finite_or_zero(total_profit / count),
        total_revenue: finite_or_zero(total_revenue),
        average_revenue: finite_or_zero(total_revenue / count),
    }
}

fn line_revenue<L: PricedLine + ?Sized>(line: &L) -> f64 {
    let (selling, quantity) = (line.selling_price(), line.quantity());
    if !all_finite(&[selling, quantity]) {
        return 0.0;
    }
    finite_or_zero(selling * quantity)
}

// =============================================================================
// Inventory & Loans
// =============================================================================

/// Stock valued at purchase price: `Σ stock × purchase_price`.
///
/// Negative stock levels count as zero.
pub fn calculate_inventory_value(products: &[crate::types::Product]) -> f64 {
    products
        .iter()
        .map(|p| p.stock.max(0) as f64 * p.purchase_price)
        .sum()
}

/// Amount still owed on a loan, never below zero.
pub fn calculate_loan_balance(principal: f64, repayments: &[f64]) -> f64 {
    let repaid: f64 = repayments.iter().filter(|r| r.is_finite()).sum();
    (principal - repaid).max(0.0)
}

// =============================================================================
// Product Pricing
// =============================================================================

/// Pricing sheet of a product: landed cost, suggested price and the margin
/// the current selling price actually achieves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductPricing {
    pub total_cost: f64,
    pub recommended_price: f64,
    pub unit_profit: f64,
    pub actual_margin: f64,
}

impl ProductPricing {
    /// Builds the sheet for a cost breakdown, the price currently charged,
    /// and the margin the shop aims for.
    pub fn compute(
        cost: &TotalCostCalculationInput,
        selling_price: f64,
        desired_margin_percent: f64,
    ) -> Self {
        let total_cost = cost.total_cost();
        let unit_profit = calculate_profit(selling_price, total_cost, 1.0);
        ProductPricing {
            total_cost,
            recommended_price: calculate_recommended_price(total_cost, desired_margin_percent),
            unit_profit,
            actual_margin: calculate_margin(unit_profit, total_cost),
        }
    }

    /// Pricing sheet of an inventory product.
    pub fn for_product(product: &crate::types::Product, desired_margin_percent: f64) -> Self {
        let cost = TotalCostCalculationInput {
            purchase_price: product.purchase_price,
            customs_tax: product.customs_tax,
            vat: product.vat,
            other_fees: product.other_fees,
        };
        Self::compute(&cost, product.selling_price, desired_margin_percent)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Product, Sale};
    use proptest::prelude::*;

    #[test]
    fn test_profit() {
        assert_eq!(calculate_profit(100.0, 60.0, 2.0), 80.0);
        assert_eq!(calculate_profit(60.0, 100.0, 3.0), -120.0);
        assert_eq!(calculate_profit(10.0, 10.0, 5.0), 0.0);
    }

    #[test]
    fn test_margin_zero_cost() {
        assert_eq!(calculate_margin(50.0, 0.0), 0.0);
        assert_eq!(calculate_margin(-50.0, 0.0), 0.0);
        assert_eq!(calculate_margin(f64::NAN, 0.0), 0.0);
        assert_eq!(calculate_margin(50.0, 200.0), 25.0);
        assert_eq!(MarginCalculationInput { profit: 10.0, cost: 40.0 }.margin(), 25.0);
    }

    #[test]
    fn test_total_cost() {
        assert_eq!(calculate_total_cost(100.0, 10.0, 20.0, 5.0), 135.0);
        // VAT is not applied to customs or fees
        assert_eq!(calculate_total_cost(0.0, 10.0, 20.0, 5.0), 15.0);
        let input = TotalCostCalculationInput {
            purchase_price: 100.0,
            customs_tax: 10.0,
            vat: 20.0,
            other_fees: 5.0,
        };
        assert_eq!(input.total_cost(), 135.0);
    }

    #[test]
    fn test_recommended_price() {
        assert_eq!(calculate_recommended_price(100.0, 0.0), 100.0);
        assert_eq!(calculate_recommended_price(100.0, 50.0), 150.0);
    }

    #[test]
    fn test_vat_amount() {
        assert_eq!(calculate_vat_amount(200.0, 20.0), 40.0);
    }

    #[test]
    fn test_formulas_return_zero_on_non_finite_input() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(calculate_profit(bad, 1.0, 1.0), 0.0);
            assert_eq!(calculate_profit(10.0, bad, 1.0), 0.0);
            assert_eq!(calculate_profit(10.0, 1.0, bad), 0.0);

            assert_eq!(calculate_margin(bad, 5.0), 0.0);
            assert_eq!(calculate_margin(5.0, bad), 0.0);

            assert_eq!(calculate_total_cost(bad, 0.0, 20.0, 0.0), 0.0);
            assert_eq!(calculate_total_cost(100.0, bad, 20.0, 0.0), 0.0);
            assert_eq!(calculate_total_cost(100.0, 0.0, bad, 0.0), 0.0);
            assert_eq!(calculate_total_cost(100.0, 0.0, 20.0, bad), 0.0);

            assert_eq!(calculate_recommended_price(bad, 30.0), 0.0);
            assert_eq!(calculate_recommended_price(100.0, bad), 0.0);

            assert_eq!(calculate_vat_amount(bad, 20.0), 0.0);
            assert_eq!(calculate_vat_amount(100.0, bad), 0.0);
        }
    }

    #[test]
    fn test_overflow_returns_zero() {
        assert_eq!(calculate_profit(f64::MAX, -f64::MAX, 2.0), 0.0);
        assert_eq!(calculate_margin(f64::MAX, f64::MIN_POSITIVE), 0.0);
    }

    #[test]
    fn test_statistics_neutralize_non_finite_lines() {
        let stats = calculate_sales_statistics(&[
            ProfitCalculationInput::new(f64::NAN, 1.0, 1.0),
            ProfitCalculationInput::new(10.0, 4.0, f64::INFINITY),
            ProfitCalculationInput::new(100.0, 60.0, 2.0),
        ]);
        assert_eq!(stats.total_profit(), 80.0);
        assert_eq!(stats.total_revenue(), 200.0);
        assert_eq!(stats.average_profit(), 80.0 / 3.0);
        assert_eq!(stats.average_revenue(), 200.0 / 3.0);

        let only_bad = calculate_sales_statistics(&[ProfitCalculationInput::new(f64::NAN, 1.0, 1.0)]);
        assert_eq!(only_bad, SalesStatistics::default());
    }

    #[test]
    fn test_statistics_empty() {
        let stats = calculate_sales_statistics::<Sale>(&[]);
        assert_eq!(stats.total_profit(), 0.0);
        assert_eq!(stats.average_profit(), 0.0);
        assert_eq!(stats.total_revenue(), 0.0);
        assert_eq!(stats.average_revenue(), 0.0);
        assert_eq!(stats, SalesStatistics::default());
    }

    #[test]
    fn test_statistics_example() {
        let stats = calculate_sales_statistics(&[
            ProfitCalculationInput::new(100.0, 60.0, 2.0),
            ProfitCalculationInput::new(200.0, 120.0, 1.0),
        ]);
        assert_eq!(stats.total_profit(), 160.0);
        assert_eq!(stats.average_profit(), 80.0);
        assert_eq!(stats.total_revenue(), 400.0);
        assert_eq!(stats.average_revenue(), 200.0);
        assert_eq!(stats.margin(), 160.0 / 240.0 * 100.0);
    }

    #[test]
    fn test_statistics_ignore_stored_profit() {
        let sale = Sale {
            id: "s".into(),
            product_id: "p".into(),
            product_name: None,
            client_id: None,
            selling_price: 100.0,
            purchase_price: 60.0,
            quantity: 2.0,
            profit: Some(9999.0),
            date: None,
        };
        let stats = calculate_sales_statistics(&[sale]);
        assert_eq!(stats.total_profit(), 80.0);
    }

    #[test]
    fn test_statistics_serialize_camel_case() {
        let stats = calculate_sales_statistics(&[ProfitCalculationInput::new(10.0, 4.0, 1.0)]);
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalProfit"], 6.0);
        assert_eq!(json["averageRevenue"], 10.0);
    }

    #[test]
    fn test_validate_calculation_input() {
        let ok = ProfitCalculationInput::new(10.0, 0.0, 1.0);
        assert!(validate_calculation_input(&ok));
        assert!(ok.is_valid());

        for bad in [
            ProfitCalculationInput::new(f64::NAN, 1.0, 1.0),
            ProfitCalculationInput::new(1.0, f64::INFINITY, 1.0),
            ProfitCalculationInput::new(1.0, 1.0, f64::NEG_INFINITY),
            ProfitCalculationInput::new(-1.0, 1.0, 1.0),
            ProfitCalculationInput::new(1.0, -0.01, 1.0),
            ProfitCalculationInput::new(1.0, 1.0, 0.0),
            ProfitCalculationInput::new(1.0, 1.0, -2.0),
        ] {
            assert!(!validate_calculation_input(&bad), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_inventory_value() {
        let product = |purchase_price: f64, stock: i64| Product {
            id: "p".into(),
            name: "p".into(),
            description: None,
            category: None,
            purchase_price,
            selling_price: 0.0,
            customs_tax: 0.0,
            vat: 0.0,
            other_fees: 0.0,
            stock,
        };
        let value = calculate_inventory_value(&[product(2.5, 4), product(10.0, -3), product(1.0, 1)]);
        assert_eq!(value, 11.0);
    }

    #[test]
    fn test_loan_balance() {
        assert_eq!(calculate_loan_balance(1000.0, &[]), 1000.0);
        assert_eq!(calculate_loan_balance(1000.0, &[400.0, 700.0]), 0.0);
        assert_eq!(calculate_loan_balance(1000.0, &[f64::NAN, 100.0]), 900.0);
    }

    #[test]
    fn test_product_pricing() {
        let cost = TotalCostCalculationInput {
            purchase_price: 100.0,
            customs_tax: 10.0,
            vat: 20.0,
            other_fees: 5.0,
        };
        let sheet = ProductPricing::compute(&cost, 162.0, 20.0);
        assert_eq!(sheet.total_cost, 135.0);
        assert_eq!(sheet.recommended_price, 162.0);
        assert_eq!(sheet.unit_profit, 27.0);
        assert!((sheet.actual_margin - 20.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_profit_identity(
            selling in 0.0f64..1e6,
            purchase in 0.0f64..1e6,
            quantity in 1u32..10_000,
        ) {
            let quantity = quantity as f64;
            let profit = calculate_profit(selling, purchase, quantity);
            prop_assert_eq!(profit, (selling - purchase) * quantity);
            if selling < purchase {
                prop_assert!(profit < 0.0);
            }
        }

        #[test]
        fn prop_margin_never_nan_on_zero_cost(profit in proptest::num::f64::ANY) {
            prop_assert_eq!(calculate_margin(profit, 0.0), 0.0);
        }
    }
}

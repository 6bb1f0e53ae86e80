//! # Domain Types
//!
//! Records handed to the kernel by the REST/data layer.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │     Client      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  product_id     │   │  first_name     │       │
//! │  │  purchase_price │   │  selling_price  │   │  last_name      │       │
//! │  │  selling_price  │   │  purchase_price │   │  email / phone  │       │
//! │  │  stock          │   │  quantity       │   └─────────────────┘       │
//! │  └─────────────────┘   │  profit (stored)│                              │
//! │                        └─────────────────┘   ┌─────────────────┐       │
//! │                                              │      Loan       │       │
//! │                                              │  principal      │       │
//! │                                              │  repayments[]   │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money as f64
//! The REST layer speaks JSON numbers and the kernel must reproduce the
//! front-end's arithmetic exactly (including NaN/Infinity guards), so
//! prices are plain `f64` here. Rounding happens only when formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::calculation::PricedLine;

// =============================================================================
// Product
// =============================================================================

/// A product of the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Unit purchase price paid to the supplier.
    pub purchase_price: f64,
    /// Unit price shown to customers.
    pub selling_price: f64,
    /// Customs duty paid per unit.
    #[serde(default)]
    pub customs_tax: f64,
    /// VAT percentage (0–100) applied to the purchase price.
    #[serde(default)]
    pub vat: f64,
    /// Transport and miscellaneous fees per unit.
    #[serde(default)]
    pub other_fees: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// A sale of one product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Sale {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    pub selling_price: f64,
    pub purchase_price: f64,
    pub quantity: f64,
    /// Profit as stored by the back-end.
    ///
    /// Statistics never read this: they recompute the profit from the
    /// prices and quantity.
    #[serde(default)]
    pub profit: Option<f64>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub date: Option<DateTime<Utc>>,
}

impl PricedLine for Sale {
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

// =============================================================================
// Client
// =============================================================================

/// A customer of the shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Client {
    #[serde(default)]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Client {
    /// Display name ("Nom non renseigné" when both parts are blank).
    pub fn full_name(&self) -> String {
        crate::format::format_full_name(&self.first_name, &self.last_name)
    }
}

// =============================================================================
// Loan
// =============================================================================

/// Money lent to (or borrowed from) a third party, repaid in instalments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Loan {
    #[serde(default)]
    pub id: String,
    pub borrower: String,
    pub principal: f64,
    #[serde(default)]
    pub repayments: Vec<f64>,
}

impl Loan {
    /// Amount still owed.
    pub fn balance(&self) -> f64 {
        crate::calculation::calculate_loan_balance(self.principal, &self.repayments)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! The static catalog of subscription plans.
//!
//! Every run reconciles the gateway against exactly these entries, in this
//! order. The item name is the only field used to match a catalog entry
//! against an existing Razorpay plan.

use serde::Serialize;

/// Billing period of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Billed every month.
    Monthly,
    /// Billed every year.
    Yearly,
}

/// Pricing payload embedded in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemSpec {
    /// Display name; unique key for matching.
    pub name: &'static str,
    /// Amount in minor currency units.
    pub amount: u64,
    /// ISO currency code.
    pub currency: &'static str,
    /// Human readable description.
    pub description: &'static str,
}

/// A desired subscription plan.
///
/// Serializes to the exact body of a Razorpay `POST /plans` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanSpec {
    /// Billing period.
    pub period: Period,
    /// Number of periods between charges.
    pub interval: u32,
    /// Pricing item.
    pub item: ItemSpec,
}

impl PlanSpec {
    /// Returns the plan's display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.item.name
    }
}

/// Plans provisioned for TradeFlow: two tiers, each billed monthly and yearly.
pub static PLAN_CATALOG: &[PlanSpec] = &[
    PlanSpec {
        period: Period::Monthly,
        interval: 1,
        item: ItemSpec {
            name: "TradeFlow Basic - Monthly",
            amount: 29_900,
            currency: "USD",
            description: "Basic trading journal with essential features",
        },
    },
    PlanSpec {
        period: Period::Yearly,
        interval: 1,
        item: ItemSpec {
            name: "TradeFlow Basic - Yearly",
            amount: 299_900,
            currency: "USD",
            description: "Basic trading journal with essential features - yearly billing",
        },
    },
    PlanSpec {
        period: Period::Monthly,
        interval: 1,
        item: ItemSpec {
            name: "TradeFlow Pro - Monthly",
            amount: 59_900,
            currency: "USD",
            description: "Professional trading journal with advanced analytics",
        },
    },
    PlanSpec {
        period: Period::Yearly,
        interval: 1,
        item: ItemSpec {
            name: "TradeFlow Pro - Yearly",
            amount: 599_900,
            currency: "USD",
            description: "Professional trading journal with advanced analytics - yearly billing",
        },
    },
];

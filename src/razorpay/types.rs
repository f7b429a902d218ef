//! Razorpay API types and data structures.
//!
//! Only the fields the provisioning run reads are modelled; everything else
//! Razorpay returns is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// A plan as returned by Razorpay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePlan {
    /// Opaque plan identifier (`plan_...`).
    pub id: String,
    /// Pricing item.
    pub item: RemoteItem,
    /// Billing period, as echoed by the gateway.
    #[serde(default)]
    pub period: Option<String>,
    /// Billing interval, as echoed by the gateway.
    #[serde(default)]
    pub interval: Option<u32>,
}

impl RemotePlan {
    /// Returns the plan's item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }
}

/// Pricing item embedded in a Razorpay plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteItem {
    /// Display name.
    pub name: String,
    /// Amount in minor currency units.
    #[serde(default)]
    pub amount: u64,
    /// ISO currency code.
    #[serde(default)]
    pub currency: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Response envelope of `GET /plans`.
#[derive(Debug, Deserialize)]
pub(crate) struct PlanCollection {
    /// Plans on this page.
    #[serde(default)]
    pub items: Vec<RemotePlan>,
}

/// Error envelope returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// Razorpay error details.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_plan() {
        let json = r#"{
            "id": "plan_00000000000001",
            "entity": "plan",
            "interval": 1,
            "period": "monthly",
            "item": {
                "id": "item_00000000000001",
                "active": true,
                "name": "TradeFlow Basic - Monthly",
                "description": "Basic trading journal with essential features",
                "amount": 29900,
                "unit_amount": 29900,
                "currency": "USD",
                "type": "plan"
            },
            "notes": [],
            "created_at": 1580219935
        }"#;

        let plan: RemotePlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.id, "plan_00000000000001");
        assert_eq!(plan.name(), "TradeFlow Basic - Monthly");
        assert_eq!(plan.item.amount, 29900);
        assert_eq!(plan.period.as_deref(), Some("monthly"));
    }

    #[test]
    fn test_collection_without_items() {
        let collection: PlanCollection =
            serde_json::from_str(r#"{"entity": "collection", "count": 0}"#).unwrap();
        assert!(collection.items.is_empty());
    }
}

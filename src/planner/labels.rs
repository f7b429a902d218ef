//! Tier and cadence labels derived from plan names.
//!
//! Labels come from case-sensitive substring matches on the item name and
//! decide where a plan's identifier is stored in the parameter store.

use crate::config::Environment;

/// Product tier of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Basic tier.
    Basic,
    /// Pro tier.
    Pro,
    /// Name matched no known tier.
    Unknown,
}

impl Tier {
    /// Derives the tier from a plan name. `Basic` is checked before `Pro`.
    #[must_use]
    pub fn from_plan_name(name: &str) -> Self {
        if name.contains("Basic") {
            Self::Basic
        } else if name.contains("Pro") {
            Self::Pro
        } else {
            Self::Unknown
        }
    }

    /// Returns the label used in parameter names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Pro => "pro",
            Self::Unknown => "unknown",
        }
    }
}

/// Billing cadence of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Billed monthly.
    Monthly,
    /// Billed yearly.
    Yearly,
    /// Name matched no known cadence.
    Unknown,
}

impl Cadence {
    /// Derives the cadence from a plan name. `Monthly` is checked before `Yearly`.
    #[must_use]
    pub fn from_plan_name(name: &str) -> Self {
        if name.contains("Monthly") {
            Self::Monthly
        } else if name.contains("Yearly") {
            Self::Yearly
        } else {
            Self::Unknown
        }
    }

    /// Returns the label used in parameter names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unknown => "unknown",
        }
    }
}

/// Returns the `{tier}_{cadence}` suffix for a plan name.
#[must_use]
pub fn plan_key(name: &str) -> String {
    format!(
        "{}_{}",
        Tier::from_plan_name(name).as_str(),
        Cadence::from_plan_name(name).as_str()
    )
}

/// Returns the full parameter name a plan's identifier is stored under:
/// `/{product}/{environment}/razorpay/plan/{tier}_{cadence}`.
#[must_use]
pub fn parameter_name(product: &str, environment: Environment, plan_name: &str) -> String {
    format!("/{product}/{environment}/razorpay/plan/{}", plan_key(plan_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_monthly() {
        assert_eq!(plan_key("TradeFlow Basic - Monthly"), "basic_monthly");
    }

    #[test]
    fn test_catalog_keys() {
        assert_eq!(plan_key("TradeFlow Basic - Yearly"), "basic_yearly");
        assert_eq!(plan_key("TradeFlow Pro - Monthly"), "pro_monthly");
        assert_eq!(plan_key("TradeFlow Pro - Yearly"), "pro_yearly");
    }

    #[test]
    fn test_unrecognized_name() {
        assert_eq!(plan_key("TradeFlow Supporter Weekly"), "unknown_unknown");
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(Tier::from_plan_name("basic monthly"), Tier::Unknown);
        assert_eq!(Cadence::from_plan_name("basic monthly"), Cadence::Unknown);
    }

    #[test]
    fn test_basic_wins_over_pro() {
        assert_eq!(Tier::from_plan_name("Pro Basic Bundle"), Tier::Basic);
    }

    #[test]
    fn test_parameter_name() {
        assert_eq!(
            parameter_name("tradeflow", Environment::Prod, "TradeFlow Pro - Yearly"),
            "/tradeflow/prod/razorpay/plan/pro_yearly"
        );
    }
}

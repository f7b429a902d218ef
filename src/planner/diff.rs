//! Name-keyed diff between the plan catalog and Razorpay.
//!
//! A catalog entry is considered present when a remote plan carries exactly
//! the same item name. No other field takes part in the comparison.

use std::collections::HashMap;
use tracing::debug;

use crate::config::PlanSpec;
use crate::razorpay::RemotePlan;

/// What a run has to do for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedAction<'a> {
    /// No remote plan has this name yet.
    Create(&'a PlanSpec),
    /// A remote plan with this name exists.
    Existing {
        /// The catalog entry.
        spec: &'a PlanSpec,
        /// The first remote plan carrying the entry's name.
        remote: &'a RemotePlan,
    },
}

impl<'a> PlannedAction<'a> {
    /// Returns the catalog entry this action is for.
    #[must_use]
    pub const fn spec(&self) -> &'a PlanSpec {
        match self {
            Self::Create(spec) | Self::Existing { spec, .. } => *spec,
        }
    }

    /// Returns true if the entry has to be created.
    #[must_use]
    pub const fn is_create(&self) -> bool {
        matches!(self, Self::Create(_))
    }
}

/// Engine for computing name-keyed diffs.
#[derive(Debug, Default)]
pub struct DiffEngine;

impl DiffEngine {
    /// Creates a new diff engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Classifies every catalog entry, in catalog order.
    ///
    /// When Razorpay holds several plans with the same name, the first one in
    /// list order is the one the entry resolves to.
    #[must_use]
    pub fn compute<'a>(
        &self,
        catalog: &'a [PlanSpec],
        remote: &'a [RemotePlan],
    ) -> Vec<PlannedAction<'a>> {
        let mut by_name: HashMap<&str, &RemotePlan> = HashMap::with_capacity(remote.len());
        for plan in remote {
            by_name.entry(plan.name()).or_insert(plan);
        }

        catalog
            .iter()
            .map(|spec| match by_name.get(spec.name()).copied() {
                Some(remote) => {
                    debug!("Plan '{}' exists as {}", spec.name(), remote.id);
                    PlannedAction::Existing { spec, remote }
                }
                None => {
                    debug!("Plan '{}' is missing", spec.name());
                    PlannedAction::Create(spec)
                }
            })
            .collect()
    }
}

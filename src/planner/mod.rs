//! Planning module for plan provisioning.
//!
//! This module compares the plan catalog with the plans Razorpay already
//! holds and derives where each plan's identifier is stored.

mod diff;
mod labels;

pub use diff::{DiffEngine, PlannedAction};
pub use labels::{Cadence, Tier, parameter_name, plan_key};

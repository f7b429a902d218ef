// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(warnings)]                    // All warnings are treated as errors
#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(dead_code)]                   // Unused code is forbidden
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![deny(unused_imports)]              // Unused imports are forbidden
#![deny(unused_variables)]            // Unused variables are forbidden
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # TradeFlow Plans
//!
//! Idempotent provisioning of TradeFlow subscription plans in Razorpay.
//!
//! ## Overview
//!
//! A run makes sure every plan in the built-in catalog exists in Razorpay and
//! that its identifier is recorded in AWS Systems Manager Parameter Store,
//! where the rest of the platform picks it up:
//!
//! 1. **Desired plans**: the static catalog (Basic and Pro, monthly and yearly)
//! 2. **Existing plans**: listed from the Razorpay API
//! 3. **Reconciler**: creates plans whose name is missing, then stores every
//!    plan ID under `/{product}/{environment}/razorpay/plan/{tier}_{cadence}`
//!
//! Matching is by exact plan name only, so running twice never creates a
//! plan twice.
//!
//! ## Modules
//!
//! - [`config`]: Environments, the plan catalog, credentials and settings
//! - [`razorpay`]: Razorpay API client
//! - [`planner`]: Name-keyed diff and parameter naming
//! - [`store`]: Parameter store backends
//! - [`reconciler`]: The provisioning run
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```text
//! $ export RAZORPAY_KEY_ID_DEV=rzp_test_... RAZORPAY_KEY_SECRET_DEV=...
//! $ tradeflow-plans run dev
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod config;
pub mod error;
pub mod planner;
pub mod razorpay;
pub mod reconciler;
pub mod store;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use config::{Credentials, Environment, PLAN_CATALOG, PlanSpec, Settings};
pub use error::{PlanSyncError, Result};
pub use planner::{DiffEngine, PlannedAction};
pub use razorpay::{RazorpayClient, RemotePlan};
pub use reconciler::{EntryOutcome, PlanPreview, ReconcileSummary, Reconciler, parameter_status};
pub use store::{ParameterStore, SsmParameterStore};

//! Configuration module for plan provisioning.
//!
//! This module handles everything a run needs before it touches the network:
//! - The target environment
//! - The static plan catalog
//! - Razorpay credential resolution
//! - Runtime settings and `.env` loading

mod catalog;
mod credentials;
mod environment;
mod settings;

pub use catalog::{ItemSpec, PLAN_CATALOG, Period, PlanSpec};
pub use credentials::Credentials;
pub use environment::Environment;
pub use settings::{Settings, load_dotenv};

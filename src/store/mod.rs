//! Parameter store module.
//!
//! Plan identifiers are handed off to other systems through a key-value
//! parameter store. This module provides the storage trait and the AWS
//! Systems Manager backend.

mod parameter;
mod ssm;

pub use parameter::ParameterStore;
pub use ssm::SsmParameterStore;

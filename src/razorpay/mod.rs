//! Razorpay API integration module.
//!
//! This module provides the client for listing and creating subscription
//! plans, along with the wire types it exchanges with the gateway.

mod client;
mod types;

pub use client::RazorpayClient;
pub use types::{RemoteItem, RemotePlan};

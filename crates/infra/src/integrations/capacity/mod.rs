//! Capacity-planning vendor integration.

mod client;

pub use client::CapacityPlanningClient;

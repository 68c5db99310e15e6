//! Clients for external systems.

pub mod capacity;

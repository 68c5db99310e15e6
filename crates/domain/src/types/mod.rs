//! Common data types used throughout the application

pub mod entitlement;
pub mod mapping;
pub mod request;
pub mod result;

pub use entitlement::*;
pub use mapping::*;
pub use request::*;
pub use result::*;

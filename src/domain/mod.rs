//! Domain types and DTOs
//!
//! Profile data as loaded from the profile service and the visitor's session identity.

pub mod profiles;
pub mod session;

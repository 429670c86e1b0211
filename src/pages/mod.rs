//! Pages
//!
//! The profile page controller and the view model it renders into.

pub mod profile;
pub mod view;

pub use profile::ProfilePage;

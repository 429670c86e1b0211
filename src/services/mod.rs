//! Service layer modules for external collaborators.
//!
//! Contains the profile service client, the shared session context, and the
//! notification and navigation sinks pages report to.

pub mod navigation;
pub mod notifications;
pub mod profile_client;
pub mod session;

pub use navigation::{History, Navigator};
pub use notifications::{Notification, Notifier, ToastQueue};
pub use profile_client::{ProfileApi, ProfileClient};
pub use session::SessionContext;

use crate::domain::profiles::ProfileRecord;

/// The authenticated visitor, as held by the session context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUser {
    pub user_uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl SessionUser {
    /// Copy display fields from a saved profile, keeping the identity.
    pub fn apply_profile(&mut self, profile: &ProfileRecord) {
        self.first_name = profile.first_name.clone();
        self.last_name = profile.last_name.clone();
        self.username = profile.username.clone();
        self.email = profile.email.clone();
    }
}

//! Render model for the profile page
//!
//! A plain snapshot of what the page shows. The terminal driver prints it via
//! `Display`; tests assert on the fields.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub body: Body,
    pub delete_overlay: Option<DeleteOverlay>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Spinner in place of the profile card
    Loading,
    /// No profile could be loaded
    Unavailable { message: String },
    Display(DisplayView),
    Edit(EditView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    pub header: String,
    pub full_name: String,
    pub email: String,
    /// Edit and delete controls, shown only on the visitor's own profile
    pub owner_actions: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditView {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub save_enabled: bool,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOverlay {
    pub input: String,
    pub confirm_enabled: bool,
    pub deleting: bool,
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::Loading => writeln!(f, "Loading...")?,
            Body::Unavailable { message } => {
                writeln!(f, "Profile unavailable")?;
                writeln!(f, "{}", message)?;
            }
            Body::Display(view) => {
                writeln!(f, "== {} ==", view.header)?;
                writeln!(f, "{}", view.full_name)?;
                writeln!(f, "{}", view.email)?;
                if view.owner_actions {
                    writeln!(f, "[edit] Edit Profile   [delete] Delete Account")?;
                }
            }
            Body::Edit(view) => {
                writeln!(f, "== Edit Profile ==")?;
                writeln!(f, "username:   {}", view.username)?;
                writeln!(f, "first_name: {}", view.first_name)?;
                writeln!(f, "last_name:  {}", view.last_name)?;
                if view.saving {
                    writeln!(f, "[saving...]   [cancel] Cancel")?;
                } else if view.save_enabled {
                    writeln!(f, "[save] Save Changes   [cancel] Cancel")?;
                } else {
                    writeln!(f, "[cancel] Cancel")?;
                }
            }
        }

        if let Some(overlay) = &self.delete_overlay {
            writeln!(f, "-- Confirm Account Deletion --")?;
            writeln!(
                f,
                "This action is irreversible. To confirm, please type DELETE below."
            )?;
            writeln!(f, "> {}", overlay.input)?;
            if overlay.deleting {
                writeln!(f, "[deleting...]   [dismiss] Cancel")?;
            } else if overlay.confirm_enabled {
                writeln!(f, "[confirm] Delete My Account   [dismiss] Cancel")?;
            } else {
                writeln!(f, "[dismiss] Cancel")?;
            }
        }

        Ok(())
    }
}

//! Profile page controller
//!
//! Owns the state of a single profile page: the loaded profile, the edit
//! draft and its last-saved baseline, the delete confirmation input, and the
//! one operation allowed in flight at a time.
//!
//! Every identifier gets a new epoch with its own cancellation token. A
//! request started under one epoch races that token, and its response is
//! applied only if the epoch is still current when it returns.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::domain::profiles::{EditDraft, EditableField, ProfileRecord, UpdateProfileRequest};
use crate::error::{ClientError, PageError, PageResult};
use crate::pages::view::{Body, DeleteOverlay, DisplayView, EditView, PageView};
use crate::routes;
use crate::services::{Navigator, Notification, Notifier, ProfileApi, SessionContext};

/// Literal the visitor must type to authorize account deletion
pub const DELETE_CONFIRMATION: &str = "DELETE";

/// Remote operation occupying the page's single in-flight slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiState {
    Loading,
    Viewing,
    Editing,
    ConfirmingDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Viewing,
    Editing,
    ConfirmingDelete,
}

struct PageState {
    profile_id: Option<String>,
    epoch: u64,
    epoch_token: CancellationToken,
    profile: Option<ProfileRecord>,
    draft: EditDraft,
    baseline: EditDraft,
    mode: Mode,
    in_flight: Option<Operation>,
    confirmation: String,
    load_error: Option<String>,
}

impl PageState {
    fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    fn ui_state(&self) -> UiState {
        match self.mode {
            Mode::ConfirmingDelete => UiState::ConfirmingDelete,
            _ if self.is_loading() => UiState::Loading,
            Mode::Viewing => UiState::Viewing,
            Mode::Editing => UiState::Editing,
        }
    }

    fn invalid(&self, operation: &'static str) -> PageError {
        PageError::InvalidState {
            operation,
            state: self.ui_state(),
        }
    }

    fn ensure_idle(&self) -> PageResult<()> {
        match self.in_flight {
            Some(op) => Err(PageError::Busy(op)),
            None => Ok(()),
        }
    }
}

pub struct ProfilePage {
    api: Arc<dyn ProfileApi>,
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    lifetime: CancellationToken,
    state: Mutex<PageState>,
}

impl ProfilePage {
    pub fn new(
        api: Arc<dyn ProfileApi>,
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let lifetime = CancellationToken::new();
        let state = PageState {
            profile_id: None,
            epoch: 0,
            epoch_token: lifetime.child_token(),
            profile: None,
            draft: EditDraft::default(),
            baseline: EditDraft::default(),
            mode: Mode::Viewing,
            // The page starts out loading
            in_flight: Some(Operation::Load),
            confirmation: String::new(),
            load_error: None,
        };

        Self {
            api,
            session,
            notifier,
            navigator,
            lifetime,
            state: Mutex::new(state),
        }
    }

    // =========================================================================
    // Load
    // =========================================================================

    /// Mount the page for `profile_id`, or switch to a new identifier.
    ///
    /// Starts a new epoch, which cancels any request still running for the
    /// previous identifier, even when the new path carries no identifier.
    #[instrument(skip(self))]
    pub async fn mount(&self, profile_id: Option<String>) -> PageResult<()> {
        if self.lifetime.is_cancelled() {
            return Err(PageError::Stale);
        }

        let (epoch, token) = {
            let mut state = self.state.lock();
            state.epoch_token.cancel();
            state.epoch += 1;
            state.epoch_token = self.lifetime.child_token();

            if state.profile_id != profile_id {
                state.confirmation.clear();
            }
            state.profile_id = profile_id.clone();
            state.profile = None;
            state.draft = EditDraft::default();
            state.baseline = EditDraft::default();
            state.mode = Mode::Viewing;
            state.in_flight = profile_id.is_some().then_some(Operation::Load);
            state.load_error = None;

            (state.epoch, state.epoch_token.clone())
        };

        let Some(profile_id) = profile_id else {
            warn!("Profile page opened without an identifier");
            self.navigator.navigate(routes::NOT_FOUND);
            return Err(PageError::MissingIdentifier);
        };

        debug!(epoch, "Fetching profile");
        let result = guarded(token, self.api.fetch_profile(&profile_id)).await;

        let outcome = {
            let mut state = self.state.lock();
            if state.epoch != epoch {
                debug!(epoch, current = state.epoch, "Discarding stale profile response");
                return Err(PageError::Stale);
            }
            state.in_flight = None;

            match result {
                Ok(profile) => {
                    state.draft = profile.draft();
                    state.baseline = profile.draft();
                    state.profile = Some(profile);
                    state.mode = Mode::Viewing;
                    Ok(())
                }
                Err(err) => {
                    state.load_error = Some(err.to_string());
                    Err(err)
                }
            }
        };

        match outcome {
            Ok(()) => {
                info!("Profile loaded");
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(PageError::Stale),
            Err(err) => {
                error!(error = %err, "Failed to fetch profile");
                self.notifier
                    .notify(Notification::error("Failed to fetch profile data."));
                if err.is_not_found() {
                    self.navigator.navigate(routes::NOT_FOUND);
                }
                Err(err.into())
            }
        }
    }

    /// Tear the page down. Responses still in flight are discarded.
    pub fn unmount(&self) {
        self.lifetime.cancel();
        self.state.lock().epoch += 1;
        debug!("Profile page unmounted");
    }

    // =========================================================================
    // Edit
    // =========================================================================

    /// Switch to the edit form, seeded from the profile as currently shown.
    pub fn enter_edit(&self) -> PageResult<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let profile = state.profile.as_ref().ok_or(PageError::NotLoaded)?;
        self.ensure_owner(state)?;
        state.ensure_idle()?;
        if state.mode != Mode::Viewing {
            return Err(state.invalid("edit"));
        }

        state.draft = profile.draft();
        state.mode = Mode::Editing;
        Ok(())
    }

    pub fn set_field(&self, field: EditableField, value: impl Into<String>) -> PageResult<()> {
        let mut state = self.state.lock();
        if state.mode != Mode::Editing {
            return Err(state.invalid("change a field"));
        }
        state.ensure_idle()?;

        debug!(field = %field, "Draft field changed");
        state.draft.set(field, value);
        Ok(())
    }

    /// Revert the draft to the last saved values and leave the form.
    pub fn cancel_edit(&self) -> PageResult<()> {
        let mut state = self.state.lock();
        if state.mode != Mode::Editing {
            return Err(state.invalid("cancel editing"));
        }
        state.ensure_idle()?;

        state.draft = state.baseline.clone();
        state.mode = Mode::Viewing;
        Ok(())
    }

    /// Submit the draft. Email is never sent.
    #[instrument(skip(self))]
    pub async fn save(&self) -> PageResult<()> {
        let (epoch, token, profile_id, submitted) = {
            let mut state = self.state.lock();
            if state.mode != Mode::Editing {
                return Err(state.invalid("save"));
            }
            state.ensure_idle()?;
            let profile_id = state.profile_id.clone().ok_or(PageError::MissingIdentifier)?;

            state.in_flight = Some(Operation::Save);
            (
                state.epoch,
                state.epoch_token.clone(),
                profile_id,
                state.draft.clone(),
            )
        };

        let request = UpdateProfileRequest::from(&submitted);
        let result = guarded(token, self.api.update_profile(&profile_id, &request)).await;

        let outcome = {
            let mut guard = self.state.lock();
            if guard.epoch != epoch {
                debug!(epoch, current = guard.epoch, "Discarding stale save response");
                return Err(PageError::Stale);
            }
            guard.in_flight = None;

            match result {
                Ok(()) => {
                    let state = &mut *guard;
                    let Some(profile) = state.profile.as_mut() else {
                        return Err(PageError::NotLoaded);
                    };
                    // Trust the submitted values rather than re-fetching
                    profile.apply(&submitted);
                    let saved = profile.clone();
                    state.baseline = submitted.clone();
                    state.draft = submitted;
                    state.mode = Mode::Viewing;
                    Ok(saved)
                }
                Err(err) => Err(err),
            }
        };

        match outcome {
            Ok(saved) => {
                self.session
                    .update_viewer(&profile_id, |user| user.apply_profile(&saved));
                info!(username = %saved.username, "Profile updated");
                self.notifier
                    .notify(Notification::success("Profile updated successfully!"));
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(PageError::Stale),
            Err(err) => {
                error!(error = %err, "Failed to update profile");
                self.notifier.notify(Notification::error(
                    "Error updating profile. Please try again.",
                ));
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Open the delete confirmation overlay. Previously typed text is kept.
    pub fn request_delete(&self) -> PageResult<()> {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        if state.profile.is_none() {
            return Err(PageError::NotLoaded);
        }
        self.ensure_owner(state)?;
        state.ensure_idle()?;
        if state.mode != Mode::Viewing {
            return Err(state.invalid("request deletion"));
        }

        state.mode = Mode::ConfirmingDelete;
        Ok(())
    }

    pub fn set_confirmation(&self, text: impl Into<String>) -> PageResult<()> {
        let mut state = self.state.lock();
        if state.mode != Mode::ConfirmingDelete {
            return Err(state.invalid("type a confirmation"));
        }

        state.confirmation = text.into();
        Ok(())
    }

    /// Close the overlay without deleting. The typed text is kept.
    pub fn dismiss_delete(&self) -> PageResult<()> {
        let mut state = self.state.lock();
        if state.mode != Mode::ConfirmingDelete {
            return Err(state.invalid("dismiss"));
        }

        state.mode = Mode::Viewing;
        Ok(())
    }

    /// Delete the account once the confirmation text is exactly `DELETE`.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&self) -> PageResult<()> {
        let prepared = {
            let mut state = self.state.lock();
            if state.mode != Mode::ConfirmingDelete {
                return Err(state.invalid("delete"));
            }

            if state.confirmation == DELETE_CONFIRMATION {
                state.ensure_idle()?;
                let profile_id = state.profile_id.clone().ok_or(PageError::MissingIdentifier)?;
                state.in_flight = Some(Operation::Delete);
                Some((state.epoch, state.epoch_token.clone(), profile_id))
            } else {
                None
            }
        };

        let Some((epoch, token, profile_id)) = prepared else {
            warn!("Delete attempted without the confirmation text");
            self.notifier
                .notify(Notification::warning("Please type \"DELETE\" to confirm."));
            return Err(PageError::ConfirmationMismatch);
        };

        let result = guarded(token, self.api.delete_profile(&profile_id)).await;

        {
            let mut state = self.state.lock();
            if state.epoch != epoch {
                debug!(epoch, current = state.epoch, "Discarding stale delete response");
                return Err(PageError::Stale);
            }
            // On success the slot stays occupied: the page is about to go away
            if result.is_err() {
                state.in_flight = None;
            }
        }

        match result {
            Ok(()) => {
                info!("Account deleted");
                self.notifier.notify(Notification::success(
                    "Account deleted successfully. We're sad to see you go!",
                ));
                self.session.clear();
                self.navigator.navigate(routes::LANDING);
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(PageError::Stale),
            Err(err) => {
                error!(error = %err, "Failed to delete account");
                self.notifier.notify(Notification::error(
                    "Error deleting account. Please try again.",
                ));
                Err(err.into())
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn ui_state(&self) -> UiState {
        self.state.lock().ui_state()
    }

    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading()
    }

    #[allow(dead_code)]
    pub fn profile(&self) -> Option<ProfileRecord> {
        self.state.lock().profile.clone()
    }

    #[allow(dead_code)]
    pub fn draft(&self) -> EditDraft {
        self.state.lock().draft.clone()
    }

    #[allow(dead_code)]
    pub fn confirmation(&self) -> String {
        self.state.lock().confirmation.clone()
    }

    /// Whether the visitor is looking at their own profile.
    #[allow(dead_code)]
    pub fn is_owner(&self) -> bool {
        let state = self.state.lock();
        state
            .profile_id
            .as_deref()
            .is_some_and(|id| self.session.is_viewer(id))
    }

    pub fn view(&self) -> PageView {
        let state = self.state.lock();
        let loading = state.is_loading();
        let owner = state
            .profile_id
            .as_deref()
            .is_some_and(|id| self.session.is_viewer(id));

        let delete_overlay = (state.mode == Mode::ConfirmingDelete).then(|| DeleteOverlay {
            input: state.confirmation.clone(),
            confirm_enabled: state.confirmation == DELETE_CONFIRMATION && !loading,
            deleting: state.in_flight == Some(Operation::Delete),
        });

        // A save keeps the form on screen with its submit control disabled
        let body = if loading && delete_overlay.is_none() && state.mode != Mode::Editing {
            Body::Loading
        } else {
            match (&state.profile, state.mode) {
                (None, _) => Body::Unavailable {
                    message: state
                        .load_error
                        .clone()
                        .unwrap_or_else(|| "No profile data.".to_string()),
                },
                (Some(_), Mode::Editing) => Body::Edit(EditView {
                    username: state.draft.username.clone(),
                    first_name: state.draft.first_name.clone(),
                    last_name: state.draft.last_name.clone(),
                    save_enabled: !loading,
                    saving: state.in_flight == Some(Operation::Save),
                }),
                (Some(profile), _) => Body::Display(DisplayView {
                    header: profile.username.clone(),
                    full_name: profile.full_name(),
                    email: profile.email.clone(),
                    owner_actions: owner,
                }),
            }
        };

        PageView {
            body,
            delete_overlay,
        }
    }

    fn ensure_owner(&self, state: &PageState) -> PageResult<()> {
        match state.profile_id.as_deref() {
            Some(id) if self.session.is_viewer(id) => Ok(()),
            _ => Err(PageError::NotOwner),
        }
    }
}

impl Drop for ProfilePage {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

/// Run `request` until it finishes or `token` is cancelled.
async fn guarded<T, F>(token: CancellationToken, request: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = request => result,
    }
}

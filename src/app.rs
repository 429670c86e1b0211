//! Terminal driver
//!
//! Mounts the profile page for a navigation path and feeds it commands read
//! from stdin, printing toasts and the rendered page after each one.

use anyhow::Result;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::domain::profiles::EditableField;
use crate::domain::session::SessionUser;
use crate::error::PageError;
use crate::pages::ProfilePage;
use crate::routes;
use crate::services::{History, Navigator, ProfileApi, SessionContext, ToastQueue};

const HELP: &str = "\
commands:
  show                      render the page
  edit                      open the edit form
  set <field> <value>       change first_name, last_name or username
  save                      submit the edit form
  cancel                    discard edits
  delete                    open the delete confirmation
  type <text>               fill in the confirmation box
  confirm                   delete the account
  dismiss                   close the delete confirmation
  open <path|id>            navigate to another profile
  help                      show this text
  quit                      leave";

/// Shared application state
pub struct AppState {
    pub session: SessionContext,
    pub toasts: Arc<ToastQueue>,
    pub history: Arc<History>,
    pub page: ProfilePage,
}

impl AppState {
    pub fn new(
        session_user: Option<SessionUser>,
        api: Arc<dyn ProfileApi>,
        initial_path: &str,
    ) -> Self {
        let session = SessionContext::new(session_user);
        let toasts = Arc::new(ToastQueue::new());
        let history = Arc::new(History::new(initial_path));
        let page = ProfilePage::new(api, session.clone(), toasts.clone(), history.clone());

        Self {
            session,
            toasts,
            history,
            page,
        }
    }

    /// Whether the page navigated somewhere it does not come back from.
    pub fn left_page(&self) -> bool {
        self.history
            .current()
            .is_some_and(|path| routes::leaves_page(&path))
    }

    pub async fn dispatch(&self, command: Command) -> Result<(), PageError> {
        match command {
            Command::Show | Command::Help | Command::Quit => Ok(()),
            Command::Edit => self.page.enter_edit(),
            Command::Set(field, value) => self.page.set_field(field, value),
            Command::Save => self.page.save().await,
            Command::Cancel => self.page.cancel_edit(),
            Command::Delete => self.page.request_delete(),
            Command::Type(text) => self.page.set_confirmation(text),
            Command::Confirm => self.page.confirm_delete().await,
            Command::Dismiss => self.page.dismiss_delete(),
            Command::Open(path) => {
                self.history.navigate(&path);
                self.page.mount(routes::profile_id(&path)).await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show,
    Edit,
    Set(EditableField, String),
    Save,
    Cancel,
    Delete,
    Type(String),
    Confirm,
    Dismiss,
    Open(String),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (line.trim(), ""),
        };

        match word.to_lowercase().as_str() {
            "show" | "" => Ok(Self::Show),
            "edit" => Ok(Self::Edit),
            "set" => {
                let (field, value) = rest.trim_start().split_once(' ').unwrap_or((rest.trim(), ""));
                Ok(Self::Set(field.parse()?, value.to_string()))
            }
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" => Ok(Self::Delete),
            // Typed verbatim: trailing spaces must not match the token
            "type" => Ok(Self::Type(rest.to_string())),
            "confirm" => Ok(Self::Confirm),
            "dismiss" => Ok(Self::Dismiss),
            "open" => {
                let target = rest.trim();
                if target.starts_with('/') {
                    Ok(Self::Open(target.to_string()))
                } else {
                    // Bare identifier
                    Ok(Self::Open(routes::profile_path(target)))
                }
            }
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(format!("Unknown command: {} (try `help`)", other)),
        }
    }
}

/// Errors already surfaced to the visitor as a toast
fn reported_by_toast(err: &PageError) -> bool {
    matches!(
        err,
        PageError::Api(_) | PageError::ConfirmationMismatch | PageError::MissingIdentifier
    )
}

/// Mount the page at `path` and process commands until the visitor leaves.
pub async fn run(state: &AppState, path: &str) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Some(user) = state.session.current() {
        tracing::info!(user_uuid = %user.user_uuid, "Viewing as signed-in user");
    }

    let mounted = state.page.mount(routes::profile_id(path)).await;
    flush(state, &mut stdout, mounted.err()).await?;

    while !state.left_page() {
        let prompt = format!("{:?}> ", state.page.ui_state());
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                stdout.write_all(format!("{}\n", HELP).as_bytes()).await?;
                continue;
            }
            Ok(command) => command,
            Err(message) => {
                stdout.write_all(format!("! {}\n", message).as_bytes()).await?;
                continue;
            }
        };

        tracing::debug!(command = ?command, "Dispatching command");
        let result = state.dispatch(command).await;
        flush(state, &mut stdout, result.err()).await?;
    }

    if let Some(path) = state.history.current().filter(|p| routes::leaves_page(p)) {
        stdout
            .write_all(format!("Navigated to {}\n", path).as_bytes())
            .await?;
    }

    state.page.unmount();
    Ok(())
}

/// Print pending toasts, an unreported error if any, and the page.
async fn flush(
    state: &AppState,
    stdout: &mut tokio::io::Stdout,
    err: Option<PageError>,
) -> Result<()> {
    let mut out = String::new();

    for toast in state.toasts.drain() {
        out.push_str(&format!("{}\n", toast));
    }
    if let Some(err) = err {
        tracing::debug!(error = %err, "Command failed");
        if !reported_by_toast(&err) {
            out.push_str(&format!("! {}\n", err));
        }
    }
    if !state.left_page() {
        out.push_str(&state.page.view().to_string());
    }

    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

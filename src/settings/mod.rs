//! User settings and the settings form.
//!
//! Settings live only in the chat session; nothing here touches the
//! environment or the filesystem.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// League, user and tone preferences for analysis requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
    /// Ask for maximally candid analysis.
    pub brutal_mode: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            league_id: String::new(),
            username: String::new(),
            brutal_mode: true,
        }
    }
}

impl UserSettings {
    /// Create settings from their parts.
    #[must_use]
    pub fn new(league_id: impl Into<String>, username: impl Into<String>, brutal_mode: bool) -> Self {
        Self {
            league_id: league_id.into(),
            username: username.into(),
            brutal_mode,
        }
    }

    /// Check that both league id and username are present.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingField`] naming the first empty field.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.league_id.trim().is_empty() {
            return Err(SettingsError::MissingField {
                field: "league_id".into(),
            });
        }
        if self.username.trim().is_empty() {
            return Err(SettingsError::MissingField {
                field: "username".into(),
            });
        }
        Ok(())
    }

    /// Returns true if analysis requests may be issued.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    fn trimmed(&self) -> Self {
        Self {
            league_id: self.league_id.trim().to_string(),
            username: self.username.trim().to_string(),
            brutal_mode: self.brutal_mode,
        }
    }
}

/// Holder of the current settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsStore {
    current: UserSettings,
}

impl SettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current settings.
    #[must_use]
    pub const fn current(&self) -> &UserSettings {
        &self.current
    }

    /// Replace the settings wholesale.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingField`] and leaves the store
    /// unchanged if league id or username is empty.
    pub fn save(&mut self, settings: &UserSettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.current = settings.trimmed();
        tracing::info!(
            league_id = %self.current.league_id,
            username = %self.current.username,
            brutal_mode = self.current.brutal_mode,
            "Settings saved"
        );
        Ok(())
    }
}

/// Editable draft of the settings, shown when open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    draft: UserSettings,
    open: bool,
}

impl SettingsForm {
    /// Open the form, seeding the draft from the current settings.
    pub fn open(&mut self, current: &UserSettings) {
        if !self.open {
            self.draft = current.clone();
            self.open = true;
        }
    }

    /// Whether the form is showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// The draft being edited.
    #[must_use]
    pub const fn draft(&self) -> &UserSettings {
        &self.draft
    }

    /// Edit the league id.
    pub fn set_league_id(&mut self, league_id: impl Into<String>) {
        self.draft.league_id = league_id.into();
    }

    /// Edit the username.
    pub fn set_username(&mut self, username: impl Into<String>) {
        self.draft.username = username.into();
    }

    /// Edit the brutal mode flag.
    pub fn set_brutal_mode(&mut self, brutal_mode: bool) {
        self.draft.brutal_mode = brutal_mode;
    }

    /// Save the draft into the store and close the form.
    ///
    /// # Errors
    ///
    /// On a missing field, returns the error and leaves both the store and
    /// the form (still open) untouched.
    pub fn submit(&mut self, store: &mut SettingsStore) -> Result<(), SettingsError> {
        if let Err(e) = store.save(&self.draft) {
            tracing::warn!(error = %e, "Settings not saved");
            return Err(e);
        }
        self.open = false;
        Ok(())
    }

    /// Close the form, discarding the draft.
    pub fn cancel(&mut self) {
        self.open = false;
    }
}

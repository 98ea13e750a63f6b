//! Keyword routing of free-text messages.

use serde::{Deserialize, Serialize};

use crate::traits::IntentClassifier;

/// Keywords that mark a message as a full team analysis request.
pub const ANALYSIS_KEYWORDS: [&str; 3] = ["analyze", "team", "grade"];

/// Endpoint a free-text message is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// `analyze-team`; the result also feeds the analysis panel.
    AnalyzeTeam,
    /// `chat`.
    Chat,
}

/// Case-insensitive substring matcher.
///
/// A message containing any keyword routes to [`Route::AnalyzeTeam`];
/// everything else routes to [`Route::Chat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordClassifier {
    keywords: Vec<String>,
}

impl KeywordClassifier {
    /// Build a classifier from custom keywords.
    #[must_use]
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// The lower-cased keywords.
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(ANALYSIS_KEYWORDS)
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> Route {
        let lowered = text.to_lowercase();
        if self.keywords.iter().any(|k| lowered.contains(k.as_str())) {
            Route::AnalyzeTeam
        } else {
            Route::Chat
        }
    }
}

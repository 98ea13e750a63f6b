//! Predefined one-click prompts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A predefined prompt that always goes to `analyze-team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    /// Overall team grade.
    AnalyzeTeam,
    /// Start/sit decisions for this week.
    StartSit,
    /// Waiver wire pickups.
    WaiverTargets,
    /// Trade targets.
    TradeTargets,
}

impl QuickAction {
    /// All quick actions in display order.
    pub const ALL: [Self; 4] = [
        Self::AnalyzeTeam,
        Self::StartSit,
        Self::WaiverTargets,
        Self::TradeTargets,
    ];

    /// Short name used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AnalyzeTeam => "analyze",
            Self::StartSit => "startsit",
            Self::WaiverTargets => "waiver",
            Self::TradeTargets => "trade",
        }
    }

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AnalyzeTeam => "Analyze team",
            Self::StartSit => "Start/sit",
            Self::WaiverTargets => "Waiver targets",
            Self::TradeTargets => "Trade targets",
        }
    }

    /// The fixed question sent to the backend.
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::AnalyzeTeam => "Analyze my current team and give me a grade",
            Self::StartSit => "Who should I start and sit this week on my team?",
            Self::WaiverTargets => {
                "Which waiver wire pickups would help my team the most right now?"
            }
            Self::TradeTargets => "Which trade targets would improve my team the most?",
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for QuickAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|action| action.name() == lowered)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.name()).collect();
                format!("expected one of: {}", names.join(", "))
            })
    }
}

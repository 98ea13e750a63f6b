//! Analysis panel rendering.
//!
//! A pure projection of the latest [`AnalysisResult`] into terminal text:
//! grade, brutality, confidence, recommendations, data-source badges and a
//! collapsible execution trace.

use std::fmt;

use crate::api::{AnalysisResult, ExecutionSummary};

/// Shown when no analysis has completed yet.
pub const EMPTY_STATE_TEXT: &str =
    "No analysis yet. Ask for a team analysis or run /quick analyze.";

const AVAILABLE_MARK: char = '✓';
const UNAVAILABLE_MARK: char = '✗';

/// Render the badge for one data source, e.g. `SLEEPER ✓`.
#[must_use]
pub fn badge(source: &str, available: bool) -> String {
    let name = source.replace('_', " ").to_uppercase();
    let mark = if available {
        AVAILABLE_MARK
    } else {
        UNAVAILABLE_MARK
    };
    format!("{name} {mark}")
}

/// Panel view over an optional analysis snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisPanel<'a> {
    result: Option<&'a AnalysisResult>,
    show_trace: bool,
}

impl<'a> AnalysisPanel<'a> {
    /// Create a panel with the execution trace collapsed.
    #[must_use]
    pub const fn new(result: Option<&'a AnalysisResult>) -> Self {
        Self {
            result,
            show_trace: false,
        }
    }

    /// Expand or collapse the execution trace.
    #[must_use]
    pub const fn with_trace(mut self, show_trace: bool) -> Self {
        self.show_trace = show_trace;
        self
    }

    /// Badges for every data source, in source-name order.
    #[must_use]
    pub fn badges(&self) -> Vec<String> {
        self.result
            .map(|r| {
                r.data_sources
                    .iter()
                    .map(|(name, available)| badge(name, *available))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write_trace(f: &mut fmt::Formatter<'_>, summary: &ExecutionSummary, expanded: bool) -> fmt::Result {
        if !expanded {
            return writeln!(
                f,
                "▸ Execution trace ({} steps, {} errors, {:.1}s) - /trace to expand",
                summary.steps_completed.len(),
                summary.errors.len(),
                summary.total_time
            );
        }

        writeln!(f, "▾ Execution trace")?;
        for step in &summary.steps_completed {
            writeln!(f, "  {AVAILABLE_MARK} {step}")?;
        }
        for error in &summary.errors {
            writeln!(f, "  {UNAVAILABLE_MARK} {error}")?;
        }
        writeln!(f, "  Total time: {:.1}s", summary.total_time)
    }
}

impl fmt::Display for AnalysisPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(result) = self.result else {
            return writeln!(f, "{EMPTY_STATE_TEXT}");
        };

        writeln!(f, "=== Team Analysis ===")?;
        writeln!(f, "Grade: {}", result.team_grade)?;
        writeln!(f, "Brutality: {}/10", result.brutality_score)?;
        writeln!(f, "Confidence: {:.0}%", result.confidence_score * 100.0)?;

        writeln!(f)?;
        if result.recommendations.is_empty() {
            writeln!(f, "Recommendations: none")?;
        } else {
            writeln!(f, "Recommendations:")?;
            for (i, rec) in result.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {rec}", i + 1)?;
            }
        }

        let badges = self.badges();
        if !badges.is_empty() {
            writeln!(f)?;
            write!(f, "Data sources:")?;
            for b in &badges {
                write!(f, " [{b}]")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        Self::write_trace(f, &result.execution_summary, self.show_trace)
    }
}

//! DecisionEngine — folds detection results and scope limits into a Report.
//!
//! Precedence, first match wins:
//! file-cap INCOMPLETE > timeout INCOMPLETE > BLOCKED > INDETERMINATE > VERIFIED.

use fence_core::constants::COVERAGE_SNAP_THRESHOLD;

use super::minimal_cut::{minimal_cut, primary_cause};
use super::types::{Classification, Confidence, Decision, DecisionLevel, Report, ReportStatus};
use crate::detection::{Violation, ViolationCause};

/// How far the analysis got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeOutcome {
    Completed,
    /// Nothing was analyzed.
    FileCapExceeded { changed: usize, cap: usize },
    /// Stopped at the deadline; partial findings are kept.
    TimedOut { elapsed_ms: u64, timeout_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct DecisionInput<'a> {
    pub violations: &'a [Violation],
    /// Unresolved specifiers or unreadable history.
    pub uncertain: bool,
    pub scope: ScopeOutcome,
    pub files_in_scope: usize,
    pub files_analyzed: usize,
}

pub struct DecisionEngine;

impl DecisionEngine {
    pub fn decide(input: &DecisionInput) -> Report {
        if let ScopeOutcome::FileCapExceeded { changed, cap } = input.scope {
            return Report {
                status: ReportStatus::Incomplete,
                decision: Decision {
                    level: DecisionLevel::Warn,
                    reason: format!("{changed} changed files exceed the cap of {cap}; not analyzed"),
                },
                classification: Classification::default(),
                minimal_cut: Vec::new(),
                confidence: Confidence { coverage_ratio: 0.0 },
            };
        }

        let cut = minimal_cut(input.violations);
        let cause = primary_cause(input.violations);
        let coverage = coverage_ratio(input.files_analyzed, input.files_in_scope);

        let (status, level, reason) = match input.scope {
            ScopeOutcome::TimedOut { elapsed_ms, timeout_ms } => (
                ReportStatus::Incomplete,
                DecisionLevel::Warn,
                format!(
                    "analysis stopped after {elapsed_ms}ms (limit {timeout_ms}ms); {} of {} files analyzed",
                    input.files_analyzed, input.files_in_scope
                ),
            ),
            _ if !cut.is_empty() => {
                let level = match cause {
                    Some(c) if c.severity_rank() >= ViolationCause::BoundaryViolation.severity_rank() => {
                        DecisionLevel::Block
                    }
                    _ => DecisionLevel::Warn,
                };
                let reason = match cause {
                    Some(c) => format!("{} violation(s), primary cause {c}", cut.len()),
                    None => format!("{} violation(s)", cut.len()),
                };
                (ReportStatus::Blocked, level, reason)
            }
            _ if input.uncertain => (
                ReportStatus::Indeterminate,
                DecisionLevel::Review,
                "resolution was ambiguous; review required".to_string(),
            ),
            _ => (
                ReportStatus::Verified,
                DecisionLevel::Pass,
                "no boundary violations".to_string(),
            ),
        };

        tracing::info!(status = status.as_str(), cut = cut.len(), coverage, "decision");
        Report {
            status,
            decision: Decision { level, reason },
            classification: Classification { primary_cause: cause },
            minimal_cut: cut,
            confidence: Confidence { coverage_ratio: coverage },
        }
    }
}

/// `analyzed / in_scope`, snapped to 1.0 at or above 0.999, otherwise
/// rounded to two decimals. An empty scope is fully covered.
pub fn coverage_ratio(analyzed: usize, in_scope: usize) -> f64 {
    if in_scope == 0 {
        return 1.0;
    }
    let ratio = (analyzed as f64 / in_scope as f64).min(1.0);
    if ratio >= COVERAGE_SNAP_THRESHOLD {
        1.0
    } else {
        (ratio * 100.0).round() / 100.0
    }
}

//! ShadowRepairVerifier — applies a fix plan to an in-memory overlay,
//! re-runs detection against it, and compares the equivalence hashes of
//! every touched file, baseline vs overlay. Real files are never written.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use fence_core::SourceReader;

use super::hashes::{diagnostic_hash, evaluation_order_hash, runtime_hash, semantic_hash};
use super::overlay::OverlayReader;
use super::rewrite::apply_edits;
use super::types::{EquivalenceHashes, FixEdit, FixPlan, HashPair, RepairDecision, RepairVerdict};
use crate::decision::{minimal_cut, DecisionEngine, DecisionInput, ReportStatus, ScopeOutcome};
use crate::detection::{DetectionContext, DiffEntry, Violation, ViolationDetector};
use crate::engine::budget::Budget;
use crate::graph::scan::FileScanner;
use crate::parsers::ModuleParser;
use crate::workspace::WorkspaceLayout;

/// The revision pair the violations were found in.
pub struct RepairContext<'a> {
    pub layout: &'a WorkspaceLayout,
    pub head: &'a dyn SourceReader,
    pub base: Option<&'a dyn SourceReader>,
    pub diff: &'a [DiffEntry],
}

pub struct ShadowRepairVerifier<'a> {
    parser: &'a ModuleParser,
    detector: &'a ViolationDetector<'a>,
    read_attempts: u32,
}

impl<'a> ShadowRepairVerifier<'a> {
    pub fn new(parser: &'a ModuleParser, detector: &'a ViolationDetector<'a>, read_attempts: u32) -> Self {
        Self {
            parser,
            detector,
            read_attempts: read_attempts.max(1),
        }
    }

    pub fn verify(
        &self,
        ctx: &RepairContext,
        violations: &[Violation],
        plan: &FixPlan,
        budget: &Budget,
    ) -> RepairVerdict {
        let baseline_diag = diagnostic_hash(
            diagnostic_status(violations, false, true, budget).as_str(),
            violations.len(),
        );
        let touched = touched_files(ctx.layout, &plan.edits);
        let touched_rel: Vec<String> = touched.iter().map(|p| ctx.layout.relative_path(p)).collect();

        if !plan.post_condition.unrepairable.is_empty() {
            tracing::info!(
                unrepairable = plan.post_condition.unrepairable.len(),
                "no rewrite rule for some violations"
            );
            return RepairVerdict {
                decision: RepairDecision::RepairImpossible,
                residual_cut: minimal_cut(violations),
                touched_files: touched_rel,
                hashes: None,
                diagnostics: HashPair::new(baseline_diag.clone(), baseline_diag),
            };
        }

        let baseline = FileScanner::new(ctx.layout, ctx.head, self.parser, self.read_attempts);
        let overlay = self.build_overlay(ctx, &baseline, &plan.edits);

        let rerun = self.detector.detect(
            &DetectionContext {
                layout: ctx.layout,
                head: &overlay,
                base: ctx.base,
                diff: ctx.diff,
                graph: None,
            },
            budget,
        );
        let overlay_status =
            diagnostic_status(&rerun.violations, rerun.is_uncertain(), rerun.completed, budget);
        let overlay_diag = diagnostic_hash(overlay_status.as_str(), rerun.violations.len());
        let diagnostics = HashPair::new(baseline_diag, overlay_diag);
        let residual_cut = minimal_cut(&rerun.violations);

        if !residual_cut.is_empty() || !rerun.completed {
            tracing::info!(residual = residual_cut.len(), completed = rerun.completed, "fix insufficient");
            return RepairVerdict {
                decision: RepairDecision::FixInsufficient,
                residual_cut,
                touched_files: touched_rel,
                hashes: None,
                diagnostics,
            };
        }

        let patched = FileScanner::new(ctx.layout, &overlay, self.parser, self.read_attempts);
        let hashes = EquivalenceHashes {
            semantic: HashPair::new(semantic_hash(&baseline, &touched), semantic_hash(&patched, &touched)),
            runtime: HashPair::new(runtime_hash(&baseline, &touched), runtime_hash(&patched, &touched)),
            evaluation_order: HashPair::new(
                evaluation_order_hash(&baseline, &touched),
                evaluation_order_hash(&patched, &touched),
            ),
        };
        let decision = if !hashes.semantic.matches() {
            RepairDecision::FixBehaviorChanged
        } else if !hashes.runtime.matches() {
            RepairDecision::FixRuntimeChanged
        } else if !hashes.evaluation_order.matches() {
            RepairDecision::FixEvaluationOrderChanged
        } else {
            RepairDecision::FixProvenSafe
        };
        tracing::info!(decision = decision.as_str(), touched = touched.len(), "shadow repair verified");

        RepairVerdict {
            decision,
            residual_cut,
            touched_files: touched_rel,
            hashes: Some(hashes),
            diagnostics,
        }
    }

    fn build_overlay<'r>(
        &self,
        ctx: &RepairContext<'r>,
        baseline: &FileScanner,
        edits: &[FixEdit],
    ) -> OverlayReader<'r> {
        let mut by_file: BTreeMap<PathBuf, Vec<&FixEdit>> = BTreeMap::new();
        for edit in edits {
            by_file
                .entry(ctx.layout.absolute(&edit.path))
                .or_default()
                .push(edit);
        }

        let mut overlay = OverlayReader::new(ctx.head);
        for (path, file_edits) in by_file {
            let scanned = baseline.scan(&path);
            if !scanned.exists {
                tracing::debug!(path = %path.display(), "edit target absent, skipped");
                continue;
            }
            let (content, applied) = apply_edits(&scanned.content, &scanned.parsed, &file_edits);
            tracing::debug!(path = %path.display(), applied, "overlay rewrite");
            overlay.insert(&path, content);
        }
        overlay
    }
}

fn touched_files(layout: &WorkspaceLayout, edits: &[FixEdit]) -> Vec<PathBuf> {
    edits
        .iter()
        .map(|e| layout.absolute(&e.path))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Report status for the audit trail, with the same precedence as the
/// gate itself.
fn diagnostic_status(
    violations: &[Violation],
    uncertain: bool,
    completed: bool,
    budget: &Budget,
) -> ReportStatus {
    let scope = if completed {
        ScopeOutcome::Completed
    } else {
        ScopeOutcome::TimedOut {
            elapsed_ms: budget.elapsed_ms(),
            timeout_ms: budget.timeout_ms(),
        }
    };
    DecisionEngine::decide(&DecisionInput {
        violations,
        uncertain,
        scope,
        files_in_scope: 0,
        files_analyzed: 0,
    })
    .status
}

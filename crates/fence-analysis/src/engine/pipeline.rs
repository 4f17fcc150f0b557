//! BoundaryAnalyzer — build, propagate, detect, decide, plan.
//!
//! Every call starts from nothing: a fresh parser (and parse cache), a fresh
//! graph and a fresh closure cache. Only the returned values survive.

use std::path::PathBuf;

use fence_core::{FenceConfig, SourceReader};

use crate::decision::{DecisionEngine, DecisionInput, Report, ScopeOutcome};
use crate::detection::{DetectionContext, DiffEntry, DiffScope, Violation, ViolationDetector};
use crate::engine::budget::Budget;
use crate::graph::{propagate_public_surface, BuildStats, GraphBuilder, ModuleGraph};
use crate::parsers::ModuleParser;
use crate::repair::{FixPlan, FixPlanner, RepairContext, RepairVerdict, ShadowRepairVerifier};
use crate::workspace::WorkspaceLayout;

/// Inputs from the collaborators: enumerated files, the diff and readers
/// for both revisions.
pub struct AnalysisRequest<'a> {
    pub layout: &'a WorkspaceLayout,
    /// Absolute source paths (enumeration is the caller's job).
    pub files: &'a [PathBuf],
    pub diff: &'a [DiffEntry],
    pub head: &'a dyn SourceReader,
    pub base: Option<&'a dyn SourceReader>,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub violations: Vec<Violation>,
    /// Propagated graph; empty when the file cap was hit.
    pub graph: ModuleGraph,
    pub build_stats: BuildStats,
    pub fix_plan: FixPlan,
}

pub struct BoundaryAnalyzer {
    config: FenceConfig,
    scope: DiffScope,
}

impl BoundaryAnalyzer {
    pub fn new(config: FenceConfig) -> Self {
        let scope = DiffScope::from_config(&config.scope);
        Self { config, scope }
    }

    pub fn config(&self) -> &FenceConfig {
        &self.config
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let limits = &self.config.limits;
        let budget = Budget::new(limits.effective_timeout_ms());
        let read_attempts = limits.effective_read_retries();
        let cap = limits.effective_max_changed_files();

        let in_scope = self.scope.filter(request.diff).len();
        if in_scope > cap {
            tracing::warn!(changed = in_scope, cap, "changed-file cap exceeded, skipping analysis");
            let report = DecisionEngine::decide(&DecisionInput {
                violations: &[],
                uncertain: false,
                scope: ScopeOutcome::FileCapExceeded { changed: in_scope, cap },
                files_in_scope: in_scope,
                files_analyzed: 0,
            });
            return AnalysisOutcome {
                report,
                violations: Vec::new(),
                graph: ModuleGraph::default(),
                build_stats: BuildStats::default(),
                fix_plan: FixPlan::default(),
            };
        }

        tracing::info!(files = request.files.len(), changed = in_scope, "analysis started");
        let parser = ModuleParser::new();
        let build = GraphBuilder::new(request.layout, request.head, &parser)
            .with_read_attempts(read_attempts)
            .build_within(request.files, &budget);
        let graph = propagate_public_surface(&build.graph);

        let detector = ViolationDetector::new(&parser, self.scope.clone()).with_read_attempts(read_attempts);
        let detection = detector.detect(
            &DetectionContext {
                layout: request.layout,
                head: request.head,
                base: request.base,
                diff: request.diff,
                graph: Some(&graph),
            },
            &budget,
        );

        let scope = if build.completed && detection.completed {
            ScopeOutcome::Completed
        } else {
            ScopeOutcome::TimedOut {
                elapsed_ms: budget.elapsed_ms(),
                timeout_ms: budget.timeout_ms(),
            }
        };
        let report = DecisionEngine::decide(&DecisionInput {
            violations: &detection.violations,
            uncertain: detection.is_uncertain(),
            scope,
            files_in_scope: detection.files_in_scope,
            files_analyzed: detection.files_analyzed,
        });
        let fix_plan = FixPlanner::new(request.layout).plan(&detection.violations);

        AnalysisOutcome {
            report,
            violations: detection.violations,
            graph,
            build_stats: build.stats,
            fix_plan,
        }
    }

    /// Prove (or refute) the outcome's fix plan against an overlay.
    pub fn verify_repair(&self, request: &AnalysisRequest, outcome: &AnalysisOutcome) -> RepairVerdict {
        let limits = &self.config.limits;
        let budget = Budget::new(limits.effective_timeout_ms());
        let read_attempts = limits.effective_read_retries();
        let parser = ModuleParser::new();
        let detector = ViolationDetector::new(&parser, self.scope.clone()).with_read_attempts(read_attempts);
        let verifier = ShadowRepairVerifier::new(&parser, &detector, read_attempts);
        verifier.verify(
            &RepairContext {
                layout: request.layout,
                head: request.head,
                base: request.base,
                diff: request.diff,
            },
            &outcome.violations,
            &outcome.fix_plan,
            &budget,
        )
    }
}

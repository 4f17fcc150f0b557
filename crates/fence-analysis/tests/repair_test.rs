//! Shadow repair: fix planning, overlay re-run and equivalence verdicts.

mod common;

use fence_analysis::detection::{
    DetectionContext, DiffScope, DiffStatus, Violation, ViolationCause, ViolationDetector,
};
use fence_analysis::engine::Budget;
use fence_analysis::parsers::ModuleParser;
use fence_analysis::repair::hashes::diagnostic_hash;
use fence_analysis::repair::{
    FixPlan, FixPlanner, FixRisk, RepairContext, RepairDecision, RepairVerdict,
    ShadowRepairVerifier,
};
use fence_core::config::ScopeConfig;
use fence_core::{FsSourceReader, SnapshotReader, SourceReader};

use common::{diff, three_packages, Repo};

// ─── Helpers ─────────────────────────────────────────────────────────

struct Run {
    violations: Vec<Violation>,
    plan: FixPlan,
    verdict: RepairVerdict,
}

fn repair(repo: &Repo, base: Option<&dyn SourceReader>, entries: &[(DiffStatus, &str)]) -> Run {
    repair_with(repo, base, entries, |vs| vs.to_vec())
}

/// Plans only for the violations `select` keeps; verification still sees all.
fn repair_with(
    repo: &Repo,
    base: Option<&dyn SourceReader>,
    entries: &[(DiffStatus, &str)],
    select: impl Fn(&[Violation]) -> Vec<Violation>,
) -> Run {
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let head = FsSourceReader::new();
    let diff = diff(entries);
    let parser = ModuleParser::new();
    let detector = ViolationDetector::new(&parser, DiffScope::from_config(&ScopeConfig::default()));

    let found = detector.detect(
        &DetectionContext { layout: &layout, head: &head, base, diff: &diff, graph: None },
        &Budget::unlimited(),
    );
    let plan = FixPlanner::new(&layout).plan(&select(&found.violations));
    let verifier = ShadowRepairVerifier::new(&parser, &detector, 3);
    let verdict = verifier.verify(
        &RepairContext { layout: &layout, head: &head, base, diff: &diff },
        &found.violations,
        &plan,
        &Budget::unlimited(),
    );
    Run { violations: found.violations, plan, verdict }
}

const FEATURE: &str = "packages/alpha/src/feature.ts";

/// alpha/feature reaches into beta's private `internal/secret`.
fn private_secret_import(beta_entry: &str) -> Repo {
    let repo = three_packages();
    repo.write("packages/beta/src/index.ts", beta_entry);
    repo.write(
        FEATURE,
        "import { secret } from '@acme/beta/internal/secret';\nexport const f = secret;\n",
    );
    repo
}

// ─── Verdicts ────────────────────────────────────────────────────────

#[test]
fn entry_forwarding_the_symbol_is_proven_safe() {
    let repo = private_secret_import(
        "import { secret } from './internal/secret';\nexport { secret };\n",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations.len(), 1);
    assert_eq!(run.plan.edits.len(), 1);
    assert_eq!(run.plan.edits[0].from_specifier, "@acme/beta/internal/secret");
    assert_eq!(run.plan.edits[0].to_specifier, "@acme/beta");
    assert_eq!(run.plan.risk, FixRisk::Medium);

    assert_eq!(run.verdict.decision, RepairDecision::FixProvenSafe);
    assert!(run.verdict.residual_cut.is_empty());
    assert_eq!(run.verdict.touched_files, vec![FEATURE.to_string()]);
    let hashes = run.verdict.hashes.as_ref().unwrap();
    assert!(hashes.semantic.matches());
    assert!(hashes.runtime.matches());
    assert!(hashes.evaluation_order.matches());
}

#[test]
fn entry_without_the_symbol_changes_runtime_binding() {
    let repo = private_secret_import("export { helper } from './helper';\n");
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.verdict.decision, RepairDecision::FixRuntimeChanged);
    let hashes = run.verdict.hashes.as_ref().unwrap();
    assert!(hashes.semantic.matches());
    assert!(!hashes.runtime.matches());
}

#[test]
fn effectful_sibling_in_entry_changes_evaluation_order() {
    let repo = private_secret_import(
        "export { helper } from './helper';\nimport { secret } from './internal/secret';\nexport { secret };\n",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.verdict.decision, RepairDecision::FixEvaluationOrderChanged);
    let hashes = run.verdict.hashes.as_ref().unwrap();
    assert!(hashes.runtime.matches());
    assert!(!hashes.evaluation_order.matches());
}

#[test]
fn relative_escape_rewrite_is_high_risk() {
    let repo = three_packages();
    repo.write(
        FEATURE,
        "import { helper } from '../../beta/src/helper';\nexport const f = helper;\n",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations[0].cause, ViolationCause::RelativeEscape);
    assert_eq!(run.plan.risk, FixRisk::High);
    assert_eq!(run.plan.edits[0].to_specifier, "@acme/beta");
    assert_eq!(run.verdict.decision, RepairDecision::FixProvenSafe);
}

/// alpha/feature names beta's private `Secret` type with `import_line`.
fn private_type_import(beta_entry: &str, import_line: &str) -> Repo {
    let repo = three_packages();
    repo.write(
        "packages/beta/src/internal/secret.ts",
        "export interface Secret { id: string }\nexport const secret = 42;\n",
    );
    repo.write("packages/beta/src/index.ts", beta_entry);
    repo.write(FEATURE, &format!("{import_line}\nexport const f = 1;\n"));
    repo
}

const FORWARDS_SECRET_TYPE: &str = "export { helper } from './helper';\nimport type { Secret } from './internal/secret';\nexport type { Secret };\n";
const OMITS_SECRET_TYPE: &str = "export { helper } from './helper';\nexport type { Shape } from './shapes';\n";

#[test]
fn type_only_rewrite_is_low_risk() {
    let repo = private_type_import(
        FORWARDS_SECRET_TYPE,
        "import type { Secret } from '@acme/beta/internal/secret';",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations[0].cause, ViolationCause::TypeImportPrivateTarget);
    assert_eq!(run.plan.risk, FixRisk::Low);
    assert_eq!(run.verdict.decision, RepairDecision::FixProvenSafe);
}

#[test]
fn type_rewrite_to_entry_without_the_type_is_not_safe() {
    let repo = private_type_import(
        OMITS_SECRET_TYPE,
        "import type { Secret } from '@acme/beta/internal/secret';",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations[0].cause, ViolationCause::TypeImportPrivateTarget);
    assert!(run.verdict.residual_cut.is_empty());
    assert_eq!(run.verdict.decision, RepairDecision::FixRuntimeChanged);
    let hashes = run.verdict.hashes.as_ref().unwrap();
    assert!(hashes.semantic.matches());
    assert!(!hashes.runtime.matches());
}

#[test]
fn inline_type_import_is_planned_as_type_only() {
    let safe = private_type_import(
        FORWARDS_SECRET_TYPE,
        "import { type Secret } from '@acme/beta/internal/secret';",
    );
    let run = repair(&safe, None, &[(DiffStatus::Modified, FEATURE)]);
    assert_eq!(run.violations[0].cause, ViolationCause::TypeImportPrivateTarget);
    assert_eq!(run.plan.risk, FixRisk::Low);
    assert_eq!(run.verdict.decision, RepairDecision::FixProvenSafe);

    let unsafe_entry = private_type_import(
        OMITS_SECRET_TYPE,
        "import { type Secret } from '@acme/beta/internal/secret';",
    );
    let run = repair(&unsafe_entry, None, &[(DiffStatus::Modified, FEATURE)]);
    assert!(!run.verdict.decision.is_safe());
}

#[test]
fn mixed_inline_type_is_checked_alongside_values() {
    let repo = private_type_import(
        "import { secret } from './internal/secret';\nexport { secret };\n",
        "import { type Secret, secret } from '@acme/beta/internal/secret';",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations[0].cause, ViolationCause::BoundaryViolation);
    assert_eq!(run.verdict.decision, RepairDecision::FixRuntimeChanged);
}

#[test]
fn partial_plan_is_insufficient() {
    let repo = three_packages();
    repo.write(
        FEATURE,
        "import { secret } from '@acme/beta/internal/secret';\nimport { helper } from '../../beta/src/helper';\nexport const f = [secret, helper];\n",
    );
    let run = repair_with(&repo, None, &[(DiffStatus::Modified, FEATURE)], |vs| {
        vs.iter()
            .filter(|v| v.cause == ViolationCause::BoundaryViolation)
            .cloned()
            .collect()
    });

    assert_eq!(run.violations.len(), 2);
    assert_eq!(run.verdict.decision, RepairDecision::FixInsufficient);
    assert_eq!(run.verdict.residual_cut.len(), 1);
    assert!(run.verdict.residual_cut[0].contains("relative_escape"));
    assert!(run.verdict.hashes.is_none());
}

#[test]
fn deleted_public_api_is_unrepairable() {
    let repo = three_packages();
    let mut base = SnapshotReader::new();
    for path in repo.files() {
        base.insert(&path, std::fs::read_to_string(&path).unwrap());
    }
    repo.remove("packages/gamma/src/util.ts");

    let run = repair(&repo, Some(&base), &[(DiffStatus::Deleted, "packages/gamma/src/util.ts")]);

    assert_eq!(run.violations[0].cause, ViolationCause::DeletedPublicApi);
    assert!(run.plan.is_empty());
    assert_eq!(run.plan.post_condition.unrepairable.len(), 1);
    assert_eq!(run.verdict.decision, RepairDecision::RepairImpossible);
    assert_eq!(run.verdict.residual_cut.len(), 1);
    assert!(run.verdict.hashes.is_none());
    assert!(run.verdict.diagnostics.matches());
}

// ─── Isolation ───────────────────────────────────────────────────────

#[test]
fn verification_never_writes_real_files() {
    let repo = private_secret_import(
        "import { secret } from './internal/secret';\nexport { secret };\n",
    );
    let before = repo.read(FEATURE);
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert!(run.verdict.decision.is_safe());
    assert_eq!(repo.read(FEATURE), before);
}

#[test]
fn diagnostics_record_baseline_and_overlay() {
    let repo = private_secret_import(
        "import { secret } from './internal/secret';\nexport { secret };\n",
    );
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    let diag = &run.verdict.diagnostics;
    assert_eq!(diag.baseline.len(), 16);
    assert_eq!(diag.overlay.len(), 16);
    assert!(!diag.matches());
}

#[test]
fn diagnostics_reflect_an_uncertain_rerun() {
    let repo = private_secret_import("export { helper } from './helper';\n");
    repo.remove("packages/beta/src/index.ts");
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);

    assert_eq!(run.violations[0].cause, ViolationCause::BoundaryViolation);
    assert!(run.verdict.residual_cut.is_empty());
    let diag = &run.verdict.diagnostics;
    assert_eq!(diag.baseline, diagnostic_hash("BLOCKED", 1));
    assert_eq!(diag.overlay, diagnostic_hash("INDETERMINATE", 0));
    assert!(!run.verdict.decision.is_safe());
}

#[test]
fn verdict_serializes_snake_case_decision() {
    let repo = private_secret_import("export { helper } from './helper';\n");
    let run = repair(&repo, None, &[(DiffStatus::Modified, FEATURE)]);
    let json = serde_json::to_value(&run.verdict).unwrap();
    assert_eq!(json["decision"], "fix_runtime_changed");
    assert!(json["hashes"]["evaluationOrder"]["baseline"].is_string());
}

//! Violation detection: every cause, scope filtering, history handling.

mod common;

use fence_analysis::detection::{
    DetectionContext, DetectionOutcome, DiffScope, DiffStatus, ViolationCause, ViolationDetector,
};
use fence_analysis::engine::Budget;
use fence_analysis::graph::{propagate_public_surface, GraphBuilder};
use fence_analysis::parsers::ModuleParser;
use fence_analysis::workspace::WorkspaceLayout;
use fence_core::config::ScopeConfig;
use fence_core::{FsSourceReader, SnapshotReader, SourceReader};

use common::{diff, three_packages, Repo};

// ─── Helpers ─────────────────────────────────────────────────────────

fn detect(
    layout: &WorkspaceLayout,
    head: &dyn SourceReader,
    base: Option<&dyn SourceReader>,
    entries: &[(DiffStatus, &str)],
) -> DetectionOutcome {
    let parser = ModuleParser::new();
    let detector = ViolationDetector::new(&parser, DiffScope::from_config(&ScopeConfig::default()));
    let diff = diff(entries);
    detector.detect(
        &DetectionContext { layout, head, base, diff: &diff, graph: None },
        &Budget::unlimited(),
    )
}

/// Snapshot of every file currently in the repo.
fn snapshot(repo: &Repo) -> SnapshotReader {
    let mut snap = SnapshotReader::new();
    for path in repo.files() {
        snap.insert(&path, std::fs::read_to_string(&path).unwrap());
    }
    snap
}

// ─── Boundary ────────────────────────────────────────────────────────

#[test]
fn private_import_is_one_boundary_violation() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { secret } from '@acme/beta/internal/secret';\nexport const f = secret;\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);

    assert_eq!(out.violations.len(), 1);
    let v = &out.violations[0];
    assert_eq!(v.package, "alpha");
    assert_eq!(v.cause, ViolationCause::BoundaryViolation);
    assert_eq!(v.path, "packages/alpha/src/feature.ts");
    assert_eq!(v.specifier, "@acme/beta/internal/secret");
    assert_eq!(v.proof.target, "pkg:beta:internal/secret");
    assert_eq!(
        v.cut_key(),
        "alpha:packages/alpha/src/feature.ts:boundary_violation:@acme/beta/internal/secret"
    );
    assert!(out.completed);
}

#[test]
fn public_entry_and_reexported_files_are_fine() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { helper } from '@acme/beta';\nimport { helper as h } from '@acme/beta/helper';\nexport const f = [helper, h];\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert!(out.violations.is_empty());
    assert!(!out.is_uncertain());
}

#[test]
fn reexport_of_private_file_is_a_boundary_violation() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.ts", "export { secret } from '@acme/beta/internal/secret';\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].cause, ViolationCause::BoundaryViolation);
}

#[test]
fn same_package_imports_are_never_violations() {
    let repo = three_packages();
    repo.write("packages/beta/src/helper.ts", "import { secret } from './internal/secret';\nexport const helper = () => secret;\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/beta/src/helper.ts")]);
    assert!(out.violations.is_empty());
}

// ─── Type-only ───────────────────────────────────────────────────────

#[test]
fn type_imports_use_the_type_surface() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import type { Shape } from '@acme/beta/shapes';\nimport type { Secret } from '@acme/beta/internal/secret';\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].cause, ViolationCause::TypeImportPrivateTarget);
    assert_eq!(out.violations[0].specifier, "@acme/beta/internal/secret");
}

#[test]
fn value_import_of_type_only_public_file_is_a_boundary_violation() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.ts", "import { Shape } from '@acme/beta/shapes';\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations[0].cause, ViolationCause::BoundaryViolation);
}

#[test]
fn inline_type_only_import_is_a_type_violation() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { type Secret } from '@acme/beta/internal/secret';\nexport const f = 1;\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].cause, ViolationCause::TypeImportPrivateTarget);
}

#[test]
fn mixed_inline_type_import_stays_a_value_violation() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { type Secret, secret } from '@acme/beta/internal/secret';\nexport const f = secret;\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].cause, ViolationCause::BoundaryViolation);
}

#[test]
fn inline_type_reexport_exposes_only_the_type_surface() {
    let repo = three_packages();
    repo.write(
        "packages/beta/src/index.ts",
        "export { helper } from './helper';\nexport { type Shape } from './shapes';\n",
    );
    repo.write(
        "packages/alpha/src/feature.ts",
        "import type { Shape } from '@acme/beta/shapes';\nimport { Shape as S } from '@acme/beta/shapes';\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    assert_eq!(out.violations[0].cause, ViolationCause::BoundaryViolation);
}

// ─── Relative escape ─────────────────────────────────────────────────

#[test]
fn relative_traversal_into_another_package() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.ts", "import { helper } from '../../beta/src/helper';\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    assert_eq!(out.violations.len(), 1);
    let v = &out.violations[0];
    assert_eq!(v.cause, ViolationCause::RelativeEscape);
    assert_eq!(v.proof.target, "packages/beta/src/helper.ts");
}

// ─── Deleted public API ──────────────────────────────────────────────

#[test]
fn deleting_a_public_file_is_detected_from_history() {
    let repo = three_packages();
    let base = snapshot(&repo);
    repo.remove("packages/gamma/src/util.ts");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(
        &layout,
        &FsSourceReader::new(),
        Some(&base),
        &[(DiffStatus::Deleted, "packages/gamma/src/util.ts")],
    );
    assert_eq!(out.violations.len(), 1);
    let v = &out.violations[0];
    assert_eq!(v.cause, ViolationCause::DeletedPublicApi);
    assert_eq!(v.package, "gamma");
    assert_eq!(v.specifier, "@acme/gamma");
    assert_eq!(v.proof.target, "pkg:gamma:util");
}

#[test]
fn deleting_a_private_file_is_fine() {
    let repo = three_packages();
    let base = snapshot(&repo);
    repo.remove("packages/beta/src/internal/secret.ts");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(
        &layout,
        &FsSourceReader::new(),
        Some(&base),
        &[(DiffStatus::Deleted, "packages/beta/src/internal/secret.ts")],
    );
    assert!(out.violations.is_empty());
}

#[test]
fn deletion_without_history_is_ambiguous() {
    let repo = three_packages();
    repo.remove("packages/gamma/src/util.ts");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Deleted, "packages/gamma/src/util.ts")]);
    assert!(out.violations.is_empty());
    assert!(out.ambiguous);
}

// ─── Cycles ──────────────────────────────────────────────────────────

#[test]
fn cross_package_cycle_touching_the_diff() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.ts", "import { helper } from '@acme/beta';\nexport const feature = helper;\n");
    repo.write("packages/beta/src/helper.ts", "import { feature } from '@acme/alpha/feature';\nexport const helper = feature;\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let reader = FsSourceReader::new();
    let parser = ModuleParser::new();
    let graph = propagate_public_surface(&GraphBuilder::new(&layout, &reader, &parser).build(&repo.files()).graph);
    let detector = ViolationDetector::new(&parser, DiffScope::from_config(&ScopeConfig::default()));
    let entries = diff(&[(DiffStatus::Modified, "packages/beta/src/helper.ts")]);
    let out = detector.detect(
        &DetectionContext { layout: &layout, head: &reader, base: None, diff: &entries, graph: Some(&graph) },
        &Budget::unlimited(),
    );

    let cycles: Vec<_> = out
        .violations
        .iter()
        .filter(|v| v.cause == ViolationCause::CircularImport)
        .collect();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].package, "beta");
    assert_eq!(cycles[0].path, "packages/beta/src/helper.ts");
    assert!(cycles[0].specifier.contains("pkg:alpha:feature"));
    assert!(cycles[0].specifier.contains("pkg:beta:helper"));
}

// ─── Scope and uncertainty ───────────────────────────────────────────

#[test]
fn excluded_paths_are_not_analyzed() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.test.ts", "import { secret } from '@acme/beta/internal/secret';\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Added, "packages/alpha/src/feature.test.ts")]);
    assert!(out.violations.is_empty());
    assert_eq!(out.files_in_scope, 0);
}

#[test]
fn unresolved_local_specifiers_are_reported() {
    let repo = three_packages();
    repo.write("packages/alpha/src/feature.ts", "import { nope } from './nope';\nimport { x } from '@acme/zeta';\nimport _ from 'lodash';\n");
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let out = detect(&layout, &FsSourceReader::new(), None, &[(DiffStatus::Modified, "packages/alpha/src/feature.ts")]);
    let specs: Vec<&str> = out.unresolved.iter().map(|u| u.specifier.as_str()).collect();
    assert_eq!(specs, vec!["./nope", "@acme/zeta"]);
    assert!(out.is_uncertain());
}

#[test]
fn detection_is_deterministic() {
    let repo = three_packages();
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { secret } from '@acme/beta/internal/secret';\nimport type { S } from '@acme/beta/internal/secret';\nimport { helper } from '../../beta/src/helper';\n",
    );
    let layout = repo.layout(&["alpha", "beta", "gamma"]);
    let entries = [(DiffStatus::Modified, "packages/alpha/src/feature.ts")];
    let first = detect(&layout, &FsSourceReader::new(), None, &entries);
    let second = detect(&layout, &FsSourceReader::new(), None, &entries);
    assert_eq!(first, second);
    assert_eq!(first.violations.len(), 3);
}

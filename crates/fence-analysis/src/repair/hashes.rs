//! Equivalence hashes over the files a patch touches.
//!
//! Each hash is xxh3 over canonical lines, so baseline and overlay compare
//! equal exactly when the canonical forms do. Paths are repo-relative.

use std::path::{Path, PathBuf};

use fence_core::FxHashSet;

use super::symbols::{SymbolResolver, SymbolTarget};
use crate::graph::scan::{FileScanner, ResolvedImport, ScannedFile};
use crate::hashing::hash_lines;

const SIDE_EFFECT: &str = "<side-effect>";

/// What is imported, independent of where from.
pub fn semantic_canon(scanner: &FileScanner, touched: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::new();
    for path in touched {
        let scanned = scanner.scan(path);
        let mut entries: Vec<String> = Vec::new();
        for record in &scanned.parsed.records {
            let kind = record.kind.as_str();
            if record.bindings.is_empty() {
                entries.push(format!("{kind}|{SIDE_EFFECT}"));
            }
            for b in &record.bindings {
                entries.push(format!("{kind}|{} as {}", b.imported, b.local));
            }
            for b in &record.inline_types {
                entries.push(format!("{kind}|type {} as {}", b.imported, b.local));
            }
        }
        entries.sort();
        push_file(&mut lines, scanner, path, entries);
    }
    lines
}

/// Where each binding really comes from. Runtime bindings resolve in the
/// value space; type bindings (erased statements and inline `type`
/// specifiers) resolve in the type space under a `type|` prefix, so a
/// rewrite that loses a type is caught as well.
pub fn runtime_canon(scanner: &FileScanner, touched: &[PathBuf]) -> Vec<String> {
    let symbols = SymbolResolver::new(scanner);
    let mut lines = Vec::new();
    for path in touched {
        let scanned = scanner.scan(path);
        let mut entries: Vec<String> = Vec::new();
        for import in &scanned.imports {
            let Some(record) = scanned.parsed.records.get(import.record) else {
                continue;
            };
            if import.kind.is_behavioral() {
                let kind = import.kind.as_str();
                if record.bindings.is_empty() {
                    let target = module_target(scanner, import);
                    entries.push(format!("{kind}|{SIDE_EFFECT} -> {target}"));
                }
                for b in &record.bindings {
                    let target = binding_target(scanner, &symbols, import, &b.imported, Space::Value);
                    entries.push(format!("{kind}|{} -> {target}", b.local));
                }
            }
            for b in record.type_bindings() {
                let target = binding_target(scanner, &symbols, import, &b.imported, Space::Type);
                entries.push(format!("type|{} -> {target}", b.local));
            }
        }
        entries.sort();
        push_file(&mut lines, scanner, path, entries);
    }
    lines
}

/// Post-order evaluation sequence from each touched file. Modules without
/// own effects (pure barrels) are traversed but not recorded.
pub fn evaluation_order_canon(scanner: &FileScanner, touched: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::new();
    for root in touched {
        lines.push(format!("root:{}", scanner.layout().relative_path(root)));
        lines.extend(post_order(scanner, root));
    }
    lines
}

pub fn semantic_hash(scanner: &FileScanner, touched: &[PathBuf]) -> String {
    hash_lines(semantic_canon(scanner, touched))
}

pub fn runtime_hash(scanner: &FileScanner, touched: &[PathBuf]) -> String {
    hash_lines(runtime_canon(scanner, touched))
}

pub fn evaluation_order_hash(scanner: &FileScanner, touched: &[PathBuf]) -> String {
    hash_lines(evaluation_order_canon(scanner, touched))
}

/// Status plus violation count, for the audit trail.
pub fn diagnostic_hash(status: &str, violations: usize) -> String {
    hash_lines([format!("status:{status}"), format!("violations:{violations}")])
}

fn push_file(lines: &mut Vec<String>, scanner: &FileScanner, path: &Path, entries: Vec<String>) {
    lines.push(format!("file:{}", scanner.layout().relative_path(path)));
    lines.extend(entries);
}

fn module_target(scanner: &FileScanner, import: &ResolvedImport) -> String {
    if import.resolution.is_external() {
        return format!("external:{}", import.specifier);
    }
    match &import.resolution.resolved_path {
        Some(p) => scanner.layout().relative_path(p),
        None => format!("unresolved:{}", import.specifier),
    }
}

#[derive(Clone, Copy)]
enum Space {
    Value,
    Type,
}

fn binding_target(
    scanner: &FileScanner,
    symbols: &SymbolResolver,
    import: &ResolvedImport,
    imported: &str,
    space: Space,
) -> String {
    let Some(module) = import.resolution.resolved_path.as_deref() else {
        return module_target(scanner, import);
    };
    if imported == "*" {
        return scanner.layout().relative_path(module);
    }
    let target = match space {
        Space::Value => symbols.resolve_export(module, imported),
        Space::Type => symbols.resolve_type_export(module, imported),
    };
    match target {
        SymbolTarget::File(p) => scanner.layout().relative_path(&p),
        SymbolTarget::External(s) => format!("external:{s}"),
        SymbolTarget::Unresolved(s) => format!("unresolved:{s}"),
        SymbolTarget::Missing => format!(
            "unresolved:{}#{imported}",
            scanner.layout().relative_path(module)
        ),
    }
}

#[derive(Clone)]
enum Dep {
    File(PathBuf),
    Leaf(String),
}

fn dependencies(scanner: &FileScanner, scanned: &ScannedFile) -> Vec<Dep> {
    scanned
        .behavioral_imports()
        .map(|import| match &import.resolution.resolved_path {
            Some(p) if !import.resolution.is_external() => Dep::File(p.clone()),
            _ => Dep::Leaf(module_target(scanner, import)),
        })
        .collect()
}

struct Frame {
    path: PathBuf,
    deps: Vec<Dep>,
    next: usize,
    record: bool,
}

fn post_order(scanner: &FileScanner, root: &Path) -> Vec<String> {
    let mut order = Vec::new();
    let mut visited: FxHashSet<String> = FxHashSet::default();
    let frame = |path: &Path, is_root: bool| {
        let scanned = scanner.scan(path);
        Frame {
            path: path.to_path_buf(),
            deps: dependencies(scanner, &scanned),
            next: 0,
            record: is_root || scanned.parsed.has_own_effects,
        }
    };

    visited.insert(scanner.layout().relative_path(root));
    let mut stack = vec![frame(root, true)];
    loop {
        let next = match stack.last_mut() {
            None => break,
            Some(top) if top.next < top.deps.len() => {
                top.next += 1;
                Some(top.deps[top.next - 1].clone())
            }
            Some(_) => None,
        };
        match next {
            Some(Dep::File(path)) => {
                if visited.insert(scanner.layout().relative_path(&path)) {
                    stack.push(frame(&path, false));
                }
            }
            Some(Dep::Leaf(key)) => {
                if visited.insert(key.clone()) {
                    order.push(key);
                }
            }
            None => {
                if let Some(done) = stack.pop() {
                    if done.record {
                        order.push(scanner.layout().relative_path(&done.path));
                    }
                }
            }
        }
    }
    order
}

//! Module parser tests: statement forms, type-only handling, comments and
//! strings, malformed input, caching.

use std::path::Path;

use fence_analysis::parsers::{Binding, Dialect, ImportKind, ModuleParser};

// ─── Helpers ─────────────────────────────────────────────────────────

fn parse(src: &str) -> fence_analysis::parsers::ParsedModule {
    ModuleParser::new().parse(src, Path::new("mod.ts"))
}

// ─── Statement forms ─────────────────────────────────────────────────

#[test]
fn extracts_all_three_lists_in_source_order() {
    let m = parse(
        r#"
import a from './a';
import { b as bee, c } from "./b";
import * as ns from './ns';
import './side-effect';
import legacy = require('./legacy');
import type { T } from './types';
export * from './star';
export * as grouped from './grouped';
export { d, e as eh } from './d';
export type { U } from './u';
"#,
    );
    assert_eq!(m.value_imports, vec!["./a", "./b", "./ns", "./side-effect", "./legacy"]);
    assert_eq!(m.reexports, vec!["./star", "./grouped", "./d"]);
    assert_eq!(m.type_imports, vec!["./types", "./u"]);
    assert_eq!(m.records.len(), 10);
}

#[test]
fn records_bindings() {
    let m = parse("import def, { x as y, z } from './m';\nexport * as ns from './n';\nexport * from './s';\n");
    let import = &m.records[0];
    assert_eq!(import.kind, ImportKind::Value);
    assert_eq!(
        import.bindings.to_vec(),
        vec![Binding::new("default", "def"), Binding::new("x", "y"), Binding::new("z", "z")]
    );
    assert_eq!(m.records[1].bindings.to_vec(), vec![Binding::new("*", "ns")]);
    assert!(m.records[2].bindings[0].is_star());
}

#[test]
fn side_effect_import_has_no_bindings_but_counts() {
    let m = parse("import './polyfill';\n");
    assert_eq!(m.value_imports, vec!["./polyfill"]);
    assert!(m.records[0].bindings.is_empty());
}

#[test]
fn import_require_is_a_namespace_binding() {
    let m = parse("import fs = require('fs');\n");
    assert_eq!(m.value_imports, vec!["fs"]);
    assert_eq!(m.records[0].bindings.to_vec(), vec![Binding::new("*", "fs")]);
}

#[test]
fn inline_type_specifiers_are_not_runtime_bindings() {
    let m = parse("import { type A, b } from './m';\n");
    assert_eq!(m.value_imports, vec!["./m"]);
    assert_eq!(m.records[0].bindings.to_vec(), vec![Binding::new("b", "b")]);
    assert_eq!(m.records[0].inline_types.to_vec(), vec![Binding::new("A", "A")]);
    assert_eq!(m.records[0].type_bindings().count(), 1);
}

#[test]
fn all_inline_type_specifiers_make_a_type_only_statement() {
    let m = parse(
        "import { type A, type B as Bee } from './m';\nexport { type C } from './c';\nexport { type D, e } from './d';\n",
    );
    assert!(m.value_imports.is_empty());
    assert_eq!(m.type_imports, vec!["./m", "./c"]);
    assert_eq!(m.reexports, vec!["./d"]);

    assert_eq!(m.records[0].kind, ImportKind::TypeImport);
    assert_eq!(
        m.records[0].bindings.to_vec(),
        vec![Binding::new("A", "A"), Binding::new("B", "Bee")]
    );
    assert!(m.records[0].inline_types.is_empty());
    assert_eq!(m.records[1].kind, ImportKind::TypeReexport);
    assert_eq!(m.records[2].kind, ImportKind::Reexport);
    assert_eq!(m.records[2].bindings.to_vec(), vec![Binding::new("e", "e")]);
    assert_eq!(m.records[2].inline_types.to_vec(), vec![Binding::new("D", "D")]);
}

#[test]
fn side_effect_import_stays_a_value_import() {
    let m = parse("import {} from './m';\nimport './n';\n");
    assert_eq!(m.value_imports, vec!["./m", "./n"]);
}

// ─── Exports ─────────────────────────────────────────────────────────

#[test]
fn local_exports_and_aliases() {
    let m = parse(
        "export const a = 1, { b, c: see } = obj;\nexport function f() {}\nexport class K {}\nexport default 3;\nimport { x } from './x';\nexport { x, f as g };\n",
    );
    for name in ["a", "b", "see", "f", "K", "default"] {
        assert!(m.exports_locally(name), "missing local export {name}");
    }
    assert_eq!(m.export_aliases, vec![Binding::new("x", "x"), Binding::new("f", "g")]);
    assert!(m.import_binding("x").is_some());
}

#[test]
fn type_export_lists_are_kept_apart() {
    let m = parse(
        "import type { T } from './t';\ninterface Local {}\nexport type { T, Local as Shown };\nexport { type T as Again };\n",
    );
    assert!(m.export_aliases.is_empty());
    assert_eq!(
        m.type_export_aliases,
        vec![
            Binding::new("T", "T"),
            Binding::new("Local", "Shown"),
            Binding::new("T", "Again"),
        ]
    );
    assert!(!m.has_own_effects);
}

#[test]
fn own_effects() {
    assert!(!parse("import { x } from './x';\nexport { x };\nexport * from './y';\n").has_own_effects);
    assert!(!parse("export type A = number;\nexport interface B {}\n").has_own_effects);
    assert!(parse("import './x';\nconsole.log('hi');\n").has_own_effects);
    assert!(parse("export function f() {}\n").has_own_effects);
}

// ─── Robustness ──────────────────────────────────────────────────────

#[test]
fn comments_and_strings_are_ignored() {
    let m = parse(
        "// import a from './commented';\n/* export * from './block'; */\nconst s = \"import b from './in-string'\";\nconst t = `export * from './tpl'`;\n",
    );
    assert!(m.records.is_empty());
}

#[test]
fn dynamic_import_and_require_are_not_edges() {
    let m = parse("const a = await import('./lazy');\nconst b = require('./cjs');\n");
    assert!(m.records.is_empty());
}

#[test]
fn malformed_text_degrades_without_panicking() {
    let m = parse("import { from ;;; export {{{ ");
    assert!(m.has_errors);
    let m = parse("\u{0}\u{1}garbage ))) (((");
    assert!(m.value_imports.is_empty());
}

#[test]
fn broken_statement_does_not_hide_good_ones() {
    let m = parse("import { a } from './a';\nconst = ;\nimport { b } from './b';\n");
    assert!(m.value_imports.contains(&"./a".to_string()));
}

#[test]
fn tsx_dialect() {
    let parser = ModuleParser::new();
    let m = parser.parse(
        "import React from 'react';\nimport { Button } from './Button';\nexport const App = () => <Button label=\"x\" />;\n",
        Path::new("App.tsx"),
    );
    assert_eq!(m.value_imports, vec!["react", "./Button"]);
}

#[test]
fn unsupported_extension_is_empty() {
    let parser = ModuleParser::new();
    assert!(parser.try_parse("import a from './a';", Path::new("a.js")).is_err());
    assert!(parser.parse("import a from './a';", Path::new("a.js")).records.is_empty());
}

// ─── Determinism and caching ─────────────────────────────────────────

#[test]
fn same_bytes_same_result_and_cached() {
    let parser = ModuleParser::new();
    let src = "import { a } from './a';\nexport * from './b';\n";
    let first = parser.parse_with_dialect(src, Dialect::TypeScript).unwrap();
    let second = parser.parse_with_dialect(src, Dialect::TypeScript).unwrap();
    assert_eq!(first, second);
    assert_eq!(parser.cache_entry_count(), 1);
    parser.parse_with_dialect(src, Dialect::Tsx).unwrap();
    assert_eq!(parser.cache_entry_count(), 2);
}

#[test]
fn crlf_and_lf_parse_identically() {
    let lf = parse("import { a } from './a';\nexport * from './b';\n");
    let crlf = parse("import { a } from './a';\r\nexport * from './b';\r\n");
    assert_eq!(lf.value_imports, crlf.value_imports);
    assert_eq!(lf.reexports, crlf.reexports);
}

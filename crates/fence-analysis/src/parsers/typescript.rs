//! Tree-sitter extraction for TypeScript and TSX.
//!
//! Only top-level-style statements matter: `import …`, `export … from`,
//! `import x = require(…)` and local export lists. Dynamic `import()` and
//! `require()` calls are not part of the import graph. Statements that
//! contain a syntax error are skipped; the rest of the file still counts.

use std::borrow::Cow;
use std::ops::Range;

use fence_core::errors::ParseError;
use smallvec::SmallVec;
use tree_sitter::{Node, Parser};

use super::types::{Binding, Dialect, ImportKind, ImportRecord, ParsedModule};

/// Parse `source` and extract its module structure.
pub fn extract(source: &str, dialect: Dialect) -> Result<ParsedModule, ParseError> {
    let normalized = normalize_newlines(source);
    let bytes = normalized.as_bytes();

    let mut parser = Parser::new();
    parser
        .set_language(&dialect.ts_language())
        .map_err(|_e| ParseError::GrammarNotFound {
            language: dialect.name().to_string(),
        })?;
    let tree = parser
        .parse(bytes, None)
        .ok_or_else(|| ParseError::TreeSitterError {
            path: Default::default(),
            message: "tree-sitter returned None".to_string(),
        })?;

    let root = tree.root_node();
    let mut module = ParsedModule {
        has_errors: root.has_error(),
        ..Default::default()
    };

    // Explicit stack: deeply nested sources must not overflow.
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "import_statement" => {
                if !node.has_error() {
                    extract_import(node, bytes, &mut module);
                }
            }
            "export_statement" => {
                if !node.has_error() {
                    extract_export(node, bytes, &mut module);
                }
            }
            "comment" | "string" | "template_string" | "ERROR" => {}
            _ => {
                for i in (0..node.child_count()).rev() {
                    if let Some(child) = node.child(i) {
                        stack.push(child);
                    }
                }
            }
        }
    }

    module.has_own_effects = (0..root.named_child_count())
        .filter_map(|i| root.named_child(i))
        .any(has_own_effects);

    Ok(module)
}

/// CRLF and lone CR become LF. Spans index the normalized text.
pub fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

fn extract_import(node: Node, source: &[u8], module: &mut ParsedModule) {
    let type_only = has_token(&node, "type") || has_token(&node, "typeof");
    let mut bindings: SmallVec<[Binding; 4]> = SmallVec::new();
    let mut inline_types: SmallVec<[Binding; 4]> = SmallVec::new();
    let mut source_node = node.child_by_field_name("source");

    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else { continue };
        match child.kind() {
            "import_clause" => {
                collect_clause_bindings(child, source, &mut bindings, &mut inline_types)
            }
            "import_require_clause" => {
                if let Some(name) = first_child_of_kind(&child, "identifier") {
                    bindings.push(Binding::new("*", node_text(name, source)));
                }
                if source_node.is_none() {
                    source_node = child.child_by_field_name("source");
                }
            }
            _ => {}
        }
    }

    let Some((specifier, span)) = source_node.and_then(|s| string_contents(s, source)) else {
        return;
    };
    // `import { type A, type B }` is erased exactly like `import type`.
    let kind = if type_only || (bindings.is_empty() && !inline_types.is_empty()) {
        bindings.append(&mut inline_types);
        ImportKind::TypeImport
    } else {
        ImportKind::Value
    };
    push_record(module, node, specifier, kind, bindings, inline_types, span);
}

fn collect_clause_bindings(
    clause: Node,
    source: &[u8],
    out: &mut SmallVec<[Binding; 4]>,
    inline_types: &mut SmallVec<[Binding; 4]>,
) {
    for i in 0..clause.child_count() {
        let Some(child) = clause.child(i) else { continue };
        match child.kind() {
            "identifier" => out.push(Binding::new("default", node_text(child, source))),
            "namespace_import" => {
                if let Some(name) = first_child_of_kind(&child, "identifier") {
                    out.push(Binding::new("*", node_text(name, source)));
                }
            }
            "named_imports" => {
                for j in 0..child.named_child_count() {
                    let Some(spec) = child.named_child(j) else { continue };
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(binding) = specifier_binding(spec, source) else { continue };
                    if is_inline_type(&spec) {
                        inline_types.push(binding);
                    } else {
                        out.push(binding);
                    }
                }
            }
            _ => {}
        }
    }
}

fn extract_export(node: Node, source: &[u8], module: &mut ParsedModule) {
    let type_only = has_token(&node, "type");

    if let Some(source_node) = node.child_by_field_name("source") {
        let Some((specifier, span)) = string_contents(source_node, source) else {
            return;
        };
        let mut bindings: SmallVec<[Binding; 4]> = SmallVec::new();
        let mut inline_types: SmallVec<[Binding; 4]> = SmallVec::new();
        for i in 0..node.child_count() {
            let Some(child) = node.child(i) else { continue };
            match child.kind() {
                "*" if !child.is_named() => bindings.push(Binding::new("*", "*")),
                "namespace_export" => {
                    if let Some(name) = (0..child.named_child_count())
                        .filter_map(|j| child.named_child(j))
                        .next()
                    {
                        bindings.push(Binding::new("*", export_name(name, source)));
                    }
                }
                "export_clause" => {
                    for j in 0..child.named_child_count() {
                        let Some(spec) = child.named_child(j) else { continue };
                        if spec.kind() != "export_specifier" {
                            continue;
                        }
                        let Some(binding) = specifier_binding(spec, source) else { continue };
                        if is_inline_type(&spec) {
                            inline_types.push(binding);
                        } else {
                            bindings.push(binding);
                        }
                    }
                }
                _ => {}
            }
        }
        let kind = if type_only || (bindings.is_empty() && !inline_types.is_empty()) {
            bindings.append(&mut inline_types);
            ImportKind::TypeReexport
        } else {
            ImportKind::Reexport
        };
        push_record(module, node, specifier, kind, bindings, inline_types, span);
        return;
    }

    if has_token(&node, "default") || has_token(&node, "=") {
        module.local_exports.push("default".to_string());
        return;
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        declared_names(declaration, source, &mut module.local_exports);
        return;
    }

    for i in 0..node.named_child_count() {
        let Some(clause) = node.named_child(i) else { continue };
        if clause.kind() != "export_clause" {
            continue;
        }
        for j in 0..clause.named_child_count() {
            let Some(spec) = clause.named_child(j) else { continue };
            if spec.kind() != "export_specifier" {
                continue;
            }
            let Some(binding) = specifier_binding(spec, source) else { continue };
            if type_only || is_inline_type(&spec) {
                module.type_export_aliases.push(binding);
            } else {
                module.export_aliases.push(binding);
            }
        }
    }
}

/// Names bound by an exported declaration.
fn declared_names(declaration: Node, source: &[u8], out: &mut Vec<String>) {
    match declaration.kind() {
        "lexical_declaration" | "variable_declaration" => {
            for i in 0..declaration.named_child_count() {
                let Some(declarator) = declaration.named_child(i) else { continue };
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    pattern_names(name, source, out);
                }
            }
        }
        "ambient_declaration" => {
            for i in 0..declaration.named_child_count() {
                if let Some(inner) = declaration.named_child(i) {
                    declared_names(inner, source, out);
                }
            }
        }
        _ => {
            if let Some(name) = declaration.child_by_field_name("name") {
                out.push(node_text(name, source));
            }
        }
    }
}

/// Identifiers bound by a (possibly destructuring) pattern.
fn pattern_names(pattern: Node, source: &[u8], out: &mut Vec<String>) {
    let mut stack = vec![pattern];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                out.push(node_text(node, source));
            }
            "pair_pattern" => {
                if let Some(value) = node.child_by_field_name("value") {
                    stack.push(value);
                }
            }
            "assignment_pattern" => {
                if let Some(left) = node.child_by_field_name("left") {
                    stack.push(left);
                }
            }
            _ => {
                for i in (0..node.named_child_count()).rev() {
                    if let Some(child) = node.named_child(i) {
                        stack.push(child);
                    }
                }
            }
        }
    }
}

/// Whether a top-level statement runs code when the module is evaluated.
fn has_own_effects(statement: Node) -> bool {
    match statement.kind() {
        "comment"
        | "import_statement"
        | "empty_statement"
        | "interface_declaration"
        | "type_alias_declaration"
        | "ambient_declaration" => false,
        "export_statement" => {
            if statement.child_by_field_name("source").is_some() {
                return false;
            }
            match statement.child_by_field_name("declaration") {
                Some(decl) => !matches!(
                    decl.kind(),
                    "interface_declaration" | "type_alias_declaration" | "ambient_declaration"
                ),
                None => has_token(&statement, "default") || has_token(&statement, "="),
            }
        }
        _ => true,
    }
}

fn push_record(
    module: &mut ParsedModule,
    node: Node,
    specifier: String,
    kind: ImportKind,
    bindings: SmallVec<[Binding; 4]>,
    inline_types: SmallVec<[Binding; 4]>,
    span: Range<usize>,
) {
    match kind {
        ImportKind::Value => module.value_imports.push(specifier.clone()),
        ImportKind::Reexport => module.reexports.push(specifier.clone()),
        ImportKind::TypeImport | ImportKind::TypeReexport => {
            module.type_imports.push(specifier.clone())
        }
    }
    module.records.push(ImportRecord {
        specifier,
        kind,
        bindings,
        inline_types,
        span,
        line: node.start_position().row as u32 + 1,
    });
}

fn specifier_binding(spec: Node, source: &[u8]) -> Option<Binding> {
    let name = export_name(spec.child_by_field_name("name")?, source);
    let alias = spec
        .child_by_field_name("alias")
        .map(|a| export_name(a, source))
        .unwrap_or_else(|| name.clone());
    Some(Binding::new(name, alias))
}

/// Identifier text, or the contents of a string module-export name.
fn export_name(node: Node, source: &[u8]) -> String {
    if node.kind() == "string" {
        if let Some((text, _)) = string_contents(node, source) {
            return text;
        }
    }
    node_text(node, source)
}

/// Contents of a string literal, without quotes, plus its byte range.
fn string_contents(node: Node, source: &[u8]) -> Option<(String, Range<usize>)> {
    let start = node.start_byte();
    let end = node.end_byte();
    if end < start + 2 {
        return None;
    }
    let range = start + 1..end - 1;
    let text = std::str::from_utf8(source.get(range.clone())?).ok()?;
    Some((text.to_string(), range))
}

fn is_inline_type(spec: &Node) -> bool {
    has_token(spec, "type") || has_token(spec, "typeof")
}

/// True when `node` has an anonymous child token `token`.
fn has_token(node: &Node, token: &str) -> bool {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .any(|c| !c.is_named() && c.kind() == token)
}

fn first_child_of_kind<'t>(node: &Node<'t>, kind: &str) -> Option<Node<'t>> {
    (0..node.child_count())
        .filter_map(|i| node.child(i))
        .find(|c| c.kind() == kind)
}

fn node_text(node: Node, source: &[u8]) -> String {
    node.utf8_text(source).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> ParsedModule {
        extract(src, Dialect::TypeScript).unwrap()
    }

    #[test]
    fn span_points_inside_quotes() {
        let src = "import { a } from './alpha';\n";
        let m = parse(src);
        let record = &m.records[0];
        assert_eq!(&src[record.span.clone()], "./alpha");
        assert_eq!(record.line, 1);
    }

    #[test]
    fn crlf_is_normalized_before_spans() {
        let m = parse("// header\r\nimport x from 'y';\r\n");
        assert_eq!(m.records[0].line, 2);
        assert_eq!(m.records[0].span, 25..26);
    }

    #[test]
    fn declaration_only_module_has_no_own_effects() {
        let m = parse("export interface A { x: number }\nexport type B = string;\nexport * from './c';\n");
        assert!(!m.has_own_effects);
        let m = parse("export const a = 1;\n");
        assert!(m.has_own_effects);
    }
}

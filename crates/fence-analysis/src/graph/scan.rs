//! FileScanner — read, parse and resolve one file through a `SourceReader`.
//!
//! Scans are memoized per scanner, so a file visited by several passes of
//! one invocation is read once.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use fence_core::traits::{read_with_retry_outcome, ReadOutcome};
use fence_core::{FxHashMap, SourceReader};

use crate::parsers::{ImportKind, ModuleParser, ParsedModule};
use crate::resolver::{Resolution, SpecifierResolver};
use crate::workspace::WorkspaceLayout;

/// One resolved statement. `record` indexes `ParsedModule::records`.
#[derive(Debug, Clone)]
pub struct ResolvedImport {
    pub record: usize,
    pub specifier: String,
    pub kind: ImportKind,
    pub line: u32,
    pub resolution: Resolution,
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub package: Option<String>,
    pub exists: bool,
    /// Every read attempt failed; content is empty.
    pub degraded: bool,
    /// Newline-normalized text, empty when absent or unreadable.
    pub content: String,
    pub parsed: ParsedModule,
    pub imports: Vec<ResolvedImport>,
}

impl ScannedFile {
    pub fn behavioral_imports(&self) -> impl Iterator<Item = &ResolvedImport> {
        self.imports.iter().filter(|i| i.kind.is_behavioral())
    }
}

pub struct FileScanner<'a> {
    layout: &'a WorkspaceLayout,
    reader: &'a dyn SourceReader,
    parser: &'a ModuleParser,
    read_attempts: u32,
    memo: RefCell<FxHashMap<PathBuf, Rc<ScannedFile>>>,
}

impl<'a> FileScanner<'a> {
    pub fn new(
        layout: &'a WorkspaceLayout,
        reader: &'a dyn SourceReader,
        parser: &'a ModuleParser,
        read_attempts: u32,
    ) -> Self {
        Self {
            layout,
            reader,
            parser,
            read_attempts,
            memo: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn layout(&self) -> &'a WorkspaceLayout {
        self.layout
    }

    pub fn reader(&self) -> &'a dyn SourceReader {
        self.reader
    }

    pub fn resolver(&self) -> SpecifierResolver<'a> {
        SpecifierResolver::new(self.layout, self.reader)
    }

    pub fn scan(&self, path: &Path) -> Rc<ScannedFile> {
        if let Some(hit) = self.memo.borrow().get(path) {
            return Rc::clone(hit);
        }
        let scanned = Rc::new(self.scan_uncached(path));
        self.memo
            .borrow_mut()
            .insert(path.to_path_buf(), Rc::clone(&scanned));
        scanned
    }

    fn scan_uncached(&self, path: &Path) -> ScannedFile {
        let package = self.layout.package_for_path(path).map(|p| p.name.clone());
        let (raw, degraded) = match read_with_retry_outcome(self.reader, path, self.read_attempts) {
            ReadOutcome::Content(raw) => (raw, false),
            ReadOutcome::Degraded => (String::new(), true),
            ReadOutcome::Absent => {
                return ScannedFile {
                    path: path.to_path_buf(),
                    package,
                    exists: false,
                    degraded: false,
                    content: String::new(),
                    parsed: ParsedModule::default(),
                    imports: Vec::new(),
                };
            }
        };
        let content = crate::parsers::typescript::normalize_newlines(&raw).into_owned();
        let parsed = self.parser.parse(&content, path);
        let resolver = self.resolver();
        let imports = parsed
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| ResolvedImport {
                record: index,
                specifier: record.specifier.clone(),
                kind: record.kind,
                line: record.line,
                resolution: resolver.resolve(path, &record.specifier),
            })
            .collect();
        ScannedFile {
            path: path.to_path_buf(),
            package,
            exists: true,
            degraded,
            content,
            parsed,
            imports,
        }
    }
}

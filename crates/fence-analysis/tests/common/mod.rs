//! Shared fixtures: a temporary monorepo with packages under
//! `packages/<name>/src`, namespace `@acme`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use fence_analysis::detection::{DiffEntry, DiffStatus};
use fence_analysis::workspace::{PackageLayout, WorkspaceLayout};
use tempfile::TempDir;

pub struct Repo {
    dir: TempDir,
}

impl Repo {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel)).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Layout with `packages/<name>` for each name.
    pub fn layout(&self, packages: &[&str]) -> WorkspaceLayout {
        let mut layout = WorkspaceLayout::new(self.root(), "@acme");
        for name in packages {
            let root = self.path(&format!("packages/{name}"));
            layout
                .add_package(PackageLayout::new(*name, &root, "src", "index.ts"))
                .unwrap();
        }
        layout
    }

    /// Every `.ts`/`.tsx` file under the repo, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        let mut stack = vec![self.root().to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                if path.is_dir() {
                    stack.push(path);
                } else if matches!(path.extension().and_then(|e| e.to_str()), Some("ts" | "tsx")) {
                    out.push(path);
                }
            }
        }
        out.sort();
        out
    }
}

pub fn diff(entries: &[(DiffStatus, &str)]) -> Vec<DiffEntry> {
    entries
        .iter()
        .map(|(status, path)| DiffEntry::new(*status, *path))
        .collect()
}

/// alpha, beta and gamma with public entries; beta has a private internal
/// module and gamma exposes `util` through its entry.
pub fn three_packages() -> Repo {
    let repo = Repo::new();
    repo.write("packages/alpha/src/index.ts", "export * from './feature';\n");
    repo.write(
        "packages/alpha/src/feature.ts",
        "import { helper } from '@acme/beta';\nexport const feature = () => helper();\n",
    );
    repo.write(
        "packages/beta/src/index.ts",
        "export { helper } from './helper';\nexport type { Shape } from './shapes';\n",
    );
    repo.write("packages/beta/src/helper.ts", "export function helper() { return 1; }\n");
    repo.write("packages/beta/src/shapes.ts", "export interface Shape { w: number }\n");
    repo.write("packages/beta/src/internal/secret.ts", "export const secret = 42;\n");
    repo.write("packages/gamma/src/index.ts", "export * from './util';\n");
    repo.write("packages/gamma/src/util.ts", "export const util = 'u';\n");
    repo
}

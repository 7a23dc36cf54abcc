//! Shared helpers for end-to-end build tests
//!
//! A `Workspace` is a temp directory holding input files, an annotations
//! tree and a generated YAML config.

use compendium::compendium::{CompendiumRecord, SynonymRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `rel`, creating parent directories
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write input file");
        path
    }

    /// Write `build.yaml`; paths inside it are relative to the workspace
    pub fn config(&self, yaml: &str) -> PathBuf {
        self.file("build.yaml", yaml)
    }

    pub fn compendium(&self, bare_type: &str) -> Vec<CompendiumRecord> {
        read_lines(&self.root().join("out/compendia").join(format!("{}.txt", bare_type)))
    }

    pub fn synonyms(&self, bare_type: &str) -> Vec<SynonymRecord> {
        read_lines(&self.root().join("out/synonyms").join(format!("{}.txt", bare_type)))
    }

    pub fn has_output(&self, kind: &str, bare_type: &str) -> bool {
        self.root()
            .join("out")
            .join(kind)
            .join(format!("{}.txt", bare_type))
            .exists()
    }
}

fn read_lines<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect()
}

/// Identifiers of a record, in written order
pub fn ids(record: &CompendiumRecord) -> Vec<&str> {
    record.identifiers.iter().map(|i| i.identifier.as_str()).collect()
}

//! Annotation store backed by per-prefix TSV tables

use super::traits::AnnotationStore;
use crate::curie::Identifier;
use crate::error::CompendiumResult;
use crate::tsv::{for_each_row, parse_error};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

const OBO_PURL: &str = "http://purl.obolibrary.org/obo/";

/// Tables for one prefix, loaded together on first use
#[derive(Debug, Default)]
struct PrefixTables {
    labels: HashMap<Identifier, String>,
    synonyms: HashMap<Identifier, Vec<String>>,
    descriptions: HashMap<Identifier, Vec<String>>,
    taxa: HashMap<Identifier, Vec<String>>,
}

/// Annotations read from an annotation directory plus IC and property files.
///
/// Directory layout is `<root>/<PREFIX>/{labels,synonyms,descriptions,taxa}`;
/// missing files mean no annotations of that kind. Prefix tables load lazily
/// the first time an identifier with that prefix is looked up. The IC table
/// and property files load eagerly.
#[derive(Debug, Default)]
pub struct FileAnnotations {
    root: Option<PathBuf>,
    tables: RefCell<HashMap<String, Rc<PrefixTables>>>,
    information_content: HashMap<Identifier, f64>,
    properties: HashMap<(Identifier, String), Vec<String>>,
}

impl FileAnnotations {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    /// Load an IC table: identifier (CURIE or OBO PURL) first, value last.
    pub fn with_information_content(mut self, path: &Path) -> CompendiumResult<Self> {
        let ic = &mut self.information_content;
        let rows = for_each_row(path, 2, |line, fields| {
            let id = curie_from_term(fields[0]);
            let raw = fields[fields.len() - 1];
            let value = parse_literal_float(raw)
                .ok_or_else(|| parse_error(path, line, format!("not a number: {}", raw)))?;
            ic.entry(id)
                .and_modify(|v| *v = v.min(value))
                .or_insert(value);
            Ok(())
        })?;
        debug!(path = %path.display(), rows, "loaded information content");
        Ok(self)
    }

    /// Load an `identifier\tpredicate\tvalue` property file, keeping order
    pub fn with_properties(mut self, path: &Path) -> CompendiumResult<Self> {
        let props = &mut self.properties;
        let rows = for_each_row(path, 3, |_, fields| {
            let values = props
                .entry((Identifier::new(fields[0]), fields[1].to_string()))
                .or_default();
            if !values.iter().any(|v| v == fields[2]) {
                values.push(fields[2].to_string());
            }
            Ok(())
        })?;
        debug!(path = %path.display(), rows, "loaded properties");
        Ok(self)
    }

    fn tables_for(&self, id: &Identifier) -> CompendiumResult<Rc<PrefixTables>> {
        let prefix = id.prefix();
        if let Some(tables) = self.tables.borrow().get(prefix) {
            return Ok(Rc::clone(tables));
        }

        let tables = Rc::new(match &self.root {
            Some(root) => load_prefix(&root.join(prefix))?,
            None => PrefixTables::default(),
        });
        self.tables
            .borrow_mut()
            .insert(prefix.to_string(), Rc::clone(&tables));
        Ok(tables)
    }
}

fn load_prefix(dir: &Path) -> CompendiumResult<PrefixTables> {
    let mut tables = PrefixTables::default();

    let labels = dir.join("labels");
    if labels.exists() {
        for_each_row(&labels, 2, |_, fields| {
            tables
                .labels
                .entry(Identifier::new(fields[0]))
                .or_insert_with(|| fields[1].to_string());
            Ok(())
        })?;
    }

    // id \t predicate \t synonym, or id \t synonym
    let synonyms = dir.join("synonyms");
    if synonyms.exists() {
        for_each_row(&synonyms, 2, |_, fields| {
            tables
                .synonyms
                .entry(Identifier::new(fields[0]))
                .or_default()
                .push(fields[fields.len() - 1].to_string());
            Ok(())
        })?;
    }

    for (name, map) in [
        ("descriptions", &mut tables.descriptions),
        ("taxa", &mut tables.taxa),
    ] {
        let path = dir.join(name);
        if path.exists() {
            for_each_row(&path, 2, |_, fields| {
                map.entry(Identifier::new(fields[0]))
                    .or_default()
                    .push(fields[1].to_string());
                Ok(())
            })?;
        }
    }

    debug!(
        dir = %dir.display(),
        labels = tables.labels.len(),
        synonyms = tables.synonyms.len(),
        "loaded prefix tables"
    );
    Ok(tables)
}

/// `<http://purl.obolibrary.org/obo/MONDO_0000001>` → `MONDO:0000001`
fn curie_from_term(term: &str) -> Identifier {
    let bare = term.trim_start_matches('<').trim_end_matches('>');
    match bare.strip_prefix(OBO_PURL) {
        Some(local) => match local.split_once('_') {
            Some((prefix, rest)) => Identifier::new(format!("{}:{}", prefix, rest)),
            None => Identifier::new(local),
        },
        None => Identifier::new(bare),
    }
}

/// Accepts `12.5`, `"12.5"` and `"12.5"^^<xsd:float>` forms
fn parse_literal_float(raw: &str) -> Option<f64> {
    let value = raw.split("^^").next().unwrap_or(raw);
    value.trim().trim_matches('"').parse().ok()
}

impl AnnotationStore for FileAnnotations {
    fn label(&self, id: &Identifier) -> CompendiumResult<Option<String>> {
        Ok(self.tables_for(id)?.labels.get(id).cloned())
    }

    fn synonyms(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self.tables_for(id)?.synonyms.get(id).cloned().unwrap_or_default())
    }

    fn descriptions(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self
            .tables_for(id)?
            .descriptions
            .get(id)
            .cloned()
            .unwrap_or_default())
    }

    fn taxa(&self, id: &Identifier) -> CompendiumResult<Vec<String>> {
        Ok(self.tables_for(id)?.taxa.get(id).cloned().unwrap_or_default())
    }

    fn information_content(&self, id: &Identifier) -> CompendiumResult<Option<f64>> {
        Ok(self.information_content.get(id).copied())
    }

    fn properties(&self, id: &Identifier, predicate: &str) -> CompendiumResult<Vec<String>> {
        Ok(self
            .properties
            .get(&(id.clone(), predicate.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

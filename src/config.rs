//! YAML build configuration

use crate::biolink::{BiolinkModel, BiolinkType};
use crate::compendium::naming::{NamingConfig, DEFAULT_DEMOTE_LABELS_LONGER_THAN};
use crate::curie::PrefixNormalizer;
use crate::error::{CompendiumError, CompendiumResult};
use crate::glom::{CloseMatchTable, GlomPolicy};
use crate::typing::{ChemicalPolicy, TrustedPrefixPolicy, TypingPolicy};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

fn default_prefix_synonyms() -> BTreeMap<String, String> {
    BTreeMap::from([("MSH".to_string(), "MESH".to_string())])
}

fn default_demote_labels_longer_than() -> usize {
    DEFAULT_DEMOTE_LABELS_LONGER_THAN
}

/// A full build: shared lookups plus one or more compendium definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Receives `compendia/<Type>.txt` and `synonyms/<Type>.txt`
    pub output_dir: PathBuf,
    /// Per-prefix label/synonym/description/taxa tables
    #[serde(default)]
    pub annotations_dir: Option<PathBuf>,
    #[serde(default)]
    pub information_content: Option<PathBuf>,
    /// `identifier\tpredicate\tvalue` files
    #[serde(default)]
    pub properties: Vec<PathBuf>,
    /// Replaces the embedded Biolink subset
    #[serde(default)]
    pub biolink_model: Option<PathBuf>,
    #[serde(default = "default_prefix_synonyms")]
    pub prefix_synonyms: BTreeMap<String, String>,
    #[serde(default = "default_demote_labels_longer_than")]
    pub demote_labels_longer_than: usize,
    #[serde(default)]
    pub preferred_name_boost_prefixes: BTreeMap<String, Vec<String>>,
    pub compendia: Vec<CompendiumDef>,
}

/// Which typing policy a compendium uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    TrustedPrefix,
    Chemical,
}

/// One compendium: its inputs and typing rules
#[derive(Debug, Clone, Deserialize)]
pub struct CompendiumDef {
    pub name: String,
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub trusted_prefixes: Vec<String>,
    /// Most specific first; breaks majority-vote ties
    #[serde(default)]
    pub type_priority: Vec<String>,
    #[serde(default)]
    pub fallback_type: Option<String>,
    /// `identifier[\tBiolinkType]` files
    #[serde(default)]
    pub identifier_files: Vec<PathBuf>,
    /// Applied in order
    #[serde(default)]
    pub concords: Vec<ConcordDef>,
}

/// A relationship file and the constraints its pairs merge under
#[derive(Debug, Clone, Deserialize)]
pub struct ConcordDef {
    pub file: PathBuf,
    /// Only pairs with one of these relations are used; empty means all
    #[serde(default)]
    pub relations: Vec<String>,
    #[serde(default)]
    pub unique_prefixes: Vec<String>,
    /// Close-match triple files
    #[serde(default)]
    pub close_matches: Vec<PathBuf>,
    #[serde(default)]
    pub preferred_prefix: Option<String>,
}

impl BuildConfig {
    /// Parse a config file; relative paths resolve against its directory
    pub fn load(path: &Path) -> CompendiumResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&yaml)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> CompendiumResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CompendiumResult<()> {
        if self.compendia.is_empty() {
            return Err(CompendiumError::Config("no compendia defined".into()));
        }
        let mut names = HashSet::new();
        for def in &self.compendia {
            if !names.insert(def.name.as_str()) {
                return Err(CompendiumError::Config(format!(
                    "duplicate compendium name: {}",
                    def.name
                )));
            }
            if def.identifier_files.is_empty() && def.concords.is_empty() {
                return Err(CompendiumError::Config(format!(
                    "compendium {} has no inputs",
                    def.name
                )));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        let fix = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        fix(&mut self.output_dir);
        self.annotations_dir.iter_mut().for_each(fix);
        self.information_content.iter_mut().for_each(fix);
        self.properties.iter_mut().for_each(fix);
        self.biolink_model.iter_mut().for_each(fix);
        for def in &mut self.compendia {
            def.identifier_files.iter_mut().for_each(fix);
            for concord in &mut def.concords {
                fix(&mut concord.file);
                concord.close_matches.iter_mut().for_each(fix);
            }
        }
    }

    pub fn biolink_model(&self) -> CompendiumResult<BiolinkModel> {
        match &self.biolink_model {
            Some(path) => BiolinkModel::load(path),
            None => BiolinkModel::embedded(),
        }
    }

    pub fn naming(&self) -> NamingConfig {
        NamingConfig {
            boost_prefixes: self
                .preferred_name_boost_prefixes
                .iter()
                .map(|(t, prefixes)| (BiolinkType::new(t.as_str()), prefixes.clone()))
                .collect(),
            demote_labels_longer_than: self.demote_labels_longer_than,
        }
    }

    /// Canonical spellings for every prefix the compendia can emit, plus
    /// the configured synonyms.
    pub fn normalizer(&self, model: &BiolinkModel) -> CompendiumResult<PrefixNormalizer> {
        let mut normalizer = PrefixNormalizer::new();
        for def in &self.compendia {
            for t in def.declared_types() {
                normalizer = normalizer.with_canonicals(model.id_prefixes(&t)?.iter().cloned());
            }
            normalizer = normalizer.with_canonicals(def.trusted_prefixes.iter().cloned());
        }
        for (synonym, canonical) in &self.prefix_synonyms {
            normalizer = normalizer.with_synonym(synonym, canonical.as_str());
        }
        Ok(normalizer)
    }
}

impl CompendiumDef {
    pub fn typing_policy(&self) -> Box<dyn TypingPolicy> {
        let mut base = TrustedPrefixPolicy::new(self.trusted_prefixes.iter().cloned())
            .with_type_priority(self.type_priority.iter().map(|t| BiolinkType::new(t.as_str())));
        if let Some(fallback) = &self.fallback_type {
            base = base.with_fallback(fallback.as_str());
        }
        match self.policy {
            PolicyKind::TrustedPrefix => Box::new(base),
            PolicyKind::Chemical => Box::new(ChemicalPolicy::new(base)),
        }
    }

    /// Types named by this definition's priority list and fallback
    fn declared_types(&self) -> Vec<BiolinkType> {
        self.type_priority
            .iter()
            .chain(self.fallback_type.iter())
            .map(|t| BiolinkType::new(t.as_str()))
            .collect()
    }
}

impl ConcordDef {
    pub fn glom_policy(&self, close_matches: CloseMatchTable) -> GlomPolicy {
        let mut policy = GlomPolicy::new()
            .with_unique_prefixes(self.unique_prefixes.iter().cloned())
            .with_close_matches(close_matches);
        if let Some(p) = &self.preferred_prefix {
            policy = policy.with_preferred_prefix(p.as_str());
        }
        policy
    }
}

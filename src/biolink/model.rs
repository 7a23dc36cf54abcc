//! Biolink class hierarchy and per-class identifier prefixes

use crate::error::{CompendiumError, CompendiumResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const EMBEDDED_MODEL: &str = include_str!("biolink_model.yaml");

/// A Biolink class CURIE such as `biolink:Disease`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiolinkType(String);

impl BiolinkType {
    pub fn new(curie: impl Into<String>) -> Self {
        Self(curie.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The class name without the `biolink:` prefix
    pub fn bare_name(&self) -> &str {
        self.0.strip_prefix("biolink:").unwrap_or(&self.0)
    }
}

impl std::fmt::Display for BiolinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for BiolinkType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for BiolinkType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Well-known Biolink classes
pub mod types {
    pub const NAMED_THING: &str = "biolink:NamedThing";
    pub const CHEMICAL_ENTITY: &str = "biolink:ChemicalEntity";
    pub const MOLECULAR_ENTITY: &str = "biolink:MolecularEntity";
    pub const SMALL_MOLECULE: &str = "biolink:SmallMolecule";
    pub const MOLECULAR_MIXTURE: &str = "biolink:MolecularMixture";
    pub const CHEMICAL_MIXTURE: &str = "biolink:ChemicalMixture";
    pub const POLYPEPTIDE: &str = "biolink:Polypeptide";
    pub const DISEASE: &str = "biolink:Disease";
    pub const PHENOTYPIC_FEATURE: &str = "biolink:PhenotypicFeature";
    pub const GENE: &str = "biolink:Gene";
    pub const PROTEIN: &str = "biolink:Protein";
    pub const BIOLOGICAL_PROCESS: &str = "biolink:BiologicalProcess";
    pub const MOLECULAR_ACTIVITY: &str = "biolink:MolecularActivity";
    pub const PATHWAY: &str = "biolink:Pathway";
    pub const ANATOMICAL_ENTITY: &str = "biolink:AnatomicalEntity";
    pub const CELLULAR_COMPONENT: &str = "biolink:CellularComponent";
    pub const CELL: &str = "biolink:Cell";
    pub const ORGANISM_TAXON: &str = "biolink:OrganismTaxon";
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ClassDef {
    #[serde(default)]
    is_a: Option<String>,
    #[serde(default)]
    mixins: Vec<String>,
    #[serde(default)]
    id_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModelFile {
    classes: BTreeMap<String, ClassDef>,
}

/// Class hierarchy used for ancestor lists and prefix priorities.
#[derive(Debug, Clone)]
pub struct BiolinkModel {
    classes: BTreeMap<String, ClassDef>,
}

impl BiolinkModel {
    /// The subset of the model shipped with this crate
    pub fn embedded() -> CompendiumResult<Self> {
        Self::from_yaml(EMBEDDED_MODEL)
    }

    pub fn from_yaml(yaml: &str) -> CompendiumResult<Self> {
        let file: ModelFile = serde_yaml::from_str(yaml)?;
        Ok(Self {
            classes: file.classes,
        })
    }

    pub fn load(path: &Path) -> CompendiumResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn contains(&self, biolink_type: &BiolinkType) -> bool {
        self.classes.contains_key(biolink_type.as_str())
    }

    /// Ordered prefixes acceptable for `biolink_type`
    pub fn id_prefixes(&self, biolink_type: &BiolinkType) -> CompendiumResult<&[String]> {
        self.classes
            .get(biolink_type.as_str())
            .map(|c| c.id_prefixes.as_slice())
            .ok_or_else(|| CompendiumError::UnknownType(biolink_type.to_string()))
    }

    /// `biolink_type` itself, then its `is_a` chain, then mixins and their
    /// chains, without repeats.
    pub fn ancestors(&self, biolink_type: &BiolinkType) -> CompendiumResult<Vec<BiolinkType>> {
        if !self.contains(biolink_type) {
            return Err(CompendiumError::UnknownType(biolink_type.to_string()));
        }

        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut mixin_queue: Vec<String> = Vec::new();

        self.walk_is_a(biolink_type.as_str(), &mut out, &mut seen, &mut mixin_queue);
        let mut i = 0;
        while i < mixin_queue.len() {
            let mixin = mixin_queue[i].clone();
            self.walk_is_a(&mixin, &mut out, &mut seen, &mut mixin_queue);
            i += 1;
        }

        Ok(out)
    }

    fn walk_is_a(
        &self,
        start: &str,
        out: &mut Vec<BiolinkType>,
        seen: &mut HashSet<String>,
        mixin_queue: &mut Vec<String>,
    ) {
        let mut current = Some(start.to_string());
        while let Some(name) = current {
            if !seen.insert(name.clone()) {
                break;
            }
            let class = self.classes.get(&name);
            out.push(BiolinkType::new(name));
            if let Some(class) = class {
                mixin_queue.extend(class.mixins.iter().cloned());
                current = class.is_a.clone();
            } else {
                current = None;
            }
        }
    }
}

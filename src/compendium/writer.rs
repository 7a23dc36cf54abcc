//! CompendiumWriter: serializes assembled nodes as JSON lines

use super::naming::{self, NamingConfig};
use super::records::{CompendiumRecord, RecordIdentifier, SynonymRecord};
use crate::curie::{taxon_order, Identifier};
use crate::error::CompendiumResult;
use crate::node::AssembledNode;
use crate::store::{AnnotationStore, HAS_ALTERNATIVE_ID};
use std::collections::{BTreeSet, HashSet};
use std::io::Write;
use tracing::debug;

/// What `write_node` produced for one node
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOutcome {
    pub preferred_name: Option<String>,
    pub synonyms_written: bool,
    /// Identifiers in the record, alternatives included
    pub identifier_count: usize,
}

/// Running totals for one writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub records: usize,
    pub synonym_records: usize,
    pub missing_preferred_name: usize,
}

/// Writes one compendium line per node and, when the node has a preferred
/// name, one synonym line.
pub struct CompendiumWriter<'a, C: Write, S: Write> {
    compendium: C,
    synonyms: S,
    store: &'a dyn AnnotationStore,
    naming: &'a NamingConfig,
    stats: WriterStats,
}

impl<'a, C: Write, S: Write> CompendiumWriter<'a, C, S> {
    pub fn new(
        compendium: C,
        synonyms: S,
        store: &'a dyn AnnotationStore,
        naming: &'a NamingConfig,
    ) -> Self {
        Self {
            compendium,
            synonyms,
            store,
            naming,
            stats: WriterStats::default(),
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    pub fn write_node(&mut self, node: &AssembledNode) -> CompendiumResult<WriteOutcome> {
        let ic = naming::information_content(node, self.store)?;
        let preferred_name = naming::preferred_name(node, self.naming);

        let members = self.expand_alternatives(node)?;
        let mut identifiers = Vec::with_capacity(members.len());
        let mut clique_taxa: BTreeSet<String> = BTreeSet::new();
        for (id, label) in &members {
            let mut descriptions = dedup(self.store.descriptions(id)?);
            descriptions.sort_by_key(|d| d.chars().count());
            let taxa = sorted_taxa(self.store.taxa(id)?);
            clique_taxa.extend(taxa.iter().cloned());
            identifiers.push(RecordIdentifier {
                identifier: id.to_string(),
                label: label.clone(),
                descriptions,
                taxa,
            });
        }
        let clique_taxa = sorted_taxa(clique_taxa.into_iter().collect());

        let record = CompendiumRecord {
            biolink_type: node.biolink_type.to_string(),
            ic,
            preferred_name: preferred_name.clone().unwrap_or_default(),
            taxa: clique_taxa.clone(),
            identifiers,
        };
        serde_json::to_writer(&mut self.compendium, &record)?;
        self.compendium.write_all(b"\n")?;
        self.stats.records += 1;

        let Some(name) = preferred_name.clone() else {
            debug!(curie = %node.canonical(), "no preferred name; skipping synonym record");
            self.stats.missing_preferred_name += 1;
            return Ok(WriteOutcome {
                preferred_name: None,
                synonyms_written: false,
                identifier_count: members.len(),
            });
        };

        let mut names: BTreeSet<String> = BTreeSet::new();
        for (id, label) in &members {
            names.extend(label.iter().cloned());
            names.extend(self.store.synonyms(id)?);
        }
        names.insert(name.clone());
        let mut names: Vec<String> = names.into_iter().filter(|n| !n.trim().is_empty()).collect();
        names.sort_by(|a, b| {
            a.chars()
                .count()
                .cmp(&b.chars().count())
                .then_with(|| a.cmp(b))
        });

        let synonym = SynonymRecord {
            curie: node.canonical().to_string(),
            shortest_name_length: names.first().map_or(0, |n| n.chars().count()),
            names,
            types: node.ancestors.iter().map(|t| t.bare_name().to_string()).collect(),
            preferred_name: name,
            clique_identifier_count: members.len(),
            taxa: clique_taxa,
        };
        serde_json::to_writer(&mut self.synonyms, &synonym)?;
        self.synonyms.write_all(b"\n")?;
        self.stats.synonym_records += 1;

        Ok(WriteOutcome {
            preferred_name,
            synonyms_written: true,
            identifier_count: members.len(),
        })
    }

    /// Flush both sinks and return the totals
    pub fn finish(mut self) -> CompendiumResult<WriterStats> {
        self.compendium.flush()?;
        self.synonyms.flush()?;
        Ok(self.stats)
    }

    /// Node identifiers with their alternative ids inserted right after the
    /// identifier that lists them.
    fn expand_alternatives(
        &self,
        node: &AssembledNode,
    ) -> CompendiumResult<Vec<(Identifier, Option<String>)>> {
        let mut seen: HashSet<Identifier> = node
            .identifiers
            .iter()
            .map(|n| n.identifier.clone())
            .collect();
        let mut out = Vec::with_capacity(node.identifiers.len());

        for n in &node.identifiers {
            out.push((n.identifier.clone(), n.label.clone()));
            for alt in self.store.properties(&n.identifier, HAS_ALTERNATIVE_ID)? {
                let alt = Identifier::new(alt);
                if !seen.insert(alt.clone()) {
                    continue;
                }
                let label = self.store.label(&alt)?.filter(|l| !l.trim().is_empty());
                out.push((alt, label));
            }
        }
        Ok(out)
    }
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|v| seen.insert(v.clone())).collect()
}

fn sorted_taxa(taxa: Vec<String>) -> Vec<String> {
    let mut taxa = dedup(taxa);
    taxa.sort_by(|a, b| taxon_order(a, b));
    taxa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biolink::{types, BiolinkType};
    use crate::node::NodeIdentifier;
    use crate::store::InMemoryAnnotations;

    fn water() -> AssembledNode {
        AssembledNode {
            identifiers: vec![
                NodeIdentifier {
                    identifier: Identifier::new("CHEBI:15377"),
                    label: Some("water".into()),
                },
                NodeIdentifier {
                    identifier: Identifier::new("MESH:D014867"),
                    label: Some("Water".into()),
                },
            ],
            label: Some("water".into()),
            biolink_type: BiolinkType::new(types::SMALL_MOLECULE),
            ancestors: vec![
                BiolinkType::new(types::SMALL_MOLECULE),
                BiolinkType::new(types::MOLECULAR_ENTITY),
            ],
        }
    }

    fn lines(buf: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(buf.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn writes_compendium_and_synonym_lines() {
        let store = InMemoryAnnotations::new()
            .with_synonym("CHEBI:15377", "dihydrogen oxide")
            .with_synonym("CHEBI:15377", "H2O")
            .with_description("CHEBI:15377", "An oxygen hydride consisting of an oxygen atom")
            .with_description("CHEBI:15377", "A liquid")
            .with_taxon("MESH:D014867", "NCBITaxon:9606")
            .with_taxon("CHEBI:15377", "NCBITaxon:10090")
            .with_taxon("CHEBI:15377", "NCBITaxon:9606")
            .with_information_content("MESH:D014867", 42.0);
        let naming = NamingConfig::default();
        let mut comp = Vec::new();
        let mut syn = Vec::new();

        let outcome = {
            let mut writer = CompendiumWriter::new(&mut comp, &mut syn, &store, &naming);
            let outcome = writer.write_node(&water()).unwrap();
            let stats = writer.finish().unwrap();
            assert_eq!(stats.records, 1);
            assert_eq!(stats.synonym_records, 1);
            outcome
        };
        assert_eq!(outcome.preferred_name.as_deref(), Some("water"));

        let comp = lines(&comp);
        assert_eq!(comp.len(), 1);
        let rec: CompendiumRecord = serde_json::from_value(comp[0].clone()).unwrap();
        assert_eq!(rec.biolink_type, "biolink:SmallMolecule");
        assert_eq!(rec.ic, Some(42.0));
        assert_eq!(rec.taxa, vec!["NCBITaxon:9606", "NCBITaxon:10090"]);
        assert_eq!(rec.identifiers[0].descriptions[0], "A liquid");
        assert_eq!(rec.identifiers[0].taxa, vec!["NCBITaxon:9606", "NCBITaxon:10090"]);

        let syn = lines(&syn);
        let s: SynonymRecord = serde_json::from_value(syn[0].clone()).unwrap();
        assert_eq!(s.curie, "CHEBI:15377");
        assert_eq!(s.names, vec!["H2O", "Water", "water", "dihydrogen oxide"]);
        assert_eq!(s.shortest_name_length, 3);
        assert_eq!(s.types, vec!["SmallMolecule", "MolecularEntity"]);
        assert_eq!(s.clique_identifier_count, 2);
    }

    #[test]
    fn alternative_ids_follow_their_source() {
        let store = InMemoryAnnotations::new()
            .with_property("CHEBI:15377", HAS_ALTERNATIVE_ID, "CHEBI:10743")
            .with_property("CHEBI:15377", HAS_ALTERNATIVE_ID, "MESH:D014867")
            .with_property("CHEBI:15377", HAS_ALTERNATIVE_ID, "CHEBI:5585")
            .with_label("CHEBI:10743", "oxidane")
            .with_description("CHEBI:10743", "obsolete water entry");
        let naming = NamingConfig::default();
        let mut comp = Vec::new();
        let mut syn = Vec::new();
        let mut writer = CompendiumWriter::new(&mut comp, &mut syn, &store, &naming);
        let outcome = writer.write_node(&water()).unwrap();
        drop(writer);
        assert_eq!(outcome.identifier_count, 4);

        let rec: CompendiumRecord = serde_json::from_value(lines(&comp)[0].clone()).unwrap();
        let ids: Vec<&str> = rec.identifiers.iter().map(|i| i.identifier.as_str()).collect();
        assert_eq!(ids, vec!["CHEBI:15377", "CHEBI:10743", "CHEBI:5585", "MESH:D014867"]);
        assert_eq!(rec.identifiers[1].label.as_deref(), Some("oxidane"));
        assert_eq!(rec.identifiers[1].descriptions, vec!["obsolete water entry"]);
        assert_eq!(rec.identifiers[2].label, None);
    }

    #[test]
    fn missing_name_skips_synonym_record() {
        let mut node = water();
        for n in &mut node.identifiers {
            n.label = None;
        }
        let store = InMemoryAnnotations::new();
        let naming = NamingConfig::default();
        let mut comp = Vec::new();
        let mut syn = Vec::new();
        let mut writer = CompendiumWriter::new(&mut comp, &mut syn, &store, &naming);
        let outcome = writer.write_node(&node).unwrap();
        let stats = writer.finish().unwrap();

        assert!(!outcome.synonyms_written);
        assert_eq!(stats.missing_preferred_name, 1);
        assert!(syn.is_empty());
        let rec: CompendiumRecord = serde_json::from_value(lines(&comp)[0].clone()).unwrap();
        assert_eq!(rec.preferred_name, "");
    }
}

//! CompendiumBuilder: runs a configured build end to end

use super::io::{read_close_matches, read_concord_file, read_identifier_file};
use crate::biolink::{BiolinkModel, BiolinkType};
use crate::compendium::{CompendiumWriter, NamingConfig};
use crate::config::{BuildConfig, CompendiumDef};
use crate::curie::{member_order, Identifier, InputIdentifier, PrefixNormalizer};
use crate::error::CompendiumResult;
use crate::glom::{GlomIndex, GlomPolicy, MergeStats};
use crate::node::NodeFactory;
use crate::store::{AnnotationStore, FileAnnotations};
use crate::typing::{assign_types, KnownTypes};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File, OpenOptions};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Totals for one compendium definition
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompendiumReport {
    pub name: String,
    pub merge: MergeStats,
    pub cliques: usize,
    /// Typed cliques per Biolink type
    pub typed: BTreeMap<String, usize>,
    pub records: usize,
    /// Identifiers written, alternative ids included
    pub identifiers: usize,
    pub synonym_records: usize,
    /// Cliques with no identifier allowed for their type
    pub unassembled: usize,
    pub missing_preferred_name: usize,
}

/// Totals for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub compendia: Vec<CompendiumReport>,
    pub merge: MergeStats,
    pub cliques: usize,
    pub records: usize,
    pub identifiers: usize,
    pub synonym_records: usize,
    pub unassembled: usize,
    pub missing_preferred_name: usize,
}

impl RunReport {
    fn new(started_at: DateTime<Utc>, compendia: Vec<CompendiumReport>) -> Self {
        let mut merge = MergeStats::default();
        for c in &compendia {
            merge.absorb(&c.merge);
        }
        Self {
            started_at,
            finished_at: Utc::now(),
            merge,
            cliques: compendia.iter().map(|c| c.cliques).sum(),
            records: compendia.iter().map(|c| c.records).sum(),
            identifiers: compendia.iter().map(|c| c.identifiers).sum(),
            synonym_records: compendia.iter().map(|c| c.synonym_records).sum(),
            unassembled: compendia.iter().map(|c| c.unassembled).sum(),
            missing_preferred_name: compendia.iter().map(|c| c.missing_preferred_name).sum(),
            compendia,
        }
    }
}

/// Owns the shared lookups of a build: the Biolink model, prefix
/// normalizer, annotation store and naming settings.
pub struct CompendiumBuilder<'c> {
    config: &'c BuildConfig,
    model: BiolinkModel,
    normalizer: PrefixNormalizer,
    store: Box<dyn AnnotationStore + 'c>,
    naming: NamingConfig,
}

impl<'c> CompendiumBuilder<'c> {
    /// Load the model and annotation tables named by `config`
    pub fn new(config: &'c BuildConfig) -> CompendiumResult<Self> {
        let model = config.biolink_model()?;
        let normalizer = config.normalizer(&model)?;

        let mut store = FileAnnotations::new(config.annotations_dir.clone());
        if let Some(path) = &config.information_content {
            store = store.with_information_content(path)?;
        }
        for path in &config.properties {
            store = store.with_properties(path)?;
        }

        Ok(Self {
            config,
            model,
            normalizer,
            store: Box::new(store),
            naming: config.naming(),
        })
    }

    /// Replace the file-backed annotation store
    pub fn with_annotations(mut self, store: impl AnnotationStore + 'c) -> Self {
        self.store = Box::new(store);
        self
    }

    /// Build every compendium in `config`
    pub fn build(config: &BuildConfig) -> CompendiumResult<RunReport> {
        CompendiumBuilder::new(config)?.run()
    }

    pub fn run(&self) -> CompendiumResult<RunReport> {
        let started_at = Utc::now();
        let mut opened: HashSet<PathBuf> = HashSet::new();
        let mut reports = Vec::with_capacity(self.config.compendia.len());

        for def in &self.config.compendia {
            let report = self.build_compendium(def, &mut opened)?;
            info!(
                compendium = %def.name,
                cliques = report.cliques,
                records = report.records,
                rejected = report.merge.rejected(),
                unassembled = report.unassembled,
                "compendium written"
            );
            reports.push(report);
        }

        let report = RunReport::new(started_at, reports);
        info!(
            records = report.records,
            synonym_records = report.synonym_records,
            elapsed_ms = (report.finished_at - report.started_at).num_milliseconds(),
            "build finished"
        );
        Ok(report)
    }

    fn build_compendium(
        &self,
        def: &CompendiumDef,
        opened: &mut HashSet<PathBuf>,
    ) -> CompendiumResult<CompendiumReport> {
        let mut report = CompendiumReport {
            name: def.name.clone(),
            ..Default::default()
        };
        let mut index = GlomIndex::new();
        let mut known = KnownTypes::new();

        for path in &def.identifier_files {
            let (ids, types) = read_identifier_file(path, &self.normalizer)?;
            for (id, t) in types {
                known.entry(id).or_insert(t);
            }
            let stats = index.merge(ids.into_iter().map(|id| [id]), &GlomPolicy::new())?;
            report.merge.absorb(&stats);
        }

        for concord in &def.concords {
            let close = read_close_matches(&concord.close_matches, &self.normalizer)?;
            let policy = concord.glom_policy(close);
            let pairs = read_concord_file(&concord.file, &self.normalizer, &concord.relations)?;
            let stats = index.merge(pairs, &policy)?;
            debug!(
                file = %concord.file.display(),
                close_match_prefixes = ?policy.close_matches.prefixes().collect::<Vec<_>>(),
                merged = stats.merged,
                rejected = stats.rejected(),
                "applied concord"
            );
            report.merge.absorb(&stats);
        }

        let cliques = index.cliques();
        report.cliques = cliques.len();
        let policy = def.typing_policy();
        let typed = assign_types(cliques, &known, policy.as_ref())?;

        let mut factory = NodeFactory::new(&self.model);
        for (biolink_type, cliques) in typed {
            report.typed.insert(biolink_type.to_string(), cliques.len());
            let compendium = self.open_output("compendia", &biolink_type, opened)?;
            let synonyms = self.open_output("synonyms", &biolink_type, opened)?;
            let mut writer =
                CompendiumWriter::new(compendium, synonyms, self.store.as_ref(), &self.naming);

            for clique in cliques {
                let mut ordered: Vec<&Identifier> = clique.iter().collect();
                ordered.sort_by(|a, b| member_order(a, b));
                let members: Vec<InputIdentifier> =
                    ordered.into_iter().cloned().map(InputIdentifier::from).collect();
                match factory.create_node(&members, &biolink_type, self.store.as_ref())? {
                    Some(node) => {
                        report.identifiers += writer.write_node(&node)?.identifier_count;
                    }
                    None => {
                        debug!(%biolink_type, clique = ?clique, "clique not written");
                        report.unassembled += 1;
                    }
                }
            }

            let stats = writer.finish()?;
            report.records += stats.records;
            report.synonym_records += stats.synonym_records;
            report.missing_preferred_name += stats.missing_preferred_name;
        }

        Ok(report)
    }

    /// `<output_dir>/<kind>/<Type>.txt`, truncated the first time this run
    /// opens it and appended to afterwards.
    fn open_output(
        &self,
        kind: &str,
        biolink_type: &BiolinkType,
        opened: &mut HashSet<PathBuf>,
    ) -> CompendiumResult<BufWriter<File>> {
        let dir = self.config.output_dir.join(kind);
        fs::create_dir_all(&dir)?;
        let path = output_path(&dir, biolink_type);
        let file = if opened.insert(path.clone()) {
            File::create(&path)?
        } else {
            OpenOptions::new().append(true).open(&path)?
        };
        Ok(BufWriter::new(file))
    }
}

fn output_path(dir: &Path, biolink_type: &BiolinkType) -> PathBuf {
    dir.join(format!("{}.txt", biolink_type.bare_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biolink::types;
    use crate::compendium::CompendiumRecord;
    use crate::store::InMemoryAnnotations;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn read_records(path: &Path) -> Vec<CompendiumRecord> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn output_path_uses_bare_type_name() {
        let p = output_path(Path::new("/out/compendia"), &BiolinkType::new(types::SMALL_MOLECULE));
        assert_eq!(p, PathBuf::from("/out/compendia/SmallMolecule.txt"));
    }

    #[test]
    fn injected_store_supplies_labels() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ids", "MONDO:0005148\tbiolink:Disease\nDOID:9352\n");
        write(dir.path(), "concord", "MONDO:0005148\tskos:exactMatch\tDOID:9352\n");
        let yaml = format!(
            "output_dir: {}\ncompendia:\n  - name: disease\n    trusted_prefixes: [MONDO]\n    identifier_files: [{}]\n    concords:\n      - file: {}\n",
            dir.path().join("out").display(),
            dir.path().join("ids").display(),
            dir.path().join("concord").display(),
        );
        let config = BuildConfig::from_yaml(&yaml).unwrap();
        let store = InMemoryAnnotations::new()
            .with_label("MONDO:0005148", "type 2 diabetes mellitus")
            .with_label("DOID:9352", "T2DM");

        let report = CompendiumBuilder::new(&config)
            .unwrap()
            .with_annotations(store)
            .run()
            .unwrap();
        assert_eq!(report.cliques, 1);
        assert_eq!(report.records, 1);
        assert_eq!(report.synonym_records, 1);
        assert!(report.finished_at >= report.started_at);

        let recs = read_records(&dir.path().join("out/compendia/Disease.txt"));
        assert_eq!(recs[0].identifiers[0].identifier, "MONDO:0005148");
        assert_eq!(recs[0].preferred_name, "T2DM");
    }

    #[test]
    fn shared_type_across_compendia_appends() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a", "MONDO:1\tbiolink:Disease\n");
        write(dir.path(), "b", "MONDO:2\tbiolink:Disease\n");
        let yaml = format!(
            "output_dir: {out}\ncompendia:\n  - {{name: a, trusted_prefixes: [MONDO], identifier_files: [{a}]}}\n  - {{name: b, trusted_prefixes: [MONDO], identifier_files: [{b}]}}\n",
            out = dir.path().join("out").display(),
            a = dir.path().join("a").display(),
            b = dir.path().join("b").display(),
        );
        let config = BuildConfig::from_yaml(&yaml).unwrap();
        let report = CompendiumBuilder::build(&config).unwrap();
        assert_eq!(report.compendia.len(), 2);
        assert_eq!(report.records, 2);
        // no labels anywhere
        assert_eq!(report.missing_preferred_name, 2);

        let recs = read_records(&dir.path().join("out/compendia/Disease.txt"));
        assert_eq!(recs.len(), 2);
    }

    #[derive(Clone, Default)]
    struct SharedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for SharedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn unassembled_cliques_warn_once_per_prefix_and_type() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "ids",
            "FOO:1\tbiolink:Disease\nFOO:2\tbiolink:Disease\nFOO:3\tbiolink:Disease\nFOO:4\tbiolink:Disease\nMONDO:1\tbiolink:Disease\n",
        );
        let yaml = format!(
            "output_dir: {}\ncompendia:\n  - name: disease\n    trusted_prefixes: [MONDO]\n    identifier_files: [{}]\n",
            dir.path().join("out").display(),
            dir.path().join("ids").display(),
        );
        let config = BuildConfig::from_yaml(&yaml).unwrap();

        let log = SharedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let report = tracing::subscriber::with_default(subscriber, || {
            CompendiumBuilder::build(&config).unwrap()
        });

        assert_eq!(report.unassembled, 4);
        assert_eq!(report.records, 1);
        assert_eq!(report.identifiers, 1);
        let output = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.lines().filter(|l| l.contains("WARN")).count(), 1);
    }
}

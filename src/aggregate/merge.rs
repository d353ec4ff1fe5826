use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::types::{CountedIsoform, NO_MATCH};
use crate::matching::engine::AnnotationEngine;
use crate::parsing::annotations::AnnotationRecord;
use crate::parsing::counts::CountRecord;
use crate::parsing::gtf::GeneModel;
use crate::utils::validation::{
    is_reference_transcript, join_key, normalize_identifier, DEFAULT_REFERENCE_MARKER,
};

/// Configuration for merging counts with annotations
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Substring identifying reference transcripts resolved via the gene model
    pub reference_marker: String,
    /// Match gene-model transcript ids without their `.N` version
    pub ignore_version: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            reference_marker: DEFAULT_REFERENCE_MARKER.to_string(),
            ignore_version: false,
        }
    }
}

/// Where an unresolved identifier was looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    AnnotationTable,
    GeneModel,
}

impl std::fmt::Display for LookupSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnnotationTable => write!(f, "annotation table"),
            Self::GeneModel => write!(f, "gene model"),
        }
    }
}

/// An identifier whose annotation could not be found
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unresolved {
    pub identifier: String,
    pub source: LookupSource,
}

impl std::fmt::Display for Unresolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found in {}", self.identifier, self.source)
    }
}

/// Result of a merge: rows sorted by descending count, plus diagnostics
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub rows: Vec<CountedIsoform>,
    pub unresolved: Vec<Unresolved>,
}

/// Joins read counts with isoform annotations
pub struct CountMerger<'a> {
    /// Index: join key -> annotation string
    annotations: HashMap<String, String>,
    gene_model: Option<(&'a GeneModel, &'a AnnotationEngine<'a>)>,
    config: MergeConfig,
}

impl<'a> CountMerger<'a> {
    /// Build a merger from annotate-phase records.
    ///
    /// When several records share a join key the first one is used.
    pub fn new(records: &[AnnotationRecord]) -> Self {
        let mut annotations: HashMap<String, String> = HashMap::with_capacity(records.len());

        for record in records {
            let key = join_key(&record.identifier);
            match annotations.get(&key) {
                Some(existing) if existing != &record.annotation => {
                    warn!(
                        "Identifier {} collapses onto {} with a different annotation; keeping the first",
                        record.identifier, key
                    );
                }
                Some(_) => {}
                None => {
                    annotations.insert(key, record.annotation.clone());
                }
            }
        }

        Self {
            annotations,
            gene_model: None,
            config: MergeConfig::default(),
        }
    }

    /// Resolve reference transcripts through a gene model and catalog
    #[must_use]
    pub fn with_gene_model(mut self, model: &'a GeneModel, engine: &'a AnnotationEngine<'a>) -> Self {
        self.gene_model = Some((model, engine));
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    /// Number of distinct join keys in the annotation index
    pub fn annotation_count(&self) -> usize {
        self.annotations.len()
    }

    /// Merge a count table with the annotations.
    ///
    /// Counts whose identifiers normalize to the same key are summed into one
    /// row placed where the key first appeared, labelled with the first raw
    /// identifier so the output joins the same way when merged again.
    /// Unresolved identifiers get the `N/A` annotation and are kept. Rows are
    /// sorted by descending count; ties keep their input order.
    pub fn merge(&self, counts: &[CountRecord]) -> MergeOutcome {
        let mut entities: Vec<(String, String, u64)> = Vec::new();
        let mut key_to_entity: HashMap<String, usize> = HashMap::new();

        for record in counts {
            let identifier = record.identifier.trim();
            let key = join_key(identifier);
            if let Some(&idx) = key_to_entity.get(&key) {
                debug!("Collapsing {} into {}", identifier, entities[idx].1);
                entities[idx].2 = entities[idx].2.saturating_add(record.count);
            } else {
                key_to_entity.insert(key.clone(), entities.len());
                entities.push((key, identifier.to_string(), record.count));
            }
        }

        let mut outcome = MergeOutcome::default();

        for (key, identifier, count) in entities {
            let lookup_id = normalize_identifier(&identifier);
            let annotation = match self.resolve(&key, lookup_id) {
                Ok(annotation) => annotation,
                Err(source) => {
                    let unresolved = Unresolved {
                        identifier: lookup_id.to_string(),
                        source,
                    };
                    warn!("{unresolved}");
                    outcome.unresolved.push(unresolved);
                    NO_MATCH.to_string()
                }
            };
            outcome
                .rows
                .push(CountedIsoform::new(identifier, count, annotation));
        }

        outcome.rows.sort_by(|a, b| b.count.cmp(&a.count));
        outcome
    }

    fn resolve(&self, key: &str, identifier: &str) -> Result<String, LookupSource> {
        if let Some((model, engine)) = self.gene_model {
            if is_reference_transcript(identifier, &self.config.reference_marker) {
                return model
                    .transcript(identifier, self.config.ignore_version)
                    .map(|t| engine.annotate_transcript(t).annotation())
                    .ok_or(LookupSource::GeneModel);
            }
        }

        self.annotations
            .get(key)
            .cloned()
            .ok_or(LookupSource::AnnotationTable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::store::ExonCatalog;
    use crate::core::exon::Exon;
    use crate::parsing::gtf::parse_gtf_text;

    fn records(rows: &[(&str, &str)]) -> Vec<AnnotationRecord> {
        rows.iter()
            .map(|(id, anno)| AnnotationRecord {
                identifier: (*id).to_string(),
                annotation: (*anno).to_string(),
            })
            .collect()
    }

    fn counts(rows: &[(&str, u64)]) -> Vec<CountRecord> {
        rows.iter().map(|(id, n)| CountRecord::new(*id, *n)).collect()
    }

    #[test]
    fn test_merge_sorts_by_count_descending() {
        let merger = CountMerger::new(&records(&[
            ("PB.1.1", "1, 2, 3"),
            ("PB.1.2", "1, 3"),
            ("PB.2.1", "4, 5"),
        ]));
        let outcome = merger.merge(&counts(&[
            ("PB.1.1_G1", 5),
            ("PB.1.2_G1", 40),
            ("PB.2.1_G2", 12),
        ]));

        let ids: Vec<_> = outcome.rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["PB.1.2_G1", "PB.2.1_G2", "PB.1.1_G1"]);
        assert_eq!(outcome.rows[0].annotation, "1, 3");
        assert!(outcome.unresolved.is_empty());
    }

    #[test]
    fn test_merge_ties_keep_input_order() {
        let merger = CountMerger::new(&records(&[("a", "1"), ("b", "2"), ("c", "3")]));
        let outcome = merger.merge(&counts(&[("c", 7), ("a", 7), ("b", 9)]));
        let ids: Vec<_> = outcome.rows.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_merge_joins_display_normalized_names() {
        // Annotate phase rewrote PB_1_1 to PB-1-1
        let merger = CountMerger::new(&records(&[("PB-1-1", "1, 2")]));
        let outcome = merger.merge(&counts(&[("PB_1_1", 3)]));
        assert_eq!(outcome.rows[0].annotation, "1, 2");
    }

    #[test]
    fn test_merge_collapses_identifiers() {
        let merger = CountMerger::new(&records(&[("iso", "1, 2")]));
        let outcome = merger.merge(&counts(&[("iso_a", 3), ("other", 1), ("iso_b", 4)]));
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0], CountedIsoform::new("iso_a", 7, "1, 2"));
    }

    #[test]
    fn test_merge_missing_annotation_is_na() {
        let merger = CountMerger::new(&records(&[("a", "1")]));
        let outcome = merger.merge(&counts(&[("a", 1), ("zzz_1", 2)]));

        assert_eq!(outcome.rows[0], CountedIsoform::new("zzz_1", 2, NO_MATCH));
        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(
            outcome.unresolved[0].to_string(),
            "zzz not found in annotation table"
        );
    }

    #[test]
    fn test_merge_reference_transcript_via_gene_model() {
        let catalog = ExonCatalog::from_exons(vec![
            Exon::new("1", 100, 200, 1),
            Exon::new("1", 300, 400, 2),
        ]);
        let engine = AnnotationEngine::new(&catalog);
        let model = parse_gtf_text(
            "1\tE\texon\t100\t200\t.\t+\t.\ttranscript_id \"ENST00000009\";\n\
             1\tE\texon\t300\t450\t.\t+\t.\ttranscript_id \"ENST00000009\";\n",
        )
        .unwrap();

        let merger = CountMerger::new(&[]).with_gene_model(&model, &engine);
        let outcome = merger.merge(&counts(&[("ENST00000009_1", 10)]));

        assert_eq!(outcome.rows[0].identifier, "ENST00000009_1");
        assert_eq!(outcome.rows[0].annotation, "1, 1:300-450");
    }

    #[test]
    fn test_merge_reference_transcript_not_found() {
        let catalog = ExonCatalog::from_exons(vec![Exon::new("1", 100, 200, 1)]);
        let engine = AnnotationEngine::new(&catalog);
        let model = GeneModel::default();

        let merger = CountMerger::new(&[]).with_gene_model(&model, &engine);
        let outcome = merger.merge(&counts(&[("ENST00000001_3", 4)]));

        assert_eq!(outcome.rows[0].annotation, NO_MATCH);
        let message = outcome.unresolved[0].to_string();
        assert!(message.contains("ENST00000001"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn test_merge_reference_transcript_ignoring_version() {
        let catalog = ExonCatalog::from_exons(vec![Exon::new("1", 100, 200, 1)]);
        let engine = AnnotationEngine::new(&catalog);
        let model = parse_gtf_text(
            "1\tE\texon\t100\t200\t.\t-\t.\ttranscript_id \"ENST00000005.3\";\n",
        )
        .unwrap();

        let config = MergeConfig {
            ignore_version: true,
            ..MergeConfig::default()
        };
        let merger = CountMerger::new(&[])
            .with_gene_model(&model, &engine)
            .with_config(config);
        let outcome = merger.merge(&counts(&[("ENST00000005_2", 1)]));
        assert_eq!(outcome.rows[0].annotation, "1");
    }

    #[test]
    fn test_merge_is_idempotent_on_its_output() {
        let merger = CountMerger::new(&records(&[("PB.1.1", "1, 2"), ("PB.2.1", "3")]));
        let first = merger.merge(&counts(&[("PB.1.1_G1", 5), ("PB.2.1_G2", 9)]));

        let again: Vec<CountRecord> = first
            .rows
            .iter()
            .map(|r| CountRecord::new(r.identifier.clone(), r.count))
            .collect();
        let second = merger.merge(&again);

        assert_eq!(first.rows, second.rows);
    }

    fn remerge(merger: &CountMerger, outcome: &MergeOutcome) -> MergeOutcome {
        let again: Vec<CountRecord> = outcome
            .rows
            .iter()
            .map(|r| CountRecord::new(r.identifier.clone(), r.count))
            .collect();
        merger.merge(&again)
    }

    #[test]
    fn test_merge_is_idempotent_with_underscore_identifiers() {
        let merger = CountMerger::new(&records(&[
            ("iso-1-1", "1, 2, 3"),
            ("iso-2-1", "2, 1"),
            ("iso-3-1", "2, 1:900-950"),
        ]));
        let first = merger.merge(&counts(&[("iso_1_1", 5), ("iso_2_1", 40), ("iso_3_1", 12)]));
        assert_eq!(
            first.rows,
            vec![
                CountedIsoform::new("iso_2_1", 40, "2, 1"),
                CountedIsoform::new("iso_3_1", 12, "2, 1:900-950"),
                CountedIsoform::new("iso_1_1", 5, "1, 2, 3"),
            ]
        );

        let second = remerge(&merger, &first);
        assert_eq!(first.rows, second.rows);
        assert!(second.unresolved.is_empty());
    }

    #[test]
    fn test_merge_is_idempotent_for_reference_transcripts() {
        let catalog = ExonCatalog::from_exons(vec![Exon::new("1", 100, 200, 1)]);
        let engine = AnnotationEngine::new(&catalog);
        let model = parse_gtf_text(
            "1\tE\texon\t100\t200\t.\t+\t.\ttranscript_id \"ENST00000007\";\n",
        )
        .unwrap();

        let merger = CountMerger::new(&records(&[("PB-1-1", "1")])).with_gene_model(&model, &engine);
        let first = merger.merge(&counts(&[("ENST00000007_2", 3), ("PB_1_1", 8)]));
        let second = remerge(&merger, &first);

        assert_eq!(first.rows, second.rows);
        assert_eq!(second.rows[1].annotation, "1");
    }

    #[test]
    fn test_duplicate_annotation_keys_keep_first() {
        let merger = CountMerger::new(&records(&[("iso_1", "1"), ("iso_2", "2")]));
        assert_eq!(merger.annotation_count(), 1);
        let outcome = merger.merge(&counts(&[("iso", 1)]));
        assert_eq!(outcome.rows[0].annotation, "1");
    }
}

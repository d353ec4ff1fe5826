use rayon::prelude::*;
use tracing::debug;

use crate::catalog::store::ExonCatalog;
use crate::core::interval::{GenomicInterval, Strand};
use crate::core::types::{AnnotatedIsoform, MatchResult};
use crate::matching::block::{match_block, BlockPosition};
use crate::parsing::gtf::TranscriptModel;
use crate::utils::validation::{display_identifier, strip_chr_prefix};

/// Configuration for the annotation engine
#[derive(Debug, Clone)]
pub struct AnnotationConfig {
    /// Drop a leading `chr` from interval chromosomes before matching
    pub strip_chr_prefix: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            strip_chr_prefix: true,
        }
    }
}

/// Annotates isoforms with catalog exon numbers
pub struct AnnotationEngine<'a> {
    catalog: &'a ExonCatalog,
    config: AnnotationConfig,
}

impl<'a> AnnotationEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(catalog: &'a ExonCatalog) -> Self {
        Self {
            catalog,
            config: AnnotationConfig::default(),
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(catalog: &'a ExonCatalog, config: AnnotationConfig) -> Self {
        Self { catalog, config }
    }

    fn chromosome<'c>(&self, chromosome: &'c str) -> &'c str {
        if self.config.strip_chr_prefix {
            strip_chr_prefix(chromosome)
        } else {
            chromosome
        }
    }

    /// Annotate one BED12 isoform.
    ///
    /// Blocks are matched left to right with position-dependent boundary
    /// rules; minus-strand paths are reversed so they read 5' to 3'.
    pub fn annotate(&self, interval: &GenomicInterval) -> AnnotatedIsoform {
        let chromosome = self.chromosome(&interval.chromosome);
        let total = interval.block_count();

        let mut exon_path: Vec<MatchResult> = interval
            .absolute_blocks()
            .enumerate()
            .map(|(i, (start, end))| {
                let position = BlockPosition::classify(i, total);
                match_block(self.catalog, chromosome, start, end, position)
            })
            .collect();

        if interval.strand == Strand::Reverse {
            exon_path.reverse();
        }

        AnnotatedIsoform {
            identifier: display_identifier(&interval.name),
            exon_path,
        }
    }

    /// Annotate many isoforms in parallel; output order follows input order
    pub fn annotate_all(&self, intervals: &[GenomicInterval]) -> Vec<AnnotatedIsoform> {
        let annotated: Vec<AnnotatedIsoform> =
            intervals.par_iter().map(|i| self.annotate(i)).collect();

        debug!(
            "Annotated {} isoforms ({} fully matched)",
            annotated.len(),
            annotated
                .iter()
                .filter(|a| a.is_fully_matched())
                .count()
        );

        annotated
    }

    /// Annotate a reference transcript from the gene model.
    ///
    /// Reference exons are complete, so every exon needs an exact start and
    /// end match regardless of its position.
    pub fn annotate_transcript(&self, transcript: &TranscriptModel) -> AnnotatedIsoform {
        let chromosome = self.chromosome(&transcript.chromosome);

        let mut exon_path: Vec<MatchResult> = transcript
            .exons
            .iter()
            .map(|&(start, end)| {
                match_block(self.catalog, chromosome, start, end, BlockPosition::Internal)
            })
            .collect();

        if transcript.strand == Some(Strand::Reverse) {
            exon_path.reverse();
        }

        AnnotatedIsoform {
            identifier: transcript.transcript_id.clone(),
            exon_path,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Annotation recorded for an identifier that could not be resolved
pub const NO_MATCH: &str = "N/A";

/// Separator between tokens of a serialized exon path
pub const TOKEN_SEPARATOR: &str = ", ";

/// Outcome of matching one block against the exon catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchResult {
    /// Block corresponds to the catalog exon with this `exon#` label
    Matched { exon_number: String },
    /// No catalog exon satisfied the boundary rule; raw 1-based coordinates
    Unmatched {
        chromosome: String,
        start: u64,
        end: u64,
    },
}

impl MatchResult {
    pub fn matched(exon_number: impl Into<String>) -> Self {
        Self::Matched {
            exon_number: exon_number.into(),
        }
    }

    pub fn unmatched(chromosome: impl Into<String>, start: u64, end: u64) -> Self {
        Self::Unmatched {
            chromosome: chromosome.into(),
            start,
            end,
        }
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }
}

/// Token form used in annotation tables: `7` or `1:1500-1620`
impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched { exon_number } => write!(f, "{exon_number}"),
            Self::Unmatched {
                chromosome,
                start,
                end,
            } => write!(f, "{chromosome}:{start}-{end}"),
        }
    }
}

/// Join tokens into the `", "`-separated annotation string
pub fn join_tokens<T: std::fmt::Display>(tokens: &[T]) -> String {
    tokens
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(TOKEN_SEPARATOR)
}

/// Split an annotation string back into its tokens
pub fn split_tokens(annotation: &str) -> Vec<&str> {
    let annotation = annotation.trim();
    if annotation.is_empty() {
        return Vec::new();
    }
    annotation.split(TOKEN_SEPARATOR).map(str::trim).collect()
}

/// An isoform with its exon path in transcription (5' to 3') order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedIsoform {
    pub identifier: String,
    pub exon_path: Vec<MatchResult>,
}

impl AnnotatedIsoform {
    /// Serialized exon path, e.g. `1, 2, 1:500-620, 4`
    pub fn annotation(&self) -> String {
        join_tokens(&self.exon_path)
    }

    /// Whether every block matched a catalog exon
    pub fn is_fully_matched(&self) -> bool {
        self.exon_path.iter().all(MatchResult::is_matched)
    }
}

/// One row of the merged count table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountedIsoform {
    pub identifier: String,
    pub count: u64,
    pub annotation: String,
}

impl CountedIsoform {
    pub fn new(identifier: impl Into<String>, count: u64, annotation: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            count,
            annotation: annotation.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.annotation != NO_MATCH
    }
}

/// Isoforms sharing the same exon sub-path within a requested range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIsoformGroup {
    pub label: String,
    pub summed_count: u64,
    pub sub_path: String,
}

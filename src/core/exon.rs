use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single reference exon from the exon catalog.
///
/// Coordinates are 1-based and inclusive, as in GTF files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    /// Chromosome / contig name
    pub chromosome: String,

    /// First base of the exon (1-based)
    pub start: u64,

    /// Last base of the exon (1-based, inclusive)
    pub end: u64,

    /// Exon ordinal as written in the catalog (`3`, `3_a`); reported verbatim
    pub number: String,

    /// Exon name from the catalog (e.g. `ENSE00001`)
    #[serde(default)]
    pub name: String,
}

impl Exon {
    pub fn new(chromosome: impl Into<String>, start: u64, end: u64, number: impl Display) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            number: number.to_string(),
            name: String::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixed_number_kept_verbatim() {
        let exon = Exon::new("1", 100, 200, "3_a");
        assert_eq!(exon.number, "3_a");
    }

    #[test]
    fn test_with_name() {
        let exon = Exon::new("X", 1, 10, 3).with_name("ENSE0003");
        assert_eq!(exon.name, "ENSE0003");
        assert_eq!(exon.number, "3");
    }
}

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::core::exon::Exon;
use crate::parsing::ParseError;
use crate::utils::validation::strip_chr_prefix;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read exon catalog: {0}")]
    ParseError(#[from] ParseError),

    #[error("Exon catalog is empty")]
    Empty,
}

/// The reference exon catalog with a per-chromosome index
///
/// Row order is significant: when several exons satisfy a boundary rule the
/// earliest row wins, so the chromosome index keeps row indices ascending.
#[derive(Debug, Clone, Default)]
pub struct ExonCatalog {
    /// All exons in file order
    pub exons: Vec<Exon>,

    /// Index: chromosome -> row indices of its exons, ascending
    chromosome_to_rows: HashMap<String, Vec<usize>>,
}

impl ExonCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from exons in catalog order
    pub fn from_exons(exons: impl IntoIterator<Item = Exon>) -> Self {
        let mut catalog = Self::new();
        for exon in exons {
            catalog.add_exon(exon);
        }
        catalog
    }

    /// Load an exon catalog TSV (optionally gzip-compressed)
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if the file cannot be read or a row is
    /// malformed, or `CatalogError::Empty` if it holds no exons.
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let exons = crate::parsing::catalog::parse_catalog_file(path)?;
        if exons.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self::from_exons(exons))
    }

    /// Append an exon after all existing rows
    pub fn add_exon(&mut self, exon: Exon) {
        let row = self.exons.len();
        self.chromosome_to_rows
            .entry(exon.chromosome.clone())
            .or_default()
            .push(row);
        self.exons.push(exon);
    }

    /// Exons on `chromosome`, in catalog order
    pub fn exons_on<'a>(&'a self, chromosome: &str) -> impl Iterator<Item = &'a Exon> + 'a {
        self.chromosome_to_rows
            .get(chromosome)
            .into_iter()
            .flatten()
            .map(move |&row| &self.exons[row])
    }

    /// First exon on `chromosome` (catalog order) satisfying `predicate`
    pub fn find_first<F>(&self, chromosome: &str, predicate: F) -> Option<&Exon>
    where
        F: Fn(&Exon) -> bool,
    {
        self.exons_on(chromosome).find(|&exon| predicate(exon))
    }

    /// First exon with exactly these 1-based inclusive coordinates
    pub fn find_exact(&self, chromosome: &str, start: u64, end: u64) -> Option<&Exon> {
        self.find_first(chromosome, |exon| exon.start == start && exon.end == end)
    }

    /// Rebuild the catalog with `chr` prefixes removed from chromosome names
    #[must_use]
    pub fn with_stripped_chr_prefix(self) -> Self {
        Self::from_exons(self.exons.into_iter().map(|mut exon| {
            exon.chromosome = strip_chr_prefix(&exon.chromosome).to_string();
            exon
        }))
    }

    /// Number of distinct chromosomes
    pub fn chromosome_count(&self) -> usize {
        self.chromosome_to_rows.len()
    }

    /// Number of exons in catalog
    pub fn len(&self) -> usize {
        self.exons.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }
}

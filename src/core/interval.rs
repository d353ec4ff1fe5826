use serde::{Deserialize, Serialize};

/// Transcription strand of an isoform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    /// Parse a BED strand column. Only `+` and `-` are meaningful for isoforms.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Forward),
            "-" => Some(Self::Reverse),
            _ => None,
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

/// One block of a BED12 record, relative to the record start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Offset of the block from `chromStart` (0-based)
    pub offset: u64,
    /// Block length in bases
    pub length: u64,
}

impl Block {
    pub fn new(offset: u64, length: u64) -> Self {
        Self { offset, length }
    }

    /// 1-based inclusive `(start, end)` of this block for a record starting at
    /// `interval_start` (0-based).
    pub fn absolute(&self, interval_start: u64) -> (u64, u64) {
        let start = interval_start + self.offset + 1;
        (start, start + self.length - 1)
    }
}

/// A block-structured genomic interval (one BED12 line, one isoform)
///
/// Blocks are stored left-to-right in reference coordinates regardless of
/// strand. Strand only changes the order annotations are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicInterval {
    pub chromosome: String,
    /// 0-based start (`chromStart`)
    pub start: u64,
    /// 0-based exclusive end (`chromEnd`)
    pub end: u64,
    pub name: String,
    pub strand: Strand,
    pub blocks: Vec<Block>,
}

impl GenomicInterval {
    pub fn new(
        chromosome: impl Into<String>,
        start: u64,
        end: u64,
        name: impl Into<String>,
        strand: Strand,
    ) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            end,
            name: name.into(),
            strand,
            blocks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    /// Absolute 1-based inclusive coordinates of every block, left to right
    pub fn absolute_blocks(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.blocks.iter().map(move |b| b.absolute(self.start))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

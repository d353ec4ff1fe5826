//! Parser for GTF gene models.
//!
//! Only `exon` features are kept. They are grouped by the `transcript_id`
//! attribute; coordinates stay 1-based inclusive, as in the file.
//!
//! Format: 9 tab-separated columns
//! `seqname source feature start end score strand frame attributes`, where
//! attributes look like `gene_id "G1"; transcript_id "ENST00000001";`.

use std::collections::HashMap;
use std::path::Path;

use crate::core::interval::Strand;
use crate::parsing::{data_lines, parse_u64, read_text, ParseError};
use crate::utils::validation::{check_record_limit, strip_version};

const GTF_FIELDS: usize = 9;

/// Exons of one transcript from the gene model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub transcript_id: String,
    pub chromosome: String,
    pub strand: Option<Strand>,
    /// 1-based inclusive exon coordinates, sorted left to right
    pub exons: Vec<(u64, u64)>,
}

/// Transcripts of a gene model indexed by `transcript_id`
#[derive(Debug, Clone, Default)]
pub struct GeneModel {
    transcripts: HashMap<String, TranscriptModel>,
    /// Index: unversioned id -> versioned id (first seen)
    unversioned: HashMap<String, String>,
}

impl GeneModel {
    /// Look up a transcript, optionally ignoring `.N` version suffixes
    pub fn transcript(&self, id: &str, ignore_version: bool) -> Option<&TranscriptModel> {
        if let Some(t) = self.transcripts.get(id) {
            return Some(t);
        }
        if ignore_version {
            let key = strip_version(id);
            if let Some(t) = self.transcripts.get(key) {
                return Some(t);
            }
            return self
                .unversioned
                .get(key)
                .and_then(|full| self.transcripts.get(full));
        }
        None
    }

    /// Number of transcripts with at least one exon
    pub fn len(&self) -> usize {
        self.transcripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcripts.is_empty()
    }

    fn add_exon(&mut self, transcript_id: &str, chromosome: &str, strand: Option<Strand>, exon: (u64, u64)) {
        let entry = self
            .transcripts
            .entry(transcript_id.to_string())
            .or_insert_with(|| TranscriptModel {
                transcript_id: transcript_id.to_string(),
                chromosome: chromosome.to_string(),
                strand,
                exons: Vec::new(),
            });
        entry.exons.push(exon);

        self.unversioned
            .entry(strip_version(transcript_id).to_string())
            .or_insert_with(|| transcript_id.to_string());
    }

    fn finish(mut self) -> Self {
        for transcript in self.transcripts.values_mut() {
            transcript.exons.sort_unstable();
        }
        self
    }
}

/// Parse a GTF file (optionally gzip-compressed)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_gtf_file(path: &Path) -> Result<GeneModel, ParseError> {
    let content = read_text(path)?;
    parse_gtf_text(&content)
}

/// Parse GTF text
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 9 fields or
/// non-numeric coordinates on an exon feature.
pub fn parse_gtf_text(text: &str) -> Result<GeneModel, ParseError> {
    let mut model = GeneModel::default();
    let mut exon_count = 0usize;

    for (line_num, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < GTF_FIELDS {
            return Err(ParseError::at_line(
                line_num,
                format!("GTF needs {GTF_FIELDS} fields, found {}", fields.len()),
            ));
        }

        if fields[2] != "exon" {
            continue;
        }

        let Some(transcript_id) = attribute_value(fields[8], "transcript_id") else {
            continue;
        };

        let start = parse_u64(fields[3], "start", line_num)?;
        let end = parse_u64(fields[4], "end", line_num)?;
        if start > end {
            return Err(ParseError::at_line(
                line_num,
                format!("exon start {start} is after end {end}"),
            ));
        }

        if check_record_limit(exon_count).is_some() {
            return Err(ParseError::TooManyRecords(exon_count));
        }
        exon_count += 1;

        model.add_exon(
            transcript_id,
            fields[0].trim(),
            Strand::parse(fields[6].trim()),
            (start, end),
        );
    }

    Ok(model.finish())
}

/// Value of a `key "value";` attribute, without quotes
pub fn attribute_value<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once(char::is_whitespace)?;
        (k == key).then(|| v.trim().trim_matches('"'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GTF: &str = r#"#!genome-build GRCh38
1	HAVANA	transcript	100	400	.	+	.	gene_id "G1"; transcript_id "ENST00000001.2";
1	HAVANA	exon	300	400	.	+	.	gene_id "G1"; transcript_id "ENST00000001.2"; exon_number "2";
1	HAVANA	exon	100	200	.	+	.	gene_id "G1"; transcript_id "ENST00000001.2"; exon_number "1";
2	HAVANA	exon	50	80	.	-	.	gene_id "G2"; transcript_id "ENST00000002";
2	HAVANA	exon	10	20	.	-	.	gene_id "G2"; transcript_id "ENST00000002";
"#;

    #[test]
    fn test_parse_gtf_groups_exons() {
        let model = parse_gtf_text(GTF).unwrap();
        assert_eq!(model.len(), 2);

        let t1 = model.transcript("ENST00000001.2", false).unwrap();
        assert_eq!(t1.chromosome, "1");
        assert_eq!(t1.strand, Some(Strand::Forward));
        assert_eq!(t1.exons, vec![(100, 200), (300, 400)]);

        let t2 = model.transcript("ENST00000002", false).unwrap();
        assert_eq!(t2.strand, Some(Strand::Reverse));
        assert_eq!(t2.exons, vec![(10, 20), (50, 80)]);
    }

    #[test]
    fn test_transcript_version_lookup() {
        let model = parse_gtf_text(GTF).unwrap();
        assert!(model.transcript("ENST00000001", false).is_none());
        assert!(model.transcript("ENST00000001", true).is_some());
        assert!(model.transcript("ENST00000002.9", true).is_some());
        assert!(model.transcript("ENST00000003", true).is_none());
    }

    #[test]
    fn test_attribute_value() {
        let attrs = r#"gene_id "G1"; transcript_id "T1"; exon_number "2";"#;
        assert_eq!(attribute_value(attrs, "transcript_id"), Some("T1"));
        assert_eq!(attribute_value(attrs, "gene_id"), Some("G1"));
        assert_eq!(attribute_value(attrs, "gene_name"), None);
    }

    #[test]
    fn test_parse_gtf_short_line() {
        let err = parse_gtf_text("1\tsrc\texon\t1\t2\n").unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_gtf_bad_exon_coordinate() {
        let gtf = "1\ts\texon\tx\t20\t.\t+\t.\ttranscript_id \"T\";\n";
        assert!(parse_gtf_text(gtf).is_err());
    }
}

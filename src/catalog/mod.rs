//! Reference exon catalog storage and indexing.
//!
//! The catalog holds the reference exons that isoform blocks are matched
//! against. It is loaded once from a tab-separated table and is read-only for
//! the rest of the run.
//!
//! ## Catalog format
//!
//! ```text
//! chromosome	start	end	exon#	exon_name
//! 1	100	200	1	ENSE00001
//! 1	300	400	2	ENSE00002
//! ```
//!
//! Coordinates are 1-based and inclusive. Row order is the tie-break when more
//! than one exon satisfies a matching rule.
//!
//! ## Example
//!
//! ```rust,no_run
//! use isoexon::ExonCatalog;
//! use std::path::Path;
//!
//! let catalog = ExonCatalog::load_from_file(Path::new("exons.tsv")).unwrap();
//! let exon = catalog.find_exact("1", 100, 200);
//! ```

pub mod store;

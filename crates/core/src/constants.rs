//! Constants used throughout the trends core crate.
//!
//! Collection names double as directory names under the data directory, so changing one
//! orphans every document already written to it.

/// Default directory for document storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "trends_data";

/// Collection holding disease records.
pub const DISEASE_COLLECTION: &str = "disease";

/// Collection holding gene records.
pub const GENE_COLLECTION: &str = "gene";

/// Collection holding patent records.
pub const PATENT_COLLECTION: &str = "patent";

/// Collection holding publication records.
pub const PUBLICATION_COLLECTION: &str = "publication";

/// Collection holding clinical trial records.
pub const TRIAL_COLLECTION: &str = "trial";

/// Collection holding aggregated trend records.
pub const TREND_COLLECTION: &str = "trend";

/// Suffix for in-flight document writes; renamed into place once complete.
pub const TEMP_FILE_SUFFIX: &str = "tmp";

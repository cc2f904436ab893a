// src/extractors/mod.rs
pub mod keywords;
pub mod metadata;
pub mod pvalue;
pub mod section;

// Re-export key extraction types for convenience
pub use pvalue::PValue;
pub use section::{MatchKind, SectionKind, SectionMatch, SectionTables};

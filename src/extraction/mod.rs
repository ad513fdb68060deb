//! Structure recovery for statute text.
//!
//! Lines flow one way: [`LineClassifier`] tags each line, [`DocumentParser`]
//! applies the tags as state transitions (with [`title::TitleAccumulator`] and
//! [`ExplanationPolicy`] as helpers), [`assembler::SectionAssembler`] freezes
//! finished sections and [`DocumentSerializer`] renders the result.

mod assembler;
mod classifier;
mod context;
mod document;
mod issues;
mod machine;
mod policy;
mod serialize;
mod stats;
mod title;

pub use classifier::{LineClassifier, LineKind};
pub use document::{Article, Document, MetadataEntry, Section, Subsection};
pub use issues::ParseIssue;
pub use machine::{DocumentParser, ParseOutcome, parse_lines};
pub use policy::ExplanationPolicy;
pub use serialize::DocumentSerializer;
pub use stats::ExtractionStats;

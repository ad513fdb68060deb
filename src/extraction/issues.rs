use thiserror::Error;

/// Irregularities observed while parsing. None of them aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIssue {
    #[error("line {line_no} looks like a header but matches no pattern: {line}")]
    UnrecognizedHeader { line_no: usize, line: String },

    #[error("input ended while section {section_id} title was incomplete: {title}")]
    UnterminatedTitle { section_id: String, title: String },

    #[error("no Part, Chapter or Section markers were recognized")]
    EmptySections,
}

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub lines_total: usize,
    pub blank_lines: usize,
    pub page_number_lines: usize,
    pub front_matter_lines_skipped: usize,
    pub preamble_lines: usize,
    pub metadata_entries: usize,
    pub parts_opened: usize,
    pub chapters_opened: usize,
    pub sections_emitted: usize,
    pub subsections_opened: usize,
    pub articles_opened: usize,
    pub explanation_blocks: usize,
    pub explanation_fragments: usize,
    pub nested_article_points: usize,
    pub non_increasing_subsection_lines: usize,
    pub continuation_lines: usize,
    pub unattached_lines: usize,
}

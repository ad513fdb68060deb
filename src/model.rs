use serde::{Deserialize, Serialize};

use crate::extraction::{ExplanationPolicy, ExtractionStats};

#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub path: String,
    pub sha256: String,
    pub page_count: usize,
    pub line_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractPaths {
    pub out_dir: String,
    pub output_path: String,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractCounts {
    pub metadata_entries: usize,
    pub sections: usize,
    pub subsections: usize,
    pub articles: usize,
    pub issues: usize,
    pub parser: ExtractionStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExtractRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub source: SourceEntry,
    pub paths: ExtractPaths,
    pub policy: ExplanationPolicy,
    pub counts: ExtractCounts,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    #[serde(rename = "PartID")]
    pub part_id: Option<String>,
    #[serde(rename = "PartTitle")]
    pub part_title: Option<String>,
    #[serde(rename = "ChapterID")]
    pub chapter_id: Option<String>,
    #[serde(rename = "ChapterTitle")]
    pub chapter_title: Option<String>,
    #[serde(rename = "SectionID")]
    pub section_id: String,
    #[serde(rename = "SectionTitle")]
    pub section_title: String,
    #[serde(rename = "OriginalID")]
    pub original_id: String,
}

/// Retrieval unit handed to the embedding stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionChunk {
    pub id: String,
    pub title: String,
    pub content: String,
    pub metadata: ChunkMetadata,
}

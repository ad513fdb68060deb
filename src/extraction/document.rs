use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured statute emitted by one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub metadata: Vec<MetadataEntry>,
    pub sections: Vec<Section>,
}

/// One `{key: value}` object in the `metadata` array. Duplicate keys are kept
/// as separate entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

impl TryFrom<BTreeMap<String, String>> for MetadataEntry {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if map.len() != 1 {
            return Err(format!(
                "metadata entry must hold exactly one key, found {}",
                map.len()
            ));
        }

        let (key, value) = map
            .into_iter()
            .next()
            .ok_or_else(|| "metadata entry is empty".to_string())?;
        Ok(Self { key, value })
    }
}

impl From<MetadataEntry> for BTreeMap<String, String> {
    fn from(entry: MetadataEntry) -> Self {
        BTreeMap::from([(entry.key, entry.value)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
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
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(
        rename = "Articles",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub articles: Vec<Article>,
    #[serde(
        rename = "Sub-sections",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(rename = "Sub-sectionID")]
    pub id: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Articles", default)]
    pub articles: Vec<Article>,
}

impl Subsection {
    /// Numeric value of a `(n)` identifier.
    pub fn number(&self) -> Option<u32> {
        self.id
            .trim_start_matches('(')
            .trim_end_matches(')')
            .parse::<u32>()
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(rename = "ArticleID")]
    pub id: String,
    #[serde(rename = "Description")]
    pub description: String,
}

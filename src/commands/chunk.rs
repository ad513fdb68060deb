use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::ChunkArgs;
use crate::extraction::{Document, Section};
use crate::model::{ChunkMetadata, SectionChunk};
use crate::util::{artifact_stem, read_json, sha256_hex, write_json_pretty};

const MISSING: &str = "None";
const CHUNK_ID_LEN: usize = 32;

pub fn run(args: ChunkArgs) -> Result<()> {
    let document: Document = read_json(&args.input)?;
    let chunks = chunk_document(&document);

    let output_path = args.output.clone().unwrap_or_else(|| {
        args.out_dir
            .join(format!("{}_chunks.json", chunk_stem(&args.input)))
    });

    write_json_pretty(&output_path, &chunks)?;
    info!(
        input = %args.input.display(),
        path = %output_path.display(),
        sections = document.sections.len(),
        chunks = chunks.len(),
        "wrote section chunks"
    );

    Ok(())
}

pub fn chunk_document(document: &Document) -> Vec<SectionChunk> {
    document
        .sections
        .iter()
        .enumerate()
        .map(|(ordinal, section)| chunk_section(ordinal, section))
        .collect()
}

fn chunk_section(ordinal: usize, section: &Section) -> SectionChunk {
    let part_id = or_missing(section.part_id.as_deref());
    let part_title = or_missing(section.part_title.as_deref());
    let chapter_id = or_missing(section.chapter_id.as_deref());
    let chapter_title = or_missing(section.chapter_title.as_deref());
    let original_id = format!("{part_id}_{chapter_id}_{}", section.section_id);

    let mut content_parts = vec![
        [
            format!("Part: {part_id} - {part_title}"),
            format!("Chapter: {chapter_id} - {chapter_title}"),
            format!(
                "Section: {} - {}",
                section.section_id, section.section_title
            ),
        ]
        .join("\n"),
    ];

    push_labeled(&mut content_parts, None, &section.description);
    for article in &section.articles {
        push_labeled(
            &mut content_parts,
            Some(format!("Article {}", bare_label(&article.id))),
            &article.description,
        );
    }
    for subsection in &section.subsections {
        push_labeled(
            &mut content_parts,
            Some(format!("Sub-section {}", bare_label(&subsection.id))),
            &subsection.description,
        );
        for article in &subsection.articles {
            push_labeled(
                &mut content_parts,
                Some(format!("clause {}", bare_label(&article.id))),
                &article.description,
            );
        }
    }

    let content = content_parts.join("\n\n");
    let id_source = format!("{original_id}\n{ordinal}\n{content}");
    let mut id = sha256_hex(id_source.as_bytes());
    id.truncate(CHUNK_ID_LEN);

    SectionChunk {
        id,
        title: format!(
            "{part_title} | {chapter_title} | Section {} - {}",
            section.section_id, section.section_title
        ),
        content,
        metadata: ChunkMetadata {
            part_id: section.part_id.clone(),
            part_title: section.part_title.clone(),
            chapter_id: section.chapter_id.clone(),
            chapter_title: section.chapter_title.clone(),
            section_id: section.section_id.clone(),
            section_title: section.section_title.clone(),
            original_id,
        },
    }
}

fn push_labeled(parts: &mut Vec<String>, label: Option<String>, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }

    match label {
        Some(label) => parts.push(format!("{label}: {text}")),
        None => parts.push(text.to_string()),
    }
}

fn bare_label(id: &str) -> &str {
    id.trim_matches(['(', ')'])
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or(MISSING)
}

fn chunk_stem(input: &Path) -> String {
    let stem = artifact_stem(input);
    stem.strip_suffix("_extracted")
        .map(ToOwned::to_owned)
        .unwrap_or(stem)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::extraction::{Article, Subsection};

    fn sample_section() -> Section {
        Section {
            part_id: Some("Part-1".to_string()),
            part_title: Some("Fundamental Rights".to_string()),
            chapter_id: None,
            chapter_title: None,
            section_id: "5.".to_string(),
            section_title: "Right to life".to_string(),
            description: "Every person has the right to life.".to_string(),
            articles: vec![Article {
                id: "(a)".to_string(),
                description: "top level".to_string(),
            }],
            subsections: vec![Subsection {
                id: "(1)".to_string(),
                description: "No capital punishment.".to_string(),
                articles: vec![Article {
                    id: "(b)".to_string(),
                    description: "except military law.".to_string(),
                }],
            }],
        }
    }

    #[test]
    fn chunk_content_lists_hierarchy_then_body() {
        let document = Document {
            metadata: Vec::new(),
            sections: vec![sample_section()],
        };
        let chunks = chunk_document(&document);
        let chunk = &chunks[0];

        assert_eq!(chunk.metadata.original_id, "Part-1_None_5.");
        assert_eq!(
            chunk.title,
            "Fundamental Rights | None | Section 5. - Right to life"
        );
        assert_eq!(
            chunk.content,
            "Part: Part-1 - Fundamental Rights\nChapter: None - None\nSection: 5. - Right to life\n\n\
             Every person has the right to life.\n\n\
             Article a: top level\n\n\
             Sub-section 1: No capital punishment.\n\n\
             clause b: except military law."
        );
        assert_eq!(chunk.id.len(), CHUNK_ID_LEN);
    }

    #[test]
    fn chunk_ids_are_deterministic_and_distinct() {
        let mut second = sample_section();
        second.section_id = "6.".to_string();
        let document = Document {
            metadata: Vec::new(),
            sections: vec![sample_section(), second],
        };

        let first_run = chunk_document(&document);
        let second_run = chunk_document(&document);
        assert_eq!(first_run, second_run);
        assert_ne!(first_run[0].id, first_run[1].id);
    }

    #[test]
    fn empty_descriptions_are_omitted() {
        let mut section = sample_section();
        section.description.clear();
        section.articles.clear();
        section.subsections[0].articles.clear();
        let chunk = chunk_section(0, &section);
        assert_eq!(
            chunk.content,
            "Part: Part-1 - Fundamental Rights\nChapter: None - None\nSection: 5. - Right to life\n\n\
             Sub-section 1: No capital punishment."
        );
    }

    #[test]
    fn chunk_stem_drops_extracted_suffix() {
        assert_eq!(
            chunk_stem(&PathBuf::from(".cache/penal-code_extracted.json")),
            "penal-code"
        );
    }
}

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::extraction::{Document, Section};
use crate::util::read_json;

#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct StructuralSummary {
    pub sections: usize,
    pub empty_section_id_count: usize,
    pub non_increasing_subsection_sections: Vec<String>,
    pub unparseable_subsection_id_count: usize,
    pub duplicate_section_ids: Vec<String>,
}

impl StructuralSummary {
    /// Violations that fail `--strict`. Duplicate section ids are tolerated.
    pub fn hard_violation_count(&self) -> usize {
        self.empty_section_id_count
            + self.non_increasing_subsection_sections.len()
            + self.unparseable_subsection_id_count
    }
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let document: Document = read_json(&args.input)?;
    let summary = collect_structural_summary(&document);

    info!(
        input = %args.input.display(),
        sections = summary.sections,
        empty_section_ids = summary.empty_section_id_count,
        non_increasing_sections = summary.non_increasing_subsection_sections.len(),
        unparseable_subsection_ids = summary.unparseable_subsection_id_count,
        duplicate_section_ids = summary.duplicate_section_ids.len(),
        "structural validation summary"
    );

    if !summary.duplicate_section_ids.is_empty() {
        warn!(
            ids = %summary.duplicate_section_ids.join(", "),
            "section ids repeat across parts or chapters"
        );
    }

    for section_id in &summary.non_increasing_subsection_sections {
        warn!(section = %section_id, "sub-section numbers do not strictly increase");
    }

    let violations = summary.hard_violation_count();
    if args.strict && violations > 0 {
        bail!("structural validation failed with {violations} violations");
    }

    Ok(())
}

pub fn collect_structural_summary(document: &Document) -> StructuralSummary {
    let mut summary = StructuralSummary {
        sections: document.sections.len(),
        ..StructuralSummary::default()
    };
    let mut id_counts = BTreeMap::<&str, usize>::new();

    for section in &document.sections {
        let section_id = section.section_id.trim();
        if section_id.is_empty() {
            summary.empty_section_id_count += 1;
        } else {
            *id_counts.entry(section_id).or_insert(0) += 1;
        }

        let (increasing, unparseable) = check_subsection_order(section);
        if !increasing {
            summary
                .non_increasing_subsection_sections
                .push(section.section_id.clone());
        }
        summary.unparseable_subsection_id_count += unparseable;
    }

    summary.duplicate_section_ids = id_counts
        .into_iter()
        .filter_map(|(id, count)| (count > 1).then(|| id.to_string()))
        .collect();

    summary
}

fn check_subsection_order(section: &Section) -> (bool, usize) {
    let mut unparseable = 0usize;
    let mut previous: Option<u32> = None;
    let mut increasing = true;

    for subsection in &section.subsections {
        let Some(number) = subsection.number() else {
            unparseable += 1;
            continue;
        };
        if previous.is_some_and(|value| number <= value) {
            increasing = false;
        }
        previous = Some(number);
    }

    (increasing, unparseable)
}

use super::context::{HierarchyContext, OpenSection};
use super::document::Section;

pub const PREAMBLE_SECTION_ID: &str = "Preamble";

/// Freezes in-progress sections into the output list.
#[derive(Debug, Default)]
pub struct SectionAssembler {
    sections: Vec<Section>,
}

impl SectionAssembler {
    /// Appends `open` (if any) as an immutable record and returns whether a
    /// section was emitted.
    pub fn flush(&mut self, hierarchy: &HierarchyContext, open: Option<OpenSection>) -> bool {
        let Some(open) = open else {
            return false;
        };

        self.sections.push(Section {
            part_id: hierarchy.part_id.clone(),
            part_title: hierarchy.part_title.clone(),
            chapter_id: hierarchy.chapter_id.clone(),
            chapter_title: hierarchy.chapter_title.clone(),
            section_id: open.id,
            section_title: open.title.trim().trim_end_matches(':').trim_end().to_string(),
            description: open.description.trim().to_string(),
            articles: open.articles,
            subsections: open.subsections,
        });
        true
    }

    pub fn push_preamble(&mut self, lines: &[String]) {
        self.sections.push(Section {
            part_id: None,
            part_title: None,
            chapter_id: None,
            chapter_title: None,
            section_id: PREAMBLE_SECTION_ID.to_string(),
            section_title: PREAMBLE_SECTION_ID.to_string(),
            description: lines.join(" ").trim().to_string(),
            articles: Vec::new(),
            subsections: Vec::new(),
        });
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_without_open_section_is_a_no_op() {
        let mut assembler = SectionAssembler::default();
        assert!(!assembler.flush(&HierarchyContext::default(), None));
        assert_eq!(assembler.len(), 0);
    }

    #[test]
    fn flush_strips_title_colon_and_trims_description() {
        let mut assembler = SectionAssembler::default();
        let mut hierarchy = HierarchyContext::default();
        hierarchy.open_part("1");

        let mut open = OpenSection::new("3.".to_string(), "Definitions :".to_string());
        open.description = "  In this Act ".to_string();
        assert!(assembler.flush(&hierarchy, Some(open)));

        let sections = assembler.into_sections();
        assert_eq!(sections[0].part_id.as_deref(), Some("Part-1"));
        assert_eq!(sections[0].section_title, "Definitions");
        assert_eq!(sections[0].description, "In this Act");
        assert!(sections[0].subsections.is_empty());
    }

    #[test]
    fn preamble_has_no_hierarchy() {
        let mut assembler = SectionAssembler::default();
        assembler.push_preamble(&["Preamble:".to_string(), "Whereas it is expedient".to_string()]);
        let sections = assembler.into_sections();
        assert_eq!(sections[0].section_id, "Preamble");
        assert_eq!(sections[0].part_id, None);
        assert_eq!(sections[0].description, "Preamble: Whereas it is expedient");
    }
}

use super::document::{Article, Subsection};

/// Part and Chapter currently in force.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HierarchyContext {
    pub part_id: Option<String>,
    pub part_title: Option<String>,
    pub chapter_id: Option<String>,
    pub chapter_title: Option<String>,
}

impl HierarchyContext {
    pub fn open_part(&mut self, number: &str) {
        self.part_id = Some(format!("Part-{number}"));
        self.part_title = None;
        self.chapter_id = None;
        self.chapter_title = None;
    }

    pub fn open_chapter(&mut self, number: &str) {
        self.chapter_id = Some(format!("Chapter-{number}"));
        self.chapter_title = None;
    }
}

/// Section still accumulating text. The open sub-section, when there is one,
/// is always the last entry of `subsections`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub articles: Vec<Article>,
    pub subsections: Vec<Subsection>,
}

/// Node that receives continuation text, addressed by index into the
/// owning [`OpenSection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachTarget {
    SubsectionArticle { subsection: usize, article: usize },
    Subsection(usize),
    SectionArticle(usize),
    SectionDescription,
}

impl OpenSection {
    pub fn new(id: String, title: String) -> Self {
        Self {
            id,
            title,
            ..Self::default()
        }
    }

    pub fn has_open_subsection(&self) -> bool {
        !self.subsections.is_empty()
    }

    /// Deepest open node: last article of the open sub-section, then the
    /// sub-section itself, then the last top-level article, then the section.
    pub fn deepest_target(&self) -> AttachTarget {
        if let Some(subsection) = self.subsections.len().checked_sub(1) {
            return match self.subsections[subsection].articles.len().checked_sub(1) {
                Some(article) => AttachTarget::SubsectionArticle {
                    subsection,
                    article,
                },
                None => AttachTarget::Subsection(subsection),
            };
        }

        match self.articles.len().checked_sub(1) {
            Some(article) => AttachTarget::SectionArticle(article),
            None => AttachTarget::SectionDescription,
        }
    }

    pub fn append(&mut self, target: AttachTarget, text: &str) {
        let buffer = match target {
            AttachTarget::SubsectionArticle {
                subsection,
                article,
            } => self
                .subsections
                .get_mut(subsection)
                .and_then(|value| value.articles.get_mut(article))
                .map(|value| &mut value.description),
            AttachTarget::Subsection(subsection) => self
                .subsections
                .get_mut(subsection)
                .map(|value| &mut value.description),
            AttachTarget::SectionArticle(article) => self
                .articles
                .get_mut(article)
                .map(|value| &mut value.description),
            AttachTarget::SectionDescription => Some(&mut self.description),
        };

        if let Some(buffer) = buffer {
            append_text(buffer, text);
        }
    }

    pub fn append_to_deepest(&mut self, text: &str) {
        let target = self.deepest_target();
        self.append(target, text);
    }

    pub fn open_subsection(&mut self, number: u32, text: &str) {
        self.subsections.push(Subsection {
            id: format!("({number})"),
            description: text.trim().to_string(),
            articles: Vec::new(),
        });
    }

    pub fn push_article(&mut self, label: &str, text: &str) {
        let article = Article {
            id: format!("({label})"),
            description: text.trim().to_string(),
        };
        match self.subsections.last_mut() {
            Some(subsection) => subsection.articles.push(article),
            None => self.articles.push(article),
        }
    }
}

pub fn append_text(buffer: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !buffer.is_empty() {
        buffer.push(' ');
    }
    buffer.push_str(text);
}

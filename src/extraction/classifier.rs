use anyhow::{Context, Result};
use regex::{Captures, Regex};

pub const EXPLANATION_MARKER: &str = "Explanation:";

/// Pattern families in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Metadata,
    MetadataKey,
    PreambleStart,
    Part,
    Chapter,
    Section,
    Subsection,
    Article,
    SectionLike,
    PageNumber,
}

impl PatternKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Metadata => "metadata",
            PatternKind::MetadataKey => "metadata_key",
            PatternKind::PreambleStart => "preamble_start",
            PatternKind::Part => "part",
            PatternKind::Chapter => "chapter",
            PatternKind::Section => "section",
            PatternKind::Subsection => "subsection",
            PatternKind::Article => "article",
            PatternKind::SectionLike => "section_like",
            PatternKind::PageNumber => "page_number",
        }
    }
}

const PATTERN_TABLE: &[(PatternKind, &str)] = &[
    (
        PatternKind::Metadata,
        r"^(?i)(?P<key>Date of Authentication|Act number)\s*:\s*(?P<value>.+)$",
    ),
    (
        PatternKind::MetadataKey,
        r"^(?i)(?P<key>Date of Authentication|Act number)\s*:$",
    ),
    (PatternKind::PreambleStart, r"^(?i)Preamble\s*:"),
    (PatternKind::Part, r"^(?i)Part\s*[–\-]?\s*(?P<number>\d+)\b"),
    (
        PatternKind::Chapter,
        r"^(?i)Chapter\s*[–\-]?\s*(?P<number>\d+|[IVX]+|[A-Z])\b",
    ),
    (
        PatternKind::Section,
        r"^(?P<number>\d+)\.\s*(?P<title>[^\d\s:][^:]*?)\s*(?::\s*(?P<rest>.*))?$",
    ),
    (PatternKind::Subsection, r"^\((?P<number>\d+)\)\s*(?P<text>.*)$"),
    (PatternKind::Article, r"^\((?P<label>[a-z]+)\)\s*(?P<text>.*)$"),
    (PatternKind::SectionLike, r"^(?P<number>\d+)\.\s+(?P<rest>\S.*)$"),
    (PatternKind::PageNumber, r"^\d{1,3}$"),
];

/// Result of classifying one trimmed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Metadata {
        key: String,
        value: &'a str,
    },
    MetadataKey {
        key: String,
    },
    PreambleStart,
    PartHeader {
        number: &'a str,
    },
    ChapterHeader {
        number: &'a str,
    },
    SectionHeader {
        number: &'a str,
        title: &'a str,
        remainder: Option<&'a str>,
        has_colon: bool,
    },
    SubsectionHeader {
        number: u32,
        text: &'a str,
    },
    ArticleHeader {
        label: &'a str,
        text: &'a str,
    },
    SectionLike {
        number: &'a str,
        rest: &'a str,
    },
    PageNumber,
    PlainText(&'a str),
}

impl LineKind<'_> {
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Blank => "blank",
            LineKind::Metadata { .. } => PatternKind::Metadata.as_str(),
            LineKind::MetadataKey { .. } => PatternKind::MetadataKey.as_str(),
            LineKind::PreambleStart => PatternKind::PreambleStart.as_str(),
            LineKind::PartHeader { .. } => PatternKind::Part.as_str(),
            LineKind::ChapterHeader { .. } => PatternKind::Chapter.as_str(),
            LineKind::SectionHeader { .. } => PatternKind::Section.as_str(),
            LineKind::SubsectionHeader { .. } => PatternKind::Subsection.as_str(),
            LineKind::ArticleHeader { .. } => PatternKind::Article.as_str(),
            LineKind::SectionLike { .. } => PatternKind::SectionLike.as_str(),
            LineKind::PageNumber => PatternKind::PageNumber.as_str(),
            LineKind::PlainText(_) => "plain_text",
        }
    }

    /// Part and Chapter markers, which end front matter and preamble.
    pub fn is_division_header(&self) -> bool {
        matches!(
            self,
            LineKind::PartHeader { .. } | LineKind::ChapterHeader { .. }
        )
    }
}

#[derive(Debug)]
pub struct LineClassifier {
    patterns: Vec<(PatternKind, Regex)>,
    structural_hint: Regex,
}

impl LineClassifier {
    pub fn new() -> Result<Self> {
        let mut patterns = Vec::with_capacity(PATTERN_TABLE.len());
        for (kind, source) in PATTERN_TABLE {
            let regex = Regex::new(source)
                .with_context(|| format!("failed to compile {} line regex", kind.as_str()))?;
            patterns.push((*kind, regex));
        }

        Ok(Self {
            patterns,
            structural_hint: Regex::new(r"^(?:\([^)\s]{1,6}\)|\d+[.)]|(?i:part|chapter)\b)")
                .context("failed to compile structural hint regex")?,
        })
    }

    pub fn pattern_order(&self) -> Vec<PatternKind> {
        self.patterns.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let line = line.trim();
        if line.is_empty() {
            return LineKind::Blank;
        }

        for (kind, regex) in &self.patterns {
            let Some(captures) = regex.captures(line) else {
                continue;
            };
            if let Some(matched) = build_kind(*kind, &captures, line) {
                return matched;
            }
        }

        LineKind::PlainText(line)
    }

    /// True for unmatched lines that still open like a header, e.g. `(A) ...`
    /// or `Chapter one`.
    pub fn looks_structural(&self, line: &str) -> bool {
        self.structural_hint.is_match(line.trim())
    }
}

fn build_kind<'a>(kind: PatternKind, captures: &Captures<'a>, line: &'a str) -> Option<LineKind<'a>> {
    let group = |name: &str| captures.name(name).map(|value| value.as_str());

    match kind {
        PatternKind::Metadata => Some(LineKind::Metadata {
            key: normalize_metadata_key(group("key")?),
            value: group("value")?.trim(),
        }),
        PatternKind::MetadataKey => Some(LineKind::MetadataKey {
            key: normalize_metadata_key(group("key")?),
        }),
        PatternKind::PreambleStart => Some(LineKind::PreambleStart),
        PatternKind::Part => Some(LineKind::PartHeader {
            number: group("number")?,
        }),
        PatternKind::Chapter => Some(LineKind::ChapterHeader {
            number: group("number")?,
        }),
        PatternKind::Section => Some(LineKind::SectionHeader {
            number: group("number")?,
            title: group("title")?.trim(),
            remainder: group("rest").map(str::trim).filter(|rest| !rest.is_empty()),
            has_colon: line.contains(':'),
        }),
        PatternKind::Subsection => Some(LineKind::SubsectionHeader {
            number: group("number")?.parse::<u32>().ok()?,
            text: group("text")?.trim(),
        }),
        PatternKind::Article => Some(LineKind::ArticleHeader {
            label: group("label")?,
            text: group("text")?.trim(),
        }),
        PatternKind::SectionLike => Some(LineKind::SectionLike {
            number: group("number")?,
            rest: group("rest")?.trim(),
        }),
        PatternKind::PageNumber => Some(LineKind::PageNumber),
    }
}

fn normalize_metadata_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<&str>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new().expect("line patterns compile")
    }

    #[test]
    fn pattern_table_keeps_priority_order() {
        let order = classifier().pattern_order();
        assert_eq!(order.first(), Some(&PatternKind::Metadata));
        assert_eq!(order.last(), Some(&PatternKind::PageNumber));
        let section = order.iter().position(|kind| *kind == PatternKind::Section);
        let section_like = order
            .iter()
            .position(|kind| *kind == PatternKind::SectionLike);
        assert!(section < section_like);
    }

    #[test]
    fn metadata_lines_normalize_keys() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("Date of Authentication: 2074.6.30"),
            LineKind::Metadata {
                key: "date_of_authentication".to_string(),
                value: "2074.6.30",
            }
        );
        assert_eq!(
            classifier.classify("ACT NUMBER:"),
            LineKind::MetadataKey {
                key: "act_number".to_string(),
            }
        );
    }

    #[test]
    fn part_and_chapter_accept_dash_variants() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("Part – 3"),
            LineKind::PartHeader { number: "3" }
        );
        assert_eq!(
            classifier.classify("Chapter-IV"),
            LineKind::ChapterHeader { number: "IV" }
        );
        assert_eq!(
            classifier.classify("chapter 12 General Provisions"),
            LineKind::ChapterHeader { number: "12" }
        );
        assert!(matches!(
            classifier.classify("Participation in offences"),
            LineKind::PlainText(_)
        ));
    }

    #[test]
    fn section_header_splits_title_and_remainder() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("5. Right to life: Every person has the right to life."),
            LineKind::SectionHeader {
                number: "5",
                title: "Right to life",
                remainder: Some("Every person has the right to life."),
                has_colon: true,
            }
        );
        assert_eq!(
            classifier.classify("5. Right to"),
            LineKind::SectionHeader {
                number: "5",
                title: "Right to",
                remainder: None,
                has_colon: false,
            }
        );
    }

    #[test]
    fn decimals_in_prose_are_not_sections() {
        let classifier = classifier();
        assert!(matches!(
            classifier.classify("2.5 million rupees shall be paid"),
            LineKind::PlainText(_)
        ));
        assert_eq!(
            classifier.classify("7. 1990 Act repealed"),
            LineKind::SectionLike {
                number: "7",
                rest: "1990 Act repealed",
            }
        );
    }

    #[test]
    fn bracketed_markers_split_by_case() {
        let classifier = classifier();
        assert_eq!(
            classifier.classify("(3) No person shall be detained."),
            LineKind::SubsectionHeader {
                number: 3,
                text: "No person shall be detained.",
            }
        );
        assert_eq!(
            classifier.classify("(aa) except in custody"),
            LineKind::ArticleHeader {
                label: "aa",
                text: "except in custody",
            }
        );
        assert!(matches!(
            classifier.classify("(A) upper case marker"),
            LineKind::PlainText(_)
        ));
    }

    #[test]
    fn page_numbers_and_blanks() {
        let classifier = classifier();
        assert_eq!(classifier.classify("  "), LineKind::Blank);
        assert_eq!(classifier.classify("42"), LineKind::PageNumber);
        assert!(matches!(classifier.classify("4242"), LineKind::PlainText(_)));
    }

    #[test]
    fn oversized_subsection_number_falls_through() {
        let classifier = classifier();
        assert!(matches!(
            classifier.classify("(99999999999) overflow"),
            LineKind::PlainText(_)
        ));
    }

    #[test]
    fn structural_hint_flags_header_like_text() {
        let classifier = classifier();
        assert!(classifier.looks_structural("(A) upper case marker"));
        assert!(classifier.looks_structural("Chapter one"));
        assert!(!classifier.looks_structural("ordinary continuation text"));
    }
}

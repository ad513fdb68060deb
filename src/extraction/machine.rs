use std::mem;

use tracing::{debug, warn};

use super::assembler::SectionAssembler;
use super::classifier::{EXPLANATION_MARKER, LineClassifier, LineKind};
use super::context::{AttachTarget, HierarchyContext, OpenSection};
use super::document::{Document, MetadataEntry};
use super::issues::ParseIssue;
use super::policy::ExplanationPolicy;
use super::stats::ExtractionStats;
use super::title::{TitleAccumulator, TitleStep};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    /// Table of contents and cover text before the first Preamble/Part/Chapter marker.
    SkippingFrontMatter,
    InPreamble { lines: Vec<String> },
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DivisionTitle {
    Part,
    Chapter,
}

#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub document: Document,
    pub stats: ExtractionStats,
    pub issues: Vec<ParseIssue>,
}

/// Single-pass statute parser. Owns every piece of parse state; feed lines
/// in order and call [`DocumentParser::finish`] once.
#[derive(Debug)]
pub struct DocumentParser<'c> {
    classifier: &'c LineClassifier,
    policy: ExplanationPolicy,
    phase: Phase,
    hierarchy: HierarchyContext,
    section: Option<OpenSection>,
    title: Option<TitleAccumulator>,
    pending_division_title: Option<DivisionTitle>,
    pending_metadata_key: Option<String>,
    in_explanation: bool,
    in_article_context: bool,
    last_subsection_number: u32,
    metadata: Vec<MetadataEntry>,
    assembler: SectionAssembler,
    stats: ExtractionStats,
    issues: Vec<ParseIssue>,
    line_no: usize,
}

pub fn parse_lines<I, S>(
    classifier: &LineClassifier,
    policy: ExplanationPolicy,
    lines: I,
) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DocumentParser::new(classifier, policy);
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

impl<'c> DocumentParser<'c> {
    pub fn new(classifier: &'c LineClassifier, policy: ExplanationPolicy) -> Self {
        Self {
            classifier,
            policy,
            phase: Phase::SkippingFrontMatter,
            hierarchy: HierarchyContext::default(),
            section: None,
            title: None,
            pending_division_title: None,
            pending_metadata_key: None,
            in_explanation: false,
            in_article_context: false,
            last_subsection_number: 0,
            metadata: Vec::new(),
            assembler: SectionAssembler::default(),
            stats: ExtractionStats::default(),
            issues: Vec::new(),
            line_no: 0,
        }
    }

    pub fn feed(&mut self, raw_line: &str) {
        self.line_no += 1;
        self.stats.lines_total += 1;

        let line = raw_line.trim();
        let kind = self.classifier.classify(line);

        if kind == LineKind::Blank {
            self.stats.blank_lines += 1;
            return;
        }

        if kind == LineKind::PageNumber {
            self.stats.page_number_lines += 1;
            return;
        }

        if let Some(key) = self.pending_metadata_key.take() {
            if let LineKind::PlainText(value) = kind {
                self.record_metadata(key, value);
                return;
            }
            debug!(
                line_no = self.line_no,
                key = %key,
                kind = kind.label(),
                "metadata key dropped before structural line"
            );
        }

        let in_front_matter = matches!(self.phase, Phase::SkippingFrontMatter);
        match &kind {
            LineKind::Metadata { key, value } if !in_front_matter => {
                self.record_metadata(key.clone(), value);
                return;
            }
            LineKind::MetadataKey { key } if !in_front_matter => {
                self.pending_metadata_key = Some(key.clone());
                return;
            }
            _ => {}
        }

        match &mut self.phase {
            Phase::SkippingFrontMatter => {
                if kind == LineKind::PreambleStart {
                    debug!(line_no = self.line_no, "preamble started");
                    self.phase = Phase::InPreamble {
                        lines: vec![line.to_string()],
                    };
                    self.stats.preamble_lines += 1;
                    return;
                }
                if !kind.is_division_header() {
                    self.stats.front_matter_lines_skipped += 1;
                    return;
                }
                debug!(
                    line_no = self.line_no,
                    skipped = self.stats.front_matter_lines_skipped,
                    "front matter ended"
                );
                self.phase = Phase::Open;
            }
            Phase::InPreamble { lines } => {
                if !kind.is_division_header() {
                    lines.push(line.to_string());
                    self.stats.preamble_lines += 1;
                    return;
                }
                self.close_preamble();
            }
            Phase::Open => {}
        }

        self.apply(kind, line);
    }

    pub fn finish(mut self) -> ParseOutcome {
        if let Some(key) = self.pending_metadata_key.take() {
            debug!(key = %key, "metadata key without value at end of input");
        }

        if matches!(self.phase, Phase::InPreamble { .. }) {
            self.close_preamble();
        }

        if let (Some(title), Some(section)) = (self.title.as_ref(), self.section.as_ref()) {
            self.issues.push(ParseIssue::UnterminatedTitle {
                section_id: section.id.clone(),
                title: title.title(),
            });
        }

        self.flush_section();

        if self.assembler.len() == 0 {
            self.issues.push(ParseIssue::EmptySections);
        }

        for issue in &self.issues {
            warn!(issue = %issue, "parse issue");
        }

        ParseOutcome {
            document: Document {
                metadata: self.metadata,
                sections: self.assembler.into_sections(),
            },
            stats: self.stats,
            issues: self.issues,
        }
    }

    fn apply(&mut self, kind: LineKind<'_>, line: &str) {
        if let Some(pending) = self.pending_division_title.take() {
            if !kind.is_division_header() {
                self.set_division_title(pending, line);
                return;
            }
        }

        if let LineKind::PlainText(text) = kind {
            if !self.awaiting_title() && self.classifier.looks_structural(text) {
                self.issues.push(ParseIssue::UnrecognizedHeader {
                    line_no: self.line_no,
                    line: text.to_string(),
                });
            }
        }

        match kind {
            LineKind::PartHeader { number } => {
                self.flush_section();
                self.hierarchy.open_part(number);
                self.reset_section_state();
                self.pending_division_title = Some(DivisionTitle::Part);
                self.stats.parts_opened += 1;
                debug!(line_no = self.line_no, part = number, "opened part");
            }
            LineKind::ChapterHeader { number } => {
                self.flush_section();
                self.hierarchy.open_chapter(number);
                self.reset_section_state();
                self.pending_division_title = Some(DivisionTitle::Chapter);
                self.stats.chapters_opened += 1;
                debug!(line_no = self.line_no, chapter = number, "opened chapter");
            }
            LineKind::SectionHeader {
                number,
                title,
                remainder,
                has_colon,
            } => {
                self.open_section(number, title);
                if !has_colon {
                    self.title = Some(TitleAccumulator::new(title));
                }
                if let Some(remainder) = remainder {
                    self.start_body(remainder);
                }
            }
            LineKind::SectionLike { .. }
                if self.section.is_some() && line.contains(EXPLANATION_MARKER) =>
            {
                self.open_explanation(line)
            }
            LineKind::SectionLike { number, rest } => {
                let (title, body) = match rest.split_once(':') {
                    Some((title, body)) => (title.trim(), body.trim()),
                    None => (rest.trim(), ""),
                };
                self.open_section(number, title);
                if !body.is_empty() {
                    self.start_body(body);
                }
            }
            LineKind::PlainText(text) if self.awaiting_title() => self.absorb_title_line(text),
            LineKind::PreambleStart if self.awaiting_title() => self.absorb_title_line(line),
            LineKind::ArticleHeader { label, text } => self.push_article(label, text),
            _ if line.contains(EXPLANATION_MARKER) => self.open_explanation(line),
            LineKind::SubsectionHeader { number, text } => self.handle_subsection(number, text, line),
            _ => self.append_continuation(line),
        }
    }

    fn awaiting_title(&self) -> bool {
        self.title.is_some() && self.section.is_some()
    }

    fn open_section(&mut self, number: &str, title: &str) {
        self.flush_section();
        self.reset_section_state();
        let id = format!("{number}.");
        debug!(line_no = self.line_no, section = %id, "opened section");
        self.section = Some(OpenSection::new(id, title.to_string()));
    }

    /// Text following a completed header: either the first sub-section or
    /// the start of the section description.
    fn start_body(&mut self, text: &str) {
        let kind = self.classifier.classify(text);
        let Some(section) = self.section.as_mut() else {
            return;
        };

        match kind {
            LineKind::SubsectionHeader { number, text } => {
                section.open_subsection(number, text);
                self.last_subsection_number = number;
                self.stats.subsections_opened += 1;
            }
            _ => section.append(AttachTarget::SectionDescription, text),
        }
    }

    fn absorb_title_line(&mut self, line: &str) {
        let Some(accumulator) = self.title.as_mut() else {
            return;
        };

        let step = accumulator.absorb(line);
        let joined = accumulator.title();
        if let Some(section) = self.section.as_mut() {
            section.title = joined;
        }

        if let TitleStep::Complete { remainder } = step {
            self.title = None;
            if let Some(remainder) = remainder {
                self.start_body(remainder);
            }
        }
    }

    fn push_article(&mut self, label: &str, text: &str) {
        let Some(section) = self.section.as_mut() else {
            self.stats.unattached_lines += 1;
            return;
        };

        section.push_article(label, text);
        self.title = None;
        self.in_explanation = false;
        self.in_article_context = true;
        self.stats.articles_opened += 1;
    }

    fn open_explanation(&mut self, line: &str) {
        self.in_explanation = true;
        self.in_article_context = false;
        self.stats.explanation_blocks += 1;
        self.append_continuation(line);
    }

    fn handle_subsection(&mut self, number: u32, text: &str, line: &str) {
        let Some(section) = self.section.as_mut() else {
            self.stats.unattached_lines += 1;
            return;
        };

        if self.in_explanation {
            if self.policy.is_fragment(text) {
                section.append_to_deepest(&format!("({number}) {text}"));
                self.stats.explanation_fragments += 1;
                return;
            }
            self.in_explanation = false;
        }

        if self.in_article_context && !section.has_open_subsection() {
            if let Some(article) = section.articles.len().checked_sub(1) {
                section.append(
                    AttachTarget::SectionArticle(article),
                    &format!("({number}) {text}"),
                );
                self.stats.nested_article_points += 1;
                return;
            }
        }

        self.in_article_context = false;

        if number > self.last_subsection_number {
            section.open_subsection(number, text);
            self.last_subsection_number = number;
            self.title = None;
            self.stats.subsections_opened += 1;
            return;
        }

        debug!(
            line_no = self.line_no,
            number,
            last = self.last_subsection_number,
            "non-increasing sub-section number treated as continuation"
        );
        section.append_to_deepest(line);
        self.stats.non_increasing_subsection_lines += 1;
    }

    fn append_continuation(&mut self, line: &str) {
        match self.section.as_mut() {
            Some(section) => {
                section.append_to_deepest(line);
                self.stats.continuation_lines += 1;
            }
            None => {
                debug!(line_no = self.line_no, "continuation without open section dropped");
                self.stats.unattached_lines += 1;
            }
        }
    }

    fn set_division_title(&mut self, division: DivisionTitle, line: &str) {
        let title = Some(line.to_string());
        match division {
            DivisionTitle::Part => self.hierarchy.part_title = title,
            DivisionTitle::Chapter => self.hierarchy.chapter_title = title,
        }
    }

    fn record_metadata(&mut self, key: String, value: &str) {
        debug!(key = %key, "recorded metadata");
        self.metadata.push(MetadataEntry {
            key,
            value: value.trim().to_string(),
        });
        self.stats.metadata_entries += 1;
    }

    fn close_preamble(&mut self) {
        if let Phase::InPreamble { lines } = mem::replace(&mut self.phase, Phase::Open) {
            debug!(lines = lines.len(), "flushed preamble");
            self.assembler.push_preamble(&lines);
        }
    }

    fn flush_section(&mut self) {
        let open = self.section.take();
        if self.assembler.flush(&self.hierarchy, open) {
            self.stats.sections_emitted += 1;
        }
    }

    fn reset_section_state(&mut self) {
        self.section = None;
        self.title = None;
        self.in_explanation = false;
        self.in_article_context = false;
        self.last_subsection_number = 0;
    }
}

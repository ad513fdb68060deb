use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::ClassifyArgs;
use crate::commands::extract::load_source_text;
use crate::extraction::{LineClassifier, LineKind};

pub fn run(args: ClassifyArgs) -> Result<()> {
    let source = load_source_text(&args.input)?;
    let classifier = LineClassifier::new()?;
    debug!(
        patterns = %classifier
            .pattern_order()
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(" > "),
        "line pattern priority"
    );

    let mut output = io::BufWriter::new(io::stdout().lock());
    let mut written = 0usize;
    let mut structural_unmatched = 0usize;
    for (index, line) in source.lines.iter().enumerate() {
        let kind = classifier.classify(line);
        if args.skip_blank && kind == LineKind::Blank {
            continue;
        }
        if matches!(kind, LineKind::PlainText(_)) && classifier.looks_structural(line) {
            structural_unmatched += 1;
        }
        writeln!(output, "{}", render_row(index + 1, &kind, line))
            .context("failed to write classification row")?;
        written += 1;
    }
    output.flush().context("failed to flush classification output")?;

    info!(
        input = %args.input.display(),
        rows = written,
        structural_unmatched,
        "classified lines"
    );
    Ok(())
}

fn render_row(line_no: usize, kind: &LineKind<'_>, line: &str) -> String {
    format!("{line_no}\t{}\t{line}", kind.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_tab_separated() {
        let classifier = LineClassifier::new().expect("line patterns compile");
        let kind = classifier.classify("(2) Every detainee");
        assert_eq!(
            render_row(7, &kind, "(2) Every detainee"),
            "7\tsubsection\t(2) Every detainee"
        );
    }
}

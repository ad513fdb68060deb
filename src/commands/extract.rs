use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::cli::ExtractArgs;
use crate::extraction::{
    Document, DocumentSerializer, ExplanationPolicy, LineClassifier, ParseOutcome, parse_lines,
};
use crate::model::{ExtractCounts, ExtractPaths, ExtractRunManifest, SourceEntry};
use crate::util::{
    artifact_stem, now_utc_string, read_json, sha256_file, utc_compact_string, write_bytes,
    write_json_pretty,
};

const PAGE_SEPARATOR: char = '\u{000c}';

#[derive(Debug, Default)]
pub struct SourceText {
    pub page_count: usize,
    pub lines: Vec<String>,
}

pub fn run(args: ExtractArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("extract-{}", utc_compact_string(started_ts));

    let stem = artifact_stem(&args.input);
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.out_dir.join(format!("{stem}_extracted.json")));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        args.out_dir.join("manifests").join(format!(
            "extract_run_{}.json",
            utc_compact_string(started_ts)
        ))
    });

    info!(input = %args.input.display(), run_id = %run_id, "starting extraction");

    let policy = resolve_policy(args.policy_path.as_deref(), args.explanation_max_words)?;
    let source = load_source_text(&args.input)?;
    let classifier = LineClassifier::new()?;
    let outcome = parse_lines(&classifier, policy, &source.lines);

    let counts = summarize(&outcome);
    info!(
        pages = source.page_count,
        lines = source.lines.len(),
        sections = counts.sections,
        subsections = counts.subsections,
        articles = counts.articles,
        issues = counts.issues,
        "parsed document"
    );

    if args.dry_run {
        info!("extract dry-run complete");
        return Ok(());
    }

    let rendered = DocumentSerializer::default().to_vec(&outcome.document)?;
    write_bytes(&output_path, &rendered)?;
    info!(path = %output_path.display(), "wrote extracted document");

    let warnings = outcome
        .issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<String>>();
    if !warnings.is_empty() {
        warn!(count = warnings.len(), "extraction finished with parse issues");
    }

    let manifest = ExtractRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_extract_command(&args),
        source: SourceEntry {
            path: args.input.display().to_string(),
            sha256: sha256_file(&args.input)?,
            page_count: source.page_count,
            line_count: source.lines.len(),
        },
        paths: ExtractPaths {
            out_dir: args.out_dir.display().to_string(),
            output_path: output_path.display().to_string(),
            manifest_path: manifest_path.display().to_string(),
        },
        policy,
        counts,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote extract run manifest");

    Ok(())
}

pub fn resolve_policy(
    policy_path: Option<&Path>,
    max_words_override: Option<usize>,
) -> Result<ExplanationPolicy> {
    let mut policy = match policy_path {
        Some(path) => read_json::<ExplanationPolicy>(path)
            .with_context(|| format!("failed to load explanation policy: {}", path.display()))?,
        None => ExplanationPolicy::default(),
    };

    if let Some(max_words) = max_words_override {
        policy = policy.with_max_fragment_words(max_words);
    }

    Ok(policy)
}

pub fn load_source_text(path: &Path) -> Result<SourceText> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read source text: {}", path.display()))?;
    Ok(split_source_text(&raw))
}

pub fn split_source_text(raw: &str) -> SourceText {
    let mut source = SourceText::default();

    for page in raw.split(PAGE_SEPARATOR) {
        if page.trim().is_empty() {
            continue;
        }
        source.page_count += 1;
        source
            .lines
            .extend(page.lines().map(|line| line.trim().to_string()));
    }

    source
}

fn summarize(outcome: &ParseOutcome) -> ExtractCounts {
    let document: &Document = &outcome.document;
    let subsections = document
        .sections
        .iter()
        .map(|section| section.subsections.len())
        .sum();
    let articles = document
        .sections
        .iter()
        .map(|section| {
            section.articles.len()
                + section
                    .subsections
                    .iter()
                    .map(|subsection| subsection.articles.len())
                    .sum::<usize>()
        })
        .sum();

    ExtractCounts {
        metadata_entries: document.metadata.len(),
        sections: document.sections.len(),
        subsections,
        articles,
        issues: outcome.issues.len(),
        parser: outcome.stats.clone(),
    }
}

fn render_extract_command(args: &ExtractArgs) -> String {
    let mut parts = vec![
        "statute-extract".to_string(),
        "extract".to_string(),
        "--input".to_string(),
        args.input.display().to_string(),
        "--out-dir".to_string(),
        args.out_dir.display().to_string(),
    ];

    let optional_paths: [(&str, &Option<PathBuf>); 3] = [
        ("--output", &args.output),
        ("--manifest-path", &args.manifest_path),
        ("--policy-path", &args.policy_path),
    ];
    for (flag, value) in optional_paths {
        if let Some(path) = value {
            parts.push(flag.to_string());
            parts.push(path.display().to_string());
        }
    }

    if let Some(max_words) = args.explanation_max_words {
        parts.push("--explanation-max-words".to_string());
        parts.push(max_words.to_string());
    }

    if args.dry_run {
        parts.push("--dry-run".to_string());
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_source_text_counts_pages_and_trims_lines() {
        let source = split_source_text("Part-1\n  Preliminary  \n\u{000c}\u{000c}1. Title: body\n");
        assert_eq!(source.page_count, 2);
        assert_eq!(source.lines, vec!["Part-1", "Preliminary", "1. Title: body"]);
    }

    #[test]
    fn policy_override_replaces_word_threshold() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("policy.json");
        fs::write(&path, r#"{"max_fragment_words": 20, "uppercase_start_ends_explanation": false}"#)
            .expect("policy written");

        let policy = resolve_policy(Some(path.as_path()), Some(5)).expect("policy resolves");
        assert_eq!(policy.max_fragment_words, 5);
        assert!(!policy.uppercase_start_ends_explanation);

        let default_policy = resolve_policy(None, None).expect("default policy");
        assert_eq!(default_policy, ExplanationPolicy::default());
    }

    #[test]
    fn run_writes_document_and_manifest() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("civil-code.txt");
        fs::write(
            &input,
            "Contents\n1. Short title\n\u{000c}Part-1\nPreliminary\n1. Short title: This Act may be cited.\n2\n",
        )
        .expect("input written");

        let output = dir.path().join("out").join("doc.json");
        let manifest_path = dir.path().join("out").join("manifest.json");
        run(ExtractArgs {
            input: input.clone(),
            out_dir: dir.path().join("out"),
            output: Some(output.clone()),
            manifest_path: Some(manifest_path.clone()),
            policy_path: None,
            explanation_max_words: None,
            dry_run: false,
        })
        .expect("extract succeeds");

        let document: Document = read_json(&output).expect("document readable");
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].section_title, "Short title");

        let manifest: serde_json::Value = read_json(&manifest_path).expect("manifest readable");
        assert_eq!(manifest["status"], "completed");
        assert_eq!(manifest["source"]["page_count"], 2);
        assert_eq!(manifest["counts"]["parser"]["front_matter_lines_skipped"], 2);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("act.txt");
        fs::write(&input, "Part-1\nGeneral\n1. Title: body\n").expect("input written");
        let out_dir = dir.path().join("out");

        run(ExtractArgs {
            input,
            out_dir: out_dir.clone(),
            output: None,
            manifest_path: None,
            policy_path: None,
            explanation_max_words: None,
            dry_run: true,
        })
        .expect("dry run succeeds");

        assert!(!out_dir.exists());
    }
}

use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::commands::judge::{JudgeConfig, judge_with_ground_truth, load_ground_truth};
use crate::model::GroundTruthSet;

fn fixture_ground_truth() -> GroundTruthSet {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("ground_truth.json");
    load_ground_truth(&path).expect("fixture ground truth should load")
}

fn result_from_ground_truth(ground_truth: &GroundTruthSet) -> TriageResult {
    TriageResult {
        papers: ground_truth
            .labels
            .iter()
            .map(|paper| PaperAnalysis {
                filename: paper.filename.clone(),
                title: paper.label.title.clone(),
                classification: paper.label.classification,
                domain_tags: paper.label.domain_tags.clone(),
                key_contribution: paper.label.key_contribution.clone(),
                relevance_score: paper.label.relevance_score,
            })
            .collect(),
        reading_order: ground_truth
            .reference_ranking
            .iter()
            .enumerate()
            .map(|(index, filename)| ReadingOrderEntry {
                rank: index as u32 + 1,
                filename: filename.clone(),
                justification: "core preference-learning result".to_string(),
            })
            .collect(),
    }
}

fn workspace_with_inbox(filenames: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("temp workspace");
    let inbox = dir.path().join(INBOX_DIR);
    fs::create_dir_all(&inbox).expect("inbox");
    for filename in filenames {
        fs::write(inbox.join(filename), b"not really a pdf").expect("paper");
    }
    dir
}

fn analysis(filename: &str, classification: Bucket) -> PaperAnalysis {
    PaperAnalysis {
        filename: filename.to_string(),
        title: filename.trim_end_matches(".pdf").to_string(),
        classification,
        domain_tags: vec!["rlhf".to_string()],
        key_contribution: "a contribution".to_string(),
        relevance_score: 0.5,
    }
}

#[test]
fn truncate_chars_respects_character_boundaries() {
    assert_eq!(truncate_chars("héllo wörld", 4), ("héll", true));
    assert_eq!(truncate_chars("short", 10), ("short", false));
    assert_eq!(truncate_chars("exact", 5), ("exact", false));
}

#[test]
fn build_request_previews_and_caps_paper_text() {
    let papers = vec![
        InboxPaper {
            filename: "a.pdf".to_string(),
            text: "abcdefghij".to_string(),
        },
        InboxPaper {
            filename: "b.pdf".to_string(),
            text: "xyz".to_string(),
        },
    ];
    let limits = ContextLimits {
        preview_chars: 4,
        paper_text_cap: 6,
    };

    let request = build_request(&papers, limits);
    assert_eq!(
        request.prompt,
        "Triage these 2 papers:\n\n--- a.pdf ---\nabcd\n\n--- b.pdf ---\nxyz\n\nClassify all and produce the reading order."
    );
    assert_eq!(request.papers[0].text, "abcdef\n[truncated]");
    assert_eq!(request.papers[1].text, "xyz");
    assert_eq!(request.instructions, TRIAGE_INSTRUCTIONS);
}

#[test]
fn parse_result_rejects_out_of_range_scores_and_empty_tags() {
    let mut result = TriageResult {
        papers: vec![analysis("a.pdf", Bucket::MustRead)],
        reading_order: vec![],
    };
    result.papers[0].relevance_score = 1.2;
    let raw = serde_json::to_vec(&result).expect("serialize");
    let error = parse_result(&raw).expect_err("score out of range");
    assert!(error.to_string().contains("relevance score"), "unexpected error: {error}");

    result.papers[0].relevance_score = 0.4;
    result.papers[0].domain_tags.clear();
    let raw = serde_json::to_vec(&result).expect("serialize");
    assert!(parse_result(&raw).is_err());
}

#[test]
fn parse_result_rejects_unknown_bucket() {
    let raw = br#"{
        "papers": [{
            "filename": "a.pdf",
            "title": "A",
            "classification": "skim",
            "domain_tags": ["x"],
            "key_contribution": "y",
            "relevance_score": 0.3
        }],
        "reading_order": []
    }"#;
    assert!(parse_result(raw).is_err());
}

#[test]
fn extract_text_returns_diagnostic_instead_of_failing() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.pdf");
    fs::write(&path, b"definitely not a pdf").expect("write");

    let text = extract_text(&path);
    assert!(text.starts_with("[couldn't read"), "unexpected text: {text}");

    let missing = extract_text(&dir.path().join("missing.pdf"));
    assert!(missing.starts_with("[couldn't read"), "unexpected text: {missing}");
}

#[test]
fn render_reading_order_uses_rank_filename_justification_lines() {
    let entries = vec![
        ReadingOrderEntry {
            rank: 1,
            filename: "a.pdf".to_string(),
            justification: "foundational".to_string(),
        },
        ReadingOrderEntry {
            rank: 2,
            filename: "b.pdf".to_string(),
            justification: "follow-up".to_string(),
        },
    ];
    assert_eq!(
        render_reading_order(&entries),
        "1. a.pdf | foundational\n2. b.pdf | follow-up\n"
    );
}

#[test]
fn materialize_files_papers_and_skips_missing_or_unsafe_names() {
    let ws = workspace_with_inbox(&["a.pdf", "b.pdf"]);
    let result = TriageResult {
        papers: vec![
            analysis("a.pdf", Bucket::MustRead),
            analysis("b.pdf", Bucket::Bullshit),
            analysis("ghost.pdf", Bucket::NiceToRead),
            analysis("../escape.pdf", Bucket::NiceToRead),
        ],
        reading_order: vec![ReadingOrderEntry {
            rank: 1,
            filename: "a.pdf".to_string(),
            justification: "read first".to_string(),
        }],
    };

    let summary = materialize_results(&result, ws.path()).expect("materialize");
    assert_eq!(summary.moved, 2);
    assert_eq!(summary.missing, vec!["ghost.pdf", "../escape.pdf"]);
    assert_eq!(summary.per_bucket.get("must-read"), Some(&1));
    assert_eq!(summary.per_bucket.get("bullshit"), Some(&1));

    assert!(ws.path().join("must-read").join("a.pdf").is_file());
    assert!(ws.path().join("bullshit").join("b.pdf").is_file());
    assert!(ws.path().join("nice-to-read").is_dir());
    assert!(!ws.path().join(INBOX_DIR).join("a.pdf").exists());

    let order = fs::read_to_string(ws.path().join(READING_ORDER_FILE)).expect("order");
    assert_eq!(order, "1. a.pdf | read first\n");

    let report: Vec<PaperAnalysis> = serde_json::from_slice(
        &fs::read(ws.path().join(REPORT_FILE)).expect("report"),
    )
    .expect("report json");
    assert_eq!(report, result.papers);
}

#[test]
fn triage_replay_then_judge_scores_perfect() {
    let ground_truth = fixture_ground_truth();
    let filenames: Vec<&str> = ground_truth
        .labels
        .iter()
        .map(|paper| paper.filename.as_str())
        .collect();
    let ws = workspace_with_inbox(&filenames);

    let replay_path = ws.path().join("replay.json");
    fs::write(
        &replay_path,
        serde_json::to_vec(&result_from_ground_truth(&ground_truth)).expect("serialize"),
    )
    .expect("replay file");
    let agent = ReplayAgent { path: replay_path };

    let outcome =
        triage(ws.path(), &agent, ContextLimits::STANDARD, false).expect("triage succeeds");
    let summary = outcome.summary.expect("materialized");
    assert_eq!(summary.moved, ground_truth.len());
    assert!(summary.missing.is_empty());

    let report = judge_with_ground_truth(ws.path(), &ground_truth, &JudgeConfig::default());
    assert_eq!(report.score, 100.0);
}

#[test]
fn triage_dry_run_leaves_inbox_untouched() {
    let ws = workspace_with_inbox(&["a.pdf"]);
    let replay_path = ws.path().join("replay.json");
    let result = TriageResult {
        papers: vec![analysis("a.pdf", Bucket::MustRead)],
        reading_order: vec![],
    };
    fs::write(&replay_path, serde_json::to_vec(&result).expect("serialize")).expect("replay");

    let outcome = triage(
        ws.path(),
        &ReplayAgent { path: replay_path },
        ContextLimits::COMPACT,
        true,
    )
    .expect("dry run");
    assert!(outcome.summary.is_none());
    assert_eq!(outcome.result, result);
    assert!(ws.path().join(INBOX_DIR).join("a.pdf").is_file());
    assert!(!ws.path().join(REPORT_FILE).exists());
}

#[test]
fn triage_requires_non_empty_inbox() {
    let ws = TempDir::new().expect("temp dir");
    let agent = ReplayAgent {
        path: ws.path().join("unused.json"),
    };

    let error = triage(ws.path(), &agent, ContextLimits::STANDARD, false)
        .expect_err("missing inbox");
    assert!(error.to_string().contains("no inbox"), "unexpected error: {error}");

    fs::create_dir_all(ws.path().join(INBOX_DIR)).expect("inbox");
    fs::write(ws.path().join(INBOX_DIR).join("notes.txt"), b"x").expect("non-pdf");
    let error = triage(ws.path(), &agent, ContextLimits::STANDARD, false)
        .expect_err("empty inbox");
    assert!(error.to_string().contains("inbox is empty"), "unexpected error: {error}");
}

#[cfg(unix)]
#[test]
fn command_agent_exchanges_json_over_stdio() {
    let dir = TempDir::new().expect("temp dir");
    let result = TriageResult {
        papers: vec![analysis("a.pdf", Bucket::NiceToRead)],
        reading_order: vec![],
    };
    let canned = dir.path().join("canned.json");
    fs::write(&canned, serde_json::to_vec(&result).expect("serialize")).expect("canned");

    let agent = CommandAgent {
        program: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            "cat > /dev/null && cat \"$1\"".to_string(),
            "agent".to_string(),
            canned.display().to_string(),
        ],
    };
    let request = build_request(
        &[InboxPaper {
            filename: "a.pdf".to_string(),
            text: "text".to_string(),
        }],
        ContextLimits::STANDARD,
    );

    assert_eq!(agent.triage(&request).expect("agent output"), result);
}

#[cfg(unix)]
#[test]
fn command_agent_reports_stderr_on_failure() {
    let agent = CommandAgent {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "echo model unavailable >&2; exit 3".to_string()],
    };
    let request = build_request(&[], ContextLimits::STANDARD);

    let error = agent.triage(&request).expect_err("non-zero exit");
    assert!(
        format!("{error:#}").contains("model unavailable"),
        "unexpected error: {error:#}"
    );
}

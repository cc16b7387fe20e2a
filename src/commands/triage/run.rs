use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TriageOutcome {
    pub result: TriageResult,
    pub summary: Option<MaterializeSummary>,
}

pub fn run(args: TriageArgs) -> Result<()> {
    let agent: Box<dyn TriageAgent> = match (&args.agent_command, &args.replay) {
        (Some(program), None) => Box::new(CommandAgent {
            program: program.clone(),
            args: args.agent_args.clone(),
        }),
        (None, Some(path)) => Box::new(ReplayAgent { path: path.clone() }),
        _ => bail!("exactly one of --agent-command or --replay is required"),
    };

    let preset = if args.compact_context {
        ContextLimits::COMPACT
    } else {
        ContextLimits::STANDARD
    };
    let limits = ContextLimits {
        preview_chars: args.preview_chars.unwrap_or(preset.preview_chars),
        paper_text_cap: args.paper_text_cap.unwrap_or(preset.paper_text_cap),
    };

    let outcome = triage(&args.base_dir, agent.as_ref(), limits, args.dry_run)?;

    match &outcome.summary {
        Some(summary) => info!(
            papers = outcome.result.papers.len(),
            ranked = outcome.result.reading_order.len(),
            moved = summary.moved,
            missing = summary.missing.len(),
            must_read = summary.per_bucket.get("must-read").copied().unwrap_or(0),
            nice_to_read = summary.per_bucket.get("nice-to-read").copied().unwrap_or(0),
            bullshit = summary.per_bucket.get("bullshit").copied().unwrap_or(0),
            "triage completed"
        ),
        None => info!(
            papers = outcome.result.papers.len(),
            ranked = outcome.result.reading_order.len(),
            "triage dry-run complete"
        ),
    }

    Ok(())
}

pub fn triage(
    base_dir: &Path,
    agent: &dyn TriageAgent,
    limits: ContextLimits,
    dry_run: bool,
) -> Result<TriageOutcome> {
    let inbox = base_dir.join(INBOX_DIR);
    if !inbox.is_dir() {
        bail!("no inbox at {}", inbox.display());
    }

    let papers = scan_inbox(&inbox)?;
    if papers.is_empty() {
        bail!("inbox is empty: {}", inbox.display());
    }
    info!(inbox = %inbox.display(), papers = papers.len(), "extracted inbox");

    let request = build_request(&papers, limits);
    info!(agent = agent.name(), papers = request.papers.len(), "requesting triage");
    let result = agent
        .triage(&request)
        .with_context(|| format!("agent {} failed to triage inbox", agent.name()))?;

    let known: HashSet<&str> = papers.iter().map(|paper| paper.filename.as_str()).collect();
    for paper in &result.papers {
        if !known.contains(paper.filename.as_str()) {
            warn!(filename = %paper.filename, "agent analysed a paper that is not in the inbox");
        }
    }

    if dry_run {
        return Ok(TriageOutcome {
            result,
            summary: None,
        });
    }

    let summary = materialize_results(&result, base_dir)?;
    Ok(TriageOutcome {
        result,
        summary: Some(summary),
    })
}

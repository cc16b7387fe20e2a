use super::*;

pub const TRIAGE_INSTRUCTIONS: &str = "\
You are a senior reinforcement-learning engineer who works on RLHF and preference-based training.
You are triaging this week's batch of ML papers.

For every paper:
- Classify it as must-read, nice-to-read, or bullshit.
  - must-read: directly about RLHF, DPO, KTO, reward modeling, preference optimization or alignment.
  - nice-to-read: adjacent background that is useful but not urgent.
  - bullshit: off-topic or irrelevant to that work.
- List its domain tags.
- Summarize its key contribution in one line.
- Give a relevance score between 0 and 1.

Then rank the must-read papers by priority, most impactful first, with a one-line justification each.
Reserve must-read for papers worth cancelling a meeting over.";

const PROMPT_CLOSING: &str = "Classify all and produce the reading order.";
const TRUNCATION_MARKER: &str = "\n[truncated]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextLimits {
    pub preview_chars: usize,
    pub paper_text_cap: usize,
}

impl ContextLimits {
    pub const STANDARD: Self = Self {
        preview_chars: 300,
        paper_text_cap: 10_000,
    };

    pub const COMPACT: Self = Self {
        preview_chars: 100,
        paper_text_cap: 1_500,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperText {
    pub filename: String,
    pub text: String,
}

/// Everything an agent needs to triage one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub instructions: String,
    pub prompt: String,
    pub papers: Vec<PaperText>,
}

pub trait TriageAgent {
    fn name(&self) -> &str;

    fn triage(&self, request: &TriageRequest) -> Result<TriageResult>;
}

/// Leading `max_chars` characters of `text`, and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

pub fn build_request(papers: &[InboxPaper], limits: ContextLimits) -> TriageRequest {
    let mut prompt = format!("Triage these {} papers:\n\n", papers.len());
    for paper in papers {
        let (preview, _) = truncate_chars(&paper.text, limits.preview_chars);
        prompt.push_str(&format!("--- {} ---\n{}\n\n", paper.filename, preview));
    }
    prompt.push_str(PROMPT_CLOSING);

    let papers = papers
        .iter()
        .map(|paper| {
            let (text, truncated) = truncate_chars(&paper.text, limits.paper_text_cap);
            let text = if truncated {
                format!("{text}{TRUNCATION_MARKER}")
            } else {
                text.to_string()
            };
            PaperText {
                filename: paper.filename.clone(),
                text,
            }
        })
        .collect();

    TriageRequest {
        instructions: TRIAGE_INSTRUCTIONS.to_string(),
        prompt,
        papers,
    }
}

/// Checks the constraints serde cannot express on an agent's result.
pub fn validate_result(result: &TriageResult) -> Result<()> {
    for paper in &result.papers {
        if paper.domain_tags.is_empty() {
            bail!("paper {} has no domain tags", paper.filename);
        }
        if !(0.0..=1.0).contains(&paper.relevance_score) {
            bail!(
                "paper {} has relevance score outside [0, 1]: {}",
                paper.filename,
                paper.relevance_score
            );
        }
    }

    let mut seen = HashSet::new();
    for entry in &result.reading_order {
        if !seen.insert(entry.filename.as_str()) {
            warn!(filename = %entry.filename, "paper ranked more than once");
        }
    }

    Ok(())
}

pub fn parse_result(raw: &[u8]) -> Result<TriageResult> {
    let result: TriageResult =
        serde_json::from_slice(raw).context("agent output is not a valid triage result")?;
    validate_result(&result)?;
    Ok(result)
}

/// Runs an external program with the request as JSON on stdin and reads the
/// triage result as JSON from its stdout.
#[derive(Debug, Clone)]
pub struct CommandAgent {
    pub program: String,
    pub args: Vec<String>,
}

impl TriageAgent for CommandAgent {
    fn name(&self) -> &str {
        &self.program
    }

    fn triage(&self, request: &TriageRequest) -> Result<TriageResult> {
        let payload =
            serde_json::to_vec(request).context("failed to serialize triage request")?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to spawn agent command {}", self.program))?;

        let mut stdin = child
            .stdin
            .take()
            .context("agent command stdin was not captured")?;
        let writer = std::thread::spawn(move || stdin.write_all(&payload));

        let output = child
            .wait_with_output()
            .with_context(|| format!("failed to wait for agent command {}", self.program))?;

        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                debug!(error = %error, "agent command closed stdin early");
            }
            Err(_) => bail!("agent stdin writer panicked"),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "agent command {} returned non-zero exit status {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
        }

        parse_result(&output.stdout)
            .with_context(|| format!("invalid output from agent command {}", self.program))
    }
}

/// Replays a triage result captured from an earlier agent run.
#[derive(Debug, Clone)]
pub struct ReplayAgent {
    pub path: PathBuf,
}

impl TriageAgent for ReplayAgent {
    fn name(&self) -> &str {
        "replay"
    }

    fn triage(&self, _request: &TriageRequest) -> Result<TriageResult> {
        let raw = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        parse_result(&raw).with_context(|| format!("failed to parse {}", self.path.display()))
    }
}

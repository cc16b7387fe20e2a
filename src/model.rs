use std::fmt;

use serde::{Deserialize, Serialize};

pub const INBOX_DIR: &str = "inbox";
pub const READING_ORDER_FILE: &str = "reading_order.txt";
pub const REPORT_FILE: &str = "triage_report.json";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    MustRead,
    NiceToRead,
    Bullshit,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::MustRead, Bucket::NiceToRead, Bucket::Bullshit];

    /// Name used both on the wire and as the bucket directory name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MustRead => "must-read",
            Self::NiceToRead => "nice-to-read",
            Self::Bullshit => "bullshit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.as_str() == value)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    pub classification: Bucket,
    pub title: String,
    pub domain_tags: Vec<String>,
    pub key_contribution: String,
    pub relevance_score: f64,
}

/// A labeled paper, in the order it appears in the ground-truth file.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPaper {
    pub filename: String,
    pub label: GroundTruthEntry,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroundTruthSet {
    pub labels: Vec<LabeledPaper>,
    pub reference_ranking: Vec<String>,
}

impl GroundTruthSet {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, filename: &str) -> Option<&GroundTruthEntry> {
        self.labels
            .iter()
            .find(|paper| paper.filename == filename)
            .map(|paper| &paper.label)
    }
}

/// On-disk shape of the ground-truth file. Labels stay an ordered JSON map so
/// iteration follows file order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthFile {
    pub labels: serde_json::Map<String, serde_json::Value>,
    pub reference_ranking: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperAnalysis {
    pub filename: String,
    pub title: String,
    pub classification: Bucket,
    pub domain_tags: Vec<String>,
    pub key_contribution: String,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingOrderEntry {
    pub rank: u32,
    pub filename: String,
    pub justification: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageResult {
    pub papers: Vec<PaperAnalysis>,
    pub reading_order: Vec<ReadingOrderEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub classification_accuracy: f64,
    pub reading_order_format: f64,
    pub ranking_correlation: f64,
    pub report_schema: f64,
    pub keyword_overlap: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeReport {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxEntry {
    pub filename: String,
    pub size_bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pdfs: Vec<InboxEntry>,
}

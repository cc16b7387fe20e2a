use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::CatalogArgs;
use crate::model::{Bucket, GroundTruthEntry, GroundTruthFile, INBOX_DIR};
use crate::util::{ensure_directory, write_json_pretty};

const MAX_SLUG_CHARS: usize = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct PaperCatalog {
    pub arxiv_papers: Vec<CatalogPaper>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPaper {
    pub url: String,
    pub title: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownloadPlanEntry {
    pub filename: String,
    pub source_url: String,
    pub pdf_url: String,
    pub classification: Bucket,
}

struct CategoryLabel {
    classification: Bucket,
    tags: &'static [&'static str],
    relevance: f64,
}

fn category_label(category: &str) -> CategoryLabel {
    match category {
        "AI and RL (2026)" => CategoryLabel {
            classification: Bucket::MustRead,
            tags: &["reinforcement-learning", "rlhf", "alignment"],
            relevance: 0.90,
        },
        "MLOps" => CategoryLabel {
            classification: Bucket::NiceToRead,
            tags: &["mlops", "ml-engineering", "deployment"],
            relevance: 0.55,
        },
        _ => CategoryLabel {
            classification: Bucket::Bullshit,
            tags: &["off-topic"],
            relevance: 0.10,
        },
    }
}

pub struct UrlPatterns {
    slug: Regex,
    arxiv_new: Regex,
    arxiv_old: Regex,
}

impl UrlPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            slug: Regex::new(r"[^a-z0-9]+").context("failed to compile slug regex")?,
            arxiv_new: Regex::new(r"arxiv\.org/(?:abs|pdf)/(\d+\.\d+(?:v\d+)?)")
                .context("failed to compile arXiv id regex")?,
            arxiv_old: Regex::new(r"arxiv\.org/(?:abs|pdf)/([\w.-]+/\d+(?:v\d+)?)")
                .context("failed to compile legacy arXiv id regex")?,
        })
    }

    pub fn filename_for_title(&self, title: &str) -> String {
        let lowered = title.to_lowercase();
        let slug = self.slug.replace_all(&lowered, "_");
        let slug: String = slug.trim_matches('_').chars().take(MAX_SLUG_CHARS).collect();
        format!("{slug}.pdf")
    }

    pub fn arxiv_id<'a>(&self, url: &'a str) -> Option<&'a str> {
        [&self.arxiv_new, &self.arxiv_old].into_iter().find_map(|pattern| {
            pattern
                .captures(url)
                .and_then(|captures| captures.get(1))
                .map(|id| id.as_str())
        })
    }

    pub fn pdf_url(&self, url: &str) -> String {
        match self.arxiv_id(url) {
            Some(id) => format!("https://arxiv.org/pdf/{id}.pdf"),
            None => url.to_string(),
        }
    }
}

pub fn run(args: CatalogArgs) -> Result<()> {
    let raw = fs::read(&args.catalog_path)
        .with_context(|| format!("failed to read {}", args.catalog_path.display()))?;
    let catalog: PaperCatalog = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", args.catalog_path.display()))?;

    prepare_workspace(&args.base_dir)?;

    let patterns = UrlPatterns::new()?;
    let (ground_truth, plan) = build_ground_truth(&catalog, &patterns)?;

    write_json_pretty(&args.ground_truth, &ground_truth)?;
    info!(path = %args.ground_truth.display(), "wrote ground truth");

    let plan_path = args
        .download_plan_path
        .unwrap_or_else(|| args.base_dir.join("download_plan.json"));
    write_json_pretty(&plan_path, &plan)?;
    info!(path = %plan_path.display(), entries = plan.len(), "wrote download plan");

    let count = |bucket: Bucket| plan.iter().filter(|entry| entry.classification == bucket).count();
    info!(
        must_read = count(Bucket::MustRead),
        nice_to_read = count(Bucket::NiceToRead),
        bullshit = count(Bucket::Bullshit),
        "catalog completed"
    );

    Ok(())
}

pub fn prepare_workspace(base_dir: &Path) -> Result<()> {
    ensure_directory(&base_dir.join(INBOX_DIR))?;
    for bucket in Bucket::ALL {
        ensure_directory(&base_dir.join(bucket.as_str()))?;
    }
    Ok(())
}

pub fn build_ground_truth(
    catalog: &PaperCatalog,
    patterns: &UrlPatterns,
) -> Result<(GroundTruthFile, Vec<DownloadPlanEntry>)> {
    let mut labels = serde_json::Map::new();
    let mut reference_ranking = Vec::new();
    let mut plan = Vec::with_capacity(catalog.arxiv_papers.len());

    for paper in &catalog.arxiv_papers {
        let label = category_label(&paper.category);
        let filename = patterns.filename_for_title(&paper.title);

        let entry = GroundTruthEntry {
            classification: label.classification,
            title: paper.title.clone(),
            domain_tags: label.tags.iter().map(|tag| tag.to_string()).collect(),
            key_contribution: paper.title.clone(),
            relevance_score: label.relevance,
        };
        labels.insert(
            filename.clone(),
            serde_json::to_value(&entry)
                .with_context(|| format!("failed to encode label for {filename}"))?,
        );

        if label.classification == Bucket::MustRead {
            reference_ranking.push(filename.clone());
        }

        plan.push(DownloadPlanEntry {
            filename,
            source_url: paper.url.clone(),
            pdf_url: patterns.pdf_url(&paper.url),
            classification: label.classification,
        });
    }

    Ok((
        GroundTruthFile {
            labels,
            reference_ranking,
        },
        plan,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::judge::load_ground_truth;
    use tempfile::TempDir;

    fn catalog() -> PaperCatalog {
        serde_json::from_value(serde_json::json!({
            "arxiv_papers": [
                {
                    "url": "https://arxiv.org/abs/2305.18290v2",
                    "title": "Direct Preference Optimization: Your Language Model is Secretly a Reward Model",
                    "category": "AI and RL (2026)"
                },
                {
                    "url": "https://arxiv.org/abs/cond-mat/0410483",
                    "title": "Quantum Hall Effect, Revisited!",
                    "category": "Physics"
                },
                {
                    "url": "https://example.org/papers/tfx.pdf",
                    "title": "Towards ML Engineering",
                    "category": "MLOps"
                }
            ]
        }))
        .expect("catalog fixture")
    }

    #[test]
    fn filename_for_title_slugifies_and_truncates() {
        let patterns = UrlPatterns::new().expect("patterns");
        assert_eq!(
            patterns.filename_for_title("Quantum Hall Effect, Revisited!"),
            "quantum_hall_effect_revisited.pdf"
        );
        assert_eq!(
            patterns.filename_for_title(
                "Direct Preference Optimization: Your Language Model is Secretly a Reward Model"
            ),
            "direct_preference_optimization_your_language_model_is_secret.pdf"
        );
    }

    #[test]
    fn pdf_url_normalizes_arxiv_links() {
        let patterns = UrlPatterns::new().expect("patterns");
        assert_eq!(
            patterns.pdf_url("https://arxiv.org/abs/2305.18290v2"),
            "https://arxiv.org/pdf/2305.18290v2.pdf"
        );
        assert_eq!(
            patterns.pdf_url("https://arxiv.org/abs/hep-ph/9905221v1"),
            "https://arxiv.org/pdf/hep-ph/9905221v1.pdf"
        );
        assert_eq!(
            patterns.pdf_url("https://example.org/papers/tfx.pdf"),
            "https://example.org/papers/tfx.pdf"
        );
    }

    #[test]
    fn build_ground_truth_maps_categories_and_ranks_must_reads() {
        let patterns = UrlPatterns::new().expect("patterns");
        let (ground_truth, plan) = build_ground_truth(&catalog(), &patterns).expect("build");

        let filenames: Vec<&str> = ground_truth.labels.keys().map(String::as_str).collect();
        assert_eq!(
            filenames,
            vec![
                "direct_preference_optimization_your_language_model_is_secret.pdf",
                "quantum_hall_effect_revisited.pdf",
                "towards_ml_engineering.pdf",
            ]
        );
        assert_eq!(ground_truth.reference_ranking, vec![filenames[0].to_string()]);
        assert_eq!(
            ground_truth.labels[filenames[1]]["classification"],
            "bullshit"
        );
        assert_eq!(ground_truth.labels[filenames[2]]["relevance_score"], 0.55);
        assert_eq!(plan[1].pdf_url, "https://arxiv.org/pdf/cond-mat/0410483.pdf");
    }

    #[test]
    fn generated_ground_truth_loads_for_judging() {
        let dir = TempDir::new().expect("temp dir");
        prepare_workspace(dir.path()).expect("workspace");
        for bucket in Bucket::ALL {
            assert!(dir.path().join(bucket.as_str()).is_dir());
        }

        let patterns = UrlPatterns::new().expect("patterns");
        let (ground_truth, _) = build_ground_truth(&catalog(), &patterns).expect("build");
        let path = dir.path().join("ground_truth.json");
        write_json_pretty(&path, &ground_truth).expect("write");

        let loaded = load_ground_truth(&path).expect("load");
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.labels[0].label.key_contribution, loaded.labels[0].label.title);
    }
}

use super::*;

/// Fraction of labeled papers found under `<base_dir>/<expected bucket>/`.
/// A paper that is missing and one filed in the wrong bucket both count as misses.
pub fn score_classification(base_dir: &Path, ground_truth: &GroundTruthSet) -> f64 {
    if ground_truth.is_empty() {
        return 0.0;
    }

    let hits = ground_truth
        .labels
        .iter()
        .filter(|paper| {
            base_dir
                .join(paper.label.classification.as_str())
                .join(&paper.filename)
                .is_file()
        })
        .count();

    debug!(hits, total = ground_truth.len(), "classification placement checked");
    hits as f64 / ground_truth.len() as f64
}

use super::*;

pub fn load_ground_truth(path: &Path) -> Result<GroundTruthSet> {
    let raw =
        fs::read(path).with_context(|| format!("failed to read ground truth {}", path.display()))?;
    parse_ground_truth(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse_ground_truth(raw: &[u8]) -> Result<GroundTruthSet> {
    let file: GroundTruthFile = serde_json::from_slice(raw)?;

    let mut labels = Vec::with_capacity(file.labels.len());
    for (filename, value) in file.labels {
        let label: GroundTruthEntry = serde_json::from_value(value)
            .with_context(|| format!("invalid ground-truth label for {filename}"))?;

        if label.domain_tags.is_empty() {
            bail!("ground-truth label for {filename} has no domain tags");
        }
        if !(0.0..=1.0).contains(&label.relevance_score) {
            bail!(
                "ground-truth relevance score for {filename} is outside [0, 1]: {}",
                label.relevance_score
            );
        }

        labels.push(LabeledPaper { filename, label });
    }

    let set = GroundTruthSet {
        labels,
        reference_ranking: file.reference_ranking,
    };

    for filename in &set.reference_ranking {
        if set.get(filename).is_none() {
            bail!("reference ranking names unlabeled paper: {filename}");
        }
    }

    Ok(set)
}

use super::*;

/// Lowercased whitespace tokens with stop words removed.
pub fn keyword_set(text: &str, stop_words: &HashSet<String>) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| !stop_words.contains(*token))
        .map(ToOwned::to_owned)
        .collect()
}

/// Share of ground-truth keywords recalled by the predicted summary.
pub fn keyword_overlap(expected: &str, predicted: &str, stop_words: &HashSet<String>) -> f64 {
    let expected = keyword_set(expected, stop_words);
    if expected.is_empty() {
        return 0.0;
    }

    let predicted = keyword_set(predicted, stop_words);
    expected.intersection(&predicted).count() as f64 / expected.len() as f64
}

pub fn score_keywords(base_dir: &Path, ground_truth: &GroundTruthSet, config: &JudgeConfig) -> f64 {
    let load = load_report(base_dir, config);
    let Some(entries) = load.entries() else {
        debug!(?load, "report unavailable for keyword scoring");
        return 0.0;
    };

    score_keyword_entries(entries, ground_truth, &config.stop_words)
}

pub fn score_keyword_entries(
    entries: &[Value],
    ground_truth: &GroundTruthSet,
    stop_words: &HashSet<String>,
) -> f64 {
    if ground_truth.is_empty() {
        return 0.0;
    }

    // Repeated filenames: the last entry wins.
    let mut by_name: HashMap<&str, &serde_json::Map<String, Value>> = HashMap::new();
    for entry in entries {
        let Some(object) = entry.as_object() else {
            continue;
        };
        if let Some(filename) = object.get("filename").and_then(Value::as_str) {
            by_name.insert(filename, object);
        }
    }

    let total: f64 = ground_truth
        .labels
        .iter()
        .map(|paper| match by_name.get(paper.filename.as_str()) {
            Some(entry) => {
                let predicted = entry
                    .get("key_contribution")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                keyword_overlap(&paper.label.key_contribution, predicted, stop_words)
            }
            None => 0.0,
        })
        .sum();

    total / ground_truth.len() as f64
}

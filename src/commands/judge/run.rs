use super::*;

pub fn run(args: JudgeArgs) -> Result<()> {
    let config = JudgeConfig::default();
    let report = judge(&args.base_dir, &args.ground_truth, &config)?;

    info!(
        base_dir = %args.base_dir.display(),
        score = report.score,
        classification_accuracy = report.breakdown.classification_accuracy,
        reading_order_format = report.breakdown.reading_order_format,
        ranking_correlation = report.breakdown.ranking_correlation,
        report_schema = report.breakdown.report_schema,
        keyword_overlap = report.breakdown.keyword_overlap,
        "judging completed"
    );

    if let Some(output) = &args.output {
        write_json_pretty(output, &report)?;
        info!(path = %output.display(), "wrote judge report");
    }

    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize judge report")?;
    println!("{rendered}");

    Ok(())
}

/// Scores the triage output under `base_dir` against the ground truth at
/// `ground_truth_path`. Only a missing or malformed ground truth is an error.
pub fn judge(base_dir: &Path, ground_truth_path: &Path, config: &JudgeConfig) -> Result<JudgeReport> {
    let ground_truth = load_ground_truth(ground_truth_path)?;
    info!(
        path = %ground_truth_path.display(),
        papers = ground_truth.len(),
        ranked = ground_truth.reference_ranking.len(),
        "loaded ground truth"
    );
    Ok(judge_with_ground_truth(base_dir, &ground_truth, config))
}

pub fn judge_with_ground_truth(
    base_dir: &Path,
    ground_truth: &GroundTruthSet,
    config: &JudgeConfig,
) -> JudgeReport {
    let classification = score_classification(base_dir, ground_truth);
    let reading_order = parse_reading_order(base_dir, config);
    let ranking = score_ranking(&reading_order.filenames, &ground_truth.reference_ranking);
    let schema = score_report_schema(base_dir, ground_truth.len(), config);
    let keywords = score_keywords(base_dir, ground_truth, config);

    let breakdown = ScoreBreakdown {
        classification_accuracy: classification,
        reading_order_format: if reading_order.valid { 1.0 } else { 0.0 },
        ranking_correlation: ranking,
        report_schema: schema,
        keyword_overlap: keywords,
    };
    let score = composite_score(&breakdown, &config.weights);

    JudgeReport {
        score: round_half_even(score, 2),
        breakdown: ScoreBreakdown {
            classification_accuracy: round_half_even(breakdown.classification_accuracy, 3),
            reading_order_format: breakdown.reading_order_format,
            ranking_correlation: round_half_even(breakdown.ranking_correlation, 3),
            report_schema: round_half_even(breakdown.report_schema, 3),
            keyword_overlap: round_half_even(breakdown.keyword_overlap, 3),
        },
    }
}

/// Weighted sum of the unrounded sub-scores, scaled to 0-100.
pub fn composite_score(breakdown: &ScoreBreakdown, weights: &ScoreWeights) -> f64 {
    (weights.classification * breakdown.classification_accuracy
        + weights.reading_order * breakdown.reading_order_format
        + weights.ranking * breakdown.ranking_correlation
        + weights.report_schema * breakdown.report_schema
        + weights.keywords * breakdown.keyword_overlap)
        * 100.0
}

/// Rounds the exact decimal value of `value`, ties to even.
pub fn round_half_even(value: f64, digits: usize) -> f64 {
    format!("{value:.digits$}").parse().unwrap_or(value)
}

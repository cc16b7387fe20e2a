use super::*;

const DEFAULT_STOP_WORDS: &str = "the a an and or of in for to is are that with on by as it its this";

/// Non-negative weights of each dimension in the composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub classification: f64,
    pub reading_order: f64,
    pub ranking: f64,
    pub report_schema: f64,
    pub keywords: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            classification: 0.40,
            reading_order: 0.10,
            ranking: 0.25,
            report_schema: 0.10,
            keywords: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct JudgeConfig {
    pub weights: ScoreWeights,
    pub stop_words: HashSet<String>,
    pub reading_order_file: String,
    pub report_file: String,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            stop_words: DEFAULT_STOP_WORDS
                .split_whitespace()
                .map(ToOwned::to_owned)
                .collect(),
            reading_order_file: READING_ORDER_FILE.to_string(),
            report_file: REPORT_FILE.to_string(),
        }
    }
}

impl JudgeConfig {
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

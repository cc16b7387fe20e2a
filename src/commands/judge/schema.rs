use super::*;

pub const REQUIRED_REPORT_FIELDS: [&str; 6] = [
    "filename",
    "title",
    "classification",
    "domain_tags",
    "key_contribution",
    "relevance_score",
];

#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    NotAnObject,
    MissingField(&'static str),
    InvalidClassification,
    InvalidDomainTags,
    NonNumericRelevance,
    RelevanceOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidEntry {
    pub filename: Option<String>,
    pub classification: Bucket,
    pub tag_count: usize,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidation {
    Valid(ValidEntry),
    Rejected(Vec<RejectionReason>),
}

pub fn validate_entry(value: &Value) -> EntryValidation {
    let Some(entry) = value.as_object() else {
        return EntryValidation::Rejected(vec![RejectionReason::NotAnObject]);
    };

    let mut reasons: Vec<RejectionReason> = REQUIRED_REPORT_FIELDS
        .iter()
        .filter(|field| !entry.contains_key(**field))
        .map(|field| RejectionReason::MissingField(*field))
        .collect();

    let classification = entry
        .get("classification")
        .and_then(Value::as_str)
        .and_then(Bucket::parse);
    if classification.is_none() && entry.contains_key("classification") {
        reasons.push(RejectionReason::InvalidClassification);
    }

    let tag_count = match entry.get("domain_tags") {
        Some(Value::Array(tags)) if !tags.is_empty() => Some(tags.len()),
        Some(_) => {
            reasons.push(RejectionReason::InvalidDomainTags);
            None
        }
        None => None,
    };

    // JSON booleans are not relevance scores. Tools that treat booleans as
    // integers would accept `true` as 1; this check rejects it on purpose.
    let relevance_score = match entry.get("relevance_score") {
        Some(Value::Number(number)) => match number.as_f64() {
            Some(score) if (0.0..=1.0).contains(&score) => Some(score),
            Some(score) => {
                reasons.push(RejectionReason::RelevanceOutOfRange(score));
                None
            }
            None => {
                reasons.push(RejectionReason::NonNumericRelevance);
                None
            }
        },
        Some(_) => {
            reasons.push(RejectionReason::NonNumericRelevance);
            None
        }
        None => None,
    };

    match (classification, tag_count, relevance_score) {
        (Some(classification), Some(tag_count), Some(relevance_score)) if reasons.is_empty() => {
            EntryValidation::Valid(ValidEntry {
                filename: entry
                    .get("filename")
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
                classification,
                tag_count,
                relevance_score,
            })
        }
        _ => EntryValidation::Rejected(reasons),
    }
}

/// Well-formed report entries divided by the number of labeled papers, capped at 1.0.
pub fn score_report_schema(base_dir: &Path, expected_count: usize, config: &JudgeConfig) -> f64 {
    let load = load_report(base_dir, config);
    let Some(entries) = load.entries() else {
        debug!(?load, "report unavailable for schema scoring");
        return 0.0;
    };

    score_report_entries(entries, expected_count)
}

pub fn score_report_entries(entries: &[Value], expected_count: usize) -> f64 {
    if expected_count == 0 {
        return 0.0;
    }

    let mut good = 0_usize;
    for (index, entry) in entries.iter().enumerate() {
        match validate_entry(entry) {
            EntryValidation::Valid(_) => good += 1,
            EntryValidation::Rejected(reasons) => {
                debug!(index, ?reasons, "report entry rejected");
            }
        }
    }

    (good as f64 / expected_count as f64).min(1.0)
}

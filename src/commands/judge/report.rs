use super::*;

/// Outcome of reading the predicted triage report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLoad {
    Missing,
    Unparseable(String),
    NotAList,
    Entries(Vec<Value>),
}

impl ReportLoad {
    pub fn entries(&self) -> Option<&[Value]> {
        match self {
            Self::Entries(entries) => Some(entries),
            _ => None,
        }
    }
}

pub fn load_report(base_dir: &Path, config: &JudgeConfig) -> ReportLoad {
    let path = base_dir.join(&config.report_file);
    if !path.is_file() {
        return ReportLoad::Missing;
    }

    let raw = match fs::read(&path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "failed to read triage report");
            return ReportLoad::Missing;
        }
    };

    parse_report(&raw)
}

pub fn parse_report(raw: &[u8]) -> ReportLoad {
    match serde_json::from_slice::<Value>(raw) {
        Ok(Value::Array(entries)) => ReportLoad::Entries(entries),
        Ok(_) => ReportLoad::NotAList,
        Err(error) => ReportLoad::Unparseable(error.to_string()),
    }
}

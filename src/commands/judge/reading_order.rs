use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    MissingRankDelimiter,
    NotPdf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderLine<'a> {
    Accepted(&'a str),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadingOrder {
    pub valid: bool,
    pub filenames: Vec<String>,
}

/// Parses one `<rank>. <filename> | <justification>` line.
///
/// Everything after the first `.` is the remainder, the filename is the
/// trimmed text before the first `|` in it. Only names ending in `.pdf` are
/// accepted.
pub fn parse_order_line(line: &str) -> OrderLine<'_> {
    let line = line.trim();
    if line.is_empty() {
        return OrderLine::Skipped(SkipReason::Blank);
    }

    let Some((_, remainder)) = line.split_once('.') else {
        return OrderLine::Skipped(SkipReason::MissingRankDelimiter);
    };

    let name = remainder
        .split_once('|')
        .map_or(remainder, |(name, _)| name)
        .trim();

    if name.ends_with(".pdf") {
        OrderLine::Accepted(name)
    } else {
        OrderLine::Skipped(SkipReason::NotPdf)
    }
}

pub fn parse_reading_order_text(text: &str) -> ReadingOrder {
    let mut filenames = Vec::new();
    let mut skipped = 0_usize;

    // A lone `\r` also ends a line; the empty piece of `\r\n` is skipped as blank.
    for line in text.split(['\r', '\n']) {
        match parse_order_line(line) {
            OrderLine::Accepted(name) => filenames.push(name.to_string()),
            OrderLine::Skipped(SkipReason::Blank) => {}
            OrderLine::Skipped(reason) => {
                skipped += 1;
                debug!(?reason, line, "skipped reading-order line");
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, accepted = filenames.len(), "reading-order lines dropped");
    }

    ReadingOrder {
        valid: !filenames.is_empty(),
        filenames,
    }
}

/// Reads the reading-order file under `base_dir`. A missing or unreadable file
/// yields an invalid, empty order.
pub fn parse_reading_order(base_dir: &Path, config: &JudgeConfig) -> ReadingOrder {
    let path = base_dir.join(&config.reading_order_file);
    if !path.is_file() {
        return ReadingOrder::default();
    }

    match fs::read(&path) {
        Ok(raw) => parse_reading_order_text(&String::from_utf8_lossy(&raw)),
        Err(error) => {
            warn!(path = %path.display(), error = %error, "failed to read reading order");
            ReadingOrder::default()
        }
    }
}

use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    pub moved: usize,
    pub missing: Vec<String>,
    pub per_bucket: BTreeMap<&'static str, usize>,
}

/// Files analysed papers from `<base_dir>/inbox` into their bucket directories
/// and writes the reading-order and report artifacts.
pub fn materialize_results(result: &TriageResult, base_dir: &Path) -> Result<MaterializeSummary> {
    let inbox = base_dir.join(INBOX_DIR);
    for bucket in Bucket::ALL {
        ensure_directory(&base_dir.join(bucket.as_str()))?;
    }

    let mut summary = MaterializeSummary::default();
    for paper in &result.papers {
        if !is_plain_filename(&paper.filename) {
            warn!(filename = %paper.filename, "refusing to move paper with path components");
            summary.missing.push(paper.filename.clone());
            continue;
        }

        let source = inbox.join(&paper.filename);
        if !source.is_file() {
            warn!(path = %source.display(), "paper not found in inbox");
            summary.missing.push(paper.filename.clone());
            continue;
        }

        let target = base_dir
            .join(paper.classification.as_str())
            .join(&paper.filename);
        move_file(&source, &target)?;
        debug!(filename = %paper.filename, bucket = %paper.classification, "filed paper");

        summary.moved += 1;
        *summary
            .per_bucket
            .entry(paper.classification.as_str())
            .or_default() += 1;
    }

    let reading_order_path = base_dir.join(READING_ORDER_FILE);
    fs::write(&reading_order_path, render_reading_order(&result.reading_order))
        .with_context(|| format!("failed to write {}", reading_order_path.display()))?;

    write_json_pretty(&base_dir.join(REPORT_FILE), &result.papers)?;

    Ok(summary)
}

pub fn render_reading_order(entries: &[ReadingOrderEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}. {} | {}\n",
                entry.rank, entry.filename, entry.justification
            )
        })
        .collect()
}

fn is_plain_filename(filename: &str) -> bool {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == filename)
}

fn move_file(source: &Path, target: &Path) -> Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    // rename fails across filesystems
    fs::copy(source, target).with_context(|| {
        format!(
            "failed to copy {} to {}",
            source.display(),
            target.display()
        )
    })?;
    fs::remove_file(source)
        .with_context(|| format!("failed to remove {}", source.display()))
}

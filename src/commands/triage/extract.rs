use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxPaper {
    pub filename: String,
    pub text: String,
}

/// Best-effort text of a PDF. Failures come back as a bracketed diagnostic
/// string in place of the text.
pub fn extract_text(path: &Path) -> String {
    match extract_with_pdftotext(path) {
        Ok(text) => text,
        Err(error) => {
            warn!(path = %path.display(), error = %error, "text extraction failed");
            format!("[couldn't read {}: {error}]", path.display())
        }
    }
}

fn extract_with_pdftotext(path: &Path) -> Result<String> {
    let output = Command::new("pdftotext")
        .arg("-enc")
        .arg("UTF-8")
        .arg(path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to execute pdftotext for {}", path.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "pdftotext returned non-zero exit status: {}",
            stderr.trim()
        );
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    Ok(raw
        .replace('\u{0000}', "")
        .replace('\u{000C}', "\n")
        .trim()
        .to_string())
}

/// Extracts every PDF in `inbox`, in filename order.
pub fn scan_inbox(inbox: &Path) -> Result<Vec<InboxPaper>> {
    let paths = discover_pdfs(inbox)?;
    let mut papers = Vec::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let filename = pdf_filename(path)?;
        let text = extract_text(path);
        debug!(
            index = index + 1,
            total = paths.len(),
            filename = %filename,
            chars = text.chars().count(),
            "extracted paper"
        );
        papers.push(InboxPaper { filename, text });
    }

    Ok(papers)
}

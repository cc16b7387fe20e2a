use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::model::{INBOX_DIR, InboxEntry, InboxInventoryManifest};
use crate::util::{discover_pdfs, now_utc_string, pdf_filename, sha256_file, write_json_pretty};

pub fn run(args: InventoryArgs) -> Result<()> {
    let inbox = args.base_dir.join(INBOX_DIR);
    let manifest = build_manifest(&inbox)?;

    if args.dry_run {
        info!(
            pdf_count = manifest.pdf_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.base_dir.join("manifests").join("inbox_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(pdf_count = manifest.pdf_count, "inventory completed");

    Ok(())
}

pub fn build_manifest(inbox: &Path) -> Result<InboxInventoryManifest> {
    let pdf_paths = discover_pdfs(inbox)?;

    if pdf_paths.is_empty() {
        bail!("no PDFs found in {}", inbox.display());
    }

    let mut pdfs = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        let filename = pdf_filename(&path)?;
        let size_bytes = fs::metadata(&path)
            .with_context(|| format!("failed to stat {}", path.display()))?
            .len();
        let sha256 = sha256_file(&path)?;

        pdfs.push(InboxEntry {
            filename,
            size_bytes,
            sha256,
        });
    }

    Ok(InboxInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: inbox.display().to_string(),
        pdf_count: pdfs.len(),
        pdfs,
    })
}

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cli::TriageArgs;
use crate::model::{
    Bucket, INBOX_DIR, PaperAnalysis, READING_ORDER_FILE, REPORT_FILE, ReadingOrderEntry,
    TriageResult,
};
use crate::util::{discover_pdfs, ensure_directory, pdf_filename, write_json_pretty};

mod agent;
mod extract;
mod materialize;
mod run;
#[cfg(test)]
mod tests;

use self::agent::*;
use self::extract::*;
use self::materialize::*;
use self::run::*;

pub use self::run::run;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cli::JudgeArgs;
use crate::model::{
    Bucket, GroundTruthEntry, GroundTruthFile, GroundTruthSet, JudgeReport, LabeledPaper,
    READING_ORDER_FILE, REPORT_FILE, ScoreBreakdown,
};
use crate::util::write_json_pretty;

mod classification;
mod config;
mod ground_truth;
mod keywords;
mod ranking;
mod reading_order;
mod report;
mod run;
mod schema;

use self::classification::*;
use self::config::*;
use self::ground_truth::*;
use self::keywords::*;
use self::ranking::*;
use self::reading_order::*;
use self::report::*;
use self::run::*;
use self::schema::*;

pub use self::config::JudgeConfig;
pub use self::ground_truth::load_ground_truth;
pub use self::run::{judge_with_ground_truth, run};

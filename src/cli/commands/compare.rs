//! Stance comparison CLI command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::commands::read_json;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::domain::models::{Stance, StanceComparison};
use crate::services::compare_stances;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First stance JSON file (A)
    pub a: PathBuf,

    /// Second stance JSON file (B)
    pub b: PathBuf,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CompareOutput {
    pub comparison: StanceComparison,
}

impl CommandOutput for CompareOutput {
    fn to_human(&self) -> String {
        let formatter = TableFormatter::new();
        [
            formatter.format_comparison(&self.comparison),
            self.comparison.rationale.clone(),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: CompareArgs, json_mode: bool) -> Result<()> {
    let a: Stance = read_json(&args.a, "stance A")?;
    let b: Stance = read_json(&args.b, "stance B")?;
    let result = CompareOutput {
        comparison: compare_stances(&a, &b),
    };
    output(&result, json_mode);
    Ok(())
}

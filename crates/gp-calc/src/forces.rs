//! Section forces from a free-body cut report, and bolt force tables.

use crate::error::CalcResult;
use gp_core::Label;
use gp_model::ResultProvider;
use serde::{Deserialize, Serialize};

/// Resultants found under one `Step = ...` header, in report order.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBodyBlock {
    pub step: String,
    pub resultants: Vec<Option<f64>>,
}

/// Parse a free-body report.
///
/// Each `Step = <name>` line opens a block; consecutive blocks of the same step
/// are merged. The magnitude is the last token of a `Resultant force = ...`
/// line; an unreadable magnitude is kept as `None`.
pub fn parse_free_body_report(text: &str) -> Vec<FreeBodyBlock> {
    let mut blocks: Vec<FreeBodyBlock> = Vec::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "Step" => {
                let step = value.trim().to_string();
                if blocks.last().is_none_or(|b| b.step != step) {
                    blocks.push(FreeBodyBlock {
                        step,
                        resultants: Vec::new(),
                    });
                }
            }
            "Resultant force" => {
                let magnitude = value
                    .split_whitespace()
                    .last()
                    .and_then(|t| t.parse::<f64>().ok());
                if let Some(block) = blocks.last_mut() {
                    block.resultants.push(magnitude);
                }
            }
            _ => {}
        }
    }
    blocks
}

/// Section force of every set at every step; `values[set][step]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionForceTable {
    pub sets: Vec<String>,
    pub steps: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

/// A set/step the report had no readable value for. Recorded as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingForce {
    pub set: String,
    pub step: String,
}

/// Column of the cut over every gasket set together. It follows the per-set
/// cuts in each step block.
pub const COMBINED_FORCE_SET: &str = "GASKET_ALL";

/// Tabulate the report: the k-th resultant of a step belongs to the k-th set,
/// and the one after the last set to [`COMBINED_FORCE_SET`].
/// Blocks are matched to steps by name, falling back to report order.
pub fn section_forces(
    report: &str,
    sets: &[String],
    steps: &[String],
) -> (SectionForceTable, Vec<MissingForce>) {
    let blocks = parse_free_body_report(report);
    let sets: Vec<String> = sets
        .iter()
        .cloned()
        .chain(std::iter::once(COMBINED_FORCE_SET.to_string()))
        .collect();
    let mut missing = Vec::new();
    let mut values = vec![Vec::with_capacity(steps.len()); sets.len()];

    for (i, step) in steps.iter().enumerate() {
        let block = blocks
            .iter()
            .find(|b| b.step.eq_ignore_ascii_case(step))
            .or_else(|| blocks.get(i));
        for (k, set) in sets.iter().enumerate() {
            let value = block.and_then(|b| b.resultants.get(k).copied().flatten());
            if value.is_none() {
                missing.push(MissingForce {
                    set: set.clone(),
                    step: step.clone(),
                });
            }
            values[k].push(value.unwrap_or(0.0));
        }
    }

    (
        SectionForceTable {
            sets,
            steps: steps.to_vec(),
            values,
        },
        missing,
    )
}

/// Bolt axial forces; `values[step][bolt]` plus the per-step total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltForceTable {
    pub bolts: Vec<Label>,
    pub steps: Vec<String>,
    pub values: Vec<Vec<f64>>,
    pub totals: Vec<f64>,
}

pub fn bolt_force_table(
    provider: &dyn ResultProvider,
    bolts: &[Label],
    steps: &[String],
) -> CalcResult<BoltForceTable> {
    let mut values = Vec::with_capacity(steps.len());
    for step in 0..steps.len() {
        values.push(provider.bolt_forces(step, bolts)?);
    }
    let totals = values.iter().map(|row| row.iter().sum()).collect();
    Ok(BoltForceTable {
        bolts: bolts.to_vec(),
        steps: steps.to_vec(),
        values,
        totals,
    })
}

//! Per-material fatigue criteria tables.

use gp_input::FatigueTableDef;

/// Allowable cyclic-ratio lookup table keyed by (fixed load, preload ratio).
///
/// Built once from the input and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FatigueData {
    pub criteria: Vec<String>,
    pub loads: Vec<f64>,
    pub ratios: Vec<f64>,
    values: Vec<Vec<Vec<f64>>>,
}

impl FatigueData {
    pub fn new(
        criteria: Vec<String>,
        loads: Vec<f64>,
        ratios: Vec<f64>,
        values: Vec<Vec<Vec<f64>>>,
    ) -> Self {
        Self {
            criteria,
            loads,
            ratios,
            values,
        }
    }

    pub fn from_def(def: &FatigueTableDef, criteria: &[String]) -> Self {
        Self::new(
            criteria.to_vec(),
            def.loads.clone(),
            def.ratios.clone(),
            def.values.clone(),
        )
    }

    /// Allowable ratios for every criterion at table entry (load, ratio).
    pub fn cell(&self, load: usize, ratio: usize) -> Option<&[f64]> {
        self.values
            .get(load)
            .and_then(|row| row.get(ratio))
            .map(Vec::as_slice)
    }

    pub fn criteria_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn max_load(&self) -> Option<f64> {
        self.loads.last().copied()
    }

    /// Decimal places for line-load output of sections using this table.
    ///
    /// Coarse tables (fire-ring style, large loads) print with `base` decimals;
    /// fine tables where `max_load / load_count < 3` (rubber coatings) get one more.
    pub fn line_load_decimals(&self, base: usize) -> usize {
        match self.max_load() {
            Some(max) if !self.loads.is_empty() && max / (self.loads.len() as f64) < 3.0 => {
                base + 1
            }
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FatigueData {
        FatigueData::new(
            vec!["A".to_string()],
            vec![100.0, 200.0],
            vec![0.0, 0.5],
            vec![vec![vec![1.0], vec![2.0]], vec![vec![3.0], vec![4.0]]],
        )
    }

    #[test]
    fn cells_are_addressed_load_then_ratio() {
        let t = table();
        assert_eq!(t.cell(0, 1), Some(&[2.0][..]));
        assert_eq!(t.cell(1, 0), Some(&[3.0][..]));
        assert_eq!(t.cell(2, 0), None);
    }

    #[test]
    fn decimals_follow_load_density() {
        let t = table();
        assert_eq!(t.line_load_decimals(3), 3);
        let fine = FatigueData::new(
            vec!["A".to_string()],
            (1..=20).map(|i| i as f64 * 0.5).collect(),
            vec![0.0],
            vec![],
        );
        assert_eq!(fine.line_load_decimals(3), 4);
    }
}

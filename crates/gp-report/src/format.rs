//! Fixed-width text rendering of a run report.

use crate::types::RunReport;
use gp_calc::FatigueStatus;
use gp_core::{Label, rad_to_deg};
use std::collections::HashMap;
use std::fmt::{self, Write};

const COL: usize = 20;
const NARROW: usize = 12;

fn banner(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{:#^50}", format!(" {title} "))
}

fn optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

/// `Display` adapter producing the text report.
pub struct ReportText<'a>(pub &'a RunReport);

pub fn render_report(report: &RunReport) -> String {
    ReportText(report).to_string()
}

impl fmt::Display for ReportText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "RUN {}", r.name)?;
        for (i, step) in r.steps.iter().enumerate() {
            writeln!(f, "{:>6}  {}", format!("STEP_{}", i + 1), step)?;
        }
        writeln!(f)?;
        self.geometry(f)?;
        self.summaries(f)?;
        self.fatigue(f)?;
        self.warnings(f)?;
        self.bore(f)?;
        self.cam(f)?;
        self.section_forces(f)?;
        self.bolt_forces(f)
    }
}

impl ReportText<'_> {
    fn geometry(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        banner(f, "ELEMENT GEOMETRY")?;
        writeln!(
            f,
            "{:>NARROW$}{:>COL$}{:>COL$}{:>COL$}{:>NARROW$}",
            "ELEMENT", "AREA", "WIDTH", "ANGLE", "CYLINDER"
        )?;
        for g in &self.0.geometry {
            writeln!(
                f,
                "{:>NARROW$}{:>COL$.4}{:>COL$.4}{:>COL$.3}{:>NARROW$}",
                g.element,
                g.area,
                g.width,
                g.angle_deg,
                g.cylinder + 1
            )?;
        }
        writeln!(f)
    }

    fn summaries(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let decimals: HashMap<Label, usize> = r
            .elements
            .iter()
            .map(|e| (e.element, e.line_load_decimals))
            .collect();

        banner(f, "NODE SUMMARY")?;
        let mut header = format!(
            "{:>NARROW$}{:>NARROW$}{:>COL$}{:>COL$}{:>COL$}",
            "ELEMENT", "NODE", "ASSEMBLY", "HOT", "THERMAL"
        );
        for name in &r.cycles {
            for column in ["MAX", "MIN", "RANGE", "LIFT", "SF", "WEAR"] {
                write!(header, "{:>COL$}", format!("{name}_{column}"))?;
            }
        }
        write!(header, "{:>COL$}", "WEAR")?;
        writeln!(f, "{header}")?;

        for s in &r.summaries {
            let d = decimals.get(&s.element).copied().unwrap_or(3);
            write!(
                f,
                "{:>NARROW$}{:>NARROW$}{:>COL$.d$}{:>COL$.d$}{:>COL$}",
                s.element,
                s.node,
                s.assembly_line_load,
                s.hot_line_load,
                optional(s.thermal_motion, 3)
            )?;
            for c in &s.cycles {
                let safety = c.safety.iter().copied().reduce(f64::min);
                write!(
                    f,
                    "{:>COL$.d$}{:>COL$.d$}{:>COL$.d$}{:>COL$.3}{:>COL$}{:>COL$.3}",
                    c.line_load_max,
                    c.line_load_min,
                    c.line_load_range,
                    c.head_lift_um,
                    optional(safety, 3),
                    c.wear
                )?;
            }
            writeln!(f, "{:>COL$.3}", s.wear)?;
        }
        writeln!(f)
    }

    fn fatigue(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        if r.fatigue.iter().all(|e| e.status == FatigueStatus::Abandon) {
            return Ok(());
        }
        banner(f, "FATIGUE SAFETY")?;
        let mut header = format!("{:>NARROW$}{:>NARROW$}{:>NARROW$}", "ELEMENT", "NODE", "STATUS");
        for cycle in &r.cycles {
            for criterion in &r.criteria {
                write!(header, "{:>COL$}", format!("{cycle}_{criterion}"))?;
            }
        }
        writeln!(f, "{header}")?;
        for element in r.fatigue.iter().filter(|e| e.status != FatigueStatus::Abandon) {
            for node in &element.nodes {
                write!(
                    f,
                    "{:>NARROW$}{:>NARROW$}{:>NARROW$}",
                    element.element,
                    node.node,
                    node.status.label()
                )?;
                for cycle in &node.cycles {
                    for v in &cycle.safety {
                        write!(f, "{v:>COL$.3}")?;
                    }
                }
                writeln!(f)?;
            }
        }
        writeln!(f)
    }

    fn warnings(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let warnings = &self.0.stress_warnings;
        if warnings.is_empty() {
            return Ok(());
        }
        banner(f, "STRESS RATIO WARNING")?;
        writeln!(f, "{:>NARROW$}{:>NARROW$}{:>COL$}", "ELEMENT", "STEP", "RATIO")?;
        for w in warnings {
            writeln!(
                f,
                "{:>NARROW$}{:>NARROW$}{:>COL$.1}",
                w.element,
                w.step + 1,
                w.ratio
            )?;
        }
        writeln!(f)
    }

    fn bore(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.bore.is_empty() {
            return Ok(());
        }
        banner(f, "BORE DISTORTION")?;
        for layer in &self.0.bore {
            writeln!(
                f,
                "CYLINDER {} LAYER {} Z = {:.3}",
                layer.cylinder + 1,
                layer.layer + 1,
                layer.z
            )?;
            for step in &layer.steps {
                writeln!(
                    f,
                    "STEP_{}  CENTER ({:.4}, {:.4})  RADIUS {:.4}",
                    step.step + 1,
                    step.circle.center[0],
                    step.circle.center[1],
                    step.circle.radius
                )?;
                writeln!(f, "{:>NARROW$}{:>COL$}{:>COL$}", "ORDER", "COEFFICIENT", "PHASE")?;
                for h in &step.harmonics {
                    writeln!(
                        f,
                        "{:>NARROW$}{:>COL$.3}{:>COL$.3}",
                        h.order,
                        h.coefficient,
                        rad_to_deg(h.phase)
                    )?;
                }
                writeln!(f, "{:>NARROW$}{:>COL$}", "ANGLE", "DELTA_R")?;
                for p in &step.profile {
                    writeln!(f, "{:>NARROW$.1}{:>COL$.6}", p[0], p[1])?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn cam(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.cam.is_empty() {
            return Ok(());
        }
        banner(f, "CAM DISTORTION")?;
        for line in &self.0.cam {
            writeln!(f, "LINE {}", line.line + 1)?;
            write!(f, "{:>COL$}", "NODE")?;
            for step in &line.steps {
                write!(f, "{:>COL$}", format!("STEP_{}", step.step + 1))?;
            }
            writeln!(f)?;
            for (i, label) in line.labels.iter().enumerate() {
                write!(f, "{label:>COL$}")?;
                for step in &line.steps {
                    let d = step.distances.get(i).copied().unwrap_or(f64::NAN);
                    write!(f, "{d:>COL$.3}")?;
                }
                writeln!(f)?;
            }
        }
        writeln!(f)
    }

    fn section_forces(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(table) = &self.0.section_forces else {
            return Ok(());
        };
        banner(f, "SECTION FORCE")?;
        write!(f, "{:>COL$}", "STEP")?;
        for set in &table.sets {
            write!(f, "{set:>COL$}")?;
        }
        writeln!(f)?;
        for (i, step) in table.steps.iter().enumerate() {
            write!(f, "{step:>COL$}")?;
            for row in &table.values {
                write!(f, "{:>COL$.1}", row.get(i).copied().unwrap_or(0.0))?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }

    fn bolt_forces(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(table) = &self.0.bolt_forces else {
            return Ok(());
        };
        banner(f, "BOLT FORCE")?;
        write!(f, "{:>COL$}", "STEP")?;
        for bolt in &table.bolts {
            write!(f, "{bolt:>COL$}")?;
        }
        writeln!(f, "{:>COL$}", "TOTAL")?;
        for ((step, row), total) in table.steps.iter().zip(&table.values).zip(&table.totals) {
            write!(f, "{step:>COL$}")?;
            for v in row {
                write!(f, "{v:>COL$.1}")?;
            }
            writeln!(f, "{total:>COL$.1}")?;
        }
        Ok(())
    }
}

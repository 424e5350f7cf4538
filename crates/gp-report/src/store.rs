//! Report storage on disk.
//!
//! Layout under the root directory:
//!
//! ```text
//! <run_id>/manifest.json
//! <run_id>/results.json
//! <run_id>/report.txt
//! <run_id>/<name>_postprocess.log
//! ```

use crate::format::render_report;
use crate::log::RunLog;
use crate::types::{RunManifest, RunReport};
use crate::{ReportError, ReportResult};
use std::fs;
use std::path::PathBuf;

#[derive(Clone)]
pub struct ReportStore {
    root_dir: PathBuf,
}

impl ReportStore {
    pub fn new(root_dir: PathBuf) -> ReportResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root_dir.join(run_id)
    }

    pub fn log_path(&self, manifest: &RunManifest) -> PathBuf {
        self.run_dir(&manifest.run_id)
            .join(format!("{}_postprocess.log", manifest.name))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join("manifest.json").exists()
    }

    pub fn save_run(&self, manifest: &RunManifest, report: &RunReport, log: &RunLog) -> ReportResult<PathBuf> {
        let run_dir = self.run_dir(&manifest.run_id);
        fs::create_dir_all(&run_dir)?;

        fs::write(
            run_dir.join("manifest.json"),
            serde_json::to_string_pretty(manifest)?,
        )?;
        fs::write(run_dir.join("results.json"), serde_json::to_string(report)?)?;
        fs::write(run_dir.join("report.txt"), render_report(report))?;
        fs::write(self.log_path(manifest), log.render("Post-processing start"))?;

        Ok(run_dir)
    }

    pub fn load_manifest(&self, run_id: &str) -> ReportResult<RunManifest> {
        let path = self.run_dir(run_id).join("manifest.json");
        if !path.exists() {
            return Err(ReportError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn load_report(&self, run_id: &str) -> ReportResult<RunReport> {
        let path = self.run_dir(run_id).join("results.json");
        if !path.exists() {
            return Err(ReportError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Manifests of every stored run with the given name, newest first.
    pub fn list_runs(&self, name: &str) -> ReportResult<Vec<RunManifest>> {
        let mut runs = Vec::new();
        if !self.root_dir.exists() {
            return Ok(runs);
        }
        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    if manifest.name == name {
                        runs.push(manifest);
                    }
                }
            }
        }
        runs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(runs)
    }

    pub fn delete_run(&self, run_id: &str) -> ReportResult<()> {
        let run_dir = self.run_dir(run_id);
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        Ok(())
    }
}

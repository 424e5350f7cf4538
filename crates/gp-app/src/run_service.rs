//! Run execution and report persistence.

use std::path::{Path, PathBuf};
use std::time::Instant;

use gp_calc::{
    FatigueStatus, bolt_force_table, build_summaries, check_stress_ratio, compute_geometry,
    compute_relative, evaluate_fatigue, section_forces,
};
use gp_distortion::{CamDistortion, DistortionResult, bore_distortion, cam_lines, report_steps};
use gp_input::RunConfig;
use gp_model::{InMemoryProvider, Model, ModelBuilder, ResultProvider};
use gp_report::{
    ElementReport, LogStatus, ReportStore, RunLog, RunManifest, RunReport, compute_run_id,
};
use tracing::info;

use crate::error::AppResult;
use crate::input_service;
use crate::progress::{RunProgressEvent, RunStage};

/// Options for running a post-processing job.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Reuse a stored run with the same id instead of recomputing.
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub config_path: &'a Path,
    pub dataset_path: &'a Path,
    pub output_dir: &'a Path,
    pub options: RunOptions,
}

#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub load_time_s: f64,
    pub build_time_s: f64,
    pub compute_time_s: f64,
    pub save_time_s: f64,
    pub total_time_s: f64,
}

#[derive(Debug, Clone)]
pub struct RunResponse {
    pub run_id: String,
    pub manifest: RunManifest,
    pub report_dir: PathBuf,
    pub loaded_from_cache: bool,
    /// Log entries with status `Failed`.
    pub failures: usize,
    pub warnings: usize,
    pub timing: RunTimingSummary,
}

/// Progress callback plus the run log it mirrors.
struct Reporter<'a> {
    progress_cb: Option<&'a mut dyn FnMut(RunProgressEvent)>,
    started: Instant,
    stage: RunStage,
    log: RunLog,
}

impl<'a> Reporter<'a> {
    fn new(progress_cb: Option<&'a mut dyn FnMut(RunProgressEvent)>, started: Instant) -> Self {
        Self {
            progress_cb,
            started,
            stage: RunStage::LoadingInput,
            log: RunLog::new(),
        }
    }

    fn emit(&mut self, message: String, status: Option<LogStatus>) {
        if let Some(cb) = self.progress_cb.as_deref_mut() {
            cb(RunProgressEvent {
                stage: self.stage,
                elapsed_wall_s: self.started.elapsed().as_secs_f64(),
                message: Some(message),
                status,
            });
        }
    }

    fn stage(&mut self, stage: RunStage) {
        self.stage = stage;
        self.emit(stage.label().to_string(), None);
    }

    fn record(&mut self, item: impl Into<String>, status: LogStatus) {
        let item = item.into();
        self.log.record(item.clone(), status);
        self.emit(item, Some(status));
    }

    fn succeed(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Succeed);
    }

    fn failed(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Failed);
    }

    fn warn(&mut self, item: impl Into<String>) {
        self.record(item, LogStatus::Warning);
    }
}

/// Execute or load a run.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunResponse> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();
    let mut reporter = Reporter::new(progress_cb, started);

    reporter.stage(RunStage::LoadingInput);
    let config = input_service::load_config(request.config_path)?;
    let dataset = input_service::load_dataset(request.dataset_path)?;
    gp_input::validate_steps(&config, dataset.step_count())?;
    timing.load_time_s = started.elapsed().as_secs_f64();
    reporter.succeed("Loading input");

    reporter.stage(RunStage::CheckingCache);
    let run_id = compute_run_id(
        &config,
        &dataset.steps,
        (dataset.nodes.len(), dataset.elements.len()),
        &request.options.engine_version,
    );
    let store = ReportStore::new(request.output_dir.to_path_buf())?;

    if request.options.use_cache && store.has_run(&run_id) {
        reporter.stage(RunStage::LoadingCachedResult);
        let manifest = store.load_manifest(&run_id)?;
        timing.total_time_s = started.elapsed().as_secs_f64();
        reporter.stage(RunStage::Completed);
        return Ok(RunResponse {
            report_dir: store.run_dir(&run_id),
            run_id,
            failures: manifest.failures,
            warnings: manifest.warnings,
            manifest,
            loaded_from_cache: true,
            timing,
        });
    }

    let provider = InMemoryProvider::new(dataset);
    let (model, report) = execute(&config, &provider, &mut reporter, &mut timing)?;

    reporter.stage(RunStage::SavingResults);
    let save_started = Instant::now();
    reporter.succeed("Post-processing");
    let failures = reporter.log.failures().count();
    let warnings = reporter
        .log
        .entries()
        .iter()
        .filter(|e| e.status == LogStatus::Warning)
        .count();
    let manifest = RunManifest {
        run_id: run_id.clone(),
        name: config.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_version: request.options.engine_version.clone(),
        step_count: model.step_count(),
        element_count: model.elements().len(),
        node_count: model.nodes().len(),
        failures,
        warnings,
    };
    let report_dir = store.save_run(&manifest, &report, &reporter.log)?;
    timing.save_time_s = save_started.elapsed().as_secs_f64();
    timing.total_time_s = started.elapsed().as_secs_f64();
    info!(run_id = %run_id, dir = %report_dir.display(), "run saved");
    reporter.stage(RunStage::Completed);

    Ok(RunResponse {
        run_id,
        manifest,
        report_dir,
        loaded_from_cache: false,
        failures,
        warnings,
        timing,
    })
}

/// Run every post-processing stage against any result provider.
///
/// Returns the report and the run log; nothing is written to disk.
pub fn post_process(
    config: &RunConfig,
    provider: &dyn ResultProvider,
    progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<(RunReport, RunLog)> {
    let mut reporter = Reporter::new(progress_cb, Instant::now());
    let mut timing = RunTimingSummary::default();
    let (_, report) = execute(config, provider, &mut reporter, &mut timing)?;
    Ok((report, reporter.log))
}

fn execute(
    config: &RunConfig,
    provider: &dyn ResultProvider,
    reporter: &mut Reporter<'_>,
    timing: &mut RunTimingSummary,
) -> AppResult<(Model, RunReport)> {
    reporter.stage(RunStage::ReadingModel);
    let build_started = Instant::now();
    let (model, issues) = ModelBuilder::new(config).build(provider)?;
    for issue in &issues {
        reporter.failed(format!("{}: {}", issue.context, issue.message));
    }
    reporter.succeed(format!(
        "Read {} elements, {} nodes",
        model.elements().len(),
        model.nodes().len()
    ));
    timing.build_time_s = build_started.elapsed().as_secs_f64();

    let compute_started = Instant::now();
    let report = compute(config, provider, &model, reporter)?;
    timing.compute_time_s = compute_started.elapsed().as_secs_f64();
    Ok((model, report))
}

fn element_reports(model: &Model, config: &RunConfig) -> Vec<ElementReport> {
    let base = config.limits.gasket_decimals;
    model
        .elements()
        .iter()
        .map(|e| ElementReport {
            element: e.label,
            section: e.section.clone(),
            material: e.material.clone(),
            line_load_decimals: model
                .element_material(e)
                .and_then(|m| m.fatigue())
                .map(|f| f.line_load_decimals(base))
                .unwrap_or(base),
        })
        .collect()
}

/// Configured sets the model resolved, in configuration order.
fn force_sets(model: &Model, config: &RunConfig) -> Vec<String> {
    config
        .report_sets
        .iter()
        .chain(config.added_element_sets.iter().map(|s| &s.name))
        .filter(|name| model.element_sets().contains_key(name.as_str()))
        .cloned()
        .collect()
}

fn compute(
    config: &RunConfig,
    provider: &dyn ResultProvider,
    model: &Model,
    reporter: &mut Reporter<'_>,
) -> AppResult<RunReport> {
    reporter.stage(RunStage::ComputingGeometry);
    let geometry = compute_geometry(model, config)?;
    reporter.succeed("Element geometry");

    reporter.stage(RunStage::RelativeMotion);
    let relative = if config.relative_motion {
        let relative = compute_relative(model, config);
        let count = relative.iter().flatten().count();
        if count == 0 {
            reporter.warn("No relative motion output");
        } else {
            reporter.succeed(format!("Relative motion of {count} nodes"));
        }
        relative
    } else {
        vec![None; model.nodes().len()]
    };

    reporter.stage(RunStage::Fatigue);
    let fatigue = evaluate_fatigue(model, config);
    for element in fatigue.iter().filter(|e| e.status == FatigueStatus::Failed) {
        reporter.failed(format!("Fatigue interpolation, element {}", element.element));
    }
    reporter.succeed("Fatigue");
    let summaries = build_summaries(model, &geometry, &relative, &fatigue, config);

    reporter.stage(RunStage::StressCheck);
    let stress_warnings = check_stress_ratio(model, config.limits.stress_differ_ratio);
    for w in &stress_warnings {
        reporter.warn(format!(
            "Stress ratio {:.1} at element {}, step {}",
            w.ratio,
            w.element,
            w.step + 1
        ));
    }

    let step_count = model.step_count();
    let bore = match &config.bore {
        Some(bore) => {
            reporter.stage(RunStage::BoreDistortion);
            match bore_distortion(provider, config, bore) {
                Ok(layers) => {
                    reporter.succeed(format!("Bore distortion, {} layers", layers.len()));
                    layers
                }
                Err(e) => {
                    reporter.failed(format!("Bore distortion: {e}"));
                    return Err(e.into());
                }
            }
        }
        None => Vec::new(),
    };

    let cam = match &config.cam {
        Some(cam) => {
            reporter.stage(RunStage::CamDistortion);
            let steps = report_steps(&cam.report_steps, step_count);
            let analysed: DistortionResult<Vec<CamDistortion>> = cam_lines(provider, &cam.lines)
                .and_then(|lines| lines.iter().map(|l| l.analyze(&steps)).collect());
            match analysed {
                Ok(lines) => {
                    reporter.succeed(format!("Cam distortion, {} lines", cam.lines.len()));
                    lines
                }
                Err(e) => {
                    reporter.failed(format!("Cam distortion: {e}"));
                    Vec::new()
                }
            }
        }
        None => Vec::new(),
    };

    let forces = match provider.free_body_report() {
        Some(text) => {
            reporter.stage(RunStage::SectionForces);
            let sets = force_sets(model, config);
            let (table, missing) = section_forces(&text, &sets, model.step_names());
            for m in &missing {
                reporter.failed(format!("Section force {} at {}", m.set, m.step));
            }
            Some(table)
        }
        None => None,
    };

    let bolt_forces = if config.bolt_nodes.is_empty() {
        None
    } else {
        reporter.stage(RunStage::BoltForces);
        let table = bolt_force_table(provider, &config.bolt_nodes, model.step_names())?;
        reporter.succeed(format!("Bolt forces, {} bolts", config.bolt_nodes.len()));
        Some(table)
    };

    Ok(RunReport {
        name: config.name.clone(),
        steps: model.step_names().to_vec(),
        cycles: (0..config.fixed_steps.len())
            .map(|c| config.cycle_name(c))
            .collect(),
        criteria: config.fatigue_criteria.clone(),
        elements: element_reports(model, config),
        geometry,
        relative: relative.into_iter().flatten().collect(),
        fatigue,
        summaries,
        stress_warnings,
        bore,
        cam,
        section_forces: forces,
        bolt_forces,
    })
}

/// List stored runs of a configuration name, newest first.
pub fn list_runs(output_dir: &Path, name: &str) -> AppResult<Vec<RunManifest>> {
    let store = ReportStore::new(output_dir.to_path_buf())?;
    Ok(store.list_runs(name)?)
}

/// Load a stored run.
pub fn load_run(output_dir: &Path, run_id: &str) -> AppResult<(RunManifest, RunReport)> {
    let store = ReportStore::new(output_dir.to_path_buf())?;
    let manifest = store.load_manifest(run_id)?;
    let report = store.load_report(run_id)?;
    Ok((manifest, report))
}

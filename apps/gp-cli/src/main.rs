use clap::{Parser, Subcommand};
use gp_app::{AppResult, RunOptions, RunProgressEvent, RunRequest, input_service, run_service};
use gp_report::LogStatus;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gp-cli")]
#[command(about = "gasketpost - cylinder head gasket FEA post-processor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a run configuration
    Validate {
        /// Path to the configuration (YAML or JSON)
        config_path: PathBuf,
    },
    /// Post-process a result dataset
    Run {
        /// Path to the configuration (YAML or JSON)
        config_path: PathBuf,
        /// Path to the extracted-result dataset (YAML or JSON)
        dataset_path: PathBuf,
        /// Directory receiving the reports
        #[arg(short, long, default_value = "gasketpost_runs")]
        out: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Show what a run would process
    Inspect {
        config_path: PathBuf,
        dataset_path: PathBuf,
    },
    /// List stored runs of a configuration name
    Runs {
        /// Report directory
        out: PathBuf,
        /// Configuration name
        name: String,
    },
    /// Print the text report of a stored run
    ShowRun {
        /// Report directory
        out: PathBuf,
        run_id: String,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Run {
            config_path,
            dataset_path,
            out,
            no_cache,
        } => cmd_run(&config_path, &dataset_path, &out, !no_cache),
        Commands::Inspect {
            config_path,
            dataset_path,
        } => cmd_inspect(&config_path, &dataset_path),
        Commands::Runs { out, name } => cmd_runs(&out, &name),
        Commands::ShowRun { out, run_id } => cmd_show_run(&out, &run_id),
    }
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = input_service::load_config(config_path)?;
    println!("✓ Configuration is valid");
    println!(
        "  {} cylinders, {} firing steps, {} sections",
        config.cylinder_count,
        config.fixed_steps.len(),
        config.sections.len()
    );
    Ok(())
}

fn cmd_run(config_path: &Path, dataset_path: &Path, out: &Path, use_cache: bool) -> AppResult<()> {
    println!("Post-processing {}", dataset_path.display());

    let request = RunRequest {
        config_path,
        dataset_path,
        output_dir: out,
        options: RunOptions {
            use_cache,
            ..RunOptions::default()
        },
    };

    let mut last_emit = Instant::now();
    let mut last_stage = String::new();
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event| {
            if matches!(event.status, Some(LogStatus::Failed | LogStatus::Warning)) {
                clear_progress_line();
                render_log_event(&event);
                return;
            }
            let stage_key = format!("{:?}", event.stage);
            if stage_key != last_stage || last_emit.elapsed().as_millis() >= 100 {
                render_cli_progress(&event);
                last_stage = stage_key;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Post-processing completed: {}", response.run_id);
    }
    println!("  Reports: {}", response.report_dir.display());
    println!(
        "  {} elements, {} nodes, {} steps",
        response.manifest.element_count, response.manifest.node_count, response.manifest.step_count
    );
    if response.failures > 0 || response.warnings > 0 {
        println!(
            "  {} failed items, {} warnings (see the run log)",
            response.failures, response.warnings
        );
    }
    print_timing_summary(&response.timing);
    Ok(())
}

fn cmd_inspect(config_path: &Path, dataset_path: &Path) -> AppResult<()> {
    let summary = input_service::inspect(config_path, dataset_path)?;
    let d = &summary.dataset;
    println!("Dataset: {}", dataset_path.display());
    println!("  Steps: {}", d.steps.len());
    for (i, step) in d.steps.iter().enumerate() {
        println!("    {:>3}  {}", i + 1, step);
    }
    println!("  Nodes: {}", d.node_count);
    println!("  Elements: {}", d.element_count);
    println!("  Element sets: {}", d.element_sets.join(", "));
    println!("  Node sets: {}", d.node_sets.join(", "));
    println!("  Relative motion output: {}", if d.has_relative { "yes" } else { "no" });
    println!("Selected for post-processing:");
    println!("  Elements: {}", summary.selected_elements);
    println!("  Nodes: {}", summary.selected_nodes);
    println!("  Fatigue elements: {}", summary.fatigue_elements);
    println!("  Sets: {}", summary.element_sets.join(", "));
    for issue in &summary.issues {
        println!("  ✗ {}", issue);
    }
    Ok(())
}

fn cmd_runs(out: &Path, name: &str) -> AppResult<()> {
    let runs = run_service::list_runs(out, name)?;
    if runs.is_empty() {
        println!("No runs found for {}", name);
    } else {
        println!("Runs for {}:", name);
        for run in runs {
            println!(
                "  {}  {}  ({} elements, {} steps, {} failed, {} warnings)",
                run.run_id,
                run.timestamp,
                run.element_count,
                run.step_count,
                run.failures,
                run.warnings
            );
        }
    }
    Ok(())
}

fn cmd_show_run(out: &Path, run_id: &str) -> AppResult<()> {
    let (manifest, report) = run_service::load_run(out, run_id)?;
    println!("Run {} ({})", manifest.run_id, manifest.timestamp);
    print!("{}", gp_report::render_report(&report));
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_log_event(event: &RunProgressEvent) {
    let mark = match event.status {
        Some(LogStatus::Failed) => "✗",
        _ => "!",
    };
    println!("{} {}", mark, event.message.as_deref().unwrap_or(""));
}

fn render_cli_progress(event: &RunProgressEvent) {
    let spinner = ['|', '/', '-', '\\'];
    let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
    let mut line = format!(
        "\r{} {}  elapsed={:.2}s",
        spinner[spin_idx],
        event.stage.label(),
        event.elapsed_wall_s
    );
    if let Some(msg) = &event.message {
        if msg != event.stage.label() {
            line.push_str(&format!("  {}", msg));
        }
    }
    print!("{}", line);
    let _ = io::stdout().flush();
}

fn print_timing_summary(timing: &gp_app::RunTimingSummary) {
    let total = timing.total_time_s.max(1.0e-12);
    println!("\nTiming summary:");
    println!(
        "  Load:    {:.3}s ({:.1}%)",
        timing.load_time_s,
        100.0 * timing.load_time_s / total
    );
    println!(
        "  Build:   {:.3}s ({:.1}%)",
        timing.build_time_s,
        100.0 * timing.build_time_s / total
    );
    println!(
        "  Compute: {:.3}s ({:.1}%)",
        timing.compute_time_s,
        100.0 * timing.compute_time_s / total
    );
    println!(
        "  Save:    {:.3}s ({:.1}%)",
        timing.save_time_s,
        100.0 * timing.save_time_s / total
    );
    println!("  Total:   {:.3}s", timing.total_time_s);
}

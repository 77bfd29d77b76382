use clap::{Parser, Subcommand};
use mf_metabolics::{ProbeOperation, ProbeReducer};
use mf_model::MusculoskeletalModel;
use mf_project::ProjectResult;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "mf-cli")]
#[command(about = "myoflow CLI - muscle metabolic rate probes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a probe configuration file
    Validate {
        /// Path to the probe configuration (YAML or JSON)
        probe_path: PathBuf,
        /// Also check muscle references against this state trace
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// List muscles of a state trace
    Muscles {
        /// Path to the state trace (YAML or JSON)
        trace_path: PathBuf,
    },
    /// Evaluate a probe over every sample of a state trace
    Evaluate {
        /// Path to the probe configuration (YAML or JSON)
        probe_path: PathBuf,
        /// Path to the state trace (YAML or JSON)
        trace_path: PathBuf,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ProjectResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { probe_path, trace } => cmd_validate(&probe_path, trace.as_deref()),
        Commands::Muscles { trace_path } => cmd_muscles(&trace_path),
        Commands::Evaluate {
            probe_path,
            trace_path,
            output,
        } => cmd_evaluate(&probe_path, &trace_path, output.as_deref()),
    }
}

fn cmd_validate(probe_path: &Path, trace_path: Option<&Path>) -> ProjectResult<()> {
    println!("Validating probe: {}", probe_path.display());
    let config = mf_project::load_probe_config(probe_path)?;
    let mut probe = mf_project::build_probe(&config)?;
    println!(
        "✓ Probe '{}' is valid ({} muscle parameters)",
        probe.name(),
        probe.parameters().len()
    );

    if let Some(trace_path) = trace_path {
        let trace_def = mf_project::load_trace(trace_path)?;
        mf_project::check_references(&config, &trace_def)?;
        let model = mf_project::build_model(&trace_def)?;
        probe.attach(&model)?;
        println!(
            "✓ Probe attaches to trace '{}' ({} outputs)",
            trace_def.name,
            probe.num_outputs()?
        );
    }
    Ok(())
}

fn cmd_muscles(trace_path: &Path) -> ProjectResult<()> {
    let trace_def = mf_project::load_trace(trace_path)?;
    let model = mf_project::build_model(&trace_def)?;

    if model.muscle_count() == 0 {
        println!("No muscles found in trace");
    } else {
        println!(
            "Muscles in trace '{}' (body mass {} kg):",
            trace_def.name,
            model.body_mass_kg()
        );
        for muscle in &trace_def.muscles {
            println!(
                "  {} - Fmax {} N, Lopt {} m",
                muscle.name, muscle.max_isometric_force_n, muscle.optimal_fiber_length_m
            );
        }
    }
    Ok(())
}

fn cmd_evaluate(probe_path: &Path, trace_path: &Path, output: Option<&Path>) -> ProjectResult<()> {
    let config = mf_project::load_probe_config(probe_path)?;
    let trace_def = mf_project::load_trace(trace_path)?;
    mf_project::check_references(&config, &trace_def)?;

    let trace = mf_project::build_trace(&trace_def)?;
    let mut probe = mf_project::build_probe(&config)?;
    probe.attach(&trace.model)?;

    let labels = probe.output_labels()?;
    let mut reducer = ProbeReducer::new(probe.operation(), labels.len());
    let mut energy = ProbeReducer::new(ProbeOperation::Integrate, 1);

    // Build CSV
    let mut csv = format!("time_s,{}\n", labels.join(","));
    for (t, state) in &trace.samples {
        let report = probe.compute(&trace.model, state)?;
        let values: Vec<f64> = report.values().iter().map(|v| v * probe.gain()).collect();
        reducer.push(*t, &values)?;
        energy.push(*t, &[report.total()])?;

        let row: Vec<String> = reducer.result().iter().map(|v| v.to_string()).collect();
        csv.push_str(&format!("{},{}\n", t, row.join(",")));
    }

    let total_energy = energy.result().first().copied().unwrap_or(0.0);
    info!(
        probe = probe.name(),
        samples = trace.samples.len(),
        energy_j = total_energy,
        "evaluation finished"
    );

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} samples to {}",
            trace.samples.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    println!(
        "Metabolic energy: {:.3} J over {:.3} s",
        total_energy,
        trace.duration_s()
    );

    Ok(())
}

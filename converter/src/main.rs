use anyhow::Context;
use clap::Parser;
use generator::profile::build_ensemble_document;
use log::info;
use report::model::ConversionReport;
use std::path::PathBuf;
use workflow::config::WorkflowConfig;
use workflow::input::EnsembleDocument;
use workflow::runner::Runner;

mod generator;
mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "ADCP amplitude to measured-backscatter converter")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Ensemble document (JSON, or YAML by extension) with parsed columns
    #[arg(long, conflicts_with = "synthetic")]
    input: Option<PathBuf>,
    /// Generate a synthetic ensemble document instead of reading one
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long)]
    ensembles: Option<usize>,
    #[arg(long)]
    bins: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// Override the emitted frequency, kHz
    #[arg(long)]
    frequency_khz: Option<f64>,
    /// Override the beam angle, degrees
    #[arg(long)]
    beam_angle_deg: Option<f64>,
    /// Apply the models with the rayon map
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Write the JSON report here
    #[arg(long, default_value = "adcp_report.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::default()
    }
    .with_overrides(args.frequency_khz, args.beam_angle_deg);
    workflow_config.parallel |= args.parallel;
    if let Some(ensembles) = args.ensembles {
        workflow_config.generator.ensembles = ensembles;
    }
    if let Some(bins) = args.bins {
        workflow_config.generator.bins = bins;
    }
    if let Some(seed) = args.seed {
        workflow_config.generator.seed = seed;
    }
    workflow_config
        .constants
        .validate()
        .context("validating physical constants")?;

    let document = match (&args.input, args.synthetic) {
        (Some(path), _) => EnsembleDocument::load(path)?,
        (None, true) => {
            build_ensemble_document(&workflow_config.generator, &workflow_config.constants)?
        }
        (None, false) => anyhow::bail!("either --input or --synthetic is required"),
    };
    info!(
        "converting {} ensembles across {} beams",
        document.time_series.len(),
        document.beams.len()
    );

    let runner = Runner::new(workflow_config.clone());
    let result = runner.execute(&document)?;

    let report = ConversionReport::new(
        workflow_config.constants.clone(),
        workflow_config.parallel,
        result,
    );
    for (beam, beam_report) in &report.beams {
        if let Some(first) = beam_report.profile.first() {
            println!(
                "{} -> bins {}, first bin {:.2} m mean {:?} dB",
                beam,
                beam_report.profile.len(),
                first.depth,
                first.mean_db
            );
        }
    }
    println!("Conversion -> {}", report.summary());

    report.save(&args.output)?;
    info!("report written to {}", args.output.display());

    Ok(())
}

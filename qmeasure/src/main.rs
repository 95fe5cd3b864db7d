use anyhow::{Context, bail};
use clap::Parser;
use qmeasure::shots::parse_amplitudes;
use qmeasure::{
    DEFAULT_SHOTS, MeasureKind, MeasurementRecord, MeasurementSummary, QubitIds, ShotSampler,
    emit_summary,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs one measurement command over a prepared state and prints its report
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Measurement command: m, mx, my, mz or mb
    #[arg(short, long, default_value = "mz")]
    kind: MeasureKind,

    /// Polar angle of the measurement direction, in units of PI (only for `m`)
    #[arg(long, default_value_t = 0.0)]
    angle: f64,

    /// Azimuthal phase of the measurement direction, in units of PI (only for `m`)
    #[arg(long, default_value_t = 0.0)]
    phase: f64,

    /// Measured qubit ids. Defaults to every qubit the amplitudes describe.
    #[arg(short, long, value_delimiter = ',')]
    qubits: Vec<usize>,

    /// Number of shots
    #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
    shots: u32,

    /// Seed for the outcome sampler
    #[arg(long)]
    seed: Option<u64>,

    /// Amplitudes of the measured qubits in the measurement basis, as `re:im,...`
    #[arg(short, long)]
    amplitudes: String,

    /// Also print a JSON summary to stdout
    #[arg(long)]
    json: bool,

    /// The output file to write the JSON summary to
    #[arg(short, long)]
    output_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let amplitudes = parse_amplitudes(&cli.amplitudes)?;
    if !amplitudes.len().is_power_of_two() || amplitudes.len() < 2 {
        bail!(
            "amplitude count must be a power of two, got {}",
            amplitudes.len()
        );
    }
    let qubit_ids = if cli.qubits.is_empty() {
        QubitIds::first(amplitudes.len().trailing_zeros() as usize)?
    } else {
        QubitIds::new(&cli.qubits)?
    };

    let mut slot = Some(MeasurementRecord::for_kind(
        cli.kind, cli.shots, cli.angle, cli.phase, qubit_ids,
    )?);
    if let Some(record) = slot.as_mut() {
        let sampler = ShotSampler::new(&amplitudes)?;
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        info!(kind = ?cli.kind, shots = cli.shots, "running measurement");
        sampler.fill(record, &mut rng)?;

        record.report(&mut io::stdout().lock())?;

        let summary = MeasurementSummary::from_record(record)?;
        if cli.json {
            emit_summary(&summary, &mut io::stdout().lock())?;
        }
        if let Some(output_path) = cli.output_file {
            let file = File::create(&output_path)
                .with_context(|| format!("creating {}", output_path.display()))?;
            let mut writer = BufWriter::new(file);
            emit_summary(&summary, &mut writer)?;
        }
    }
    MeasurementRecord::release(&mut slot);

    Ok(())
}

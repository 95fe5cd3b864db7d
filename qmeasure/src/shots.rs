use crate::error::{MeasureError, Result};
use crate::record::MeasurementRecord;
use num_complex::Complex;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

/// Draws outcomes from the probabilities |a|² of a measured state.
///
/// The amplitudes must already be expressed in the measurement basis and
/// indexed the same way as the record's outcomes.
pub struct ShotSampler {
    dist: WeightedIndex<f64>,
    state_num: usize,
}

impl ShotSampler {
    pub fn new(amplitudes: &[Complex<f64>]) -> Result<Self> {
        let probabilities: Vec<f64> = amplitudes.iter().map(|a| a.norm_sqr()).collect();
        let dist = WeightedIndex::new(&probabilities)
            .map_err(|e| MeasureError::Distribution(e.to_string()))?;
        Ok(Self {
            dist,
            state_num: amplitudes.len(),
        })
    }

    pub fn state_num(&self) -> usize {
        self.state_num
    }

    pub fn sample(&self, rng: &mut impl Rng) -> usize {
        self.dist.sample(rng)
    }

    /// Runs the record's whole trial loop: one outcome per shot.
    pub fn fill(&self, record: &mut MeasurementRecord, rng: &mut impl Rng) -> Result<()> {
        if self.state_num != record.state_num() {
            return Err(MeasureError::AmplitudeCount {
                expected: record.state_num(),
                actual: self.state_num,
            });
        }
        for _ in 0..record.shot_num() {
            record.record(self.sample(rng))?;
        }
        debug!(shots = record.shot_num(), "trial loop finished");
        Ok(())
    }
}

/// Parses `re:im` pairs separated by commas, e.g. `0.7071:0,0:0,0:0,0.7071:0`.
/// A bare number is taken as a real amplitude.
pub fn parse_amplitudes(text: &str) -> Result<Vec<Complex<f64>>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|item| -> Result<Complex<f64>> {
            let (re, im) = item.split_once(':').unwrap_or((item, "0"));
            let parse = |s: &str| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| MeasureError::Amplitude(format!("'{}': {}", item, e)))
            };
            Ok(Complex::new(parse(re)?, parse(im)?))
        })
        .collect()
}

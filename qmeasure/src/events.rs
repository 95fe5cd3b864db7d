use crate::basis::MeasureBasis;
use crate::error::Result;
use crate::record::MeasurementRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// Machine-readable snapshot of a finished measurement.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSummary {
    pub basis: MeasureBasis,
    pub bell: bool,
    pub qubit_ids: Vec<usize>,
    pub shots: u32,
    /// Observed states only, keyed by their label.
    pub frequencies: BTreeMap<String, u32>,
    pub last_state: Option<String>,
}

impl MeasurementSummary {
    pub fn from_record(record: &MeasurementRecord) -> Result<Self> {
        let mut frequencies = BTreeMap::new();
        for (i, &n) in record.frequencies().iter().enumerate() {
            if n > 0 {
                frequencies.insert(record.label(i)?, n);
            }
        }
        Ok(Self {
            basis: record.basis(),
            bell: record.is_bell(),
            qubit_ids: record.qubit_ids().to_vec(),
            shots: record.shot_num(),
            frequencies,
            last_state: record.last_label()?,
        })
    }
}

/// Serializes the summary as one JSON line.
pub fn emit_summary(summary: &MeasurementSummary, writer: &mut impl Write) -> Result<()> {
    let json_output = serde_json::to_string(summary)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json_output)?;
    Ok(())
}

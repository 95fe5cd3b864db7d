use crate::bell::BellState;
use crate::binstr;
use crate::error::{MeasureError, Result};
use crate::record::MeasurementRecord;
use std::io::{self, Write};
use tracing::warn;

impl MeasurementRecord {
    /// Writes the basis header, one line per observed state and the last
    /// state. Nothing is written unless every label could be built.
    pub fn render(&self, out: &mut impl Write) -> Result<()> {
        let text = self.generic_report().inspect_err(|e| {
            warn!(error = %e, "measurement report rejected");
        })?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Bell-basis report. Requires a four-state record.
    pub fn render_bell(&self, out: &mut impl Write) -> Result<()> {
        let text = self.bell_report().inspect_err(|e| {
            warn!(error = %e, "bell report rejected");
        })?;
        out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Renders with the Bell renderer for Bell records, the generic one otherwise.
    pub fn report(&self, out: &mut impl Write) -> Result<()> {
        if self.is_bell() {
            self.render_bell(out)
        } else {
            self.render(out)
        }
    }

    pub fn print(&self) -> Result<()> {
        self.render(&mut io::stdout().lock())
    }

    pub fn print_bell(&self) -> Result<()> {
        self.render_bell(&mut io::stdout().lock())
    }

    fn generic_report(&self) -> Result<String> {
        let basis = self.basis();
        let mode = basis.label_mode();
        let mut text = format!("direction of measurement: {}\n", basis);

        for (i, &n) in self.frequencies().iter().enumerate() {
            let state = binstr::label(self.qubit_num(), i, mode)?;
            if n > 0 {
                text.push_str(&format!("frq[{}] = {}\n", state, n));
            }
        }

        let last = self.last().ok_or(MeasureError::NoShots)?;
        let last_state = binstr::label(self.qubit_num(), last, mode)?;
        text.push_str(&format!("last state => {}\n", last_state));
        Ok(text)
    }

    fn bell_report(&self) -> Result<String> {
        if self.state_num() != BellState::ALL.len() {
            return Err(MeasureError::BellStateNum(self.state_num()));
        }
        let mut text = String::from("bell-measurement\n");

        for (i, &n) in self.frequencies().iter().enumerate() {
            if n > 0 {
                let state = BellState::try_from(i)?;
                text.push_str(&format!("frq[{}] = {}\n", state, n));
            }
        }

        let last = self.last().ok_or(MeasureError::NoShots)?;
        text.push_str(&format!("last state => {}\n", BellState::try_from(last)?));
        Ok(text)
    }
}

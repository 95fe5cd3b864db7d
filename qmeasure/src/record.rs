use crate::basis::{MeasureBasis, MeasureKind};
use crate::bell::BellState;
use crate::binstr;
use crate::error::{MeasureError, Result};
use tracing::{debug, trace};

/// Largest register the simulator supports.
pub const MAX_QUBIT_NUM: usize = 30;

/// Shots taken when the caller does not ask for a number.
pub const DEFAULT_SHOTS: u32 = 1;

/// Ordered list of measured qubit ids, bounded by [`MAX_QUBIT_NUM`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QubitIds {
    ids: [usize; MAX_QUBIT_NUM],
    len: usize,
}

impl QubitIds {
    pub fn new(ids: &[usize]) -> Result<Self> {
        if ids.len() > MAX_QUBIT_NUM {
            return Err(MeasureError::TooManyQubitIds(ids.len()));
        }
        let mut buf = [0; MAX_QUBIT_NUM];
        buf[..ids.len()].copy_from_slice(ids);
        Ok(Self {
            ids: buf,
            len: ids.len(),
        })
    }

    /// Ids `0..n`, the default when a command names no qubits.
    pub fn first(n: usize) -> Result<Self> {
        let ids: Vec<usize> = (0..n).collect();
        Self::new(&ids)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.ids[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Outcome frequencies of one measurement command.
///
/// The simulation loop records one outcome per shot with [`record`], then
/// asks for a report. Records are never reused across commands.
///
/// [`record`]: MeasurementRecord::record
#[derive(Debug, Clone)]
pub struct MeasurementRecord {
    qubit_num: usize,
    state_num: usize,
    shot_num: u32,
    angle: f64,
    phase: f64,
    qubit_id: QubitIds,
    freq: Vec<u32>,
    last: Option<usize>,
    bell: bool,
}

impl MeasurementRecord {
    /// Creates a record with `state_num` zeroed counters.
    pub fn new(
        qubit_num: usize,
        state_num: usize,
        shot_num: u32,
        angle: f64,
        phase: f64,
        qubit_id: QubitIds,
    ) -> Result<Self> {
        if qubit_num == 0 || qubit_num > MAX_QUBIT_NUM {
            return Err(MeasureError::InvalidQubitNum(qubit_num));
        }
        if shot_num == 0 {
            return Err(MeasureError::InvalidShotNum);
        }
        if state_num == 0 {
            return Err(MeasureError::InvalidStateNum);
        }

        let mut freq = Vec::new();
        freq.try_reserve_exact(state_num).map_err(|_| MeasureError::Alloc { slots: state_num })?;
        freq.resize(state_num, 0);

        debug!(qubit_num, state_num, shot_num, angle, phase, "measurement record created");
        Ok(Self {
            qubit_num,
            state_num,
            shot_num,
            angle,
            phase,
            qubit_id,
            freq,
            last: None,
            bell: false,
        })
    }

    /// Record for a two-qubit Bell measurement on `qubit_id`.
    pub fn bell(shot_num: u32, qubit_id: QubitIds) -> Result<Self> {
        let ids = qubit_id.as_slice();
        if ids.len() != 2 || ids[0] == ids[1] {
            return Err(MeasureError::InvalidBellQubits);
        }
        let mut record = Self::new(2, BellState::ALL.len(), shot_num, 0.0, 0.0, qubit_id)?;
        record.bell = true;
        Ok(record)
    }

    /// Record sized for `kind` measuring the qubits in `qubit_id`.
    pub fn for_kind(
        kind: MeasureKind,
        shot_num: u32,
        angle: f64,
        phase: f64,
        qubit_id: QubitIds,
    ) -> Result<Self> {
        if kind.is_bell() {
            return Self::bell(shot_num, qubit_id);
        }
        let qubit_num = qubit_id.len();
        if qubit_num == 0 || qubit_num > MAX_QUBIT_NUM {
            return Err(MeasureError::InvalidQubitNum(qubit_num));
        }
        let (angle, phase) = kind.basis(angle, phase).angles();
        Self::new(qubit_num, 1 << qubit_num, shot_num, angle, phase, qubit_id)
    }

    /// Drops the record held in `slot`, if any. Safe to call on an empty slot.
    pub fn release(slot: &mut Option<MeasurementRecord>) {
        if let Some(record) = slot.take() {
            debug!(state_num = record.state_num, "measurement record released");
        }
    }

    /// Counts one shot landing on `outcome` and makes it the last outcome.
    pub fn record(&mut self, outcome: usize) -> Result<()> {
        let slot = self
            .freq
            .get_mut(outcome)
            .ok_or(MeasureError::OutcomeOutOfRange {
                index: outcome,
                state_num: self.state_num,
            })?;
        *slot = slot.checked_add(1).ok_or(MeasureError::CountOverflow(outcome))?;
        self.last = Some(outcome);
        trace!(outcome, "shot recorded");
        Ok(())
    }

    pub fn qubit_num(&self) -> usize {
        self.qubit_num
    }

    pub fn state_num(&self) -> usize {
        self.state_num
    }

    pub fn shot_num(&self) -> u32 {
        self.shot_num
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn qubit_ids(&self) -> &[usize] {
        self.qubit_id.as_slice()
    }

    pub fn frequencies(&self) -> &[u32] {
        &self.freq
    }

    pub fn frequency(&self, index: usize) -> Option<u32> {
        self.freq.get(index).copied()
    }

    /// Outcome of the most recent shot, `None` before the first one.
    pub fn last(&self) -> Option<usize> {
        self.last
    }

    /// Shots recorded so far.
    pub fn total(&self) -> u64 {
        self.freq.iter().map(|&n| u64::from(n)).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.total() == u64::from(self.shot_num)
    }

    pub fn is_bell(&self) -> bool {
        self.bell
    }

    pub fn basis(&self) -> MeasureBasis {
        MeasureBasis::from_angles(self.angle, self.phase)
    }

    pub fn relative_frequencies(&self) -> Vec<f64> {
        let shots = f64::from(self.shot_num);
        self.freq.iter().map(|&n| f64::from(n) / shots).collect()
    }

    /// Symbolic label for `index`: a Bell state name for Bell records,
    /// otherwise its binary expansion in this record's basis.
    pub fn label(&self, index: usize) -> Result<String> {
        if self.bell {
            BellState::try_from(index).map(|s| s.name().to_string())
        } else {
            binstr::label(self.qubit_num, index, self.basis().label_mode())
        }
    }

    pub fn last_label(&self) -> Result<Option<String>> {
        self.last.map(|i| self.label(i)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn ids(ids: &[usize]) -> QubitIds {
        QubitIds::new(ids).unwrap()
    }

    #[test]
    fn new_record_is_zeroed() {
        let record = MeasurementRecord::new(3, 8, 100, 0.0, 0.0, ids(&[0, 1, 2])).unwrap();
        assert_eq!(record.total(), 0);
        assert_eq!(record.frequencies().len(), 8);
        for i in 0..8 {
            assert_eq!(record.frequency(i), Some(0));
        }
        assert_eq!(record.frequency(8), None);
        assert_eq!(record.last(), None);
        assert!(!record.is_complete());
    }

    #[test]
    fn parameters_are_stored_verbatim() {
        let record = MeasurementRecord::new(2, 4, 7, 0.2, 0.3, ids(&[4, 1])).unwrap();
        assert_eq!(record.qubit_num(), 2);
        assert_eq!(record.state_num(), 4);
        assert_eq!(record.shot_num(), 7);
        assert_eq!(record.angle(), 0.2);
        assert_eq!(record.phase(), 0.3);
        assert_eq!(record.qubit_ids(), &[4, 1]);
    }

    #[test]
    fn qubit_ids_are_copied() {
        let mut source = vec![0, 1];
        let record = MeasurementRecord::new(2, 4, 1, 0.0, 0.0, ids(&source)).unwrap();
        source[0] = 9;
        assert_eq!(record.qubit_ids(), &[0, 1]);
    }

    #[test]
    fn totals_match_shots_after_loop() {
        let shots = 500;
        let mut record = MeasurementRecord::new(3, 8, shots, 0.0, 0.0, ids(&[0, 1, 2])).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut final_outcome = 0;
        for _ in 0..shots {
            final_outcome = rng.gen_range(0..8);
            record.record(final_outcome).unwrap();
        }
        assert_eq!(record.total(), u64::from(shots));
        assert!(record.is_complete());
        assert_eq!(record.last(), Some(final_outcome));
        let sum: f64 = record.relative_frequencies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_outcome_leaves_record_untouched() {
        let mut record = MeasurementRecord::new(1, 2, 1, 0.0, 0.0, ids(&[0])).unwrap();
        record.record(1).unwrap();
        let err = record.record(2).unwrap_err();
        assert!(matches!(
            err,
            MeasureError::OutcomeOutOfRange {
                index: 2,
                state_num: 2
            }
        ));
        assert_eq!(record.frequencies(), &[0, 1]);
        assert_eq!(record.last(), Some(1));
    }

    #[test]
    fn invalid_construction() {
        assert!(matches!(
            MeasurementRecord::new(0, 1, 1, 0.0, 0.0, ids(&[])),
            Err(MeasureError::InvalidQubitNum(0))
        ));
        assert!(matches!(
            MeasurementRecord::new(MAX_QUBIT_NUM + 1, 2, 1, 0.0, 0.0, ids(&[0])),
            Err(MeasureError::InvalidQubitNum(_))
        ));
        assert!(matches!(
            MeasurementRecord::new(1, 2, 0, 0.0, 0.0, ids(&[0])),
            Err(MeasureError::InvalidShotNum)
        ));
        assert!(matches!(
            MeasurementRecord::new(1, 0, 1, 0.0, 0.0, ids(&[0])),
            Err(MeasureError::InvalidStateNum)
        ));
    }

    #[test]
    fn oversized_table_is_an_allocation_error() {
        assert!(matches!(
            MeasurementRecord::new(1, usize::MAX, 1, 0.0, 0.0, ids(&[0])),
            Err(MeasureError::Alloc { slots: usize::MAX })
        ));
    }

    #[test]
    fn saturated_counter_is_rejected() {
        let mut record = MeasurementRecord::new(1, 2, 1, 0.0, 0.0, ids(&[0])).unwrap();
        record.record(0).unwrap();
        record.freq[1] = u32::MAX;
        assert!(matches!(record.record(1), Err(MeasureError::CountOverflow(1))));
        assert_eq!(record.frequency(1), Some(u32::MAX));
        assert_eq!(record.last(), Some(0));
    }

    #[test]
    fn qubit_ids_are_bounded() {
        let too_many: Vec<usize> = (0..=MAX_QUBIT_NUM).collect();
        assert!(matches!(
            QubitIds::new(&too_many),
            Err(MeasureError::TooManyQubitIds(n)) if n == MAX_QUBIT_NUM + 1
        ));
        let full = QubitIds::first(MAX_QUBIT_NUM).unwrap();
        assert_eq!(full.len(), MAX_QUBIT_NUM);
        assert!(QubitIds::first(0).unwrap().is_empty());
    }

    #[test]
    fn bell_record_shape() {
        let record = MeasurementRecord::bell(10, ids(&[3, 5])).unwrap();
        assert!(record.is_bell());
        assert_eq!(record.qubit_num(), 2);
        assert_eq!(record.state_num(), 4);
        assert_eq!(record.basis(), MeasureBasis::Z);
        assert!(matches!(
            MeasurementRecord::bell(10, ids(&[1, 1])),
            Err(MeasureError::InvalidBellQubits)
        ));
        assert!(matches!(
            MeasurementRecord::bell(10, ids(&[0, 1, 2])),
            Err(MeasureError::InvalidBellQubits)
        ));
    }

    #[test]
    fn records_for_kinds() {
        let mx = MeasurementRecord::for_kind(MeasureKind::MX, 5, 0.0, 0.0, ids(&[0, 2])).unwrap();
        assert_eq!(mx.state_num(), 4);
        assert_eq!(mx.basis(), MeasureBasis::X);

        let m = MeasurementRecord::for_kind(MeasureKind::M, 5, 0.2, 0.2, ids(&[1])).unwrap();
        assert_eq!(m.state_num(), 2);
        assert_eq!((m.angle(), m.phase()), (0.2, 0.2));

        let mb = MeasurementRecord::for_kind(MeasureKind::MB, 5, 0.3, 0.0, ids(&[0, 1])).unwrap();
        assert!(mb.is_bell());

        assert!(MeasurementRecord::for_kind(MeasureKind::MZ, 5, 0.0, 0.0, ids(&[])).is_err());
    }

    #[test]
    fn labels_follow_basis() {
        let mut record = MeasurementRecord::new(2, 4, 1, 0.5, 0.5, ids(&[0, 1])).unwrap();
        assert_eq!(record.last_label().unwrap(), None);
        record.record(1).unwrap();
        assert_eq!(record.last_label().unwrap().as_deref(), Some("ud"));

        let mut bell = MeasurementRecord::bell(1, ids(&[0, 1])).unwrap();
        bell.record(2).unwrap();
        assert_eq!(bell.last_label().unwrap().as_deref(), Some("psi-"));
    }

    #[test]
    fn release_is_idempotent() {
        let mut slot = Some(MeasurementRecord::new(1, 2, 1, 0.0, 0.0, ids(&[0])).unwrap());
        MeasurementRecord::release(&mut slot);
        assert!(slot.is_none());
        MeasurementRecord::release(&mut slot);
        assert!(slot.is_none());

        let mut never: Option<MeasurementRecord> = None;
        MeasurementRecord::release(&mut never);
    }
}

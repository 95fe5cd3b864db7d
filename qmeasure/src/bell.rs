use crate::error::MeasureError;
use std::fmt;

/// The four two-qubit Bell states, in outcome-index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellState {
    PhiPlus,
    PsiPlus,
    PsiMinus,
    PhiMinus,
}

impl BellState {
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PsiPlus,
        BellState::PsiMinus,
        BellState::PhiMinus,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BellState::PhiPlus => "phi+",
            BellState::PsiPlus => "psi+",
            BellState::PsiMinus => "psi-",
            BellState::PhiMinus => "phi-",
        }
    }
}

impl TryFrom<usize> for BellState {
    type Error = MeasureError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        BellState::ALL
            .get(index)
            .copied()
            .ok_or(MeasureError::MalformedBell(index))
    }
}

impl fmt::Display for BellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

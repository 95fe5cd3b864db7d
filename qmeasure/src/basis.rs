use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Symbols used when a basis-state index is expanded into digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMode {
    /// "0" / "1"
    Digit,
    /// "u" / "d" (spin up / spin down)
    Spin,
}

impl LabelMode {
    pub fn symbol(self, bit: bool) -> char {
        match (self, bit) {
            (LabelMode::Digit, false) => '0',
            (LabelMode::Digit, true) => '1',
            (LabelMode::Spin, false) => 'u',
            (LabelMode::Spin, true) => 'd',
        }
    }
}

/// Direction of measurement on the Bloch sphere. Angles are in units of π.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "axis", rename_all = "lowercase")]
pub enum MeasureBasis {
    Z,
    X,
    Y,
    Arbitrary { angle: f64, phase: f64 },
}

impl MeasureBasis {
    /// Classifies `(angle, phase)` by exact comparison against the three
    /// canonical axes. Anything else, however close, is an arbitrary basis.
    pub fn from_angles(angle: f64, phase: f64) -> Self {
        if angle == 0.0 && phase == 0.0 {
            MeasureBasis::Z
        } else if angle == 0.5 && phase == 0.0 {
            MeasureBasis::X
        } else if angle == 0.5 && phase == 0.5 {
            MeasureBasis::Y
        } else {
            MeasureBasis::Arbitrary { angle, phase }
        }
    }

    pub fn angles(&self) -> (f64, f64) {
        match *self {
            MeasureBasis::Z => (0.0, 0.0),
            MeasureBasis::X => (0.5, 0.0),
            MeasureBasis::Y => (0.5, 0.5),
            MeasureBasis::Arbitrary { angle, phase } => (angle, phase),
        }
    }

    pub fn label_mode(&self) -> LabelMode {
        match self {
            MeasureBasis::Z | MeasureBasis::Arbitrary { .. } => LabelMode::Digit,
            MeasureBasis::X | MeasureBasis::Y => LabelMode::Spin,
        }
    }
}

impl fmt::Display for MeasureBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureBasis::Z => write!(f, "z-axis"),
            MeasureBasis::X => write!(f, "x-axis"),
            MeasureBasis::Y => write!(f, "y-axis"),
            MeasureBasis::Arbitrary { angle, phase } => {
                write!(f, "theta={:.3}*PI, phi={:.3}*PI", angle, phase)
            }
        }
    }
}

/// The measurement commands a simulator front end can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureKind {
    /// Measure along a caller-supplied direction.
    M,
    MX,
    MY,
    MZ,
    /// Two-qubit Bell measurement.
    MB,
}

impl MeasureKind {
    /// Basis for this command. Only `M` looks at the supplied angles.
    pub fn basis(self, angle: f64, phase: f64) -> MeasureBasis {
        match self {
            MeasureKind::M => MeasureBasis::from_angles(angle, phase),
            MeasureKind::MX => MeasureBasis::X,
            MeasureKind::MY => MeasureBasis::Y,
            MeasureKind::MZ | MeasureKind::MB => MeasureBasis::Z,
        }
    }

    pub fn is_bell(self) -> bool {
        matches!(self, MeasureKind::MB)
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("unknown measurement command: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for MeasureKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "m" => Ok(MeasureKind::M),
            "mx" => Ok(MeasureKind::MX),
            "my" => Ok(MeasureKind::MY),
            "mz" => Ok(MeasureKind::MZ),
            "mb" => Ok(MeasureKind::MB),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

use crate::basis::LabelMode;
use crate::error::{MeasureError, Result};

/// Expands `index` into exactly `width` symbols, most significant qubit first.
pub fn label(width: usize, index: usize, mode: LabelMode) -> Result<String> {
    if width < usize::BITS as usize && index >> width != 0 {
        return Err(MeasureError::Format { width, index });
    }
    Ok((0..width)
        .rev()
        .map(|bit| {
            let set = bit < usize::BITS as usize && (index >> bit) & 1 == 1;
            mode.symbol(set)
        })
        .collect())
}

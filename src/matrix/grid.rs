use crate::foundation::error::{QrylicError, QrylicResult};

/// Smallest valid module count per side (a version 1 symbol).
pub const MIN_MODULE_COUNT: u32 = 21;

/// Default quiet-zone width in modules.
pub const DEFAULT_QUIET_ZONE: u32 = 4;

/// Square dark/light module grid plus a quiet-zone margin, the structured
/// geometry input consumed by the styling pipeline.
///
/// Invariants enforced at construction: the grid is square, the module count
/// is odd and at least [`MIN_MODULE_COUNT`], and the flag buffer holds exactly
/// `count * count` entries (row-major, `true` = dark).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGrid {
    count: u32,
    quiet_zone: u32,
    bits: Vec<bool>,
}

impl ModuleGrid {
    /// Build a grid from explicit module flags.
    pub fn new(count: u32, quiet_zone: u32, bits: Vec<bool>) -> QrylicResult<Self> {
        if count < MIN_MODULE_COUNT {
            return Err(QrylicError::config(format!(
                "module count {count} below minimum {MIN_MODULE_COUNT}"
            )));
        }
        if count.is_multiple_of(2) {
            return Err(QrylicError::config(format!(
                "module count {count} must be odd"
            )));
        }
        let expected = (count as usize)
            .checked_mul(count as usize)
            .ok_or_else(|| QrylicError::config("module count overflow"))?;
        if bits.len() != expected {
            return Err(QrylicError::config(format!(
                "module flag buffer length {} does not match {count}x{count}",
                bits.len()
            )));
        }
        Ok(Self {
            count,
            quiet_zone,
            bits,
        })
    }

    /// Build a grid from a `qrcode` symbol.
    pub fn from_qrcode(code: &qrcode::QrCode, quiet_zone: u32) -> QrylicResult<Self> {
        let count = u32::try_from(code.width())
            .map_err(|_| QrylicError::config("matrix code width out of range"))?;
        let bits = code
            .to_colors()
            .iter()
            .map(|c| *c == qrcode::Color::Dark)
            .collect();
        Self::new(count, quiet_zone, bits)
    }

    /// Modules per side, excluding the quiet zone.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Quiet-zone width in modules.
    pub fn quiet_zone(&self) -> u32 {
        self.quiet_zone
    }

    /// Cells per side including the quiet zone on both edges.
    pub fn cells_with_quiet(&self) -> u32 {
        self.count + 2 * self.quiet_zone
    }

    /// Whether the module at `(x, y)` is dark. Out-of-range coordinates are light.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.count || y >= self.count {
            return false;
        }
        self.bits[(y as usize) * (self.count as usize) + (x as usize)]
    }

    /// Render the grid (quiet zone included) as terminal half-block text,
    /// two module rows per output line.
    pub fn to_text(&self) -> String {
        let total = self.cells_with_quiet();
        let dark_at = |x: u32, y: u32| -> bool {
            let q = self.quiet_zone;
            if x < q || y < q {
                return false;
            }
            self.is_dark(x - q, y - q)
        };

        let mut out = String::new();
        let mut y = 0;
        while y < total {
            for x in 0..total {
                let top = dark_at(x, y);
                let bottom = y + 1 < total && dark_at(x, y + 1);
                out.push(match (top, bottom) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                });
            }
            out.push('\n');
            y += 2;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/matrix/grid.rs"]
mod tests;

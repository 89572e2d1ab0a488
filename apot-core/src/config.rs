use serde::{Deserialize, Serialize};

use crate::QuantError;

/// Upper bound on the total bit width `b`.
pub const MAX_BIT_WIDTH: u32 = 16;

/// Upper bound on the size of the Cartesian product of per-group terms.
/// Unsigned tables have exactly `2^b` combinations; signed tables have more.
pub const MAX_COMBINATIONS: usize = 1 << 20;

/// Smallest term `2^-e` must stay a normal `f64`.
const MAX_TERM_EXPONENT: u64 = 1022;

/// APoT quantizer configuration
///
/// - `bit_width` (`b`): total bits of the canonical code
/// - `level_bits` (`k`): bits per additive term; `ceil(b / k)` terms are summed
/// - `signed`: each term may also take negative values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuantizerConfig {
    pub bit_width: u32,
    pub level_bits: u32,
    #[serde(default)]
    pub signed: bool,
}

impl QuantizerConfig {
    /// Create and validate a configuration
    pub fn new(bit_width: u32, level_bits: u32, signed: bool) -> Result<Self, QuantError> {
        let config = Self {
            bit_width,
            level_bits,
            signed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the `0 < k <= b <= MAX_BIT_WIDTH` bounds and that the resulting
    /// level table stays representable.
    ///
    /// Deserialized configs bypass [`QuantizerConfig::new`], so table
    /// construction validates again.
    pub fn validate(&self) -> Result<(), QuantError> {
        let (b, k) = (self.bit_width, self.level_bits);
        if b == 0 {
            return Err(QuantError::InvalidConfig("bit_width must be positive".into()));
        }
        if k == 0 {
            return Err(QuantError::InvalidConfig("level_bits must be positive".into()));
        }
        if k > b {
            return Err(QuantError::InvalidConfig(format!(
                "level_bits {} exceeds bit_width {}",
                k, b
            )));
        }
        if b > MAX_BIT_WIDTH {
            return Err(QuantError::InvalidConfig(format!(
                "bit_width {} exceeds maximum {}",
                b, MAX_BIT_WIDTH
            )));
        }

        let combinations = self
            .group_widths()
            .iter()
            .try_fold(1usize, |acc, &w| acc.checked_mul(self.options_per_group(w)));
        match combinations {
            Some(c) if c <= MAX_COMBINATIONS => {}
            _ => {
                return Err(QuantError::InvalidConfig(format!(
                    "(b={}, k={}, signed={}) produces more than {} level combinations",
                    b, k, self.signed, MAX_COMBINATIONS
                )))
            }
        }

        if self.max_term_exponent() > MAX_TERM_EXPONENT {
            return Err(QuantError::InvalidConfig(format!(
                "smallest term 2^-{} underflows f64",
                self.max_term_exponent()
            )));
        }
        Ok(())
    }

    /// Number of additive terms, `ceil(b / k)`
    pub fn num_terms(&self) -> usize {
        self.bit_width.div_ceil(self.level_bits) as usize
    }

    /// Bit width of each group; all `k` except a possibly narrower last group
    pub fn group_widths(&self) -> Vec<u32> {
        let (b, k) = (self.bit_width, self.level_bits);
        (0..self.num_terms() as u32)
            .map(|g| k.min(b - g * k))
            .collect()
    }

    /// Number of values a group of width `w` can contribute, zero included
    pub(crate) fn options_per_group(&self, width: u32) -> usize {
        let unsigned = 1usize << width;
        if self.signed {
            2 * unsigned - 1
        } else {
            unsigned
        }
    }

    /// Largest `e` among the terms `2^-e`
    fn max_term_exponent(&self) -> u64 {
        let n = self.num_terms() as u64;
        self.group_widths()
            .iter()
            .enumerate()
            .map(|(g, &w)| g as u64 + ((1u64 << w) - 2) * n)
            .max()
            .unwrap_or(0)
    }
}

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::{QuantError, QuantizerConfig};

/// Sorted APoT quantization levels and their canonical codes.
///
/// # Construction
/// With `n = ceil(b / k)` groups, group `g` of width `w` offers the terms
/// `{0} ∪ { 2^-(g + j·n) : j = 0 .. 2^w - 2 }` (each magnitude with both signs
/// when signed). Every level is one term per group, summed, then divided by
/// the sum of the per-group maxima so the largest level is exactly `1.0`.
///
/// The code of a combination is the mixed-radix number of its per-group
/// option indices, group 0 most significant. Unsigned options are listed as
/// `0` followed by decreasing magnitudes, so the code is the group bit fields
/// concatenated in group order. Signed options are listed ascending.
///
/// Levels are sorted ascending and deduplicated; a repeated level keeps its
/// smallest code.
///
/// # Example
/// ```
/// use apot_core::{LevelTable, QuantizerConfig};
///
/// let table = LevelTable::build(&QuantizerConfig::new(4, 1, false).unwrap()).unwrap();
/// assert_eq!(table.len(), 16);
/// assert_eq!(table.max_level(), 1.0);
/// // k = 1 degenerates to the uniform grid m / 15 with code m
/// assert_eq!(table.levels()[5], 5.0 / 15.0);
/// assert_eq!(table.codes()[5], 5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    config: QuantizerConfig,
    levels: Vec<f64>,
    codes: Vec<u32>,
}

impl LevelTable {
    pub fn build(config: &QuantizerConfig) -> Result<Self, QuantError> {
        config.validate()?;

        let n = config.num_terms();
        let groups: Vec<Vec<f64>> = config
            .group_widths()
            .into_iter()
            .enumerate()
            .map(|(g, w)| group_terms(g, w, n, config.signed))
            .collect();

        // Sum of the largest term per group maps to 1.0
        let p_sum: f64 = groups
            .iter()
            .map(|terms| terms.iter().copied().fold(0.0f64, f64::max))
            .sum();

        let total: usize = groups.iter().map(Vec::len).product();
        let mut digits = vec![0usize; groups.len()];
        let mut entries: Vec<(f64, u32)> = Vec::with_capacity(total);

        for code in 0..total {
            let mut rem = code;
            for (digit, terms) in digits.iter_mut().zip(groups.iter()).rev() {
                *digit = rem % terms.len();
                rem /= terms.len();
            }
            let sum: f64 = digits
                .iter()
                .zip(groups.iter())
                .map(|(&d, terms)| terms[d])
                .sum();
            entries.push((sum / p_sum, code as u32));
        }

        entries.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        entries.dedup_by(|next, kept| next.0 == kept.0);

        let collapsed = total - entries.len();
        if collapsed > 0 && !config.signed {
            // Unsigned sums spanning more than 53 bits round together
            warn!(
                bit_width = config.bit_width,
                level_bits = config.level_bits,
                collapsed,
                "APoT levels merged by f64 rounding"
            );
        }

        let (levels, codes): (Vec<f64>, Vec<u32>) = entries.into_iter().unzip();
        debug!(
            bit_width = config.bit_width,
            level_bits = config.level_bits,
            signed = config.signed,
            levels = levels.len(),
            combinations = total,
            "Built APoT level table"
        );

        Ok(Self {
            config: *config,
            levels,
            codes,
        })
    }

    pub fn config(&self) -> &QuantizerConfig {
        &self.config
    }

    /// Quantization levels, strictly increasing
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// `codes()[i]` is the canonical code of `levels()[i]`
    pub fn codes(&self) -> &[u32] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn min_level(&self) -> f64 {
        self.levels.first().copied().unwrap_or(0.0)
    }

    pub fn max_level(&self) -> f64 {
        self.levels.last().copied().unwrap_or(0.0)
    }

    /// Position of an exact level value
    pub fn position_of_level(&self, level: f64) -> Option<usize> {
        self.levels
            .binary_search_by(|probe| probe.partial_cmp(&level).unwrap_or(Ordering::Less))
            .ok()
    }

    /// Position of a canonical code
    pub fn position_of_code(&self, code: u32) -> Option<usize> {
        self.codes.iter().position(|&c| c == code)
    }

    /// Position of the level nearest `x`.
    ///
    /// Ties go to the lower position. Values beyond either end clamp to the
    /// boundary level. `NaN` maps to the level nearest `0.0`.
    pub fn nearest(&self, x: f64) -> usize {
        if x.is_nan() {
            return self.nearest(0.0);
        }
        // levels[idx - 1] < x <= levels[idx]
        let idx = self.levels.partition_point(|&l| l < x);
        if idx == 0 {
            return 0;
        }
        if idx == self.levels.len() {
            return idx - 1;
        }
        let below = x - self.levels[idx - 1];
        let above = self.levels[idx] - x;
        match below.partial_cmp(&above) {
            Some(Ordering::Greater) => idx,
            _ => idx - 1,
        }
    }
}

/// Options of group `g` (width `w`) in code order
fn group_terms(g: usize, w: u32, n: usize, signed: bool) -> Vec<f64> {
    let magnitudes = (0..(1usize << w) - 1).map(|j| 2f64.powi(-((g + j * n) as i32)));
    let mut terms = vec![0.0f64];
    if signed {
        for m in magnitudes {
            terms.push(m);
            terms.push(-m);
        }
        terms.sort_by(f64::total_cmp);
    } else {
        terms.extend(magnitudes);
    }
    terms
}

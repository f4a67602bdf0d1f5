use std::{fmt::Display, ops::Deref};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Percentage(f64);

/// One decimal, ties rounded away from zero (12.25 shows as 12.3%). Honours width and alignment.
impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&format!("{:.1}%", (self.0 * 10.).round() / 10.))
    }
}

impl Percentage {
    pub fn new_opt(value: f64) -> Option<Percentage> {
        if value < 0. || value.is_nan() {
            None
        } else {
            Some(Percentage(value))
        }
    }

    /// Amount of glyphs out of `blocks` this percentage should fill. Never exceeds `blocks`.
    pub fn filled_blocks(&self, blocks: usize) -> usize {
        ((self.0 / 100. * blocks as f64).round() as usize).min(blocks)
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Share of `value` in `whole`. An empty whole gives 0% rather than NaN.
pub fn seconds_percentage(value: u64, whole: u64) -> Percentage {
    if whole == 0 {
        return Percentage::default();
    }
    Percentage::new_opt(value as f64 / whole as f64 * 100.).unwrap_or_default()
}

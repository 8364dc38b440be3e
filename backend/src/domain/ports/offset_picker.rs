//! Port supplying random offsets to the random joke selector.

use rand::Rng;

/// Source of uniformly distributed offsets.
#[cfg_attr(test, mockall::automock)]
pub trait OffsetPicker: Send + Sync {
    /// Draw an offset in `[0, upper)`. Callers guarantee `upper > 0`.
    fn pick(&self, upper: u64) -> u64;
}

/// Thread-local RNG backed picker used outside tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformOffsetPicker;

impl OffsetPicker for UniformOffsetPicker {
    fn pick(&self, upper: u64) -> u64 {
        rand::thread_rng().gen_range(0..upper)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(97)]
    fn offsets_stay_in_range(#[case] upper: u64) {
        let picker = UniformOffsetPicker;
        for _ in 0..500 {
            assert!(picker.pick(upper) < upper);
        }
    }
}

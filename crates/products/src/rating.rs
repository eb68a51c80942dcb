//! Running-average rating value object.

use catalog_core::{DomainError, DomainResult, ValueObject};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 5.0;

/// Average of all observed ratings plus how many were observed.
///
/// Individual observations are not kept; each new one is folded into the average.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rating {
    value: f64,
    count: u32,
}

impl ValueObject for Rating {}

impl Rating {
    /// No ratings yet: `(0.0, 0)`.
    pub fn empty() -> Self {
        Self {
            value: 0.0,
            count: 0,
        }
    }

    pub fn of(value: f64, count: i64) -> DomainResult<Self> {
        ensure_in_range(value)?;
        if count < 0 {
            return Err(DomainError::invalid_argument("Rating count cannot be negative"));
        }
        let count = u32::try_from(count).map_err(|_| {
            DomainError::invalid_argument(format!("Rating count {count} exceeds {}", u32::MAX))
        })?;
        Ok(Self { value, count })
    }

    /// Folds one more observation into the running average.
    pub fn add_rating(&self, rating: f64) -> DomainResult<Self> {
        ensure_in_range(rating)?;

        if self.count == 0 {
            return Ok(Self {
                value: rating,
                count: 1,
            });
        }

        let count = self.count.checked_add(1).ok_or_else(|| {
            DomainError::invalid_argument("Rating count overflow")
        })?;
        let total = self.value * f64::from(self.count) + rating;
        // Clamp guards against the last ulp of float drift escaping the bounds.
        let value = (total / f64::from(count)).clamp(MIN_RATING, MAX_RATING);

        Ok(Self { value, count })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::empty()
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2} ({} ratings)", self.value, self.count)
    }
}

fn ensure_in_range(value: f64) -> DomainResult<()> {
    // NaN fails `contains`, so it is rejected here too.
    if !(MIN_RATING..=MAX_RATING).contains(&value) {
        return Err(DomainError::invalid_argument(format!(
            "Rating must be between {MIN_RATING:.1} and {MAX_RATING:.1} (got {value})"
        )));
    }
    Ok(())
}

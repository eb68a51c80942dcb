//! On-hand quantity value object.

use catalog_core::{DomainError, DomainResult, ValueObject};

/// Units on hand plus an availability flag.
///
/// `quantity` can never go negative. The flag is tracked separately, but a stock
/// only counts as available when it is flagged *and* has at least one unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Stock {
    quantity: u32,
    available: bool,
}

impl ValueObject for Stock {}

impl Stock {
    fn new(quantity: u32, available: bool) -> Self {
        Self {
            quantity,
            available,
        }
    }

    /// Stock holding `quantity` units, available iff `quantity > 0`.
    pub fn of(quantity: i64) -> DomainResult<Self> {
        let quantity = to_units(quantity, "Stock quantity cannot be negative")?;
        Ok(Self::new(quantity, quantity > 0))
    }

    pub fn empty() -> Self {
        Self::new(0, false)
    }

    /// Returns a new stock with `amount` more units.
    pub fn add(&self, amount: i64) -> DomainResult<Self> {
        let amount = to_units(amount, "Cannot add negative amount to stock")?;
        let quantity = self.quantity.checked_add(amount).ok_or_else(|| {
            DomainError::invalid_argument(format!(
                "Stock quantity overflow ({} + {amount})",
                self.quantity
            ))
        })?;
        Ok(Self::new(quantity, quantity > 0))
    }

    /// Returns a new stock with `amount` fewer units.
    ///
    /// Fails with `InsufficientStock` when more units are requested than are on hand.
    pub fn reduce(&self, amount: i64) -> DomainResult<Self> {
        if amount < 0 {
            return Err(DomainError::invalid_argument(
                "Cannot reduce negative amount from stock",
            ));
        }
        if amount > i64::from(self.quantity) {
            return Err(DomainError::insufficient_stock(
                amount.unsigned_abs(),
                u64::from(self.quantity),
            ));
        }
        // amount is in 0..=quantity here, so it fits in u32.
        let quantity = self.quantity - amount as u32;
        Ok(Self::new(quantity, quantity > 0))
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Raw availability flag, regardless of quantity.
    pub fn available_flag(&self) -> bool {
        self.available
    }

    pub fn has_stock(&self) -> bool {
        self.quantity > 0
    }

    pub fn is_available(&self) -> bool {
        self.available && self.quantity > 0
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self::empty()
    }
}

fn to_units(amount: i64, negative_msg: &str) -> DomainResult<u32> {
    if amount < 0 {
        return Err(DomainError::invalid_argument(negative_msg));
    }
    u32::try_from(amount).map_err(|_| {
        DomainError::invalid_argument(format!("Stock amount {amount} exceeds {}", u32::MAX))
    })
}

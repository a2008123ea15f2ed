/// Bounded counter for health and energy.
///
/// `current` never exceeds `maximum` and never underflows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a meter at full capacity.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    #[inline]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`, floored at zero. Returns the amount removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds up to `amount`, capped at the maximum. Returns the amount added.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let added = amount.min(self.maximum - self.current);
        self.current += added;
        added
    }

    /// Sets the current value, clamped to the maximum.
    pub fn set_current(&mut self, value: u32) {
        self.current = value.min(self.maximum);
    }

    /// Integer percentage of the maximum (0 for an empty meter).
    pub fn percent(&self) -> u32 {
        if self.maximum == 0 {
            return 0;
        }
        (u64::from(self.current) * 100 / u64::from(self.maximum)) as u32
    }
}

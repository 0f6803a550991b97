//! Loop state carried between simulated days

/// Running accumulators owned by one simulation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    /// Cash on hand; negative means money paid out of pocket
    pub cash: f64,

    /// Principal repaid since the last reinvestment, i.e. HELOC room not yet drawn
    pub new_room: f64,

    /// Set in January/February, consumed by the first March day
    pub tax_refund_pending: bool,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Positive cash available for prepayment
    pub fn surplus_cash(&self) -> f64 {
        self.cash.max(0.0)
    }

    /// Record `amount` of principal repaid as room to draw
    pub fn add_room(&mut self, amount: f64) {
        self.new_room += amount;
    }

    /// Hand over all accumulated room, leaving zero
    pub fn take_room(&mut self) -> f64 {
        std::mem::take(&mut self.new_room)
    }
}

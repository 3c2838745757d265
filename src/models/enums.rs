//! Derived display classifications

// ---------------------------------------------------------------------------
// AvailabilityBand
// ---------------------------------------------------------------------------

/// Copy availability of a book, derived from its copy counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityBand {
    /// No copies left on the shelf
    Unavailable,
    /// Fewer than half of the copies remain
    Limited,
    Available,
}

impl AvailabilityBand {
    pub fn classify(available: u32, total: u32) -> Self {
        if available == 0 {
            AvailabilityBand::Unavailable
        } else if available < total / 2 {
            AvailabilityBand::Limited
        } else {
            AvailabilityBand::Available
        }
    }
}

impl std::fmt::Display for AvailabilityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AvailabilityBand::Unavailable => "Currently Unavailable",
            AvailabilityBand::Limited => "Limited Copies",
            AvailabilityBand::Available => "Available",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// BorrowerStanding
// ---------------------------------------------------------------------------

/// Borrowing capacity of a member, derived from the active loan count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowerStanding {
    /// At the loan limit
    Blocked,
    /// Exactly one slot left
    LowCapacity(u32),
    Normal(u32),
}

impl BorrowerStanding {
    pub fn classify(borrowed: u32, max: u32) -> Self {
        let remaining = max.saturating_sub(borrowed);
        match remaining {
            0 => BorrowerStanding::Blocked,
            1 => BorrowerStanding::LowCapacity(1),
            n => BorrowerStanding::Normal(n),
        }
    }

    pub fn remaining(&self) -> u32 {
        match self {
            BorrowerStanding::Blocked => 0,
            BorrowerStanding::LowCapacity(n) | BorrowerStanding::Normal(n) => *n,
        }
    }
}

//! Named quality tiers of the default five-level model.

/// The five quality tiers of the base game, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum QualityTier {
    /// Tier 0.
    Normal = 0,
    /// Tier 1.
    Uncommon = 1,
    /// Tier 2.
    Rare = 2,
    /// Tier 3.
    Epic = 3,
    /// Tier 4, the top tier.
    Legendary = 4,
}

impl QualityTier {
    /// All five tiers in index order.
    pub const ALL: [QualityTier; 5] = [
        Self::Normal,
        Self::Uncommon,
        Self::Rare,
        Self::Epic,
        Self::Legendary,
    ];

    /// Returns the zero-based level index of this tier (matches the `#[repr(u8)]` discriminant).
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the tier at a level index, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Lower-case display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Label for an arbitrary level index: the tier name when the index is a
    /// known tier, `"level {index}"` otherwise.
    pub fn label_for(index: usize) -> String {
        match Self::from_index(index) {
            Some(tier) => tier.name().to_string(),
            None => format!("level {index}"),
        }
    }
}

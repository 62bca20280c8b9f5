//! End-of-run rank tiers and the best-run record

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Rank tier earned by a final score
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Rank {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Champion,
}

impl Rank {
    pub const ALL: [Rank; 6] = [
        Rank::Bronze,
        Rank::Silver,
        Rank::Gold,
        Rank::Platinum,
        Rank::Diamond,
        Rank::Champion,
    ];

    pub fn for_score(score: u64) -> Self {
        match score {
            0..500 => Rank::Bronze,
            500..750 => Rank::Silver,
            750..1000 => Rank::Gold,
            1000..1300 => Rank::Platinum,
            1300..1600 => Rank::Diamond,
            _ => Rank::Champion,
        }
    }

    /// Lowest score that earns this tier
    pub fn min_score(&self) -> u64 {
        match self {
            Rank::Bronze => 0,
            Rank::Silver => 500,
            Rank::Gold => 750,
            Rank::Platinum => 1000,
            Rank::Diamond => 1300,
            Rank::Champion => 1600,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Bronze => "Bronze",
            Rank::Silver => "Silver",
            Rank::Gold => "Gold",
            Rank::Platinum => "Platinum",
            Rank::Diamond => "Diamond",
            Rank::Champion => "Champion",
        }
    }
}

/// Best score and its rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestRecord {
    pub best_score: u64,
    pub best_rank: Rank,
}

impl BestRecord {
    /// Record a finished run. Returns `true` on a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score <= self.best_score {
            return false;
        }
        self.best_score = score;
        self.best_rank = Rank::for_score(score);
        log::info!("New best: {} ({})", score, self.best_rank.name());
        true
    }

    pub fn load(path: &Path) -> Result<Self, PersistError> {
        persistence::load_or_default(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save(path, self)
    }
}

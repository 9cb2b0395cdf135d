//! Category configuration.

use serde::{Deserialize, Serialize};

/// How a category's structure is built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryMode {
    /// Single-elimination bracket only.
    #[default]
    Knockout,
    /// Round-robin pools only.
    Pool,
    /// Pool winners feed into a KO bracket.
    Combined,
}

/// Per-category structure configuration, as stored by the surrounding system.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub mode: CategoryMode,
    /// Bracket depth. KO mode grows this to fit the participant count.
    pub rounds: usize,
    /// Pool finishers advancing to the bracket in combined mode (1 or 2).
    pub pool_winners: usize,
    /// Area chunks per area when splitting the bracket across areas.
    pub cluster_factor: usize,
    /// Upper bound on the derived pool count in combined mode.
    pub max_pools: Option<usize>,
    /// Target pool size in pure pool mode.
    pub pool_size: usize,
}

impl CategoryConfig {
    pub fn knockout(rounds: usize) -> Self {
        Self {
            mode: CategoryMode::Knockout,
            rounds,
            pool_winners: 1,
            cluster_factor: 1,
            max_pools: None,
            pool_size: 5,
        }
    }

    pub fn pools(pool_size: usize) -> Self {
        Self {
            mode: CategoryMode::Pool,
            pool_size,
            ..Self::knockout(1)
        }
    }

    pub fn combined(rounds: usize, pool_winners: usize) -> Self {
        Self {
            mode: CategoryMode::Combined,
            pool_winners,
            ..Self::knockout(rounds)
        }
    }
}

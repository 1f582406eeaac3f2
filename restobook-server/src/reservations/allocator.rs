//! Table allocation
//!
//! [`unused_tables`] computes which of the `1..=TOTAL_TABLES` tables are still
//! free on a date; a [`TableSelector`] picks one of them. Which free table is
//! chosen does not matter for correctness, only that it is free, so the policy
//! is pluggable: [`RandomSelector`] in production, [`FirstFitSelector`] where
//! reproducible outcomes are wanted.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use shared::models::{Reservation, TOTAL_TABLES, TableNumber};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Every table on the date is already bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No table available on {date}")]
pub struct NoTableAvailable {
    pub date: NaiveDate,
}

/// Tables not bound to any reservation on `date`
pub fn unused_tables(reservations: &[Reservation], date: NaiveDate) -> BTreeSet<TableNumber> {
    let mut free: BTreeSet<TableNumber> = (1..=TOTAL_TABLES).collect();
    for table in reservations
        .iter()
        .filter(|r| r.date == date)
        .filter_map(Reservation::table_number)
    {
        free.remove(&table);
    }
    free
}

/// Choose a free table on `date`
///
/// Does not bind the table; the caller writes the result into the reservation.
pub fn allocate(
    reservations: &[Reservation],
    date: NaiveDate,
    selector: &mut dyn TableSelector,
) -> Result<TableNumber, NoTableAvailable> {
    let free = unused_tables(reservations, date);
    selector.select(&free).ok_or(NoTableAvailable { date })
}

/// Pick a table out of a set of free tables
pub trait TableSelector: Send {
    /// Returns `None` only when `free` is empty.
    fn select(&mut self, free: &BTreeSet<TableNumber>) -> Option<TableNumber>;
}

/// Uniformly random choice
#[derive(Debug)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of choices
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl TableSelector for RandomSelector {
    fn select(&mut self, free: &BTreeSet<TableNumber>) -> Option<TableNumber> {
        free.iter().copied().choose(&mut self.rng)
    }
}

/// Lowest free table number
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFitSelector;

impl TableSelector for FirstFitSelector {
    fn select(&mut self, free: &BTreeSet<TableNumber>) -> Option<TableNumber> {
        free.first().copied()
    }
}

/// Configured selection policy (`TABLE_SELECTION`)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableSelection {
    #[default]
    Random,
    FirstFit,
}

impl TableSelection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::FirstFit => "first_fit",
        }
    }

    pub fn selector(&self) -> Box<dyn TableSelector> {
        match self {
            Self::Random => Box::new(RandomSelector::new()),
            Self::FirstFit => Box::new(FirstFitSelector),
        }
    }
}

impl FromStr for TableSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "first_fit" | "first-fit" | "firstfit" => Ok(Self::FirstFit),
            other => Err(format!("unknown table selection policy: {other}")),
        }
    }
}

impl std::fmt::Display for TableSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

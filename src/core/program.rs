use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of an admission program (a major or admission track).
///
/// Programs are always iterated in ascending id order. That order is the
/// deterministic flatten order the budget allocator relies on to break
/// exact ties across programs.
///
/// # Examples
///
/// ```
/// use admission_engine::core::program::ProgramId;
///
/// let a = ProgramId::new(2);
/// let b = ProgramId::new(45);
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(u32);

impl ProgramId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ProgramId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// Seat count per program.
///
/// A program without an entry has zero seats. Callers must list every
/// program they want to admit anybody.
///
/// # Examples
///
/// ```
/// use admission_engine::core::program::{ProgramCapacity, ProgramId};
///
/// let mut seats = ProgramCapacity::new();
/// seats.set(ProgramId::new(1), 25);
/// assert_eq!(seats.get(ProgramId::new(1)), 25);
/// assert_eq!(seats.get(ProgramId::new(2)), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramCapacity {
    seats: BTreeMap<ProgramId, u32>,
}

impl ProgramCapacity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seat count of a program, replacing any previous value.
    pub fn set(&mut self, program: ProgramId, seats: u32) {
        self.seats.insert(program, seats);
    }

    /// Seats available in `program`; zero when the program is not listed.
    pub fn get(&self, program: ProgramId) -> u32 {
        self.seats.get(&program).copied().unwrap_or(0)
    }

    pub fn contains(&self, program: ProgramId) -> bool {
        self.seats.contains_key(&program)
    }

    /// Total seats across all listed programs.
    pub fn total(&self) -> u64 {
        self.seats.values().map(|&s| u64::from(s)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProgramId, u32)> + '_ {
        self.seats.iter().map(|(&p, &s)| (p, s))
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl FromIterator<(ProgramId, u32)> for ProgramCapacity {
    fn from_iter<T: IntoIterator<Item = (ProgramId, u32)>>(iter: T) -> Self {
        Self {
            seats: iter.into_iter().collect(),
        }
    }
}

/// Human-facing metadata the ranking publisher reports for a program.
///
/// Only used for rendering reports; the allocators never look at it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramInfo {
    /// Display name of the program.
    pub name: Option<String>,
    /// Publisher's free-text timestamp of the last ranking update.
    pub updated_at: Option<String>,
}

impl ProgramInfo {
    pub fn display_name(&self, program: ProgramId) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Program {}", program))
    }

    pub fn display_updated_at(&self) -> &str {
        self.updated_at.as_deref().unwrap_or("unknown")
    }
}

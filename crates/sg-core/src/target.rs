//! Destination descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Cell;

/// Where a movement request or job is headed.
///
/// `Target::None` is the "invalid" destination: portals created without a
/// journey to resume carry it, and nothing is resumed after their teleport.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Target {
    #[default]
    None,
    Cell(Cell),
}

impl Target {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Target::Cell(c) if c.is_valid())
    }

    /// The destination cell, if any.
    #[inline]
    pub fn cell(self) -> Option<Cell> {
        match self {
            Target::Cell(c) if c.is_valid() => Some(c),
            _ => None,
        }
    }
}

impl From<Cell> for Target {
    fn from(cell: Cell) -> Self {
        Target::Cell(cell)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::None => f.write_str("none"),
            Target::Cell(c) => write!(f, "{c}"),
        }
    }
}

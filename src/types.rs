//! Core types for the roster.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a player within the roster.
///
/// Persisted as a plain integer: a non-negative slot number, or `-1` for
/// [`RowIndex::Append`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowIndex {
    /// A concrete slot in the roster.
    At(usize),
    /// Sentinel asking `set` to add a new slot at the end.
    Append,
}

impl RowIndex {
    /// Slot number, if this is not the append sentinel.
    pub fn slot(self) -> Option<usize> {
        match self {
            RowIndex::At(row) => Some(row),
            RowIndex::Append => None,
        }
    }
}

impl fmt::Debug for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIndex::At(row) => write!(f, "Row({})", row),
            RowIndex::Append => write!(f, "Row(append)"),
        }
    }
}

impl From<usize> for RowIndex {
    fn from(row: usize) -> Self {
        RowIndex::At(row)
    }
}

impl Serialize for RowIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            RowIndex::At(row) => serializer.serialize_u64(*row as u64),
            RowIndex::Append => serializer.serialize_i64(-1),
        }
    }
}

impl<'de> Deserialize<'de> for RowIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        match raw {
            -1 => Ok(RowIndex::Append),
            n if n >= 0 => Ok(RowIndex::At(n as usize)),
            n => Err(de::Error::custom(format!("invalid row index {}", n))),
        }
    }
}

/// One roster slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Display name; empty means the slot is unoccupied.
    pub name: String,
    pub row_index: RowIndex,
    /// Whether the player is included in roster output.
    pub checked: bool,
    /// Keyboard shortcut label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
}

impl Player {
    /// An unoccupied, unchecked slot at `row`.
    pub fn blank(row: usize) -> Self {
        Self {
            name: String::new(),
            row_index: RowIndex::At(row),
            checked: false,
            hotkey: None,
        }
    }

    /// A named player at `row`, unchecked and without a hotkey.
    pub fn new(name: impl Into<String>, row: usize) -> Self {
        Self {
            name: name.into(),
            row_index: RowIndex::At(row),
            checked: false,
            hotkey: None,
        }
    }

    /// A player to be appended after the last slot by `set`.
    pub fn appended(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            row_index: RowIndex::Append,
            checked: false,
            hotkey: None,
        }
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_hotkey(mut self, hotkey: impl Into<String>) -> Self {
        self.hotkey = Some(hotkey.into());
        self
    }

    /// Whether the slot holds a name.
    pub fn is_occupied(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A named roster namespace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Unique name, also the storage key prefix of its roster.
    pub name: String,
    pub active: bool,
}

impl Profile {
    pub fn new(name: impl Into<String>, active: bool) -> Self {
        Self {
            name: name.into(),
            active,
        }
    }

    /// A profile record marked active.
    pub fn active(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// A copy of this profile with the active flag cleared.
    pub fn deactivated(&self) -> Self {
        Self::new(self.name.clone(), false)
    }
}

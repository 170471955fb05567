//! Roster of players for the active profile.

pub mod export;
mod manager;

pub use export::{all_named_checked, export_text};
pub use manager::{blank_roster, player_list_key, PlayerListStore, PLAYER_LIST_SUFFIX};

//! # Player Roster
//!
//! Persisted roster bookkeeping for a tabletop session: a fixed-size list of
//! named players, each checked or unchecked and optionally bound to a
//! hotkey, grouped under switchable named profiles.
//!
//! ## Core Concepts
//!
//! - **Profiles**: Named namespaces; exactly one is active at a time
//! - **Roster**: The player slots of the active profile, stored under
//!   `<profile>_playerList`
//! - **Subscribers**: Named callbacks fired on roster changes, either on
//!   every plain change or on one category such as `"profile"`
//! - **Storage**: Any string key-value medium implementing [`KeyValueStore`]
//!
//! ## Example
//!
//! ```ignore
//! use player_roster::{Player, Roster, RosterConfig, Subscriber};
//!
//! let roster = Roster::in_memory(RosterConfig::default())?;
//!
//! roster.players().subscribe(Subscriber::new("copy", || println!("changed")));
//! roster.players().set(Player::new("Ana", 0).with_checked(true))?;
//!
//! // Switch to a fresh profile with its own blank roster
//! roster.create_profile(Some("raiders"))?;
//! ```

pub mod codec;
pub mod error;
pub mod players;
pub mod profiles;
pub mod roster;
pub mod storage;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{Result, RosterError};
pub use players::{
    all_named_checked, blank_roster, export_text, player_list_key, PlayerListStore,
    PLAYER_LIST_SUFFIX,
};
pub use profiles::{ProfileStore, ACTIVE_PROFILE_KEY, PROFILES_KEY};
pub use roster::{CorruptDataPolicy, Roster, RosterConfig};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use subscriptions::{
    Listener, Notification, Subscriber, SubscriberFilter, SubscriberRegistry, PROFILE_CATEGORY,
};
pub use types::*;

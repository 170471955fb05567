//! Player list store implementation.

use crate::codec::{decode_player_list, decode_profile, encode_player_list};
use crate::error::{Result, RosterError};
use crate::profiles::ACTIVE_PROFILE_KEY;
use crate::roster::{CorruptDataPolicy, RosterConfig};
use crate::storage::KeyValueStore;
use crate::subscriptions::{Notification, Subscriber, SubscriberRegistry, PROFILE_CATEGORY};
use crate::types::{Player, RowIndex};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// Suffix of the per-profile roster storage key.
pub const PLAYER_LIST_SUFFIX: &str = "playerList";

/// Storage key of the roster belonging to `profile`.
pub fn player_list_key(profile: &str) -> String {
    format!("{}_{}", profile, PLAYER_LIST_SUFFIX)
}

/// `size` unoccupied, unchecked slots numbered by position.
pub fn blank_roster(size: usize) -> Vec<Player> {
    (0..size).map(Player::blank).collect()
}

#[derive(Debug)]
struct RosterState {
    /// Roster of the current profile.
    players: Vec<Player>,

    /// Profile whose roster is loaded.
    profile: String,
}

/// Owns the roster of the current profile and its subscribers.
///
/// Data changes are persisted under `<profile>_playerList` and then
/// broadcast to subscribers. Listeners run after the state lock is
/// released, so they can read the roster they were notified about.
pub struct PlayerListStore<S> {
    storage: S,

    /// Number of slots in a fresh roster.
    max_players: usize,

    on_corrupt_data: CorruptDataPolicy,

    state: RwLock<RosterState>,

    subscribers: SubscriberRegistry,
}

impl<S: KeyValueStore> PlayerListStore<S> {
    /// Load the roster of the persisted active profile.
    ///
    /// Falls back to `config.default_profile` when no active profile record
    /// exists, and writes a blank roster when the profile has none stored.
    pub fn open(storage: S, config: &RosterConfig) -> Result<Self> {
        let profile = match storage.get(ACTIVE_PROFILE_KEY)? {
            Some(raw) => match decode_profile(&raw) {
                Ok(active) => active.name,
                Err(e) if config.on_corrupt_data == CorruptDataPolicy::Reset => {
                    warn!(key = ACTIVE_PROFILE_KEY, error = %e, "ignoring malformed active profile");
                    config.default_profile.clone()
                }
                Err(e) => return Err(e),
            },
            None => config.default_profile.clone(),
        };

        let store = Self {
            storage,
            max_players: config.max_players,
            on_corrupt_data: config.on_corrupt_data,
            state: RwLock::new(RosterState {
                players: Vec::new(),
                profile,
            }),
            subscribers: SubscriberRegistry::new(),
        };

        {
            let mut state = store.state.write();
            state.players = store.load(&state.profile)?;
        }

        Ok(store)
    }

    /// Replace the roster with blank slots and tear down all subscriptions.
    ///
    /// Unfiltered subscribers are notified before the subscriber list is
    /// cleared; callers must subscribe again afterwards.
    pub fn reset_state(&self) -> Result<()> {
        {
            let mut state = self.state.write();
            state.players = blank_roster(self.max_players);
            self.persist(&state)?;
        }

        self.subscribers.notify(&Notification::Change);
        self.subscribers.clear();
        debug!("roster reset, subscribers cleared");
        Ok(())
    }

    /// Overlay `players` onto the leading slots by position.
    ///
    /// At most `max_players` entries are taken; slots past the end of
    /// `players` keep their current value.
    pub fn set_player_list(&self, players: Vec<Player>) -> Result<()> {
        {
            let mut state = self.state.write();
            for (position, player) in players.into_iter().take(self.max_players).enumerate() {
                match state.players.get_mut(position) {
                    Some(slot) => *slot = player,
                    None => state.players.push(player),
                }
            }
            self.persist(&state)?;
        }

        self.subscribers.notify(&Notification::Change);
        Ok(())
    }

    /// Write one player.
    ///
    /// [`RowIndex::Append`] adds a new slot after the last one, even past
    /// `max_players`; the stored record carries its actual position. Any
    /// other row overwrites the slot at that position.
    pub fn set(&self, mut player: Player) -> Result<()> {
        {
            let mut state = self.state.write();
            match player.row_index {
                RowIndex::Append => {
                    player.row_index = RowIndex::At(state.players.len());
                    state.players.push(player);
                }
                RowIndex::At(row) => {
                    let len = state.players.len();
                    let slot = state
                        .players
                        .get_mut(row)
                        .ok_or(RosterError::RowOutOfRange { row, len })?;
                    *slot = player;
                }
            }
            self.persist(&state)?;
        }

        self.subscribers.notify(&Notification::Change);
        Ok(())
    }

    /// First player whose name is exactly `name`.
    pub fn get(&self, name: &str) -> Option<Player> {
        self.state
            .read()
            .players
            .iter()
            .find(|player| player.name == name)
            .cloned()
    }

    /// Snapshot of the roster.
    pub fn player_list(&self) -> Vec<Player> {
        self.state.read().players.clone()
    }

    /// Run `f` against the roster without copying it.
    ///
    /// `f` must not call back into this store's mutating operations.
    pub fn with_players<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Player]) -> R,
    {
        f(&self.state.read().players)
    }

    /// Name of the profile whose roster is loaded.
    pub fn current_profile(&self) -> String {
        self.state.read().profile.clone()
    }

    /// Reload the roster of the current profile and fire `"profile"`
    /// subscribers only.
    pub fn swap_profile(&self) -> Result<()> {
        let profile = self.current_profile();
        self.load_profile(profile)
    }

    /// Switch to the roster of `profile`.
    ///
    /// On error the store keeps its previous profile and roster.
    pub fn update_profile(&self, profile: impl Into<String>) -> Result<()> {
        let profile = profile.into();
        info!(profile = %profile, "switching roster profile");
        self.load_profile(profile)
    }

    fn load_profile(&self, profile: String) -> Result<()> {
        {
            let mut state = self.state.write();
            let players = self.load(&profile)?;
            debug!(profile = %profile, players = players.len(), "swapped roster");
            state.profile = profile;
            state.players = players;
        }

        self.subscribers.notify(&Notification::Category(PROFILE_CATEGORY));
        Ok(())
    }

    /// Set every player's checked flag to `check`, leaving unoccupied slots
    /// unchecked.
    pub fn toggle_all(&self, check: bool) -> Result<()> {
        let players = self.with_players(|players| {
            players
                .iter()
                .map(|player| {
                    let checked = check && !player.name.trim().is_empty();
                    player.clone().with_checked(checked)
                })
                .collect::<Vec<_>>()
        });
        self.set_player_list(players)
    }

    pub fn subscribe(&self, subscriber: Subscriber) {
        self.subscribers.subscribe(subscriber);
    }

    /// Remove every subscriber named `name`.
    pub fn unsubscribe(&self, name: &str) {
        self.subscribers.unsubscribe(name);
    }

    /// Registered subscriber names, in registration order.
    pub fn subscriber_names(&self) -> Vec<String> {
        self.subscribers.names()
    }

    /// Read the stored roster of `profile`, or write and return a blank one.
    fn load(&self, profile: &str) -> Result<Vec<Player>> {
        let key = player_list_key(profile);

        if let Some(raw) = self.storage.get(&key)? {
            match decode_player_list(&raw) {
                Ok(players) => return Ok(players),
                Err(e) if self.on_corrupt_data == CorruptDataPolicy::Reset => {
                    warn!(key = %key, error = %e, "discarding malformed roster");
                }
                Err(e) => return Err(e),
            }
        }

        let players = blank_roster(self.max_players);
        self.write_roster(&key, &players)?;
        Ok(players)
    }

    fn persist(&self, state: &RosterState) -> Result<()> {
        self.write_roster(&player_list_key(&state.profile), &state.players)
    }

    fn write_roster(&self, key: &str, players: &[Player]) -> Result<()> {
        let encoded = encode_player_list(players)?;
        debug!(key = %key, players = players.len(), "persisting roster");
        self.storage.write(key, &encoded)
    }
}

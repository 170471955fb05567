//! Roster composition root tying the stores together.

use crate::error::Result;
use crate::players::{export_text, PlayerListStore};
use crate::profiles::ProfileStore;
use crate::storage::{KeyValueStore, MemoryStore};
use crate::types::Profile;
use std::sync::Arc;
use tracing::{info, warn};

/// What to do when persisted data cannot be decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CorruptDataPolicy {
    /// Return the parse error to the caller.
    #[default]
    Fail,
    /// Log a warning and reinitialize the affected value with defaults.
    Reset,
}

/// Roster configuration.
#[derive(Clone, Debug)]
pub struct RosterConfig {
    /// Number of slots in a fresh roster.
    pub max_players: usize,

    /// Profile created on first run, and used when no active profile is
    /// stored.
    pub default_profile: String,

    /// Prefix marking unchecked players in exported text.
    pub ignore_prefix: String,

    /// Handling of malformed persisted data.
    pub on_corrupt_data: CorruptDataPolicy,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_players: 5,
            default_profile: "default".to_string(),
            ignore_prefix: "#".to_string(),
            on_corrupt_data: CorruptDataPolicy::Fail,
        }
    }
}

/// The profile store and player list store over one shared storage.
///
/// Owned by the application; consumers receive the store handles through
/// [`Roster::profiles`] and [`Roster::players`].
pub struct Roster<S> {
    config: RosterConfig,
    profiles: Arc<ProfileStore<S>>,
    players: Arc<PlayerListStore<S>>,
}

impl Roster<Arc<MemoryStore>> {
    /// A roster over fresh in-memory storage.
    pub fn in_memory(config: RosterConfig) -> Result<Self> {
        Self::open(Arc::new(MemoryStore::new()), config)
    }
}

impl<S: KeyValueStore + Clone> Roster<S> {
    /// Open both stores over `storage`.
    ///
    /// The profile store opens first so that a first run has written the
    /// active profile record before the player list store reads it.
    pub fn open(storage: S, config: RosterConfig) -> Result<Self> {
        let profiles = ProfileStore::open(storage.clone(), &config)?;
        let players = PlayerListStore::open(storage, &config)?;

        Ok(Self {
            config,
            profiles: Arc::new(profiles),
            players: Arc::new(players),
        })
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    pub fn profiles(&self) -> &Arc<ProfileStore<S>> {
        &self.profiles
    }

    pub fn players(&self) -> &Arc<PlayerListStore<S>> {
        &self.players
    }

    /// Make `name` the active profile and load its roster.
    ///
    /// Fires `"profile"` subscribers of the player list store. If the roster
    /// cannot be loaded, the previously active profile is restored.
    pub fn switch_profile(&self, name: &str) -> Result<()> {
        info!(profile = %name, "switching profile");
        let previous = self.profiles.active_profile();
        self.profiles.set_active_profile(Profile::active(name))?;

        if let Err(e) = self.players.update_profile(name) {
            warn!(profile = %name, error = %e, "roster load failed, restoring {}", previous.name);
            self.profiles.set_active_profile(previous)?;
            return Err(e);
        }
        Ok(())
    }

    /// Add a new active profile and switch to it.
    ///
    /// `None` means no name was supplied, and switches back to the default
    /// profile instead. Returns the name of the profile now active.
    pub fn create_profile(&self, name: Option<&str>) -> Result<String> {
        let name = match name {
            Some(name) => {
                self.profiles.update_profiles(Profile::active(name))?;
                name.to_string()
            }
            None => self.config.default_profile.clone(),
        };

        self.switch_profile(&name)?;
        Ok(name)
    }

    /// Current roster as text, with unchecked players marked by the
    /// configured prefix.
    pub fn export_text(&self) -> String {
        self.players
            .with_players(|players| export_text(players, &self.config.ignore_prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::blank_roster;
    use crate::profiles::{ACTIVE_PROFILE_KEY, PROFILES_KEY};
    use crate::storage::KeyValueStore;
    use crate::subscriptions::{Subscriber, PROFILE_CATEGORY};
    use crate::types::Player;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_first_run_layout() {
        let storage = Arc::new(MemoryStore::new());
        let roster = Roster::open(Arc::clone(&storage), RosterConfig::default()).unwrap();

        assert_eq!(
            storage.keys(),
            vec![
                ACTIVE_PROFILE_KEY.to_string(),
                "default_playerList".to_string(),
                PROFILES_KEY.to_string(),
            ]
        );
        assert_eq!(roster.players().current_profile(), "default");
    }

    #[test]
    fn test_switch_profile() {
        let roster = Roster::in_memory(RosterConfig::default()).unwrap();
        roster.players().set(Player::new("Ana", 0)).unwrap();
        roster
            .profiles()
            .update_profiles(Profile::new("alt", false))
            .unwrap();

        let swaps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&swaps);
        roster
            .players()
            .subscribe(Subscriber::watching("redraw", PROFILE_CATEGORY, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));

        roster.switch_profile("alt").unwrap();

        assert_eq!(roster.profiles().active_profile(), Profile::active("alt"));
        assert_eq!(
            roster.profiles().profiles(),
            vec![Profile::new("default", false), Profile::active("alt")]
        );
        assert_eq!(roster.players().current_profile(), "alt");
        assert_eq!(roster.players().player_list(), blank_roster(5));
        assert_eq!(swaps.load(Ordering::SeqCst), 1);

        roster.switch_profile("default").unwrap();
        assert_eq!(roster.players().get("Ana").map(|p| p.row_index.slot()), Some(Some(0)));
    }

    #[test]
    fn test_failed_switch_keeps_previous_profile() {
        let storage = Arc::new(MemoryStore::new());
        let roster = Roster::open(Arc::clone(&storage), RosterConfig::default()).unwrap();
        roster.players().set(Player::new("Ana", 0)).unwrap();
        roster
            .profiles()
            .update_profiles(Profile::new("alt", false))
            .unwrap();
        storage.write("alt_playerList", "garbage").unwrap();

        assert!(roster.switch_profile("alt").unwrap_err().is_parse());

        assert_eq!(roster.profiles().active_profile(), Profile::active("default"));
        assert_eq!(
            roster.profiles().profiles(),
            vec![Profile::active("default"), Profile::new("alt", false)]
        );
        assert_eq!(
            storage.get(ACTIVE_PROFILE_KEY).unwrap().as_deref(),
            Some(r#"{"name":"default","active":true}"#)
        );
        assert_eq!(roster.players().current_profile(), "default");

        roster.players().set(Player::new("Bo", 1)).unwrap();
        assert_eq!(
            storage.get("alt_playerList").unwrap().as_deref(),
            Some("garbage")
        );
    }

    #[test]
    fn test_create_profile() {
        let roster = Roster::in_memory(RosterConfig::default()).unwrap();

        let name = roster.create_profile(Some("raiders")).unwrap();

        assert_eq!(name, "raiders");
        assert_eq!(roster.profiles().active_profile(), Profile::active("raiders"));
        assert_eq!(
            roster.profiles().profiles(),
            vec![Profile::new("default", false), Profile::active("raiders")]
        );
        assert_eq!(roster.players().current_profile(), "raiders");
    }

    #[test]
    fn test_create_profile_without_name_returns_to_default() {
        let roster = Roster::in_memory(RosterConfig::default()).unwrap();
        roster.create_profile(Some("raiders")).unwrap();

        let name = roster.create_profile(None).unwrap();

        assert_eq!(name, "default");
        assert_eq!(roster.profiles().active_profile(), Profile::active("default"));
        assert_eq!(roster.profiles().profiles().len(), 2);
        assert_eq!(roster.players().current_profile(), "default");
    }

    #[test]
    fn test_export_text_uses_configured_prefix() {
        let config = RosterConfig {
            ignore_prefix: "!".to_string(),
            ..Default::default()
        };
        let roster = Roster::in_memory(config).unwrap();
        roster
            .players()
            .set(Player::new("Ana", 0).with_checked(true))
            .unwrap();
        roster.players().set(Player::new("Bo", 1)).unwrap();

        assert_eq!(roster.export_text(), "Ana\n!Bo");
    }
}

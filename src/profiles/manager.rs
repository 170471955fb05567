//! Profile store implementation.

use crate::codec::{decode_profile_list, encode_profile, encode_profile_list};
use crate::error::Result;
use crate::roster::{CorruptDataPolicy, RosterConfig};
use crate::storage::KeyValueStore;
use crate::types::Profile;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

/// Storage key of the encoded profile list.
pub const PROFILES_KEY: &str = "profiles";

/// Storage key of the encoded active profile record.
pub const ACTIVE_PROFILE_KEY: &str = "activeProfile";

#[derive(Clone, Debug)]
struct ProfileState {
    /// Currently active profile.
    active: Profile,

    /// All profiles, in creation order.
    profiles: Vec<Profile>,
}

/// Owns the list of profiles and which one is active.
///
/// Every mutation is written through to storage before returning.
pub struct ProfileStore<S> {
    storage: S,
    state: RwLock<ProfileState>,
}

impl<S: KeyValueStore> ProfileStore<S> {
    /// Load the profile list from `storage`, initializing it on first run.
    ///
    /// A persisted list with no active entry adopts its first entry as
    /// active. An empty list is treated like first run.
    pub fn open(storage: S, config: &RosterConfig) -> Result<Self> {
        let stored = match storage.get(PROFILES_KEY)? {
            Some(raw) => match decode_profile_list(&raw) {
                Ok(profiles) => Some(profiles),
                Err(e) if config.on_corrupt_data == CorruptDataPolicy::Reset => {
                    warn!(key = PROFILES_KEY, error = %e, "discarding malformed profile list");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        let (state, repaired) = match stored {
            Some(mut profiles) if !profiles.is_empty() => {
                match profiles.iter().find(|p| p.active).cloned() {
                    Some(active) => (ProfileState { active, profiles }, false),
                    None => {
                        warn!(
                            profile = %profiles[0].name,
                            "no active profile stored, adopting first entry"
                        );
                        profiles[0].active = true;
                        let active = profiles[0].clone();
                        (ProfileState { active, profiles }, true)
                    }
                }
            }
            _ => {
                info!(profile = %config.default_profile, "initializing profiles");
                let active = Profile::active(config.default_profile.clone());
                let profiles = vec![active.clone()];
                (ProfileState { active, profiles }, true)
            }
        };

        let store = Self {
            storage,
            state: RwLock::new(state),
        };

        if repaired {
            let state = store.state.read();
            store.persist_profiles(&state)?;
            store.persist_active(&state)?;
        }

        Ok(store)
    }

    /// Snapshot of all profiles, in creation order.
    pub fn profiles(&self) -> Vec<Profile> {
        self.state.read().profiles.clone()
    }

    /// The currently active profile.
    pub fn active_profile(&self) -> Profile {
        self.state.read().active.clone()
    }

    /// Whether a profile named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.state.read().profiles.iter().any(|p| p.name == name)
    }

    /// Append `profile` to the list.
    ///
    /// An active `profile` first deactivates every existing entry and becomes
    /// the active profile. The entry is appended even if one with the same
    /// name already exists.
    pub fn update_profiles(&self, profile: Profile) -> Result<()> {
        let mut state = self.state.write();

        if profile.active {
            for existing in state.profiles.iter_mut() {
                existing.active = false;
            }
            self.activate(&mut state, profile.clone())?;
        }

        debug!(profile = %profile.name, active = profile.active, "adding profile");
        state.profiles.push(profile);
        self.persist_profiles(&state)
    }

    /// Make `profile` the active profile.
    ///
    /// Any other entry marked active is cleared, and an inactive entry with
    /// the same name is replaced by `profile`.
    pub fn set_active_profile(&self, profile: Profile) -> Result<()> {
        let mut state = self.state.write();
        self.activate(&mut state, profile)
    }

    fn activate(&self, state: &mut ProfileState, profile: Profile) -> Result<()> {
        info!(profile = %profile.name, "activating profile");
        state.active = profile;
        self.persist_active(state)?;

        let active = &state.active;
        state.profiles = state
            .profiles
            .iter()
            .map(|existing| {
                if existing.active && existing.name != active.name {
                    existing.deactivated()
                } else if existing.name == active.name && !existing.active {
                    active.clone()
                } else {
                    existing.clone()
                }
            })
            .collect();

        self.persist_profiles(state)
    }

    fn persist_profiles(&self, state: &ProfileState) -> Result<()> {
        let encoded = encode_profile_list(&state.profiles)?;
        debug!(key = PROFILES_KEY, count = state.profiles.len(), "persisting profiles");
        self.storage.write(PROFILES_KEY, &encoded)
    }

    fn persist_active(&self, state: &ProfileState) -> Result<()> {
        let encoded = encode_profile(&state.active)?;
        debug!(key = ACTIVE_PROFILE_KEY, profile = %state.active.name, "persisting active profile");
        self.storage.write(ACTIVE_PROFILE_KEY, &encoded)
    }
}

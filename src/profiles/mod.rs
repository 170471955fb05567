//! Profile list and active-profile tracking.

mod manager;

pub use manager::{ProfileStore, ACTIVE_PROFILE_KEY, PROFILES_KEY};

//! Profile record codec.

use super::{decode, encode};
use crate::error::Result;
use crate::types::Profile;

pub fn encode_profile(profile: &Profile) -> Result<String> {
    encode(profile)
}

pub fn decode_profile(text: &str) -> Result<Profile> {
    decode(text)
}

pub fn encode_profile_list(profiles: &[Profile]) -> Result<String> {
    encode(profiles)
}

pub fn decode_profile_list(text: &str) -> Result<Vec<Profile>> {
    decode(text)
}

//! String codecs for persisted records.
//!
//! Encoding is plain JSON with fields in declaration order. Decoding is its
//! inverse: no defaults are filled in and malformed input is reported as
//! [`RosterError::Parse`](crate::RosterError::Parse), leaving any fallback to
//! the caller.

mod player;
mod profile;

pub use player::{decode_player, decode_player_list, encode_player, encode_player_list};
pub use profile::{decode_profile, decode_profile_list, encode_profile, encode_profile_list};

use crate::error::{Result, RosterError};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(RosterError::from)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(RosterError::parse)
}

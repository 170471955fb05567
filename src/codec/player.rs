//! Player record codec.

use super::{decode, encode};
use crate::error::Result;
use crate::types::Player;

pub fn encode_player(player: &Player) -> Result<String> {
    encode(player)
}

pub fn decode_player(text: &str) -> Result<Player> {
    decode(text)
}

pub fn encode_player_list(players: &[Player]) -> Result<String> {
    encode(players)
}

pub fn decode_player_list(text: &str) -> Result<Vec<Player>> {
    decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowIndex;
    use proptest::prelude::*;

    #[test]
    fn test_encode_player_list() {
        let players = vec![
            Player::new("Ana", 0).with_checked(true),
            Player::blank(1),
        ];

        let encoded = encode_player_list(&players).unwrap();
        assert_eq!(
            encoded,
            r#"[{"name":"Ana","rowIndex":0,"checked":true},{"name":"","rowIndex":1,"checked":false}]"#
        );
    }

    #[test]
    fn test_decode_keeps_append_sentinel() {
        let player = decode_player(r#"{"name":"Bo","rowIndex":-1,"checked":false}"#).unwrap();
        assert_eq!(player.row_index, RowIndex::Append);
        assert_eq!(player.hotkey, None);
    }

    #[test]
    fn test_decode_malformed_is_parse_error() {
        let err = decode_player_list("[{\"name\":").unwrap_err();
        assert!(err.is_parse());

        // Missing fields are not defaulted.
        let err = decode_player(r#"{"name":"Bo"}"#).unwrap_err();
        assert!(err.is_parse());
    }

    fn arb_player() -> impl Strategy<Value = Player> {
        (
            ".*",
            prop_oneof![(0usize..64).prop_map(RowIndex::At), Just(RowIndex::Append)],
            any::<bool>(),
            proptest::option::of("[A-Za-z0-9]{0,3}"),
        )
            .prop_map(|(name, row_index, checked, hotkey)| Player {
                name,
                row_index,
                checked,
                hotkey,
            })
    }

    proptest! {
        #[test]
        fn prop_player_list_round_trip(players in proptest::collection::vec(arb_player(), 0..12)) {
            let encoded = encode_player_list(&players).unwrap();
            prop_assert_eq!(decode_player_list(&encoded).unwrap(), players);
        }

        #[test]
        fn prop_player_round_trip(player in arb_player()) {
            let encoded = encode_player(&player).unwrap();
            prop_assert_eq!(decode_player(&encoded).unwrap(), player);
        }
    }
}

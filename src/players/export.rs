//! Plain-text views of a roster.

use crate::types::Player;

/// Render the occupied slots, one name per line in roster order.
///
/// Checked players are listed as-is; unchecked players are prefixed with
/// `ignore_prefix` so downstream tools can skip them.
pub fn export_text(players: &[Player], ignore_prefix: &str) -> String {
    players
        .iter()
        .filter(|player| player.is_occupied())
        .map(|player| {
            if player.checked {
                player.name.clone()
            } else {
                format!("{}{}", ignore_prefix, player.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whether every occupied slot is checked. True when no slot is occupied.
pub fn all_named_checked(players: &[Player]) -> bool {
    players
        .iter()
        .filter(|player| player.is_occupied())
        .all(|player| player.checked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_text() {
        let players = vec![
            Player::new("Ana", 0).with_checked(true),
            Player::blank(1),
            Player::new("Bo", 2),
            Player::new("Cy", 3).with_checked(true),
        ];

        assert_eq!(export_text(&players, "#"), "Ana\n#Bo\nCy");
    }

    #[test]
    fn test_export_empty_roster() {
        let players: Vec<Player> = (0..5).map(Player::blank).collect();
        assert_eq!(export_text(&players, "#"), "");
    }

    #[test]
    fn test_all_named_checked() {
        let mut players = vec![
            Player::new("Ana", 0).with_checked(true),
            Player::blank(1),
        ];
        assert!(all_named_checked(&players));

        players.push(Player::new("Bo", 2));
        assert!(!all_named_checked(&players));

        assert!(all_named_checked(&[Player::blank(0)]));
    }
}

//! Two-pass matching of the last valid selection against attached boards
//!
//! Some boards come back on a different serial port after an upload resets
//! them (a MKR1000 on `COM5` reappearing on `COM10` is the classic case).
//! The first pass looks for the exact board and port; the second accepts
//! the same board on any port. Both passes take the first match in the
//! order the boards were given, so with two identical boards attached the
//! outcome follows enumeration order.

use crate::models::{Board, SelectionConfig, ValidSelection};

/// How a reconnect target was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectMatch {
    /// Same board on the same port
    Exact,
    /// Same board, different port
    PortChanged,
}

/// Find the selection to adopt, if any of `boards` matches `last_valid`.
///
/// Only serial boards take part. The caller decides whether reconnecting
/// is wanted at all.
pub fn find_reconnect_target(
    last_valid: &ValidSelection,
    boards: &[Board],
) -> Option<(SelectionConfig, ReconnectMatch)> {
    let wanted = last_valid.board();
    let serial_boards = || boards.iter().filter(|board| board.is_serial());

    if serial_boards()
        .any(|board| board.same_identity(wanted) && board.serial_port() == Some(last_valid.port()))
    {
        return Some((last_valid.to_config(), ReconnectMatch::Exact));
    }

    serial_boards()
        .find(|board| board.same_identity(wanted))
        .and_then(Board::serial_port)
        .map(|port| (last_valid.with_port(port), ReconnectMatch::PortChanged))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mkr(port: &str) -> Board {
        Board::new("Arduino MKR1000")
            .with_fqbn("arduino:samd:mkr1000")
            .with_port(port)
    }

    fn last_valid(port: &str) -> ValidSelection {
        ValidSelection::try_from(SelectionConfig::new(
            Some(Board::new("Arduino MKR1000").with_fqbn("arduino:samd:mkr1000")),
            Some(port.to_string()),
        ))
        .unwrap()
    }

    #[test]
    fn test_exact_match_wins_over_earlier_relaxed_match() {
        let boards = vec![mkr("COM10"), mkr("COM5")];
        let (config, kind) = find_reconnect_target(&last_valid("COM5"), &boards).unwrap();
        assert_eq!(kind, ReconnectMatch::Exact);
        assert_eq!(config, last_valid("COM5").to_config());
    }

    #[test]
    fn test_relaxed_match_takes_new_port() {
        let boards = vec![
            Board::new("Arduino Uno")
                .with_fqbn("arduino:avr:uno")
                .with_port("COM3"),
            mkr("COM10"),
        ];
        let (config, kind) = find_reconnect_target(&last_valid("COM5"), &boards).unwrap();
        assert_eq!(kind, ReconnectMatch::PortChanged);
        assert_eq!(config.selected_port.as_deref(), Some("COM10"));
        assert_eq!(config.selected_board, Some(last_valid("COM5").board().clone()));
    }

    #[test]
    fn test_relaxed_match_follows_list_order() {
        let boards = vec![mkr("COM11"), mkr("COM10")];
        let (config, _) = find_reconnect_target(&last_valid("COM5"), &boards).unwrap();
        assert_eq!(config.selected_port.as_deref(), Some("COM11"));
    }

    #[test]
    fn test_identity_requires_name_and_fqbn() {
        let boards = vec![
            Board::new("Arduino MKR1000").with_port("COM10"),
            Board::new("MKR1000 clone")
                .with_fqbn("arduino:samd:mkr1000")
                .with_port("COM11"),
        ];
        assert!(find_reconnect_target(&last_valid("COM5"), &boards).is_none());
    }

    #[test]
    fn test_non_serial_boards_are_ignored() {
        let boards = vec![Board::new("Arduino MKR1000").with_fqbn("arduino:samd:mkr1000")];
        assert!(find_reconnect_target(&last_valid("COM5"), &boards).is_none());
    }
}

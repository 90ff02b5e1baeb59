//! Core identity and message types.
//!
//! Everything that crosses a layer boundary in Mapcast is built from the
//! types in this module. Raw caller input (a name string, a map number)
//! is validated here once, so the layers above can trust what they hold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// MapId
// ---------------------------------------------------------------------------

/// Identifier of a map (a room / broadcast domain).
///
/// A newtype over `u64` so it can't be confused with a count or an
/// index. Only positive ids exist: use [`MapId::try_from`] on untrusted
/// integers.
///
/// `#[serde(transparent)]` makes `MapId(3)` serialize as plain `3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub u64);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M-{}", self.0)
    }
}

impl TryFrom<i64> for MapId {
    type Error = ProtocolError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        if raw <= 0 {
            return Err(ProtocolError::InvalidMapId(raw));
        }
        Ok(Self(raw as u64))
    }
}

// ---------------------------------------------------------------------------
// PlayerKey / PlayerName
// ---------------------------------------------------------------------------

/// The normalized (lowercased) form of a player name.
///
/// This is the uniqueness and lookup key everywhere: the game's player
/// registry and every room's membership map are keyed by it. "Alice",
/// "ALICE" and "alice" all produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerKey(String);

impl PlayerKey {
    /// Normalizes any string into a key. Does not validate.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated player name.
///
/// Keeps the display form exactly as the player supplied it. The
/// lowercase [`PlayerKey`] is computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerName {
    display: String,
    key: PlayerKey,
}

impl PlayerName {
    /// Validates a raw name.
    ///
    /// # Errors
    /// Returns [`ProtocolError::EmptyName`] if `raw` is empty or only
    /// whitespace.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        if raw.trim().is_empty() {
            return Err(ProtocolError::EmptyName);
        }
        Ok(Self {
            display: raw.to_string(),
            key: PlayerKey::normalize(raw),
        })
    }

    /// The name exactly as supplied.
    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn key(&self) -> &PlayerKey {
        &self.key
    }

    /// The name in title case: the first letter of every word upper-cased,
    /// the rest lower-cased.
    ///
    /// A word starts after an ASCII character that is not a letter, a digit
    /// or an underscore, or after any whitespace, so `"o'neil"` becomes
    /// `"O'Neil"`. Other non-ASCII punctuation does not split words:
    /// `"josé—maría"` becomes `"José—maría"`.
    pub fn title(&self) -> String {
        let mut out = String::with_capacity(self.display.len());
        let mut at_word_start = true;
        for ch in self.display.chars().flat_map(char::to_lowercase) {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.push(ch);
            }
            at_word_start = is_word_separator(ch);
        }
        out
    }
}

fn is_word_separator(ch: char) -> bool {
    if ch.is_ascii() {
        !(ch.is_ascii_alphanumeric() || ch == '_')
    } else {
        ch.is_whitespace()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// One queued broadcast.
///
/// `line` is the exact string members receive. `sender` travels beside it
/// as structured data so the fan-out worker can skip the author without
/// re-parsing the line (names containing `" says: "` would break that).
/// An envelope with no sender is delivered to every member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub sender: Option<PlayerKey>,
    pub line: String,
}

impl Envelope {
    /// Builds a chat line: `"<Title> says: <text>"`.
    pub fn chat(from: &PlayerName, text: &str) -> Self {
        Self {
            sender: Some(from.key().clone()),
            line: format!("{} says: {}", from.title(), text),
        }
    }

    /// A line with no author, delivered to everyone in the map.
    pub fn announce(line: impl Into<String>) -> Self {
        Self {
            sender: None,
            line: line.into(),
        }
    }

    /// Returns `true` if this envelope must not be delivered to `key`.
    pub fn is_from(&self, key: &PlayerKey) -> bool {
        self.sender.as_ref() == Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> PlayerName {
        PlayerName::parse(raw).unwrap()
    }

    #[test]
    fn test_map_id_rejects_non_positive() {
        assert_eq!(MapId::try_from(0i64), Err(ProtocolError::InvalidMapId(0)));
        assert_eq!(MapId::try_from(-4i64), Err(ProtocolError::InvalidMapId(-4)));
        assert_eq!(MapId::try_from(7i64), Ok(MapId(7)));
    }

    #[test]
    fn test_map_id_display_and_serde() {
        assert_eq!(MapId(3).to_string(), "M-3");
        assert_eq!(serde_json::to_string(&MapId(3)).unwrap(), "3");
        let parsed: MapId = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, MapId(12));
    }

    #[test]
    fn test_blank_names_are_rejected() {
        assert_eq!(PlayerName::parse(""), Err(ProtocolError::EmptyName));
        assert_eq!(PlayerName::parse("   \t"), Err(ProtocolError::EmptyName));
    }

    #[test]
    fn test_name_keeps_display_form_and_lowercases_key() {
        let n = name("AliCe");
        assert_eq!(n.as_str(), "AliCe");
        assert_eq!(n.key().as_str(), "alice");
        assert_eq!(n.key(), name("ALICE").key());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(name("alice").title(), "Alice");
        assert_eq!(name("BOB smith").title(), "Bob Smith");
        assert_eq!(name("o'neil").title(), "O'Neil");
        assert_eq!(name("mary-jane").title(), "Mary-Jane");
        assert_eq!(name("snake_case").title(), "Snake_case");
        assert_eq!(name("3dguy").title(), "3dguy");
    }

    #[test]
    fn test_title_case_non_ascii_boundaries() {
        assert_eq!(name("josé—maría").title(), "José—maría");
        assert_eq!(name("ÉLODIE\u{3000}ÜBER").title(), "Élodie\u{3000}Über");
        assert_eq!(name("zoë").title(), "Zoë");
    }

    #[test]
    fn test_chat_envelope_format() {
        let env = Envelope::chat(&name("alice"), "hi");
        assert_eq!(env.line, "Alice says: hi");
        assert!(env.is_from(&PlayerKey::normalize("ALICE")));
        assert!(!env.is_from(&PlayerKey::normalize("bob")));
    }

    #[test]
    fn test_chat_envelope_keeps_sender_when_name_contains_separator() {
        let env = Envelope::chat(&name("x says: y"), "hello");
        assert_eq!(env.line, "X Says: Y says: hello");
        assert!(env.is_from(&PlayerKey::normalize("x says: y")));
    }

    #[test]
    fn test_announce_has_no_sender() {
        let env = Envelope::announce("server restarting");
        assert_eq!(env.sender, None);
        assert!(!env.is_from(&PlayerKey::normalize("anyone")));
    }
}

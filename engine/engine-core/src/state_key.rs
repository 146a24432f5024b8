//! State fingerprints.
//!
//! A `StateKey` is a player marker followed by an ordered list of tokens
//! describing the position. Keys are compared and hashed as plain strings, so
//! two keys are equal exactly when the mover and every token agree.

use crate::player::Player;
use std::fmt;

/// Separates the mover marker from the position tokens.
const MOVER_SEPARATOR: char = '|';

/// Separates individual position tokens.
const TOKEN_SEPARATOR: char = ',';

/// Order-sensitive fingerprint of a game state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(String);

impl StateKey {
    /// Start a key for a state where `mover` plays next.
    pub fn new(mover: Player) -> Self {
        let mut key = String::with_capacity(32);
        key.push(mover.marker());
        key.push(MOVER_SEPARATOR);
        Self(key)
    }

    /// Builder pattern: append one position token.
    ///
    /// Tokens are delimited, so `["1", "23"]` and `["12", "3"]` never collide.
    pub fn with_token(mut self, token: impl fmt::Display) -> Self {
        self.push_token(token);
        self
    }

    /// Append one position token in place.
    pub fn push_token(&mut self, token: impl fmt::Display) {
        use std::fmt::Write;

        if !self.0.ends_with(MOVER_SEPARATOR) {
            self.0.push(TOKEN_SEPARATOR);
        }
        // Writing into a String cannot fail
        let _ = write!(self.0, "{}", token);
    }

    /// Raw key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

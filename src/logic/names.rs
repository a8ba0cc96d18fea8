//! Player identity: how raw names from a feed map to the name a stats row is keyed by.

use std::collections::HashMap;

/// Maps a raw player name to the identity used as the stats key.
pub trait NameResolver {
    fn resolve(&self, raw: &str) -> String;
}

/// Identity resolver: every distinct string is a distinct player.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawNames;

impl NameResolver for RawNames {
    fn resolve(&self, raw: &str) -> String {
        raw.to_string()
    }
}

/// Alias table (nicknames, spelling variants) on top of whitespace trimming.
/// Alias lookup is case-insensitive; unknown names pass through trimmed.
#[derive(Clone, Debug, Default)]
pub struct RosterResolver {
    aliases: HashMap<String, String>,
}

impl RosterResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `alias` as another spelling of `canonical`.
    pub fn with_alias(mut self, alias: &str, canonical: impl Into<String>) -> Self {
        self.aliases
            .insert(alias.trim().to_lowercase(), canonical.into());
        self
    }
}

impl NameResolver for RosterResolver {
    fn resolve(&self, raw: &str) -> String {
        let trimmed = raw.trim();
        self.aliases
            .get(&trimmed.to_lowercase())
            .cloned()
            .unwrap_or_else(|| trimmed.to_string())
    }
}

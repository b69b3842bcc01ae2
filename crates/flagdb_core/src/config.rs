//! Generator configuration.

use crate::hash::hash_name;
use std::collections::HashSet;

/// Settings shared by the revival and actor generators.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Reset type for flags generated from overworld objects, or `None`
    /// to skip the overworld pass entirely.
    pub main_field_reset: Option<i32>,
    /// Reset type for flags generated from dungeon objects, or `None` to
    /// skip the dungeon pass entirely.
    pub dungeon_reset: Option<i32>,
    /// Whether the actor pass removes bundle flags whose actor no longer
    /// exists.
    pub prune_actor_flags: bool,
    /// Flag names the generators must never create, modify, or delete.
    pub flag_name_exceptions: Vec<String>,
    /// Save-flag parameter values that must not produce link-tag flags.
    pub link_tag_save_flag_exceptions: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            main_field_reset: None,
            dungeon_reset: None,
            prune_actor_flags: true,
            flag_name_exceptions: Vec::new(),
            link_tag_save_flag_exceptions: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overworld reset type.
    #[must_use]
    pub fn with_main_field_reset(mut self, reset_type: i32) -> Self {
        self.main_field_reset = Some(reset_type);
        self
    }

    /// Sets the dungeon reset type.
    #[must_use]
    pub fn with_dungeon_reset(mut self, reset_type: i32) -> Self {
        self.dungeon_reset = Some(reset_type);
        self
    }

    /// Enables or disables actor flag pruning.
    #[must_use]
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune_actor_flags = prune;
        self
    }

    /// Adds a flag name the generators must leave alone.
    #[must_use]
    pub fn with_flag_name_exception(mut self, name: impl Into<String>) -> Self {
        self.flag_name_exceptions.push(name.into());
        self
    }

    /// Adds a save-flag value that must not produce link-tag flags.
    #[must_use]
    pub fn with_link_tag_exception(mut self, name: impl Into<String>) -> Self {
        self.link_tag_save_flag_exceptions.push(name.into());
        self
    }

    /// Whether a derived flag name is off-limits for reconciliation.
    ///
    /// `link_tag` widens the check to the link-tag exception list.
    #[must_use]
    pub fn is_reconcile_excepted(&self, name: &str, link_tag: bool) -> bool {
        if self.flag_name_exceptions.iter().any(|n| n == name) {
            return true;
        }
        link_tag && self.link_tag_save_flag_exceptions.iter().any(|n| n == name)
    }

    /// Hashes of every excepted name, used to shield them from deletion
    /// sweeps.
    #[must_use]
    pub fn exception_hashes(&self) -> HashSet<i32> {
        self.flag_name_exceptions
            .iter()
            .chain(self.link_tag_save_flag_exceptions.iter())
            .map(|name| hash_name(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_skip_both_revival_passes_and_prune() {
        let config = GeneratorConfig::default();
        assert!(config.main_field_reset.is_none());
        assert!(config.dungeon_reset.is_none());
        assert!(config.prune_actor_flags);
        assert!(config.exception_hashes().is_empty());
    }

    #[test]
    fn builders_compose() {
        let config = GeneratorConfig::new()
            .with_main_field_reset(1)
            .with_dungeon_reset(2)
            .with_pruning(false)
            .with_flag_name_exception("Open_Dungeon000");
        assert_eq!(config.main_field_reset, Some(1));
        assert_eq!(config.dungeon_reset, Some(2));
        assert!(!config.prune_actor_flags);
        assert!(config.is_reconcile_excepted("Open_Dungeon000", false));
    }

    #[test]
    fn link_tag_exceptions_only_apply_to_link_tags() {
        let config = GeneratorConfig::new().with_link_tag_exception("MainField_Static_Flag");
        assert!(!config.is_reconcile_excepted("MainField_Static_Flag", false));
        assert!(config.is_reconcile_excepted("MainField_Static_Flag", true));
    }

    #[test]
    fn exception_hashes_cover_both_lists() {
        let config = GeneratorConfig::new()
            .with_flag_name_exception("Flag_A")
            .with_link_tag_exception("Flag_B");
        let hashes = config.exception_hashes();
        assert!(hashes.contains(&hash_name("Flag_A")));
        assert!(hashes.contains(&hash_name("Flag_B")));
        assert_eq!(hashes.len(), 2);
    }
}

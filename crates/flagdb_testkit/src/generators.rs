//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random flags and flag names
//! that maintain required invariants.

use flagdb_core::{Flag, FlagType, FlagValues};
use proptest::prelude::*;

/// Strategy for generating plausible flag names.
///
/// Names follow the underscore-joined convention the stock data uses,
/// so generated flags sort and hash like real ones.
pub fn flag_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z0-9]{1,11}(_[A-Za-z0-9]{1,11}){0,3}")
        .expect("Invalid regex")
}

/// Strategy for generating any container flag type.
pub fn flag_type_strategy() -> impl Strategy<Value = FlagType> {
    prop::sample::select(FlagType::ALL.to_vec())
}

/// Strategy for generating boolean flags with varied attributes.
pub fn bool_flag_strategy() -> impl Strategy<Value = Flag> {
    (
        flag_name_strategy(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(name, save, revival, one_trigger)| {
            let mut flag = Flag::new_bool(revival);
            flag.set_name(&name);
            flag.is_save = save;
            flag.is_one_trigger = one_trigger;
            flag
        })
}

/// Strategy for generating a flag of a random type, paired with that type.
pub fn typed_flag_strategy() -> impl Strategy<Value = (FlagType, Flag)> {
    (flag_type_strategy(), flag_name_strategy(), any::<bool>()).prop_map(
        |(ftype, name, save)| {
            let mut flag = Flag::new(&name, FlagValues::default_for(ftype));
            flag.is_save = save;
            (ftype, flag)
        },
    )
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagdb_core::{hash_name, FlagStore};

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn generated_names_look_like_stock_names(name in flag_name_strategy()) {
            let first = name.chars().next();
            prop_assert!(first.is_some_and(|c| c.is_ascii_uppercase()));
            prop_assert!(!name.contains("__"));
        }

        #[test]
        fn generated_flags_carry_their_name_hash(flag in bool_flag_strategy()) {
            prop_assert_eq!(flag.hash(), hash_name(flag.name()));
        }

        #[test]
        fn flag_types_round_trip_through_their_names(ftype in flag_type_strategy()) {
            prop_assert_eq!(FlagType::parse(ftype.as_str()), Some(ftype));
        }

        #[test]
        fn typed_flags_register_as_additions((ftype, flag) in typed_flag_strategy()) {
            let mut store = FlagStore::new();
            let hash = flag.hash();
            store.add(ftype, flag);
            prop_assert!(store.change_set(ftype).added.contains(&hash));
        }
    }
}

//! The in-memory flag store.
//!
//! The store keeps two copies of every flag partition: an immutable
//! snapshot populated at load time and a working copy that mutators
//! operate on. Change accounting is a pure function of the two copies,
//! so callers never track dirty state themselves.

use crate::error::{CoreError, CoreResult};
use crate::flag::{Flag, FlagType};
use flagdb_codec::Value;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Hashes added, modified, or deleted in one flag partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// Hashes present in the working copy but not the snapshot.
    pub added: BTreeSet<i32>,
    /// Hashes present in both copies with different contents.
    pub modified: BTreeSet<i32>,
    /// Hashes present in the snapshot but not the working copy.
    pub deleted: BTreeSet<i32>,
}

impl ChangeSet {
    /// Total number of changed hashes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.added.len() + self.modified.len() + self.deleted.len()
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.deleted.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
struct Bucket {
    snapshot: HashMap<i32, Flag>,
    working: HashMap<i32, Flag>,
}

/// Snapshot plus working copy of every flag partition.
#[derive(Debug, Clone, Default)]
pub struct FlagStore {
    buckets: [Bucket; 16],
}

const fn bucket_index(ftype: FlagType) -> usize {
    match ftype {
        FlagType::BoolArray => 0,
        FlagType::Bool => 1,
        FlagType::F32Array => 2,
        FlagType::F32 => 3,
        FlagType::S32Array => 4,
        FlagType::S32 => 5,
        FlagType::String256Array => 6,
        FlagType::String256 => 7,
        FlagType::String32 => 8,
        FlagType::String64Array => 9,
        FlagType::String64 => 10,
        FlagType::Vector2Array => 11,
        FlagType::Vector2 => 12,
        FlagType::Vector3Array => 13,
        FlagType::Vector3 => 14,
        FlagType::Vector4 => 15,
    }
}

impl FlagStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, ftype: FlagType) -> &Bucket {
        &self.buckets[bucket_index(ftype)]
    }

    fn bucket_mut(&mut self, ftype: FlagType) -> &mut Bucket {
        &mut self.buckets[bucket_index(ftype)]
    }

    /// Loads one container member into both the snapshot and the working
    /// copy.
    ///
    /// The document must be a map from flag type identifiers to record
    /// arrays. Members whose name contains `revival` mark their flags as
    /// revival flags. Loading the same partition from several members
    /// accumulates, which is how paginated containers are read.
    pub fn load_member(&mut self, member_name: &str, document: &Value) -> CoreResult<()> {
        let revival = member_name.contains("revival");
        let entries = document.as_map().ok_or_else(|| {
            CoreError::malformed_record(member_name, "container member must be a map")
        })?;
        for (type_name, records) in entries {
            let ftype = FlagType::parse(type_name).ok_or_else(|| {
                CoreError::malformed_record(type_name.clone(), "unknown flag data type")
            })?;
            let records = records.as_array().ok_or_else(|| {
                CoreError::malformed_record(type_name.clone(), "flag entries must be an array")
            })?;
            let bucket = self.bucket_mut(ftype);
            for record in records {
                let flag = Flag::from_record(ftype, record, revival)?;
                bucket.snapshot.insert(flag.hash(), flag.clone());
                bucket.working.insert(flag.hash(), flag);
            }
        }
        Ok(())
    }

    /// Looks up a working flag by hash.
    #[must_use]
    pub fn find(&self, ftype: FlagType, hash: i32) -> Option<&Flag> {
        self.bucket(ftype).working.get(&hash)
    }

    /// Inserts a flag into the working copy, replacing any flag already
    /// stored under its hash.
    pub fn add(&mut self, ftype: FlagType, flag: Flag) {
        self.bucket_mut(ftype).working.insert(flag.hash(), flag);
    }

    /// Replaces the flag at `old_hash` with `flag`, which may carry a
    /// different hash when the flag was renamed.
    ///
    /// Returns `false` without touching the store when the replacement is
    /// structurally identical to what is already there.
    pub fn modify(&mut self, ftype: FlagType, old_hash: i32, flag: Flag) -> bool {
        let bucket = self.bucket_mut(ftype);
        if let Some(existing) = bucket.working.get(&old_hash) {
            if old_hash == flag.hash() && *existing == flag {
                return false;
            }
        }
        bucket.working.remove(&old_hash);
        bucket.working.insert(flag.hash(), flag);
        true
    }

    /// Removes a working flag. Returns whether one was present.
    pub fn remove(&mut self, ftype: FlagType, hash: i32) -> bool {
        self.bucket_mut(ftype).working.remove(&hash).is_some()
    }

    /// Makes the current working state the new baseline.
    ///
    /// Change sets computed afterwards are relative to this state.
    pub fn reset_snapshot(&mut self) {
        for bucket in &mut self.buckets {
            bucket.snapshot = bucket.working.clone();
        }
    }

    /// All working flags whose name contains `search`, sorted by name.
    #[must_use]
    pub fn find_all(&self, ftype: FlagType, search: &str) -> Vec<&Flag> {
        let mut matches: Vec<&Flag> = self
            .bucket(ftype)
            .working
            .values()
            .filter(|flag| flag.name().contains(search))
            .collect();
        matches.sort_by_key(|flag| flag.name());
        matches
    }

    /// Hashes of all working flags whose name contains `search`.
    #[must_use]
    pub fn find_all_hashes(&self, ftype: FlagType, search: &str) -> HashSet<i32> {
        self.bucket(ftype)
            .working
            .values()
            .filter(|flag| flag.name().contains(search))
            .map(Flag::hash)
            .collect()
    }

    /// Iterates over the working flags of one partition, in no particular
    /// order.
    pub fn working_flags(&self, ftype: FlagType) -> impl Iterator<Item = &Flag> {
        self.bucket(ftype).working.values()
    }

    /// Computes the changes between snapshot and working copy for one
    /// partition.
    #[must_use]
    pub fn change_set(&self, ftype: FlagType) -> ChangeSet {
        let bucket = self.bucket(ftype);
        let mut changes = ChangeSet::default();
        for (hash, flag) in &bucket.working {
            match bucket.snapshot.get(hash) {
                None => {
                    changes.added.insert(*hash);
                }
                Some(before) if before != flag => {
                    changes.modified.insert(*hash);
                }
                Some(_) => {}
            }
        }
        for hash in bucket.snapshot.keys() {
            if !bucket.working.contains_key(hash) {
                changes.deleted.insert(*hash);
            }
        }
        changes
    }

    /// Computes the save-data subset of [`FlagStore::change_set`].
    ///
    /// Added and modified hashes count when the working flag is saved;
    /// deleted hashes count when the snapshot flag was saved.
    #[must_use]
    pub fn save_change_set(&self, ftype: FlagType) -> ChangeSet {
        let bucket = self.bucket(ftype);
        let full = self.change_set(ftype);
        let saved_working =
            |hash: &i32| bucket.working.get(hash).is_some_and(|flag| flag.is_save);
        let saved_snapshot =
            |hash: &i32| bucket.snapshot.get(hash).is_some_and(|flag| flag.is_save);
        ChangeSet {
            added: full.added.iter().copied().filter(saved_working).collect(),
            modified: full.modified.iter().copied().filter(saved_working).collect(),
            deleted: full.deleted.iter().copied().filter(saved_snapshot).collect(),
        }
    }

    /// Total number of changed flags across every partition.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        FlagType::ALL
            .iter()
            .map(|ftype| self.change_set(*ftype).total())
            .sum()
    }
}

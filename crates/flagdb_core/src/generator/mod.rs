//! Flag generators.
//!
//! Two passes derive flag entries from world data. [`revival::RevivalRun`]
//! reconciles per-object revival flags against the stock maps, and
//! [`actor::ActorRun`] emits the bundle of bookkeeping flags every handled
//! actor carries. Both operate on a shared [`FlagStore`] and route their
//! writes through the same commit path so reruns converge instead of
//! duplicating entries.

pub mod actor;
pub mod revival;

pub use actor::{ActorCategory, ActorEntry, ActorRun};
pub use revival::RevivalRun;

use crate::flag::{Flag, FlagType};
use crate::store::FlagStore;

/// Routes a generated flag into the store.
///
/// An existing entry under `old_hash` is modified, which handles renames.
/// Failing that, an entry under the flag's own hash is updated in place.
/// Only when neither exists is the flag added as new.
fn commit_flag(store: &mut FlagStore, ftype: FlagType, old_hash: i32, flag: Flag) {
    if store.find(ftype, old_hash).is_some() {
        store.modify(ftype, old_hash, flag);
    } else if store.find(ftype, flag.hash()).is_some() {
        store.modify(ftype, flag.hash(), flag);
    } else {
        store.add(ftype, flag);
    }
}

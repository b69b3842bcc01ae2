//! Bootup pack plumbing shared by the commands.
//!
//! Both commands read the two flag databases out of a mod's
//! `content/Pack/Bootup.pack` and write them back through a temp-file
//! rename, so an interrupted run never leaves a half-written pack
//! behind.

use flagdb_codec::{Archive, ArchiveWriter, Endian};
use flagdb_core::{
    build_game_data, build_save_data, extract_save_trailer, load_game_data, FlagStore,
    SaveDataTrailer, GAME_DATA_MEMBER, SAVE_FORMAT_MEMBER,
};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A mod's bootup pack with both flag databases decoded.
#[derive(Debug)]
pub struct BootupPack {
    path: PathBuf,
    archive: Archive,
    store: FlagStore,
    trailer: SaveDataTrailer,
}

impl BootupPack {
    /// Loads the pack from a mod directory.
    pub fn load(mod_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let path = bootup_path(mod_dir);
        let bytes = fs::read(&path)
            .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
        let archive = Archive::from_bytes(&bytes)?;

        let game_bytes = archive
            .get(GAME_DATA_MEMBER)
            .ok_or_else(|| format!("{} has no {GAME_DATA_MEMBER} member", path.display()))?;
        let game = Archive::from_bytes(game_bytes)?;
        let mut store = FlagStore::new();
        let members = load_game_data(&game, &mut store)?;
        debug!("loaded {} game data members from {}", members, path.display());

        let save_bytes = archive
            .get(SAVE_FORMAT_MEMBER)
            .ok_or_else(|| format!("{} has no {SAVE_FORMAT_MEMBER} member", path.display()))?;
        let save = Archive::from_bytes(save_bytes)?;
        let trailer = extract_save_trailer(&save)?;

        Ok(Self {
            path,
            archive,
            store,
            trailer,
        })
    }

    /// The decoded flag store.
    pub fn store(&self) -> &FlagStore {
        &self.store
    }

    /// Mutable access to the flag store.
    pub fn store_mut(&mut self) -> &mut FlagStore {
        &mut self.store
    }

    /// Rebuilds both databases and replaces the pack on disk.
    ///
    /// Databases keep the pack's own byte order unless `force_big`
    /// selects big-endian; members the tool does not manage carry over
    /// unchanged.
    pub fn write_back(&self, force_big: bool) -> Result<(), Box<dyn std::error::Error>> {
        let endian = if force_big {
            Endian::Big
        } else {
            self.archive.endian()
        };
        let game = build_game_data(&self.store, endian)?;
        let save = build_save_data(&self.store, endian, &self.trailer)?;

        let mut writer = ArchiveWriter::from_archive(&self.archive);
        writer.insert(GAME_DATA_MEMBER, game);
        writer.insert(SAVE_FORMAT_MEMBER, save);
        atomic_write(&self.path, &writer.to_bytes()?)?;
        info!("wrote {}", self.path.display());
        Ok(())
    }
}

/// Copies the stock bootup pack into the mod when the mod has none.
pub fn bootstrap(
    mod_dir: &Path,
    game_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = bootup_path(mod_dir);
    if path.is_file() {
        return Ok(());
    }
    let Some(game_dir) = game_dir else {
        return Err(format!(
            "{} does not exist and no --game-dir was given to copy it from",
            path.display()
        )
        .into());
    };
    let stock = bootup_path(game_dir);
    if !stock.is_file() {
        return Err(format!("stock pack {} does not exist", stock.display()).into());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(&stock, &path)?;
    info!("copied stock pack to {}", path.display());
    Ok(())
}

/// The pack location inside a mod or dump directory.
pub fn bootup_path(root: &Path) -> PathBuf {
    root.join("content").join("Pack").join("Bootup.pack")
}

/// Writes via a temp file and rename; a crash mid-write leaves the
/// original pack untouched.
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let mut file = File::create(&tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flagdb_core::{hash_name, Flag, FlagType};

    fn fake_mod(endian: Endian) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FlagStore::new();
        let mut flag = Flag::new_bool(false);
        flag.set_name("BarrelErrand_Intro");
        flag.is_save = true;
        store.add(FlagType::Bool, flag);

        let trailer = SaveDataTrailer {
            first: vec![1, 2, 3],
            second: vec![4],
        };
        let mut writer = ArchiveWriter::new(endian);
        writer.insert("Layout/Title.blarc", vec![0xEE; 8]);
        writer.insert(GAME_DATA_MEMBER, build_game_data(&store, endian).unwrap());
        writer.insert(
            SAVE_FORMAT_MEMBER,
            build_save_data(&store, endian, &trailer).unwrap(),
        );

        let path = bootup_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, writer.to_bytes().unwrap()).unwrap();
        dir
    }

    #[test]
    fn load_and_write_back_round_trips() {
        let dir = fake_mod(Endian::Little);
        let mut pack = BootupPack::load(dir.path()).unwrap();
        assert_eq!(pack.store().total_changes(), 0);

        let mut added = Flag::new_bool(true);
        added.set_name("MainField_Enemy_Custom_1");
        added.is_save = true;
        pack.store_mut().add(FlagType::Bool, added);
        assert_eq!(pack.store().total_changes(), 1);
        pack.write_back(false).unwrap();

        let reloaded = BootupPack::load(dir.path()).unwrap();
        assert_eq!(reloaded.store().total_changes(), 0);
        assert!(reloaded
            .store()
            .find(FlagType::Bool, hash_name("MainField_Enemy_Custom_1"))
            .is_some());
        assert_eq!(reloaded.trailer.first, vec![1, 2, 3]);
    }

    #[test]
    fn write_back_keeps_foreign_members_and_byte_order() {
        let dir = fake_mod(Endian::Big);
        let pack = BootupPack::load(dir.path()).unwrap();
        pack.write_back(false).unwrap();

        let bytes = fs::read(bootup_path(dir.path())).unwrap();
        let archive = Archive::from_bytes(&bytes).unwrap();
        assert_eq!(archive.endian(), Endian::Big);
        assert_eq!(archive.get("Layout/Title.blarc"), Some(&[0xEE; 8][..]));

        let game = Archive::from_bytes(archive.get(GAME_DATA_MEMBER).unwrap()).unwrap();
        assert_eq!(game.endian(), Endian::Big);
    }

    #[test]
    fn write_back_leaves_no_temp_file() {
        let dir = fake_mod(Endian::Little);
        let pack = BootupPack::load(dir.path()).unwrap();
        pack.write_back(false).unwrap();

        let tmp = bootup_path(dir.path()).with_extension("pack.tmp");
        assert!(!tmp.exists());
    }

    #[test]
    fn bootstrap_copies_the_stock_pack() {
        let game = fake_mod(Endian::Little);
        let mod_dir = tempfile::tempdir().unwrap();

        bootstrap(mod_dir.path(), Some(game.path())).unwrap();
        assert!(bootup_path(mod_dir.path()).is_file());
        assert!(BootupPack::load(mod_dir.path()).is_ok());

        // A pack that exists is left alone even without a dump.
        bootstrap(mod_dir.path(), None).unwrap();
    }

    #[test]
    fn bootstrap_without_a_source_fails() {
        let mod_dir = tempfile::tempdir().unwrap();
        assert!(bootstrap(mod_dir.path(), None).is_err());

        let empty_dump = tempfile::tempdir().unwrap();
        assert!(bootstrap(mod_dir.path(), Some(empty_dump.path())).is_err());
    }

    #[test]
    fn missing_pack_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = BootupPack::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Bootup.pack"));
    }
}

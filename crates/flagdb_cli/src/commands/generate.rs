//! Generate command implementation.

use crate::bootup::{self, BootupPack};
use flagdb_codec::{from_document_bytes, Archive, Value};
use flagdb_core::{
    ActorCategory, ActorEntry, ActorRun, CoreResult, DirReference, FlagStore, FlagType,
    GeneratorConfig, MapId, ReferenceData, RevivalRun, UnitKind,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runs the generate command.
pub fn run(
    directory: &Path,
    actor: bool,
    revival: Option<(i32, i32)>,
    game_dir: Option<&Path>,
    prune: bool,
    force_big: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !directory.join("content").is_dir() {
        return Err(format!(
            "{} is not a mod directory (no content folder)",
            directory.display()
        )
        .into());
    }
    if !actor && revival.is_none() {
        return Err("nothing to generate: pass --actor and/or --revival".into());
    }

    bootup::bootstrap(directory, game_dir)?;
    let mut pack = BootupPack::load(directory)?;
    let config = build_config(revival, prune);
    let reference = ModReference::new(directory, game_dir);

    if revival.is_some() {
        run_revival(pack.store_mut(), &config, &reference, directory)?;
    }
    if actor {
        run_actor(pack.store_mut(), &config, directory)?;
    }

    print_change_report(pack.store());
    if pack.store().total_changes() > 0 {
        pack.write_back(force_big)?;
        println!("✓ Updated {}", bootup::bootup_path(directory).display());
    } else {
        println!("No changes to write.");
    }

    Ok(())
}

fn build_config(revival: Option<(i32, i32)>, prune: bool) -> GeneratorConfig {
    let mut config = GeneratorConfig::new().with_pruning(prune);
    if let Some((main, dungeon)) = revival {
        if main >= 0 {
            config = config.with_main_field_reset(main);
        }
        if dungeon >= 0 {
            config = config.with_dungeon_reset(dungeon);
        }
    }
    config
}

/// Reference data for one run: stock maps come from the game dump, actor
/// info from the mod when it ships its own, otherwise from the dump.
struct ModReference {
    mod_root: PathBuf,
    game: Option<DirReference>,
}

impl ModReference {
    fn new(mod_root: &Path, game_dir: Option<&Path>) -> Self {
        Self {
            mod_root: mod_root.to_path_buf(),
            game: game_dir.map(DirReference::new),
        }
    }
}

impl ReferenceData for ModReference {
    fn stock_map(&self, map: &MapId) -> CoreResult<Option<Value>> {
        match &self.game {
            Some(game) => game.stock_map(map),
            None => Ok(None),
        }
    }

    fn actor_info(&self) -> CoreResult<Option<Value>> {
        let path = self
            .mod_root
            .join("content")
            .join("Actor")
            .join("ActorInfo.product.byml");
        if path.is_file() {
            let bytes = fs::read(&path)?;
            let (value, _) = from_document_bytes(&bytes)?;
            return Ok(Some(value));
        }
        match &self.game {
            Some(game) => game.actor_info(),
            None => Ok(None),
        }
    }
}

fn run_revival(
    store: &mut FlagStore,
    config: &GeneratorConfig,
    reference: &ModReference,
    directory: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reconciling revival flags");
    let aoc_static = read_document(&aoc_static_path(directory))?;
    let units = collect_map_units(directory)?;

    let mut run = RevivalRun::new(store, config, reference, aoc_static.as_ref())?;

    // Markers first, so marker-discovered shrines inform object naming.
    if let Some(doc) = aoc_static.as_ref() {
        run.reconcile_markers(doc);
    }
    for (map, doc) in &units {
        if matches!(
            map,
            MapId::MainField {
                unit: UnitKind::Static,
                ..
            }
        ) {
            run.reconcile_markers(doc);
        }
    }

    for (map, doc) in &units {
        run.reconcile_unit(map, doc)?;
    }
    let removed = run.finish();
    info!(
        "Reconciled {} map units, removed {} stale flags",
        units.len(),
        removed
    );
    Ok(())
}

/// Every modded map unit, overworld sections first, then dungeon packs,
/// each half in a fixed order.
fn collect_map_units(directory: &Path) -> Result<Vec<(MapId, Value)>, Box<dyn std::error::Error>> {
    let mut units = Vec::new();

    let field_dir = directory.join("content").join("Map").join("MainField");
    if field_dir.is_dir() {
        let mut sections: Vec<String> = fs::read_dir(&field_dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        sections.sort();
        for section in sections {
            for kind in [UnitKind::Static, UnitKind::Dynamic] {
                let path = field_dir
                    .join(&section)
                    .join(format!("{section}_{}.mubin", kind.as_str()));
                if let Some(doc) = read_document(&path)? {
                    debug!("found map unit {}_{}", section, kind.as_str());
                    units.push((MapId::main_field(section.clone(), kind), doc));
                }
            }
        }
    }

    let pack_dir = directory.join("content").join("Pack");
    if pack_dir.is_dir() {
        let mut packs: Vec<PathBuf> = fs::read_dir(&pack_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension().is_some_and(|ext| ext == "pack")
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| stem.starts_with("Dungeon"))
            })
            .collect();
        packs.sort();
        for path in packs {
            let Some(name) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(str::to_string)
            else {
                continue;
            };
            let archive = Archive::from_bytes(&fs::read(&path)?)?;
            for kind in [UnitKind::Static, UnitKind::Dynamic] {
                let member = format!("Map/CDungeon/{name}/{name}_{}.mubin", kind.as_str());
                if let Some(bytes) = archive.get(&member) {
                    debug!("found dungeon unit {}_{}", name, kind.as_str());
                    let (doc, _) = from_document_bytes(bytes)?;
                    units.push((MapId::dungeon(name.clone(), kind), doc));
                }
            }
        }
    }

    Ok(units)
}

fn run_actor(
    store: &mut FlagStore,
    config: &GeneratorConfig,
    directory: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reconciling actor bundle flags");
    let mut packs = Vec::new();
    collect_actor_packs(&directory.join("content"), &mut packs)?;
    packs.sort();

    let mut run = ActorRun::new(store, config);
    let mut processed = 0usize;
    for path in &packs {
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let Some(mut entry) = ActorEntry::classify(stem) else {
            debug!("skipping unhandled actor {}", stem);
            continue;
        };
        if entry.category == ActorCategory::Npc {
            entry = entry.with_shop_items(read_shop_items(path, stem)?);
        }
        run.process(&entry);
        processed += 1;
    }
    let removed = run.finish();
    info!(
        "Processed {} actor packs, removed {} unclaimed flags",
        processed, removed
    );
    Ok(())
}

fn collect_actor_packs(dir: &Path, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_actor_packs(&path, found)?;
        } else if path.extension().is_some_and(|ext| ext == "bactorpack") {
            found.push(path);
        }
    }
    Ok(())
}

/// Wares sold by an NPC, read from the shop table inside its actor pack.
/// Actors without a shop table sell nothing.
fn read_shop_items(path: &Path, actor: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let archive = Archive::from_bytes(&fs::read(path)?)?;
    let member = format!("Actor/ShopData/{actor}.bshopdata");
    let Some(bytes) = archive.get(&member) else {
        return Ok(Vec::new());
    };
    let (doc, _) = from_document_bytes(bytes)?;
    let items = doc
        .get("ShopItems")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    Ok(items)
}

fn aoc_static_path(directory: &Path) -> PathBuf {
    directory
        .join("aoc")
        .join("0010")
        .join("Map")
        .join("MainField")
        .join("Static.mubin")
}

fn read_document(path: &Path) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let (doc, _) = from_document_bytes(&bytes)?;
    Ok(Some(doc))
}

fn print_change_report(store: &FlagStore) {
    let mut game = (0usize, 0usize, 0usize);
    let mut save = (0usize, 0usize, 0usize);
    for ftype in FlagType::ALL {
        let changes = store.change_set(ftype);
        if changes.total() > 0 {
            debug!(
                "{}: +{} ~{} -{}",
                ftype.as_str(),
                changes.added.len(),
                changes.modified.len(),
                changes.deleted.len()
            );
        }
        game.0 += changes.added.len();
        game.1 += changes.modified.len();
        game.2 += changes.deleted.len();
        let saved = store.save_change_set(ftype);
        save.0 += saved.added.len();
        save.1 += saved.modified.len();
        save.2 += saved.deleted.len();
    }

    println!("Flag Changes");
    println!("============");
    println!();
    println!("Game data:");
    println!("  New:      {}", game.0);
    println!("  Modified: {}", game.1);
    println!("  Deleted:  {}", game.2);
    println!();
    println!("Save data:");
    println!("  New:      {}", save.0);
    println!("  Modified: {}", save.1);
    println!("  Deleted:  {}", save.2);
    println!();
}

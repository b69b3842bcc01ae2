//! Shrine locations and nearest-shrine lookup.
//!
//! Naming mode 2 names flags after the shrine closest to the object, so
//! the generator needs a table of shrine positions. The stock table below
//! covers the shipped shrines; expansion content can add more through
//! [`ShrineLocator::discover_from_static`].

use crate::vector::Vec3;
use crate::world::location_markers;
use flagdb_codec::Value;

/// Positions of the shipped shrines, keyed by location identifier.
pub const VANILLA_SHRINES: &[(&str, Vec3)] = &[
    ("Dungeon000", Vec3::new(-3510.8, 194.2, 883.6)),
    ("Dungeon001", Vec3::new(3583.3, 323.8, -624.3)),
    ("Dungeon002", Vec3::new(1126.9, 261.9, 2051.2)),
    ("Dungeon003", Vec3::new(3702.3, 393.1, -727.3)),
    ("Dungeon004", Vec3::new(993.3, 311.4, -800.0)),
    ("Dungeon005", Vec3::new(1186.5, 476.2, -1302.9)),
    ("Dungeon006", Vec3::new(-1531.2, 445.6, 2301.4)),
    ("Dungeon007", Vec3::new(2491.1, 467.9, -2788.7)),
    ("Dungeon008", Vec3::new(-2525.6, 390.7, -987.7)),
    ("Dungeon009", Vec3::new(997.7, 193.5, 1286.3)),
    ("Dungeon010", Vec3::new(-1097.6, 231.7, -1157.7)),
    ("Dungeon011", Vec3::new(1746.0, 284.1, 1333.1)),
    ("Dungeon012", Vec3::new(2670.7, 480.5, -504.2)),
    ("Dungeon013", Vec3::new(3214.3, 549.4, -2165.6)),
    ("Dungeon014", Vec3::new(-2869.3, 490.9, -424.7)),
    ("Dungeon015", Vec3::new(-4427.3, 481.0, 2525.6)),
    ("Dungeon016", Vec3::new(-2858.6, 259.5, -3099.7)),
    ("Dungeon017", Vec3::new(-2461.7, 369.1, -3055.6)),
    ("Dungeon018", Vec3::new(4842.4, 232.5, 2806.6)),
    ("Dungeon019", Vec3::new(-3613.9, 196.7, -366.8)),
    ("Dungeon020", Vec3::new(3792.0, 407.3, 3408.8)),
    ("Dungeon021", Vec3::new(-2970.0, 540.5, 1252.4)),
    ("Dungeon022", Vec3::new(158.2, 406.7, 3528.8)),
    ("Dungeon023", Vec3::new(1596.3, 365.6, 3464.6)),
    ("Dungeon024", Vec3::new(245.6, 154.0, 3372.9)),
    ("Dungeon025", Vec3::new(-2895.6, 275.5, -3142.8)),
    ("Dungeon026", Vec3::new(2880.7, 532.7, -2266.8)),
    ("Dungeon027", Vec3::new(-1569.4, 466.5, 3192.1)),
    ("Dungeon028", Vec3::new(3601.0, 164.8, -2852.8)),
    ("Dungeon029", Vec3::new(162.5, 238.5, 2730.2)),
    ("Dungeon030", Vec3::new(1150.3, 447.1, -1864.1)),
    ("Dungeon031", Vec3::new(3907.4, 336.4, -3781.4)),
    ("Dungeon032", Vec3::new(-2014.7, 470.3, -1758.4)),
    ("Dungeon033", Vec3::new(257.9, 254.8, -1257.5)),
    ("Dungeon034", Vec3::new(2934.7, 313.6, -751.0)),
    ("Dungeon035", Vec3::new(4139.8, 527.8, 1088.0)),
    ("Dungeon036", Vec3::new(-2253.1, 464.0, 1572.8)),
    ("Dungeon037", Vec3::new(-2861.3, 220.3, -1873.8)),
    ("Dungeon038", Vec3::new(3211.1, 498.8, 1498.3)),
    ("Dungeon039", Vec3::new(-1474.9, 496.1, -924.3)),
    ("Dungeon040", Vec3::new(-1174.3, 556.2, -3480.3)),
    ("Dungeon041", Vec3::new(129.1, 389.5, 3676.0)),
    ("Dungeon042", Vec3::new(-4547.7, 431.0, -2557.5)),
    ("Dungeon043", Vec3::new(3372.4, 473.1, -3012.6)),
    ("Dungeon044", Vec3::new(3834.1, 245.9, -3013.3)),
    ("Dungeon045", Vec3::new(1326.1, 477.9, 3715.2)),
    ("Dungeon046", Vec3::new(2799.6, 349.5, 374.2)),
    ("Dungeon047", Vec3::new(437.1, 221.2, -2404.0)),
    ("Dungeon048", Vec3::new(3349.1, 279.0, -2944.1)),
    ("Dungeon049", Vec3::new(2934.4, 346.1, -2735.9)),
    ("Dungeon050", Vec3::new(-1750.2, 184.8, -829.4)),
    ("Dungeon051", Vec3::new(-1094.9, 344.0, 2771.0)),
    ("Dungeon052", Vec3::new(-3934.3, 208.6, -666.8)),
    ("Dungeon053", Vec3::new(4070.0, 523.9, -242.9)),
    ("Dungeon054", Vec3::new(1101.2, 234.5, -905.9)),
    ("Dungeon055", Vec3::new(165.9, 317.1, 1462.7)),
    ("Dungeon056", Vec3::new(-2734.2, 469.3, -705.2)),
    ("Dungeon057", Vec3::new(-2563.6, 461.5, 2258.3)),
    ("Dungeon058", Vec3::new(4200.7, 423.8, -3532.1)),
    ("Dungeon059", Vec3::new(-3517.9, 162.8, -1462.7)),
    ("Dungeon060", Vec3::new(2283.5, 391.7, 2610.5)),
    ("Dungeon061", Vec3::new(4356.1, 117.4, -2383.2)),
    ("Dungeon062", Vec3::new(-1737.1, 227.2, 1680.8)),
    ("Dungeon063", Vec3::new(-4283.3, 238.0, -2916.4)),
    ("Dungeon064", Vec3::new(1748.7, 483.5, 434.2)),
    ("Dungeon065", Vec3::new(2489.9, 459.9, 1651.2)),
    ("Dungeon066", Vec3::new(2380.8, 391.3, -1512.6)),
    ("Dungeon067", Vec3::new(3906.4, 107.1, 1961.2)),
    ("Dungeon068", Vec3::new(-3552.7, 480.1, 770.9)),
    ("Dungeon069", Vec3::new(-1846.8, 451.0, -2120.2)),
    ("Dungeon070", Vec3::new(4582.4, 432.5, 203.0)),
    ("Dungeon071", Vec3::new(948.0, 123.5, 1123.5)),
    ("Dungeon072", Vec3::new(-2792.4, 466.1, 1817.4)),
    ("Dungeon073", Vec3::new(4835.2, 240.8, -2616.7)),
    ("Dungeon074", Vec3::new(3312.4, 350.0, 1681.9)),
    ("Dungeon075", Vec3::new(-580.0, 503.6, 2903.0)),
    ("Dungeon076", Vec3::new(4705.3, 167.8, -2929.2)),
    ("Dungeon077", Vec3::new(2489.9, 211.9, 2792.1)),
    ("Dungeon078", Vec3::new(-2347.8, 302.9, -3743.7)),
    ("Dungeon079", Vec3::new(-3235.6, 300.8, -428.5)),
    ("Dungeon080", Vec3::new(1412.5, 337.7, 3735.0)),
    ("Dungeon081", Vec3::new(898.6, 182.3, -3518.8)),
    ("Dungeon082", Vec3::new(3580.5, 357.2, -3191.5)),
    ("Dungeon083", Vec3::new(-1769.3, 430.8, -452.1)),
    ("Dungeon084", Vec3::new(-2018.6, 250.3, -3836.6)),
    ("Dungeon085", Vec3::new(-1883.4, 144.4, -3402.2)),
    ("Dungeon086", Vec3::new(184.9, 389.6, 2468.5)),
    ("Dungeon087", Vec3::new(873.3, 402.8, -1065.2)),
    ("Dungeon088", Vec3::new(-2464.0, 116.2, 3423.1)),
    ("Dungeon089", Vec3::new(-1115.0, 444.3, -1140.3)),
    ("Dungeon090", Vec3::new(-2461.4, 308.6, 2316.0)),
    ("Dungeon091", Vec3::new(2684.0, 120.7, -2252.4)),
    ("Dungeon092", Vec3::new(228.9, 513.5, 1381.6)),
    ("Dungeon093", Vec3::new(-582.0, 330.0, -1344.5)),
    ("Dungeon094", Vec3::new(-3281.6, 558.7, -3870.9)),
    ("Dungeon095", Vec3::new(-4038.3, 172.0, -2826.2)),
    ("Dungeon096", Vec3::new(-3977.4, 211.2, -1751.4)),
    ("Dungeon097", Vec3::new(-2012.0, 222.3, -1393.8)),
    ("Dungeon098", Vec3::new(-2478.2, 255.9, 1662.5)),
    ("Dungeon099", Vec3::new(-1794.6, 436.5, 2290.9)),
    ("Dungeon100", Vec3::new(-3253.2, 175.8, 3245.5)),
    ("Dungeon101", Vec3::new(2467.3, 485.9, 2059.6)),
    ("Dungeon102", Vec3::new(1041.6, 203.2, -3716.7)),
    ("Dungeon103", Vec3::new(-1051.6, 333.4, 3077.5)),
    ("Dungeon104", Vec3::new(-2480.3, 547.7, -1621.1)),
    ("Dungeon105", Vec3::new(-2682.0, 456.0, -1031.0)),
    ("Dungeon106", Vec3::new(-4552.0, 274.3, 3230.4)),
    ("Dungeon107", Vec3::new(4876.9, 481.1, 41.6)),
    ("Dungeon108", Vec3::new(-4726.9, 517.1, 2497.0)),
    ("Dungeon109", Vec3::new(-2554.5, 558.2, -582.6)),
    ("Dungeon110", Vec3::new(4005.3, 135.0, 2844.1)),
    ("Dungeon111", Vec3::new(-3167.5, 540.3, -66.0)),
    ("Dungeon112", Vec3::new(4797.8, 425.2, -78.5)),
    ("Dungeon113", Vec3::new(2629.7, 244.8, 3782.6)),
    ("Dungeon114", Vec3::new(-349.1, 329.7, 880.1)),
    ("Dungeon115", Vec3::new(1950.1, 207.8, 1889.5)),
    ("Dungeon116", Vec3::new(2259.2, 544.4, 2120.4)),
    ("Dungeon117", Vec3::new(3848.1, 282.7, -46.5)),
    ("Dungeon118", Vec3::new(1244.6, 468.5, -2723.1)),
    ("Dungeon119", Vec3::new(-4862.0, 524.3, 2327.2)),
    ("Dungeon120", Vec3::new(86.0, 315.7, 3704.2)),
    ("Dungeon121", Vec3::new(-1182.4, 137.8, -3240.9)),
    ("Dungeon122", Vec3::new(295.0, 449.3, 1945.1)),
    ("Dungeon123", Vec3::new(685.1, 491.2, 3011.7)),
    ("Dungeon124", Vec3::new(1131.3, 351.7, -2113.0)),
    ("Dungeon125", Vec3::new(-4756.5, 454.2, -627.2)),
    ("Dungeon126", Vec3::new(4061.8, 468.8, 3292.1)),
    ("Dungeon127", Vec3::new(3896.5, 345.2, 1115.9)),
    ("Dungeon128", Vec3::new(3078.4, 360.2, -897.7)),
    ("Dungeon129", Vec3::new(3597.8, 497.4, 331.4)),
    ("Dungeon130", Vec3::new(1711.3, 440.6, -1389.3)),
    ("Dungeon131", Vec3::new(-1203.3, 241.4, 1039.4)),
    ("Dungeon132", Vec3::new(431.1, 541.1, -1887.8)),
    ("Dungeon133", Vec3::new(-1102.7, 260.4, 2968.1)),
    ("Dungeon134", Vec3::new(2730.0, 334.0, -3616.6)),
    ("Dungeon135", Vec3::new(-1922.1, 460.8, -2086.1)),
];

/// Whether a location identifier names a shipped shrine.
#[must_use]
pub fn is_vanilla_shrine(name: &str) -> bool {
    VANILLA_SHRINES.iter().any(|(shrine, _)| *shrine == name)
}

/// A queryable set of shrine positions.
#[derive(Debug, Clone)]
pub struct ShrineLocator {
    entries: Vec<(String, Vec3)>,
}

impl ShrineLocator {
    /// Builds a locator over the shipped shrines.
    #[must_use]
    pub fn vanilla() -> Self {
        Self {
            entries: VANILLA_SHRINES
                .iter()
                .map(|(name, pos)| ((*name).to_string(), *pos))
                .collect(),
        }
    }

    /// Whether the locator knows a shrine by this identifier.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(shrine, _)| shrine == name)
    }

    /// Number of known shrines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the locator is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds a shrine position, ignoring identifiers already known.
    pub fn add(&mut self, name: &str, position: Vec3) {
        if !self.contains(name) {
            self.entries.push((name.to_string(), position));
        }
    }

    /// Scans a static document for dungeon markers and adds any shrine
    /// it does not know yet. Markers without a position are skipped.
    pub fn discover_from_static(&mut self, static_doc: &Value) {
        for marker in location_markers(static_doc) {
            if marker.icon() != Some("Dungeon") {
                continue;
            }
            let Some(message_id) = marker.message_id() else {
                continue;
            };
            let Some(position) = marker.location() else {
                continue;
            };
            self.add(message_id, position);
        }
    }

    /// The identifier of the shrine nearest to `position`.
    ///
    /// Distance ties keep the earlier entry, so lookups are deterministic.
    /// Returns `None` only when the locator is empty.
    #[must_use]
    pub fn nearest(&self, position: Vec3) -> Option<&str> {
        let mut best: Option<(&str, f32)> = None;
        for (name, shrine_pos) in &self.entries {
            let distance = position.distance(*shrine_pos);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((name, distance)),
            }
        }
        best.map(|(name, _)| name)
    }
}

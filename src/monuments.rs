use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::host::WorldEntity;
use crate::transform::WorldTransform;

/// Closed set of landmark categories shown on the minimap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonumentKind {
    Lighthouse,
    CaveSmall,
    CaveMedium,
    CaveLarge,
    PowerSubstationSmall,
    PowerSubstationBig,
    Warehouse,
    Sphere,
    Satellite,
    Radtown,
    Powerplant,
    Trainyard,
    Airfield,
    MilitaryTunnel,
    WaterTreatmentPlant,
}

/// Substring patterns in priority order. Several can match one name;
/// the first one wins.
pub const PATTERNS: &[(&str, MonumentKind)] = &[
    ("lighthouse", MonumentKind::Lighthouse),
    ("cave_small", MonumentKind::CaveSmall),
    ("cave_medium", MonumentKind::CaveMedium),
    ("cave_large", MonumentKind::CaveLarge),
    ("power_sub_small", MonumentKind::PowerSubstationSmall),
    ("power_sub_big", MonumentKind::PowerSubstationBig),
    ("warehouse", MonumentKind::Warehouse),
    ("sphere_tank", MonumentKind::Sphere),
    ("satellite", MonumentKind::Satellite),
    ("radtown_small", MonumentKind::Radtown),
    ("powerplant", MonumentKind::Powerplant),
    ("trainyard", MonumentKind::Trainyard),
    ("airfield", MonumentKind::Airfield),
    ("military_tunnel", MonumentKind::MilitaryTunnel),
    ("water_treatment_plant", MonumentKind::WaterTreatmentPlant),
];

/// Names containing this but no known pattern are malformed monuments.
const MONUMENT_MARKER: &str = "monuments";

impl MonumentKind {
    pub fn label(self) -> &'static str {
        match self {
            MonumentKind::Lighthouse => "Lighthouse",
            MonumentKind::CaveSmall => "Cave (Small)",
            MonumentKind::CaveMedium => "Cave (Medium)",
            MonumentKind::CaveLarge => "Cave (Large)",
            MonumentKind::PowerSubstationSmall => "Power Substation (Small)",
            MonumentKind::PowerSubstationBig => "Power Substation (Big)",
            MonumentKind::Warehouse => "Warehouse",
            MonumentKind::Sphere => "Sphere",
            MonumentKind::Satellite => "Satellite",
            MonumentKind::Radtown => "Radtown",
            MonumentKind::Powerplant => "Powerplant",
            MonumentKind::Trainyard => "Trainyard",
            MonumentKind::Airfield => "Airfield",
            MonumentKind::MilitaryTunnel => "Military Tunnel",
            MonumentKind::WaterTreatmentPlant => "Water Treatment Plant",
        }
    }
}

/// Outcome of matching one entity name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Known(MonumentKind),
    /// Tagged as a monument but of no known kind.
    Malformed,
    Unrecognized,
}

/// Case-insensitive, first pattern in [`PATTERNS`] order wins.
pub fn classify(name: &str) -> Classification {
    let lower = name.to_lowercase();
    PATTERNS
        .iter()
        .find(|(pat, _)| lower.contains(pat))
        .map(|&(_, kind)| Classification::Known(kind))
        .unwrap_or(if lower.contains(MONUMENT_MARKER) {
            Classification::Malformed
        } else {
            Classification::Unrecognized
        })
}

/// A landmark in map pixel coordinates. Field names are the wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMonument {
    #[serde(rename = "X")]
    pub x: i32,
    #[serde(rename = "Y")]
    pub y: i32,
    #[serde(rename = "Name")]
    pub name: String,
}

/// Keep the entities that match a known category, in input order.
pub fn classify_monuments(entities: &[WorldEntity], transform: &WorldTransform) -> Vec<MapMonument> {
    info!("Found {} monuments.", entities.len());

    entities
        .iter()
        .filter_map(|e| match classify(&e.name) {
            Classification::Known(kind) => {
                let (x, y) = transform.world_to_map(e.position.x, e.position.z);
                Some(MapMonument {
                    x,
                    y,
                    name: kind.label().to_string(),
                })
            }
            Classification::Malformed => {
                warn!("Invalid monument detected: {}", e.name.to_lowercase());
                None
            }
            Classification::Unrecognized => {
                warn!("Monument not detected: {}", e.name.to_lowercase());
                None
            }
        })
        .collect()
}

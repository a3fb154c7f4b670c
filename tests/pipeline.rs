use minimap::config::{Params, WATER_COLOR};
use minimap::error::{HostError, MapError};
use minimap::grid::Grid;
use minimap::host::{TerrainSampler, WorldEntity, WorldHost, WorldPos};
use minimap::package::{MapPayload, UploadForm, package};
use minimap::synthetic::SyntheticWorld;

/// Hand-built world: a west half at sea level and an east half of hills.
struct TwoHalves {
    height: Grid<f32>,
    entities: Vec<WorldEntity>,
    origin: f32,
    fail_alpha: bool,
}

impl TwoHalves {
    fn new(n: usize) -> Self {
        let height = Grid::from_fn(n + 1, n + 1, |x, y| {
            if x < n / 2 { 0.0 } else { 200.0 + (y % 3) as f32 * 50.0 }
        });
        let entities = vec![
            WorldEntity::new("AirfieldTestLarge", WorldPos::new(250.0, 0.0, 0.0)),
            WorldEntity::new("cave_small_1", WorldPos::new(-250.0, 3.0, 250.0)),
            WorldEntity::new("xyz_unknown", WorldPos::new(0.0, 0.0, 0.0)),
        ];
        Self {
            height,
            entities,
            origin: -500.0,
            fail_alpha: false,
        }
    }
}

impl TerrainSampler for TwoHalves {
    fn surface_color(&self, _pos: WorldPos, _mask: i32) -> Result<[f32; 3], HostError> {
        Ok([1.0, 1.0, 0.0])
    }

    fn alpha(&self, _x: usize, _y: usize) -> Result<f32, HostError> {
        if self.fail_alpha {
            Err(HostError::new("alpha map not loaded"))
        } else {
            Ok(1.0)
        }
    }

    fn water_depth(&self, _pos: WorldPos) -> Result<f32, HostError> {
        // Threshold 0.1 after the default bias.
        Ok(-0.4)
    }
}

impl WorldHost for TwoHalves {
    fn heightfield(&self) -> &Grid<f32> {
        &self.height
    }

    fn world_size(&self) -> f32 {
        1000.0
    }

    fn world_origin(&self) -> f32 {
        self.origin
    }

    fn max_elevation(&self) -> f32 {
        1000.0
    }

    fn seed(&self) -> i32 {
        123456
    }

    fn protocol(&self) -> String {
        "2161.245.1".into()
    }

    fn entities(&self) -> Vec<WorldEntity> {
        self.entities.clone()
    }
}

#[test]
fn water_and_land_split_along_the_coast() {
    let world = TwoHalves::new(16);
    let (result, timings) = minimap::generate(&world, &Params::default()).unwrap();

    assert_eq!((result.width, result.height), (16, 16));
    assert_eq!(result.rgba.len(), 16 * 16 * 4);
    for y in 0..16 {
        for x in 0..16 {
            let expected = if x < 8 { WATER_COLOR } else { [255, 255, 0, 255] };
            assert_eq!(result.pixel(x, y), expected, "pixel ({x}, {y})");
        }
    }
    assert!(timings.iter().any(|t| t.name == "render"));
    assert_eq!(timings.last().map(|t| t.name), Some("TOTAL"));
}

#[test]
fn landmarks_are_classified_and_placed() {
    let world = TwoHalves::new(16);
    let (result, _) = minimap::generate(&world, &Params::default()).unwrap();

    let names: Vec<_> = result.monuments.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["Airfield", "Cave (Small)"]);
    // East of center on the middle row; north-west quadrant.
    assert_eq!((result.monuments[0].x, result.monuments[0].y), (12, 8));
    assert_eq!((result.monuments[1].x, result.monuments[1].y), (4, 4));
}

#[test]
fn corner_origin_keeps_landmarks_on_the_map() {
    let mut world = TwoHalves::new(16);
    world.origin = 0.0;
    world.entities = vec![
        WorldEntity::new("AirfieldTestLarge", WorldPos::new(750.0, 0.0, 500.0)),
        WorldEntity::new("cave_small_1", WorldPos::new(250.0, 3.0, 750.0)),
    ];

    let (result, _) = minimap::generate(&world, &Params::default()).unwrap();

    let placed: Vec<_> = result.monuments.iter().map(|m| (m.x, m.y)).collect();
    assert_eq!(placed, [(12, 8), (4, 4)]);
}

#[test]
fn host_failures_abort_the_run() {
    let mut world = TwoHalves::new(8);
    world.fail_alpha = true;
    let err = minimap::generate(&world, &Params::default()).err().unwrap();
    assert!(matches!(err, MapError::Host(_)));
}

#[test]
fn tiny_heightfield_is_a_precondition_error() {
    let mut world = TwoHalves::new(8);
    world.height = Grid::new(1, 1);
    assert!(matches!(
        minimap::generate(&world, &Params::default()),
        Err(MapError::HeightfieldTooSmall { w: 1, h: 1 })
    ));
}

#[test]
fn packaged_payload_round_trips() {
    let world = SyntheticWorld::new(2024, 2500.0, 64).unwrap().with_protocol("2163.250.1");
    let (result, _) = minimap::generate(&world, &Params::default()).unwrap();
    let monuments = result.monuments.clone();
    let rgba = result.rgba.clone();

    let form = package(result).unwrap().to_form();
    let wire = serde_json::to_string(&form).unwrap();
    let value: serde_json::Value = serde_json::from_str(&wire).unwrap();
    for key in ["protocol", "size", "seed", "monuments", "filename", "data"] {
        assert!(value.get(key).is_some(), "missing field {key}");
    }
    assert_eq!(value["filename"], "map.png");

    let back: UploadForm = serde_json::from_str(&wire).unwrap();
    let payload = MapPayload::from_form(&back).unwrap();
    assert_eq!(payload.seed, 2024);
    assert_eq!(payload.size, 2500);
    assert_eq!(payload.protocol, "2163.250.1");
    assert_eq!(payload.file_stem(), "2024_2500_2163.250.1");
    assert_eq!(payload.decode_monuments().unwrap(), monuments);

    let img = payload.decode_image_sized(64, 64).unwrap();
    assert_eq!(img.into_raw(), rgba);
}

#[test]
fn synthetic_world_has_land_and_sea() {
    let world = SyntheticWorld::new(7, 3000.0, 96).unwrap();
    let (result, _) = minimap::generate(&world, &Params::default()).unwrap();

    let water = result.rgba.chunks(4).filter(|px| *px == WATER_COLOR).count();
    let total = 96 * 96;
    assert!(water > 0, "no water");
    assert!(water < total, "no land");

    let (again, _) = minimap::generate(&world, &Params::default()).unwrap();
    assert_eq!(result.rgba, again.rgba);
}

#[test]
fn negative_seed_flows_through_to_the_payload() {
    let world = SyntheticWorld::new(-31337, 1500.0, 32).unwrap();
    let (result, _) = minimap::generate(&world, &Params::default()).unwrap();
    assert_eq!(result.seed, -31337);

    let payload = package(result).unwrap();
    assert_eq!(payload.file_stem(), "-31337_1500_synthetic.1");
}

/// Player physics against small hand-built worlds
use glam::{IVec3, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use softvox::*;

const DT: f32 = 1.0 / 60.0;
// Resting height carries the collision skin.
const REST_TOLERANCE: f32 = 2e-3;

fn run(player: &mut PlayerController, world: &World, input: TickInput, ticks: usize) {
    for _ in 0..ticks {
        player.tick(&input, world, DT);
    }
}

#[test]
fn landing_rests_on_block_top_from_any_height() {
    let world = World::from_blocks([(IVec3::ZERO, BlockType::Grass)]);
    let config = PhysicsConfig::default();
    let rest = 0.5 + config.eye_offset;
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..16 {
        let drop = rng.gen_range(0.05..25.0);
        let mut player = PlayerController::new(Vec3::new(0.0, rest + drop, 0.0), config.clone());
        run(&mut player, &world, TickInput::default(), 400);

        assert_eq!(player.vertical_velocity(), 0.0, "drop {drop}");
        assert!(player.on_ground(), "drop {drop}");
        let y = player.position().y;
        assert!((y - rest).abs() < REST_TOLERANCE, "drop {drop}: rested at {y}");
    }
}

#[test]
fn resting_player_stays_put() {
    let world = World::from_blocks([(IVec3::ZERO, BlockType::Stone)]);
    let mut player = PlayerController::spawn_above(&world, 0, 0, PhysicsConfig::default());
    let start = player.position();
    run(&mut player, &world, TickInput::default(), 120);
    assert!((player.position() - start).length() < 1e-4);
    assert!(player.on_ground());
}

#[test]
fn diagonal_walk_slides_along_a_wall() {
    // Floor at y = 0 and a two-high wall on the x = 3 plane.
    let mut blocks = Vec::new();
    for x in -3..=6 {
        for z in -3..=8 {
            blocks.push((IVec3::new(x, 0, z), BlockType::Stone));
        }
    }
    for z in -3..=8 {
        blocks.push((IVec3::new(3, 1, z), BlockType::Stone));
        blocks.push((IVec3::new(3, 2, z), BlockType::Stone));
    }
    let world = World::from_blocks(blocks);

    let config = PhysicsConfig::default();
    let mut player = PlayerController::spawn_above(&world, 0, 0, config.clone());
    player.set_orientation(std::f32::consts::FRAC_PI_4, 0.0);

    let forward = TickInput {
        forward: true,
        ..Default::default()
    };
    run(&mut player, &world, forward, 60);

    let pos = player.position();
    let wall_limit = 2.5 - config.half_width - config.skin;
    assert!((pos.x - wall_limit).abs() < 1e-4, "x = {}", pos.x);
    let expected_z = 60.0 * DT * config.move_speed * std::f32::consts::FRAC_1_SQRT_2;
    assert!((pos.z - expected_z).abs() < 1e-3, "z = {} expected {expected_z}", pos.z);
    assert!(player.on_ground());
}

#[test]
fn walking_off_a_ledge_starts_a_fall() {
    let world = World::from_blocks([(IVec3::ZERO, BlockType::Grass)]);
    let mut player = PlayerController::spawn_above(&world, 0, 0, PhysicsConfig::default());
    run(&mut player, &world, TickInput::default(), 2);
    assert!(player.on_ground());

    // Default yaw faces +Z.
    let forward = TickInput {
        forward: true,
        ..Default::default()
    };
    run(&mut player, &world, forward, 30);
    assert!(!player.on_ground());
    assert!(player.vertical_velocity() < 0.0);
    assert!(player.position().z > 0.8);
}

#[test]
fn jump_arcs_back_onto_the_block() {
    let world = World::from_blocks([(IVec3::ZERO, BlockType::Grass)]);
    let config = PhysicsConfig::default();
    let mut player = PlayerController::spawn_above(&world, 0, 0, config.clone());
    run(&mut player, &world, TickInput::default(), 1);

    let jump = TickInput {
        jump: true,
        ..Default::default()
    };
    player.tick(&jump, &world, DT);
    let mut peak = player.position().y;
    for _ in 0..120 {
        player.tick(&TickInput::default(), &world, DT);
        peak = peak.max(player.position().y);
    }
    let rest = 0.5 + config.eye_offset;
    // v^2 / 2g = 1.6 above the resting height
    assert!(peak > rest + 1.4 && peak < rest + 1.7, "peak {peak}");
    assert!((player.position().y - rest).abs() < REST_TOLERANCE);
    assert!(player.on_ground());
}

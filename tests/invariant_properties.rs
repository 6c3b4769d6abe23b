//! Property tests for obstacle spacing and hp bookkeeping

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use clashrun::core::config::{MapConfig, ObstacleConfig, UnitConfig};
use clashrun::core::types::{EntityId, Role, Vec2};
use clashrun::entity::unit::Entity;
use clashrun::world::obstacles::ObstacleField;

#[derive(Debug, Clone)]
enum HpOp {
    Damage(f32),
    Heal(f32),
}

fn hp_op() -> impl Strategy<Value = HpOp> {
    prop_oneof![
        (0.0f32..60.0).prop_map(HpOp::Damage),
        (0.0f32..60.0).prop_map(HpOp::Heal),
    ]
}

proptest! {
    #[test]
    fn obstacles_respect_spacing(
        seed in any::<u64>(),
        units in prop::collection::vec((-1000.0f32..1000.0, -1000.0f32..1000.0), 0..6),
    ) {
        let config = ObstacleConfig::default();
        let units: Vec<Vec2> = units.into_iter().map(|(x, y)| Vec2::new(x, y)).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let field = ObstacleField::generate(&config, &MapConfig::default(), &units, &mut rng);
        let obstacles = field.obstacles();

        prop_assert!(field.len() + field.shortfall() >= config.count_min as usize);
        prop_assert!(field.len() + field.shortfall() <= config.count_max as usize);
        for (i, a) in obstacles.iter().enumerate() {
            prop_assert!(a.size.x >= config.min_width && a.size.x <= config.max_width);
            prop_assert!(a.size.y >= config.min_height && a.size.y <= config.max_height);
            for unit in &units {
                prop_assert!(a.center.distance(*unit) >= config.min_distance_from_units);
            }
            for b in &obstacles[i + 1..] {
                prop_assert!(a.center.distance(b.center) >= config.min_distance);
            }
        }
    }

    #[test]
    fn zero_radius_at_any_obstacle_center_collides(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = ObstacleField::generate(
            &ObstacleConfig::default(),
            &MapConfig::default(),
            &[Vec2::ZERO],
            &mut rng,
        );
        for obstacle in field.obstacles() {
            prop_assert!(field.collides(obstacle.center, 0.0));
        }
    }

    #[test]
    fn heals_never_exceed_max_hp(ops in prop::collection::vec(hp_op(), 1..40)) {
        let mut unit = Entity::ally(EntityId(0), Role::Archer, Vec2::ZERO, &UnitConfig::ally_archer());
        let mut was_dead = false;

        for op in ops {
            let before = unit.hp;
            match op {
                HpOp::Damage(amount) => {
                    unit.apply_damage(amount);
                    prop_assert!(unit.hp <= before);
                }
                HpOp::Heal(amount) => {
                    unit.heal(amount);
                    if was_dead {
                        prop_assert_eq!(unit.hp, before);
                    }
                }
            }
            prop_assert!(unit.hp <= unit.max_hp);
            was_dead = !unit.is_alive();
        }
    }
}

//! Orbiters approach from far, retreat from too close, and circle inside
//! the hysteresis band.

use data_runtime::templates::MovePattern;
use glam::Vec2;
use server_core::behavior::step_enemy;
use sim_core::enemy::Enemy;

fn orbiter(pos: Vec2) -> Enemy {
    let db = data_runtime::templates::TemplateDb::builtin();
    let mut e = Enemy::from_template(
        "orb1".into(),
        db.get("Hobgoblin Archer").expect("archer"),
        pos,
    );
    e.pattern = MovePattern::Orbiter { orbit_radius: 300.0 };
    e
}

#[test]
fn far_orbiter_approaches() {
    let mut e = orbiter(Vec2::new(600.0, 0.0));
    step_enemy(&mut e, &[Vec2::ZERO], 0.1);
    assert!(e.pos.x < 600.0);
    assert_eq!(e.pos.y, 0.0);
}

#[test]
fn close_orbiter_retreats() {
    let mut e = orbiter(Vec2::new(100.0, 0.0));
    step_enemy(&mut e, &[Vec2::ZERO], 0.1);
    assert!(e.pos.x > 100.0);
}

#[test]
fn in_band_orbiter_moves_tangentially_and_keeps_distance() {
    let mut e = orbiter(Vec2::new(300.0, 0.0));
    let d0 = e.pos.length();
    step_enemy(&mut e, &[Vec2::ZERO], 0.05);
    // Tangential step: radial distance barely changes, heading is
    // perpendicular to the radius.
    assert!(e.pos.y.abs() > 0.0, "moved along the tangent");
    assert!((e.pos.length() - d0).abs() < 1.0);
}

//! End-to-end revive: contact damage kills a follower, the death reaches
//! the session roster, a teammate casts the life+lightning combo, and the
//! named target comes back at half health.

use data_runtime::elements::ElementId;
use data_runtime::level::Level;
use data_runtime::templates::TemplateDb;
use glam::Vec2;
use manastorm::runtime::Participant;
use net_core::hub::SessionHub;
use sim_core::enemy::Enemy;
use sim_core::projectile::ProjKind;

const DT: f32 = 1.0 / 60.0;

fn round(hub: &mut SessionHub, host: &mut Participant, guest: &mut Participant) {
    host.tick(DT);
    guest.tick(DT);
    hub.pump();
}

#[test]
fn downed_follower_is_revived_at_half_health() {
    let mut hub = SessionHub::new();
    let mut host = Participant::with_data(TemplateDb::builtin(), Level::builtin_arena(), 1);
    let mut guest = Participant::with_data(TemplateDb::builtin(), Level::builtin_arena(), 2);
    host.spawner.spawn_chance = 0.0;
    guest.spawner.spawn_chance = 0.0;
    let (_hid, ht) = hub.join();
    host.connect(ht);
    let (_gid, gt) = hub.join();
    guest.connect(gt);
    hub.start();
    round(&mut hub, &mut host, &mut guest);
    round(&mut hub, &mut host, &mut guest);

    // Park the guest away from the host and drop an enemy on top of it.
    guest.world.player.pos = Vec2::new(500.0, 500.0);
    host.world.enemies.push(Enemy::from_template(
        "biter".into(),
        TemplateDb::builtin().get("Goblin").expect("goblin"),
        Vec2::new(500.0, 500.0),
    ));
    guest.world.player.hp = 0.4; // one contact tick from death
    round(&mut hub, &mut host, &mut guest);
    round(&mut hub, &mut host, &mut guest);
    assert!(
        !guest.world.player.alive(),
        "contact damage should have killed the guest"
    );

    // Host casts the revive combo; extra elements don't break it.
    host.enqueue_element(ElementId::Earth);
    host.enqueue_element(ElementId::Life);
    host.enqueue_element(ElementId::Lightning);
    host.cast();
    assert!(
        host.world
            .projectiles
            .iter()
            .any(|p| p.kind == ProjKind::Burst),
        "revive flash spawned locally"
    );
    assert!(host.world.queue.is_empty());

    hub.pump();
    guest.tick(DT);
    assert!(guest.world.player.alive());
    assert!(
        guest.world.player.hp > guest.world.player.max_hp * 0.5 - 1.0,
        "revived at half health (minus at most a contact tick)"
    );
}

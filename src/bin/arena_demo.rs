//! Headless loopback demo: two participants, one hub, auto-fire combat,
//! and a mid-run host drop to exercise migration.
//!
//! Usage: cargo run --bin arena_demo -- [--ticks N] [--seed S]

use std::env;

use manastorm::autofire::AutoFire;
use manastorm::runtime::Participant;
use manastorm::telemetry;
use net_core::hub::SessionHub;

fn arg_value(args: &[String], key: &str) -> Option<u64> {
    args.iter()
        .skip_while(|a| a.as_str() != key)
        .nth(1)
        .and_then(|v| v.parse().ok())
}

fn main() -> anyhow::Result<()> {
    let cfg = data_runtime::configs::telemetry::load_default()?;
    let _guard = telemetry::init_telemetry(&cfg)?;

    let args: Vec<String> = env::args().collect();
    let ticks = arg_value(&args, "--ticks").unwrap_or(1800);
    let seed = arg_value(&args, "--seed").unwrap_or(7);
    let dt = 1.0f32 / 60.0;

    let mut hub = SessionHub::new();
    let mut host = Participant::new(seed)?;
    let mut guest = Participant::new(seed + 1)?;
    let (host_id, host_transport) = hub.join();
    host.connect(host_transport);
    let (guest_id, guest_transport) = hub.join();
    guest.connect(guest_transport);
    hub.start();

    println!("[demo] host={host_id} guest={guest_id}, {ticks} ticks at 60 Hz");

    let mut host_fire = AutoFire::new(30);
    let mut guest_fire = AutoFire::new(30);
    let drop_at = ticks / 2;

    for t in 0..ticks {
        hub.pump();

        if t == drop_at {
            // The authoritative participant vanishes; the hub promotes the
            // guest and ships it the cached enemy snapshot.
            hub.leave(host_id);
            host.disconnect();
            println!("[demo] tick {t}: host dropped, migrating authority");
        }

        // Wander so casts have a direction and walls get exercised.
        let phase = t as f32 * 0.01;
        host.world.player.vel =
            glam::Vec2::new(phase.cos(), phase.sin()) * host.world.player.speed * 0.4;
        guest.world.player.vel =
            glam::Vec2::new((-phase).cos(), (-phase).sin()) * guest.world.player.speed * 0.4;

        host.tick(dt);
        guest.tick(dt);
        host_fire.step(&mut host);
        guest_fire.step(&mut guest);

        if t % 300 == 0 {
            for (label, p) in [("host", &host), ("guest", &guest)] {
                println!(
                    "[demo] t={t} {label}: role={:?} enemies={} cr={}/{} score={} hp={:.0} {}",
                    p.session.authority(),
                    p.world.enemies.len(),
                    p.world.current_cr,
                    sim_core::world::MAX_CR,
                    p.world.score,
                    p.world.player.hp,
                    p.status
                        .last_error
                        .as_deref()
                        .map(|e| format!("ERROR: {e}"))
                        .unwrap_or_default(),
                );
            }
        }
    }

    println!(
        "[demo] done: guest role={:?} enemies={} cr={} score={}",
        guest.session.authority(),
        guest.world.enemies.len(),
        guest.world.current_cr,
        guest.world.score,
    );
    Ok(())
}

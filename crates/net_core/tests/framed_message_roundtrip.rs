//! Full wire path: message -> frame -> transport -> frame -> message.

use net_core::frame;
use net_core::message::SessionMsg;
use net_core::snapshot::{ActorRep, EnemyRep, SnapshotDecode, SnapshotEncode};
use net_core::transport::{LocalLoopbackTransport, Transport};

fn ship(t: &LocalLoopbackTransport, msg: &SessionMsg) {
    let mut payload = Vec::new();
    msg.encode(&mut payload);
    let mut framed = Vec::new();
    frame::write_frame(&mut framed, &payload);
    t.try_send(framed).expect("send");
}

fn unship(bytes: &[u8]) -> SessionMsg {
    let payload = frame::read_frame(bytes).expect("frame");
    let mut slice = payload;
    let msg = SessionMsg::decode(&mut slice).expect("decode");
    assert!(slice.is_empty());
    msg
}

#[test]
fn state_with_enemy_list_survives_the_wire() {
    let (a, b) = LocalLoopbackTransport::pair();
    let msg = SessionMsg::State {
        players: vec![
            ActorRep {
                id: 1,
                pos: [1000.0, 1000.0],
                alive: true,
            },
            ActorRep {
                id: 2,
                pos: [900.0, 1100.0],
                alive: false,
            },
        ],
        enemies: Some(vec![EnemyRep {
            id: "q1w2e3r4".into(),
            name: "Wild Boar".into(),
            pos: [-50.0, 640.0],
            radius: 16.0,
            speed: 54.0,
            hp: 30.0,
            max_hp: 55.0,
            cr: 4,
            pattern_kind: 4,
            pattern_params: [300.0, 3.0, 0.6, 4.0],
        }]),
        cr: Some(4),
    };
    ship(&a, &msg);
    let got = unship(&b.try_recv().expect("bytes"));
    assert_eq!(got, msg);
}

#[test]
fn backlog_drains_in_send_order() {
    let (a, b) = LocalLoopbackTransport::pair();
    ship(&a, &SessionMsg::PlayerDied);
    ship(
        &a,
        &SessionMsg::DamageEnemy {
            enemy_id: "abc".into(),
            amount: 25.0,
        },
    );
    ship(&a, &SessionMsg::CastRevive);
    let msgs: Vec<SessionMsg> = b.drain().iter().map(|m| unship(m)).collect();
    assert_eq!(msgs.len(), 3);
    assert_eq!(msgs[0], SessionMsg::PlayerDied);
    assert!(matches!(msgs[1], SessionMsg::DamageEnemy { .. }));
    assert_eq!(msgs[2], SessionMsg::CastRevive);
}

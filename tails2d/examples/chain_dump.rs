use glam::Vec2;
use serde_json::json;
use tails2d::{
    OwnerFrame, OwnerId, PeerSettingsTable, SettingsResolver, TailOwner, TailRig, TailSettings,
};

struct Avatar {
    pose: String,
    frame_counter: u64,
    position: Vec2,
}

impl TailOwner for Avatar {
    fn owner_id(&self) -> OwnerId {
        OwnerId(0)
    }

    fn is_local_player(&self) -> bool {
        true
    }

    fn frame(&self) -> OwnerFrame<'_> {
        OwnerFrame {
            pose: &self.pose,
            frame_counter: self.frame_counter,
            anchor: self.position - Vec2::new(0.0, 9.0),
            ..OwnerFrame::default()
        }
    }

    fn entity_position(&self) -> Vec2 {
        self.position
    }

    fn hair_count(&self) -> usize {
        5
    }

    fn hair_color(&self, _index: usize) -> [f32; 4] {
        [0.67, 0.2, 0.2, 1.0]
    }
}

fn main() {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    let settings = match args.first() {
        Some(path) if path != "-" => {
            let json = std::fs::read_to_string(path).expect("read settings");
            TailSettings::from_json_str(&json).expect("parse settings")
        }
        _ => TailSettings::default(),
    };
    let pose = args.get(1).cloned().unwrap_or_else(|| "idle".to_string());
    let frames: u64 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(120);
    let speed: f32 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.5);

    let peers = PeerSettingsTable::new();
    let resolver = SettingsResolver::with_table(&settings, &peers);
    let mut rig = TailRig::new();
    let mut avatar = Avatar {
        pose,
        frame_counter: 0,
        position: Vec2::new(160.0, 90.0),
    };

    rig.start_owner(&avatar, &resolver);
    for frame_counter in 0..frames {
        avatar.frame_counter = frame_counter;
        avatar.position.x += speed;
        rig.update_owner(&avatar, &resolver, 1.0 / 60.0);
    }

    let Some(set) = rig.get(avatar.owner_id()) else {
        println!("{}", json!({ "tails": [] }));
        return;
    };
    let tails: Vec<_> = set
        .tails()
        .iter()
        .map(|tail| {
            let nodes: Vec<_> = tail
                .nodes
                .iter()
                .map(|n| json!({ "x": n.position.x, "y": n.position.y, "radius": n.radius() }))
                .collect();
            json!({ "index": tail.index(), "nodes": nodes })
        })
        .collect();

    let out = json!({
        "pose": avatar.pose,
        "frames": frames,
        "anchor": [avatar.frame().anchor.x, avatar.frame().anchor.y],
        "drawOrder": set.draw_order(),
        "tails": tails,
    });
    println!("{}", serde_json::to_string_pretty(&out).expect("serialize"));
}

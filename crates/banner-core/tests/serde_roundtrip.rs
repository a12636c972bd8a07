#![cfg(feature = "serde")]

use banner_core::{AgentInfo, Direction, FlagInfo, Loc, Rules, Team};

#[test]
fn loc_and_direction_roundtrip_via_serde() {
    let at = Loc::new(17, 42);
    let json = serde_json::to_string(&at).expect("serialize loc");
    let back: Loc = serde_json::from_str(&json).expect("deserialize loc");
    assert_eq!(at, back);

    for dir in Direction::COMPASS {
        let json = serde_json::to_string(&dir).expect("serialize direction");
        let back: Direction = serde_json::from_str(&json).expect("deserialize direction");
        assert_eq!(dir, back);
    }
}

#[test]
fn sensed_records_roundtrip_via_serde() {
    let agent = AgentInfo {
        id: 9,
        team: Team::Blue,
        at: Loc::new(3, 4),
        health: 750,
        action_ready: true,
    };
    let json = serde_json::to_string(&agent).expect("serialize agent");
    assert_eq!(agent, serde_json::from_str(&json).expect("deserialize agent"));

    let flag = FlagInfo {
        id: 2,
        team: Team::Red,
        at: Loc::new(50, 1),
        picked_up: false,
    };
    let json = serde_json::to_string(&flag).expect("serialize flag");
    assert_eq!(flag, serde_json::from_str(&json).expect("deserialize flag"));
}

#[test]
fn rules_deserialize_with_partial_overrides() {
    // Scenario files override a couple of fields and inherit the rest.
    let rules: Rules =
        serde_json::from_str(r#"{"map_width": 32, "map_height": 24}"#).expect("deserialize rules");
    assert_eq!(rules.map_width, 32);
    assert_eq!(rules.map_height, 24);
    assert_eq!(rules.vision_radius_squared, Rules::default().vision_radius_squared);
}

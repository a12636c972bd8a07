#![cfg(feature = "serde")]

use banner_core::Loc;
use banner_know::shared::FlagRecord;
use banner_know::{AssistKind, Beacon, FlagSighting};

#[test]
fn knowledge_records_roundtrip_via_serde() {
    let beacon = Beacon {
        at: Loc::new(12, 7),
        round: 140,
        kind: AssistKind::FlagUnderAttack,
    };
    let json = serde_json::to_string(&beacon).expect("serialize beacon");
    assert_eq!(beacon, serde_json::from_str(&json).expect("deserialize beacon"));

    let sighting = FlagSighting {
        flag_id: 3,
        at: Loc::new(40, 2),
        first_seen: 90,
        last_seen: 120,
    };
    let json = serde_json::to_string(&sighting).expect("serialize sighting");
    assert_eq!(
        sighting,
        serde_json::from_str(&json).expect("deserialize sighting")
    );

    let record = FlagRecord {
        flag_id: 3,
        at: Loc::new(40, 2),
        round: 120,
    };
    let json = serde_json::to_string(&record).expect("serialize record");
    assert_eq!(record, serde_json::from_str(&json).expect("deserialize record"));
}

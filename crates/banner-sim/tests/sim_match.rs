use banner_core::{Loc, Rules, Team};
use banner_sim::{Match, Scenario};

fn duel_scenario() -> Scenario {
    // Small open map: two red agents near one blue flag, blue parked in the
    // far corner. Red should find, steal, and bank the flag.
    Scenario {
        name: "duel-16".to_string(),
        seed: 7,
        rounds: 300,
        agents_per_team: 2,
        rules: Rules {
            map_width: 16,
            map_height: 16,
            setup_rounds: 0,
            flags_per_team: 1,
            ..Rules::default()
        },
        walls: Vec::new(),
        red_spawns: vec![Loc::new(1, 1), Loc::new(2, 2)],
        blue_spawns: vec![Loc::new(14, 14), Loc::new(13, 14)],
        red_flags: vec![Loc::new(14, 1)],
        blue_flags: vec![Loc::new(8, 8)],
        capture_upgrade_round: None,
    }
}

#[test]
fn red_steals_and_banks_the_undefended_flag() {
    let mut game = Match::new(&duel_scenario());
    let report = game.play();

    assert_eq!(report.rounds_played, 300);
    assert!(
        report.red_captures >= 1,
        "red never banked the flag: {report:?}"
    );
    assert_eq!(game.world().flags_in_play(Team::Blue), 0);
}

#[test]
fn matches_are_deterministic_for_a_seed() {
    let scenario = duel_scenario();

    let mut a = Match::new(&scenario);
    let mut b = Match::new(&scenario);
    let report_a = a.play();
    let report_b = b.play();

    assert_eq!(report_a, report_b);
    assert_eq!(
        a.world().shared_array(Team::Red),
        b.world().shared_array(Team::Red)
    );
    for id in a.world().agent_ids() {
        assert_eq!(a.world().agent_location(id), b.world().agent_location(id));
    }
}

#[test]
fn different_seeds_diverge() {
    let scenario = duel_scenario();
    let mut other = duel_scenario();
    other.seed = 8;

    let mut a = Match::new(&scenario);
    let mut b = Match::new(&other);
    a.play();
    b.play();

    let positions = |m: &Match| -> Vec<Option<Loc>> {
        m.world()
            .agent_ids()
            .into_iter()
            .map(|id| m.world().agent_location(id))
            .collect()
    };
    assert_ne!(positions(&a), positions(&b));
}

#[test]
fn team_knowledge_reaches_the_shared_array() {
    let mut game = Match::new(&duel_scenario());
    game.play();

    // Someone on red saw the blue flag and published it: the first flag
    // record slot carries a non-zero identity.
    let shared = game.world().shared_array(Team::Red);
    assert_ne!(shared[4], 0, "flag table never written: {shared:?}");
}

#[test]
fn capacity_fault_is_contained_to_the_turn() {
    // Two blue flag identities but a one-record table: reconciliation hits
    // the capacity invariant. The harness must log and keep the match
    // running to the end.
    let mut scenario = duel_scenario();
    scenario.blue_flags = vec![Loc::new(8, 8), Loc::new(9, 9)];
    scenario.rounds = 300;

    let mut game = Match::new(&scenario);
    let report = game.play();

    assert_eq!(report.rounds_played, 300, "match must run to completion");
    assert!(
        report.faulted_turns > 0,
        "expected capacity faults once both identities were seen"
    );
}

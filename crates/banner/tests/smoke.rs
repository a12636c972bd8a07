use banner::core::{Direction, Loc};
use banner::sim::{Match, Scenario};

#[test]
fn umbrella_exposes_the_full_stack() {
    assert_eq!(Loc::new(0, 0).offset(Direction::East), Loc::new(1, 0));

    let mut scenario = Scenario::default();
    scenario.rounds = 10;
    let report = Match::new(&scenario).play();
    assert_eq!(report.rounds_played, 10);
}

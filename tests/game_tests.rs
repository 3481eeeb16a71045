mod common;

use broadside::core::commitment;
use broadside::{Board, Coord, Digest, GameEngine, GameStatus, Outcome, SeededEntropy};
use common::{board_with, bottom_rows_cells, bottom_rows_layout, name, top_rows_layout};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Alice on the bottom rows, already committed; Bob committed to the top rows.
fn setup() -> (GameEngine, Board, Digest) {
    let mut engine = GameEngine::new(name("alice"), name("bob"));
    for (i, (anchor, orientation)) in bottom_rows_layout().iter().enumerate() {
        engine.board_mut().place(i, *anchor, *orientation).unwrap();
    }
    engine.commit(&mut SeededEntropy::new(1)).unwrap();

    let mut bob = board_with("bob", &top_rows_layout());
    let digest = commitment::commit(&mut bob, &mut SeededEntropy::new(2)).unwrap();
    engine.set_opponent_digest(digest);
    (engine, bob, digest)
}

#[test]
fn test_digests_stored() {
    let mut engine = GameEngine::new(name("alice"), name("bob"));
    assert!(engine.local_digest().is_none());
    assert!(engine.opponent_digest().is_none());

    engine
        .board_mut()
        .place_randomly(&mut SmallRng::seed_from_u64(0))
        .unwrap();
    let digest = engine.commit(&mut SeededEntropy::new(5)).unwrap();
    assert_eq!(engine.local_digest(), Some(&digest));
    assert!(engine.board().key().is_some());

    let theirs = Digest::from_bytes([7; 20]);
    engine.set_opponent_digest(theirs);
    assert_eq!(engine.opponent_digest(), Some(&theirs));
}

#[test]
fn test_fewer_hits_taken_wins() {
    let (mut engine, bob, _) = setup();
    for cell in [Coord::new(0, 0), Coord::new(1, 0), Coord::new(0, 1)] {
        engine.record_result(cell, true).unwrap();
    }
    assert!(!engine.receive_attack(Coord::new(4, 4)).unwrap());
    assert_eq!(engine.status(), GameStatus::InProgress);

    let report = engine.resolve(&bob);
    assert_eq!(report.outcome, Outcome::Won);
    assert_eq!((report.hits_taken, report.hits_landed), (0, 3));
    assert!(report.commitment_verified);
    assert_eq!(report.opponent_name, name("bob"));
}

#[test]
fn test_more_hits_taken_loses() {
    let (mut engine, bob, _) = setup();
    let mine = bottom_rows_cells();
    assert!(engine.receive_attack(mine[0]).unwrap());
    assert!(engine.receive_attack(mine[1]).unwrap());
    engine.record_result(Coord::new(0, 0), true).unwrap();

    let report = engine.resolve(&bob);
    assert_eq!(report.outcome, Outcome::Lost);
    assert_eq!((report.hits_taken, report.hits_landed), (2, 1));
    assert!(report.commitment_verified);
}

#[test]
fn test_equal_hits_draw() {
    let (mut engine, bob, _) = setup();
    assert_eq!(engine.outcome(), Outcome::Draw);

    assert!(engine.receive_attack(bottom_rows_cells()[0]).unwrap());
    engine.record_result(Coord::new(0, 2), true).unwrap();
    engine.record_result(Coord::new(8, 8), false).unwrap();

    let report = engine.resolve(&bob);
    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!((report.hits_taken, report.hits_landed), (1, 1));
    assert!(report.commitment_verified);
}

#[test]
fn test_miss_reported_on_ship_cell_fails_check() {
    let (mut engine, bob, _) = setup();
    // (0,0) holds a ship but was answered as a miss
    engine.record_result(Coord::new(0, 0), false).unwrap();
    engine.record_result(Coord::new(1, 0), true).unwrap();
    let before = engine.outcome();

    let report = engine.resolve(&bob);
    assert!(!report.commitment_verified);
    assert_eq!(report.outcome, before);
    assert_eq!(report.outcome, Outcome::Won);
    assert_eq!(report.hits_landed, 1);
}

#[test]
fn test_hit_reported_on_water_fails_check() {
    let (mut engine, bob, _) = setup();
    // (8,8) is open water but was answered as a hit
    engine.record_result(Coord::new(8, 8), true).unwrap();
    let before = engine.outcome();

    let report = engine.resolve(&bob);
    assert!(!report.commitment_verified);
    assert_eq!(report.outcome, before);
    assert_eq!(report.outcome, Outcome::Won);
}

#[test]
fn test_truthful_answers_keep_check() {
    let (mut engine, bob, digest) = setup();
    engine.record_result(Coord::new(8, 8), false).unwrap();
    engine.record_result(Coord::new(5, 2), true).unwrap();

    let report = engine.resolve(&bob);
    assert!(report.commitment_verified);
    assert_eq!(engine.opponent_digest(), Some(&digest));
    assert_eq!(engine.opponent().key(), bob.key());
}

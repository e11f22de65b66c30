//! End-to-end session scenarios
//!
//! Drives whole sessions headlessly with scripted keys and a recording
//! surface, then inspects the results CSV.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use category_learning::display::RecordingSurface;
use category_learning::input::{Key, ScriptedKeys};
use category_learning::phases::{learning, testing};
use category_learning::stimuli::{test_item, DECISION_PROMPT};
use category_learning::{
    run_session, Group, ParticipantSession, ResponseLogger, SessionContext, SessionOutcome,
};

const HEADER: &str = "ParticipantID,Group,Item,Response,Rating";

/// Type the identifier, confirm, then press `rest` one char at a time
fn scripted(identifier: &str, rest: &str) -> ScriptedKeys {
    let mut keys = ScriptedKeys::from_chars(identifier);
    keys.push(Key::Enter);
    for c in rest.chars() {
        keys.push(Key::Char(c));
    }
    keys
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_fixed_order_scenario_rows() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("data").join("experiment_results.csv");
    let logger = ResponseLogger::new(&results);

    let mut surface = RecordingSurface::new();
    // learning key, then: Control -> n, Consistent A -> y 5, Consistent B -> n
    let mut keys = ScriptedKeys::from_chars(" ny5n");
    let mut ctx = SessionContext::new(
        &mut surface,
        &mut keys,
        ParticipantSession::new("P07", Group::A),
        temp_dir.path(),
    );

    learning::run(&mut ctx).unwrap();
    let order = ["Control", "Consistent A", "Consistent B"]
        .map(|label| test_item(label).unwrap());
    let responses = testing::run_items(&mut ctx, &order).unwrap();
    logger.append(&ctx.session, &responses).unwrap();

    assert_eq!(
        read_lines(&results),
        vec![
            HEADER,
            "P07,A,Control,No,",
            "P07,A,Consistent A,Yes,5",
            "P07,A,Consistent B,No,",
        ]
    );
}

#[test]
fn test_full_session_logs_each_item_once() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("results.csv");
    let logger = ResponseLogger::new(&results);

    let mut surface = RecordingSurface::new();
    // intro, learning, then "yes, 4" for every item with stray keys mixed in
    let mut keys = scripted("P11", "..xy94qy4y04");
    let mut rng = StdRng::seed_from_u64(2024);

    let outcome = run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger).unwrap();

    let (session, responses) = match outcome {
        SessionOutcome::Completed { session, responses } => (session, responses),
        SessionOutcome::Cancelled => panic!("session should complete"),
    };
    assert_eq!(keys.remaining(), 0);
    assert_eq!(session.identifier(), "P11");
    assert_eq!(responses.len(), 3);

    let lines = read_lines(&results);
    assert_eq!(lines[0], HEADER);
    assert_eq!(lines.len(), 4);

    let mut labels = HashSet::new();
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], "P11");
        assert_eq!(fields[1], session.group().as_str());
        assert_eq!(&fields[3..], &["Yes", "4"]);
        assert!(labels.insert(fields[2].to_string()), "duplicate item {}", fields[2]);
    }
    let expected: HashSet<String> = ["Consistent A", "Consistent B", "Control"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(labels, expected);

    let decision_screens = surface
        .scenes()
        .iter()
        .filter(|s| s.contains_text(DECISION_PROMPT))
        .count();
    assert_eq!(decision_screens, 3);
}

#[test]
fn test_repeated_sessions_share_one_header() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("data").join("experiment_results.csv");
    let logger = ResponseLogger::new(&results);

    for (i, identifier) in ["S1", "S2", "S3"].iter().enumerate() {
        let mut surface = RecordingSurface::new();
        let mut keys = scripted(identifier, "..nnn");
        let mut rng = StdRng::seed_from_u64(i as u64);

        let outcome = run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger).unwrap();
        assert!(matches!(outcome, SessionOutcome::Completed { .. }));
    }

    let lines = read_lines(&results);
    assert_eq!(lines.len(), 1 + 3 * 3);
    assert_eq!(lines.iter().filter(|l| l.as_str() == HEADER).count(), 1);

    let owners: Vec<&str> = lines[1..].iter().map(|l| l.split(',').next().unwrap()).collect();
    assert_eq!(owners, vec!["S1", "S1", "S1", "S2", "S2", "S2", "S3", "S3", "S3"]);
    assert!(lines[1..].iter().all(|l| l.ends_with(",No,")));
}

#[test]
fn test_cancel_leaves_results_untouched() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("results.csv");
    let existing = format!("{}\nP01,B,Control,No,\n", HEADER);
    fs::write(&results, &existing).unwrap();
    let logger = ResponseLogger::new(&results);

    let mut surface = RecordingSurface::new();
    let mut keys = ScriptedKeys::new([Key::Char('P'), Key::Char('2'), Key::Esc]);
    let mut rng = StdRng::seed_from_u64(9);

    let outcome = run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger).unwrap();

    assert!(matches!(outcome, SessionOutcome::Cancelled));
    assert_eq!(fs::read_to_string(&results).unwrap(), existing);
}

#[test]
fn test_cancel_without_results_creates_nothing() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("data").join("experiment_results.csv");
    let logger = ResponseLogger::new(&results);

    let mut surface = RecordingSurface::new();
    let mut keys = ScriptedKeys::new([Key::Esc]);
    let mut rng = StdRng::seed_from_u64(9);

    run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger).unwrap();

    assert!(!results.exists());
    assert!(!temp_dir.path().join("data").exists());
}

#[test]
fn test_interrupted_session_writes_nothing() {
    let temp_dir = tempdir().unwrap();
    let results = temp_dir.path().join("results.csv");
    let logger = ResponseLogger::new(&results);

    let mut surface = RecordingSurface::new();
    let mut keys = scripted("P05", "..y3");
    keys.push(Key::Interrupt);
    let mut rng = StdRng::seed_from_u64(5);

    let result = run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger);

    assert!(result.is_err());
    assert!(!results.exists());
}

#[test]
fn test_group_assignment_over_many_sessions() {
    let temp_dir = tempdir().unwrap();
    let logger = ResponseLogger::new(temp_dir.path().join("results.csv"));
    let mut rng = StdRng::seed_from_u64(77);
    let mut group_a = 0;
    let sessions = 400;

    for _ in 0..sessions {
        let mut surface = RecordingSurface::new();
        let mut keys = scripted("", "..nnn");
        match run_session(&mut surface, &mut keys, &mut rng, temp_dir.path(), &logger).unwrap() {
            SessionOutcome::Completed { session, .. } => {
                if session.group() == Group::A {
                    group_a += 1;
                }
            }
            SessionOutcome::Cancelled => panic!("session should complete"),
        }
    }

    // Expected 200, sd 10
    assert!((150..=250).contains(&group_a), "group A assigned {} times", group_a);
}

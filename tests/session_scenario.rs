//! End-to-end play-throughs across ledger, puzzles, gates and transitions.

use puzzleroom::content::{self, CODE_PANEL_ID, VAULT_DOOR_ID};
use puzzleroom::events::{EventRecorder, GameEvent, Topic};
use puzzleroom::interaction::{GateDenial, GateSpec, GatedInteractable, InteractOutcome};
use puzzleroom::puzzles::{
    AnyPuzzle, CodePanelPuzzle, InputOutcome, Puzzle, PuzzleDefinition, PuzzleInput,
};
use puzzleroom::transition::{InstantPresenter, TransitionController, ViewPhase};
use puzzleroom::{SessionConfig, SessionContext};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn find<'a>(puzzles: &'a mut [AnyPuzzle], id: &str) -> &'a mut AnyPuzzle {
    puzzles
        .iter_mut()
        .find(|puzzle| puzzle.id() == id)
        .unwrap()
}

fn feed(puzzle: &mut AnyPuzzle, session: &mut SessionContext, inputs: &[PuzzleInput]) {
    for &input in inputs {
        puzzle.handle(input, session);
    }
}

#[test]
fn code_assembled_from_reveals_opens_panel() {
    let mut session = SessionContext::default();
    let recorder = EventRecorder::all(session.events());

    for (key, value) in [("digit_0", 3), ("digit_1", 7), ("digit_2", 1), ("digit_3", 5)] {
        session.progress_mut().reveal_digit(key, value);
    }
    assert!(session.progress().are_all_digits_found());
    assert_eq!(session.progress().get_code(), [3, 7, 1, 5]);

    let mut panel = CodePanelPuzzle::new(
        PuzzleDefinition::new(CODE_PANEL_ID),
        Duration::from_millis(700),
    );
    for digit in [3, 7, 1, 5] {
        panel.enter_digit(digit);
    }
    panel.check_solution(&mut session);

    assert!(panel.is_solved());
    assert_eq!(
        recorder.events(),
        vec![GameEvent::puzzle_solved(CODE_PANEL_ID)]
    );

    panel.check_solution(&mut session);
    assert_eq!(recorder.events().len(), 1);
    assert_eq!(session.progress().progress().solved_count(), 1);
}

#[test]
fn full_playthrough_of_shipped_room() {
    let config = SessionConfig::default();
    let mut session = SessionContext::new(config.clone());
    let recorder = EventRecorder::all(session.events());
    let mut puzzles = content::default_puzzles(&config).unwrap();
    let mut door = content::vault_door();
    session.start();

    assert_eq!(
        door.interact(&mut session),
        InteractOutcome::Blocked(vec![GateDenial::PuzzleUnsolved {
            puzzle_id: CODE_PANEL_ID.to_string()
        }])
    );

    let dial = find(&mut puzzles, "dial_safe");
    let mut rotations = Vec::new();
    for (ring, turns) in [3, 7, 1].into_iter().enumerate() {
        rotations.extend(std::iter::repeat(PuzzleInput::RotateRing(ring)).take(turns));
    }
    feed(dial, &mut session, &rotations);
    feed(dial, &mut session, &[PuzzleInput::Check]);
    assert!(dial.is_solved());

    let switches = find(&mut puzzles, "switch_puzzle");
    feed(
        switches,
        &mut session,
        &[
            PuzzleInput::ToggleSwitch(0),
            PuzzleInput::ToggleSwitch(2),
            PuzzleInput::ToggleSwitch(3),
        ],
    );
    assert!(switches.is_solved());

    let symbols = find(&mut puzzles, "symbol_puzzle");
    feed(
        symbols,
        &mut session,
        &[
            PuzzleInput::PressSymbol(2),
            PuzzleInput::PressSymbol(1),
            PuzzleInput::PressSymbol(2),
            PuzzleInput::PressSymbol(0),
            PuzzleInput::PressSymbol(3),
            PuzzleInput::PressSymbol(1),
        ],
    );
    assert!(symbols.is_solved());

    let book = find(&mut puzzles, "book_clue");
    feed(book, &mut session, &[PuzzleInput::ClickBook]);
    assert!(book.is_solved());

    assert_eq!(session.progress().get_code(), [3, 8, 5, 2]);
    assert!(session.progress().are_all_digits_found());

    let panel = find(&mut puzzles, CODE_PANEL_ID);
    feed(
        panel,
        &mut session,
        &[
            PuzzleInput::EnterDigit(3),
            PuzzleInput::EnterDigit(8),
            PuzzleInput::EnterDigit(5),
            PuzzleInput::EnterDigit(2),
            PuzzleInput::Check,
        ],
    );
    assert!(panel.is_solved());

    assert!(door.interact(&mut session).is_acted());
    assert!(session.progress().is_game_complete());
    door.interact(&mut session);

    assert_eq!(recorder.count(Topic::GameStart), 1);
    assert_eq!(recorder.count(Topic::PuzzleSolved), 5);
    assert_eq!(recorder.count(Topic::PuzzleAttemptFailed), 1);
    assert_eq!(recorder.count(Topic::GameComplete), 1);
    assert_eq!(
        recorder.events().last(),
        Some(&GameEvent::interact(VAULT_DOOR_ID))
    );
}

#[test]
fn rebuilt_puzzles_restore_from_ledger() {
    let config = SessionConfig::default();
    let mut session = SessionContext::new(config.clone());
    for (key, value) in [("digit_0", 3), ("digit_1", 8), ("digit_2", 5), ("digit_3", 2)] {
        session.progress_mut().reveal_digit(key, value);
    }
    for id in ["dial_safe", CODE_PANEL_ID] {
        session.progress_mut().solve_puzzle(id);
    }
    let recorder = EventRecorder::all(session.events());

    let mut puzzles = content::default_puzzles(&config).unwrap();
    let restored: Vec<bool> = puzzles
        .iter_mut()
        .map(|puzzle| puzzle.activate(&session))
        .collect();

    assert_eq!(restored, vec![true, false, false, false, true]);
    assert!(recorder.events().is_empty());
    if let AnyPuzzle::CodePanel(panel) = find(&mut puzzles, CODE_PANEL_ID) {
        assert_eq!(panel.entered(), &[3, 8, 5, 2]);
    } else {
        panic!("expected code panel");
    }
    assert_eq!(
        find(&mut puzzles, "dial_safe").handle(PuzzleInput::RotateRing(0), &mut session),
        InputOutcome::Ignored
    );
}

#[test]
fn clickable_elements_forward_puzzle_input() {
    let config = SessionConfig::default();
    let mut session = SessionContext::new(config.clone());
    let puzzles = Arc::new(Mutex::new(content::default_puzzles(&config).unwrap()));

    let shared = Arc::clone(&puzzles);
    let mut book_element = GatedInteractable::new("book_on_shelf", GateSpec::open().one_time_use())
        .with_action(move |session| {
            let mut puzzles = shared.lock().unwrap();
            find(&mut puzzles, "book_clue").handle(PuzzleInput::ClickBook, session);
        });

    assert!(book_element.interact(&mut session).is_acted());
    assert!(!book_element.interact(&mut session).is_acted());
    assert_eq!(session.progress().get_code(), [0, 0, 0, 2]);
}

#[tokio::test]
async fn zoom_requests_through_the_session_channel() {
    let session = SessionContext::default();
    let controller = TransitionController::new(Arc::new(InstantPresenter), session.events().clone());
    for id in ["dial_safe", "code_panel"] {
        controller.register_zoom_view(id);
    }
    let _subscriptions = controller.attach();

    controller.request_open("dial_safe");
    controller.request_open("code_panel");
    while controller.is_transitioning() {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.phase(), ViewPhase::zoom("dial_safe"));

    controller.request_close();
    while controller.is_transitioning() {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.phase(), ViewPhase::Overview);
    assert_eq!(controller.history().transitions().len(), 2);

    session.teardown();
    controller.request_open("code_panel");
    assert!(!controller.is_transitioning());
    assert_eq!(controller.phase(), ViewPhase::Overview);
}

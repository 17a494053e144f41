use std::rc::Rc;

use folio_motion_core::{ElementId, MotionError, TypewriterConfig, TypewriterCycler, TypewriterPhase};
use folio_test_fixtures::{ManualTimer, RecordingSurface};

const TARGET: ElementId = ElementId(1);

fn cfg(phrases: &[&str]) -> TypewriterConfig {
    TypewriterConfig {
        phrases: phrases.iter().map(|p| p.to_string()).collect(),
        ..TypewriterConfig::default()
    }
}

/// it should wait 400ms, then type, pause, delete and move on to the next phrase
#[test]
fn cycles_through_phrases_on_the_timer() {
    let surface = Rc::new(RecordingSurface::new());
    let timer = Rc::new(ManualTimer::new());
    let cycler = TypewriterCycler::start(Some(TARGET), cfg(&["Ab", "Xy"]), surface.clone(), timer.clone())
        .unwrap()
        .expect("target present");

    assert_eq!(timer.advance(399), 0);
    assert!(surface.text(TARGET).is_none());
    assert_eq!(timer.advance(1), 1);
    assert_eq!(surface.text(TARGET).as_deref(), Some("A"));

    // 80 (type) + 1400 (pause) + 45 (delete) + 400 (pause) + 80 (type)
    timer.advance(80);
    assert_eq!(cycler.phase(), TypewriterPhase::PausedAfterTyping);
    timer.advance(1400);
    timer.advance(45);
    assert_eq!(cycler.phase(), TypewriterPhase::PausedAfterDeleting);
    assert_eq!(cycler.phrase_index(), 1);
    timer.advance(400);

    assert_eq!(surface.text_history(TARGET), vec!["A", "Ab", "A", "", "X"]);
    assert_eq!(timer.fired_delays(), vec![400, 80, 1400, 45, 400]);
    assert_eq!(timer.pending(), 1, "the cycle never ends");
}

/// it should return to the first phrase after a full cycle of a single phrase
#[test]
fn single_phrase_loops_back_to_zero() {
    let surface = Rc::new(RecordingSurface::new());
    let timer = Rc::new(ManualTimer::new());
    let cycler = TypewriterCycler::start(Some(TARGET), cfg(&["hi"]), surface.clone(), timer.clone())
        .unwrap()
        .unwrap();
    for _ in 0..4 {
        assert!(timer.fire_next());
    }
    assert_eq!(cycler.phrase_index(), 0);
    assert_eq!(surface.text_history(TARGET), vec!["h", "hi", "h", ""]);
    assert!(timer.fire_next());
    assert_eq!(surface.text(TARGET).as_deref(), Some("h"));
}

/// it should do nothing at all without a display target
#[test]
fn absent_target_is_a_noop() {
    let surface = Rc::new(RecordingSurface::new());
    let timer = Rc::new(ManualTimer::new());
    let started = TypewriterCycler::start(None, cfg(&["hi"]), surface, timer.clone()).unwrap();
    assert!(started.is_none());
    assert_eq!(timer.pending(), 0);
}

/// it should reject an empty phrase list
#[test]
fn empty_phrases_error() {
    let surface = Rc::new(RecordingSurface::new());
    let timer = Rc::new(ManualTimer::new());
    let err = TypewriterCycler::start(Some(TARGET), cfg(&[]), surface, timer.clone())
        .err()
        .expect("empty phrases must fail");
    assert_eq!(err, MotionError::EmptyPhrases);
    assert_eq!(timer.pending(), 0);
}

/// it should only ever wait on the configured typing, deleting and pause delays
#[test]
fn delays_follow_the_configured_cadence() {
    let surface = Rc::new(RecordingSurface::new());
    let timer = Rc::new(ManualTimer::new());
    TypewriterCycler::start(Some(TARGET), cfg(&["abc", "de"]), surface, timer.clone()).unwrap();
    timer.advance(20_000);
    let delays = timer.fired_delays();
    assert!(delays.len() > 10);
    assert_eq!(delays[0], 400);
    assert!(delays.iter().all(|d| [80, 45, 1400, 400].contains(d)));
}

use std::path::Path;

use termexam::loader;
use termexam::palette::PaletteState;
use termexam::session::{Phase, Session};

fn fixture_session() -> Session {
    let (exam, _) = loader::load_exam(Path::new("tests/fixtures/sample_exam.json")).unwrap();
    let mut session = Session::new(exam, 180 * 60).unwrap();
    session.start();
    session
}

#[test]
fn test_full_run_through_the_sample_exam() {
    let mut session = fixture_session();

    // Q1: pick the right option and save.
    session.select_answer("It provides full-duplex service.");
    session.save_and_next();

    // Q2: type the determinant keystroke by keystroke, with stray
    // whitespace, then mark for review.
    for typed in [" ", " 4", " 48", " 48 "] {
        session.select_answer(typed);
    }
    session.mark_for_review_and_next();

    // Q3: select in reverse order of the answer key.
    session.select_answer("Heap Sort");
    session.select_answer("Merge Sort");
    session.save_and_next();

    let states = session.palette_states();
    assert_eq!(states[0], PaletteState::Answered);
    assert_eq!(states[1], PaletteState::Marked);
    assert_eq!(states[2], PaletteState::Answered);

    session.submit();
    assert_eq!(session.phase(), Phase::Finished);

    let report = session.report().expect("graded on submit");
    assert_eq!(report.attempted, 3);
    assert_eq!(report.correct, 3);
    assert_eq!(report.wrong, 0);
    assert_eq!(report.score, 5.0);
}

#[test]
fn test_wrong_mcq_and_msq_subset() {
    let mut session = fixture_session();

    session.select_answer("The window size is always fixed.");
    session.save_and_next();

    session.jump_to(2);
    session.select_answer("Merge Sort");
    session.save_and_next();

    session.submit();
    let report = session.report().unwrap();

    // MCQ wrong: negative marking and the wrong counter.
    assert_eq!(report.outcomes[0].marks_earned, -0.33);
    assert_eq!(report.wrong, 1);

    // MSQ subset: no credit, no penalty, not wrong.
    assert_eq!(report.outcomes[2].marks_earned, 0.0);
    assert!(report.outcomes[2].attempted);

    // NAT untouched.
    assert!(!report.outcomes[1].attempted);

    assert_eq!(report.attempted, 2);
    assert_eq!(report.correct, 0);
    assert_eq!(report.score, -0.33);
}

#[test]
fn test_value_left_via_palette_jump_is_still_graded() {
    let mut session = fixture_session();

    // Type into the NAT field, then leave through the palette without
    // saving: `answered` stays false but the value must still grade.
    session.jump_to(1);
    session.select_answer("48");
    session.jump_to(0);
    assert!(!session.store().get("q2").answered);

    session.submit();
    let report = session.report().unwrap();
    assert!(report.outcomes[1].attempted);
    assert_eq!(report.outcomes[1].marks_earned, 2.0);
}

#[test]
fn test_timer_expiry_forces_submission_once() {
    let (exam, _) = loader::load_exam(Path::new("tests/fixtures/sample_exam.json")).unwrap();
    let mut session = Session::new(exam, 2).unwrap();
    session.start();
    session.select_answer("It provides full-duplex service.");

    session.tick();
    assert_eq!(session.phase(), Phase::Running);
    session.tick();
    assert_eq!(session.phase(), Phase::Finished);

    let first = session.report().cloned().expect("graded at expiry");
    // A manual submit in the same instant changes nothing.
    session.submit();
    session.tick();
    assert_eq!(session.report().cloned(), Some(first));
}

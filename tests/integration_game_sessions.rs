use std::time::Duration;

use assert_matches::assert_matches;

use typoslinger::hint::{HintController, HintError};
use typoslinger::share::ShareTextFormatter;
use typoslinger::timeline::FeedbackPhase;
use typoslinger::{
    ClickOutcome, EngineEvent, GameSummary, IgnoreReason, Language, RoundEngine, SentenceBank,
};

const SETTLE: Duration = Duration::from_millis(2300);

fn engine(language: Language, seed: u64) -> RoundEngine {
    let bank = SentenceBank::load().unwrap();
    RoundEngine::new(
        language,
        bank.for_language(language).to_vec(),
        HintController::seeded(seed),
    )
    .unwrap()
}

fn answer(engine: &RoundEngine) -> usize {
    engine.current_sentence().unwrap().misspelled_index().unwrap()
}

fn wrong_answer(engine: &RoundEngine) -> usize {
    let right = answer(engine);
    if right == 0 {
        1
    } else {
        0
    }
}

/// Plays every round; `pick` chooses which word to shoot.
fn play_out<F: FnMut(&RoundEngine) -> usize>(engine: &mut RoundEngine, mut pick: F) -> GameSummary {
    let mut summary = None;
    while !engine.is_complete() {
        let index = pick(engine);
        assert_matches!(
            engine.submit_word_click(index),
            ClickOutcome::Accepted { .. }
        );
        for ev in engine.advance(SETTLE) {
            if let EngineEvent::GameComplete(s) = ev {
                summary = Some(s);
            }
        }
    }
    summary.expect("completion emits a summary")
}

#[test]
fn all_hits_english_game() {
    let mut engine = engine(Language::English, 1);
    let summary = play_out(&mut engine, answer);

    assert_eq!(summary.hits, 6);
    assert_eq!(summary.misses, 0);
    assert_eq!(summary.hints_used, 0);
    assert!(summary.is_perfect());

    let text = ShareTextFormatter::new(1).format(&summary, "en");
    let stats = text.lines().nth(1).unwrap();
    assert!(stats.contains("🎯 6 Hits"), "{stats}");
    assert!(stats.contains("💥 0 Misses"), "{stats}");
    assert!(stats.contains("💡 0 Hints Used"), "{stats}");
}

#[test]
fn single_counts_use_singular_forms() {
    let mut engine = engine(Language::English, 1);
    let mut round = 0;
    let summary = play_out(&mut engine, |e| {
        round += 1;
        if round == 1 {
            wrong_answer(e)
        } else {
            answer(e)
        }
    });

    assert_eq!(summary.hits, 5);
    assert_eq!(summary.misses, 1);
    let text = ShareTextFormatter::new(1).format(&summary, "en");
    assert!(text.contains("🎯 5 Hits • 💥 1 Miss •"), "{text}");
    assert!(text.contains("#1: 💥"));
}

#[test]
fn second_hint_in_round_is_refused() {
    let mut engine = engine(Language::English, 5);

    let eligible = engine.request_hint().unwrap();
    assert_eq!(eligible.len(), 3);
    assert!(eligible.contains(&answer(&engine)));

    assert_matches!(engine.request_hint(), Err(HintError::AlreadyActive));
    assert_eq!(engine.session().hints_used, 1);
    assert_eq!(engine.session().hint.eligible, eligible);
}

#[test]
fn hint_resets_next_round_and_is_recorded() {
    let mut engine = engine(Language::English, 5);
    engine.request_hint().unwrap();
    let index = answer(&engine);
    engine.submit_word_click(index);
    engine.advance(SETTLE);

    assert!(!engine.session().hint.active);
    assert!(engine.session().round_results[0].used_hint);
    assert!(engine.request_hint().is_ok());
    assert_eq!(engine.session().hints_used, 2);
}

#[test]
fn double_click_records_one_result() {
    let mut engine = engine(Language::English, 1);
    let right = answer(&engine);

    assert_eq!(
        engine.submit_word_click(right),
        ClickOutcome::Accepted { hit: true }
    );
    engine.advance(Duration::from_millis(100));
    assert_eq!(
        engine.submit_word_click(wrong_answer(&engine)),
        ClickOutcome::Ignored(IgnoreReason::Locked)
    );
    assert_eq!(engine.session().hits, 0);
    assert_eq!(engine.session().misses, 0);

    engine.advance(SETTLE);
    let session = engine.session();
    assert_eq!(session.round_results.len(), 1);
    assert_eq!(session.hits, 1);
    assert_eq!(session.misses, 0);
}

#[test]
fn pause_mid_feedback_freezes_clock_and_keeps_offsets() {
    let mut engine = engine(Language::English, 1);
    engine.submit_word_click(answer(&engine));
    engine.drain_events();

    let phases = engine.advance(Duration::from_millis(800));
    assert!(phases.contains(&EngineEvent::Phase(FeedbackPhase::MarkerShown)));
    let before = engine.elapsed_seconds();

    engine.pause();
    for _ in 0..50 {
        assert!(engine.advance(Duration::from_millis(100)).is_empty());
    }
    assert_eq!(engine.elapsed_seconds(), before);
    assert_eq!(engine.feedback_remaining(), Some(Duration::from_millis(1500)));

    engine.resume();
    // 1300ms offset is 500ms after the 800ms already spent
    let events = engine.advance(Duration::from_millis(499));
    assert!(!events.contains(&EngineEvent::Phase(FeedbackPhase::CorrectionShown)));
    let events = engine.advance(Duration::from_millis(1));
    assert!(events.contains(&EngineEvent::Phase(FeedbackPhase::CorrectionShown)));

    let events = engine.advance(Duration::from_millis(1000));
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::RoundSettled(r) if r.hit)));
    assert!(engine.elapsed_seconds() < 5);
    assert_eq!(engine.session().round_results.len(), 1);
}

#[test]
fn completed_sessions_account_for_every_round() {
    for (language, seed) in [(Language::English, 2), (Language::Spanish, 9)] {
        let mut engine = engine(language, seed);
        let mut round = 0;
        let summary = play_out(&mut engine, |e| {
            round += 1;
            if round % 2 == 0 {
                answer(e)
            } else {
                wrong_answer(e)
            }
        });

        let session = engine.session();
        assert_eq!(summary.hits + summary.misses, session.round_count);
        assert_eq!(summary.round_results.len(), session.round_count);
        assert_eq!(session.check_invariants(), Ok(()));
        assert_eq!(
            engine.submit_word_click(0),
            ClickOutcome::Ignored(IgnoreReason::GameOver)
        );
    }
}

#[test]
fn every_bundled_sentence_has_one_typo() {
    let bank = SentenceBank::load().unwrap();
    for language in Language::ALL {
        let sentences = bank.for_language(language);
        assert!(!sentences.is_empty(), "{language}");
        for sentence in sentences {
            let matches = sentence
                .tokens()
                .into_iter()
                .filter(|t| sentence.is_misspelled(t))
                .count();
            assert_eq!(matches, 1, "{language}: {}", sentence.text);
        }
    }
}

#[test]
fn share_text_is_pure() {
    let mut engine = engine(Language::Spanish, 4);
    let summary = play_out(&mut engine, answer);
    let formatter = ShareTextFormatter::new(42);

    let first = formatter.format(&summary, "es");
    let second = formatter.format(&summary, "es");
    assert_eq!(first, second);
    assert!(first.starts_with("Typoslinger #42\n"));
}

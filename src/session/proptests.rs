//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across all possible event
//! sequences.

use super::state::*;
use super::transition::*;
use super::*;
use proptest::prelude::*;
use std::path::PathBuf;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    // Always starts with a visible character, so generated questions
    // survive the blank-draft check.
    "[a-zA-Z0-9][a-zA-Z0-9 ?.]{0,39}"
}

fn arb_path() -> impl Strategy<Value = String> {
    "[a-z]{1,12}\\.pdf"
}

fn arb_document() -> impl Strategy<Value = DocumentId> {
    "[a-f0-9]{8,16}".prop_map(|id| DocumentId::new(id).expect("generated id is non-empty"))
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_path().prop_map(|path| Event::FileChosen { path }),
        Just(Event::UploadRequested),
        (arb_document(), proptest::option::of(arb_text())).prop_map(|(document, message)| {
            Event::UploadCompleted { document, message }
        }),
        arb_text().prop_map(|message| Event::UploadFailed { message }),
        arb_text().prop_map(|text| Event::DraftChanged { text }),
        arb_text().prop_map(|question| Event::SendRequested { question }),
        (arb_text(), 0usize..6).prop_map(|(answer, sources)| Event::AnswerReceived {
            answer,
            sources
        }),
        arb_text().prop_map(|message| Event::AskFailed { message }),
    ]
}

fn arb_in_flight_phase() -> impl Strategy<Value = SessionPhase> {
    prop_oneof![
        arb_path().prop_map(|file| SessionPhase::Upload(UploadPhase::Uploading {
            file: PathBuf::from(file)
        })),
        arb_document().prop_map(|document| SessionPhase::Chat {
            document,
            phase: ChatPhase::Sending,
        }),
    ]
}

/// Drive a fresh session into the conversation workflow.
fn chat_session() -> Session {
    let mut session = Session::new();
    session
        .handle(Event::FileChosen {
            path: "report.pdf".into(),
        })
        .expect("select");
    session.handle(Event::UploadRequested).expect("submit");
    session
        .handle(Event::UploadCompleted {
            document: DocumentId::new("doc").expect("non-empty"),
            message: None,
        })
        .expect("adopt");
    session
}

// ============================================================================
// Validity Checkers
// ============================================================================

/// The transcript never gets more than one turn ahead of the answers, and
/// never has an answer without a question.
fn turn_counts_valid(transcript: &Transcript) -> bool {
    let users = transcript.user_count();
    let bots = transcript.bot_count();
    users <= bots + 1 && bots <= users
}

/// I/O effects only appear when the new phase is the matching in-flight one.
fn effects_are_valid(effects: &[Effect], new_phase: &SessionPhase) -> bool {
    let has_upload = effects.iter().any(|e| matches!(e, Effect::Upload { .. }));
    let has_ask = effects.iter().any(|e| matches!(e, Effect::Ask { .. }));

    if has_upload && !matches!(new_phase, SessionPhase::Upload(UploadPhase::Uploading { .. })) {
        return false;
    }
    if has_ask
        && !matches!(
            new_phase,
            SessionPhase::Chat {
                phase: ChatPhase::Sending,
                ..
            }
        )
    {
        return false;
    }
    true
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: at most one outstanding turn, at every step of any
    // event sequence.
    #[test]
    fn prop_at_most_one_outstanding_turn(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut session = Session::new();
        for event in events {
            let _ = session.handle(event);
            prop_assert!(
                turn_counts_valid(session.transcript()),
                "turn counts out of balance: {} user / {} bot",
                session.transcript().user_count(),
                session.transcript().bot_count()
            );
        }
    }

    // Invariant 2: a rejected event leaves the session untouched and
    // produces no effects.
    #[test]
    fn prop_rejected_events_change_nothing(
        events in proptest::collection::vec(arb_event(), 0..20),
        probe in arb_event()
    ) {
        let mut session = Session::new();
        for event in events {
            let _ = session.handle(event);
        }
        let before = session.clone();
        if session.handle(probe).is_err() {
            prop_assert_eq!(session, before);
        }
    }

    // Invariant 3: in-flight phases reject new submissions and edits.
    #[test]
    fn prop_in_flight_rejects_submission(
        phase in arb_in_flight_phase(),
        text in arb_text()
    ) {
        for event in [
            Event::UploadRequested,
            Event::SendRequested { question: text.clone() },
            Event::DraftChanged { text: text.clone() },
            Event::FileChosen { path: text.clone() },
        ] {
            let result = transition(&phase, event);
            prop_assert!(result.is_err(), "in-flight phase accepted {:?}", result);
        }
    }

    // Invariant 4: I/O effects match the phase they were issued for.
    #[test]
    fn prop_effects_match_phase(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut phase = SessionPhase::default();
        for event in events {
            if let Ok(result) = transition(&phase, event) {
                prop_assert!(
                    effects_are_valid(&result.effects, &result.new_phase),
                    "effects {:?} invalid for {:?}",
                    result.effects,
                    result.new_phase
                );
                phase = result.new_phase;
            }
        }
    }

    // Invariant 5: once adopted, the identifier never changes.
    #[test]
    fn prop_identifier_is_immutable(events in proptest::collection::vec(arb_event(), 0..30)) {
        let mut session = chat_session();
        let adopted = session.phase().document().cloned();
        for event in events {
            let _ = session.handle(event);
            prop_assert_eq!(session.phase().document().cloned(), adopted.clone());
        }
    }

    // Invariant 6: a failed exchange is always recoverable by the next
    // attempt.
    #[test]
    fn prop_error_is_recoverable(message in arb_text(), question in arb_text()) {
        let mut session = chat_session();
        session.handle(Event::SendRequested { question: question.clone() }).expect("send");
        session.handle(Event::AskFailed { message }).expect("fail");
        let retry = session.handle(Event::SendRequested { question });
        prop_assert!(retry.is_ok(), "retry rejected: {:?}", retry);
        prop_assert_eq!(session.last_error(), None);
    }

    // Invariant 7: a blank draft never reaches the wire.
    #[test]
    fn prop_blank_draft_is_a_no_op(blank in "[ \t\n]{0,6}") {
        let mut session = chat_session();
        let before = session.clone();
        let result = session.handle(Event::SendRequested { question: blank });
        prop_assert_eq!(result, Err(TransitionError::EmptyDraft));
        prop_assert_eq!(session, before);
    }

    // Invariant 8: before a document is adopted the conversation workflow
    // is unreachable.
    #[test]
    fn prop_chat_unreachable_without_document(
        events in proptest::collection::vec(arb_event(), 0..30)
    ) {
        let mut session = Session::new();
        for event in events {
            // Without a completed upload exchange there can be no adoption;
            // filter out completions that would adopt one.
            if let Event::UploadCompleted { .. } = event {
                continue;
            }
            let _ = session.handle(event);
            prop_assert!(matches!(session.phase(), SessionPhase::Upload(_)));
            prop_assert!(session.transcript().is_empty());
        }
    }
}

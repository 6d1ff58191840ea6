//! Property-based tests for the transcript store
//!
//! - Saving then loading reproduces the transcript
//! - N chat turns grow the transcript by exactly 2N
//! - Appending never drops or reorders earlier turns

use super::{load, save, Role, SessionContext, Transcript};
use proptest::prelude::*;

fn arb_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::System), Just(Role::User), Just(Role::Assistant)]
}

fn arb_text() -> impl Strategy<Value = String> {
    "\\PC{0,80}"
}

fn arb_transcript() -> impl Strategy<Value = Transcript> {
    proptest::collection::vec((arb_role(), arb_text()), 0..20).prop_map(|turns| {
        turns
            .into_iter()
            .fold(Transcript::new(), |t, (role, text)| t.append(role, text))
    })
}

proptest! {
    #[test]
    fn save_then_load_round_trips(transcript in arb_transcript()) {
        let ctx = save(&SessionContext::new(), &transcript);
        prop_assert_eq!(load(&ctx), transcript);
    }

    #[test]
    fn chat_turns_add_two_per_exchange(
        launched in any::<bool>(),
        exchanges in proptest::collection::vec((arb_text(), arb_text()), 0..15),
    ) {
        let start = if launched {
            Transcript::with_instruction("instruction")
        } else {
            Transcript::new()
        };
        let n = exchanges.len();

        let end = exchanges.into_iter().fold(start, |t, (q, a)| {
            t.append(Role::User, q).append(Role::Assistant, a)
        });

        let expected = if launched { 2 * n + 1 } else { 2 * n };
        prop_assert_eq!(end.len(), expected);
    }

    #[test]
    fn append_preserves_prefix(transcript in arb_transcript(), role in arb_role(), text in arb_text()) {
        let extended = transcript.append(role, text);
        prop_assert_eq!(extended.len(), transcript.len() + 1);
        prop_assert_eq!(&extended.turns()[..transcript.len()], transcript.turns());
        prop_assert!(extended.turns().iter().all(|t| !t.text().trim().is_empty()));
    }
}

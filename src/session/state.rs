//! The transition table: every step of a scan is a pure function of
//! `(state, event, mode) -> (state, effect)`. Side effects (adapter calls,
//! outcome delivery) are described by [`Effect`] and executed by the driver
//! in [`crate::session::TagSession`].

use tracing::{debug, warn};
use tunetag_ndef::{NdefMessage, NdefRecord, decode_message};

use crate::{
    session::{SessionError, SessionMode, SessionOutcome},
    tag::{TagCapability, TagId},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Scanning,
    Connected(TagId),
    CapabilityChecked {
        tag: TagId,
        capability: TagCapability,
    },
    Reading,
    Writing,
    Completed,
    Invalidated,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Connected(_) => "connected",
            Self::CapabilityChecked { .. } => "capability_checked",
            Self::Reading => "reading",
            Self::Writing => "writing",
            Self::Completed => "completed",
            Self::Invalidated => "invalidated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    TagsDetected(Vec<TagId>),
    Connected(TagId),
    ConnectFailed(String),
    CapabilityRead(TagId, TagCapability),
    Dispatch,
    ReadDone(Vec<NdefRecord>),
    WriteDone,
    AdapterFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Connect(TagId),
    QueryCapability(TagId),
    Dispatch,
    Read(TagId),
    Write { tag: TagId, capacity: u32 },
    Complete { status: String, outcome: SessionOutcome },
}

fn fail(status: &str, error: SessionError) -> (SessionState, Effect) {
    (
        SessionState::Invalidated,
        Effect::Complete {
            status: status.to_string(),
            outcome: SessionOutcome::Failure { error },
        },
    )
}

pub fn transition(
    state: SessionState,
    event: SessionEvent,
    mode: SessionMode,
) -> (SessionState, Effect) {
    use SessionEvent as E;
    use SessionState as S;

    match (state, event) {
        // before start and after invalidation nothing moves
        (S::Idle, event) => {
            warn!("event before session start, dropping: {event:?}");
            (S::Idle, Effect::None)
        }
        (S::Invalidated, event) => {
            debug!("event after invalidation, dropping: {event:?}");
            (S::Invalidated, Effect::None)
        }

        (S::Scanning, E::TagsDetected(tags)) => match tags.first() {
            // explicit tie break: the first detected tag wins
            Some(&tag) => {
                if tags.len() > 1 {
                    debug!("{} tags detected, picking the first", tags.len());
                }

                (S::Scanning, Effect::Connect(tag))
            }
            None => fail(
                "No tag detected",
                SessionError::AdapterError("tag detection event carried no tags".to_string()),
            ),
        },

        (S::Scanning, E::Connected(tag)) => (S::Connected(tag), Effect::QueryCapability(tag)),

        (S::Scanning, E::ConnectFailed(reason)) => fail(
            "Could not connect to tag",
            SessionError::ConnectionFailed(reason),
        ),

        (S::Connected(tag), E::CapabilityRead(_, capability)) => {
            (S::CapabilityChecked { tag, capability }, Effect::Dispatch)
        }

        // the dispatch rule: write needs a writable tag, read accepts both
        (S::CapabilityChecked { tag, capability }, E::Dispatch) => match mode {
            SessionMode::Write if capability.is_writable() => (
                S::Writing,
                Effect::Write {
                    tag,
                    capacity: capability.capacity,
                },
            ),
            SessionMode::Read if capability.is_readable() => (S::Reading, Effect::Read(tag)),
            _ => fail("Tag is not compatible", SessionError::IncompatibleTag),
        },

        (S::Reading, E::ReadDone(records)) => {
            let text = match NdefMessage::try_new(records) {
                Ok(message) => decode_message(&message),
                // an empty tag decodes to an empty string
                Err(_) => String::new(),
            };

            (
                S::Completed,
                Effect::Complete {
                    status: "Scan complete".to_string(),
                    outcome: SessionOutcome::ReadResult { text },
                },
            )
        }

        (S::Writing, E::WriteDone) => (
            S::Completed,
            Effect::Complete {
                status: "Write complete".to_string(),
                outcome: SessionOutcome::WriteResult,
            },
        ),

        // any adapter level failure once scanning has begun ends the session
        (_, E::AdapterFailed(reason)) => {
            fail("Tag session failed", SessionError::AdapterError(reason))
        }

        (state, event) => {
            warn!("unexpected event {event:?} in state {}", state.name());
            (state, Effect::None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::NdefStatus;
    use pretty_assertions::assert_eq;
    use tunetag_ndef::encode_text;

    fn read_write() -> TagCapability {
        TagCapability {
            status: NdefStatus::ReadWrite,
            capacity: 512,
        }
    }

    #[test]
    fn detection_picks_first_tag() {
        let (state, effect) = transition(
            SessionState::Scanning,
            SessionEvent::TagsDetected(vec![TagId(7), TagId(8)]),
            SessionMode::Read,
        );

        assert_eq!(state, SessionState::Scanning);
        assert_eq!(effect, Effect::Connect(TagId(7)));
    }

    #[test]
    fn empty_detection_fails_the_session() {
        let (state, effect) = transition(
            SessionState::Scanning,
            SessionEvent::TagsDetected(vec![]),
            SessionMode::Read,
        );

        assert_eq!(state, SessionState::Invalidated);
        assert!(matches!(
            effect,
            Effect::Complete {
                outcome: SessionOutcome::Failure {
                    error: SessionError::AdapterError(_)
                },
                ..
            }
        ));
    }

    #[test]
    fn connect_leads_to_capability_query() {
        let (state, effect) = transition(
            SessionState::Scanning,
            SessionEvent::Connected(TagId(1)),
            SessionMode::Read,
        );

        assert_eq!(state, SessionState::Connected(TagId(1)));
        assert_eq!(effect, Effect::QueryCapability(TagId(1)));
    }

    #[test]
    fn write_mode_needs_read_write_status() {
        for status in [NdefStatus::ReadOnly, NdefStatus::NotSupported] {
            let checked = SessionState::CapabilityChecked {
                tag: TagId(1),
                capability: TagCapability {
                    status,
                    capacity: 64,
                },
            };

            let (state, effect) = transition(checked, SessionEvent::Dispatch, SessionMode::Write);

            assert_eq!(state, SessionState::Invalidated);
            assert!(matches!(
                effect,
                Effect::Complete {
                    outcome: SessionOutcome::Failure {
                        error: SessionError::IncompatibleTag
                    },
                    ..
                }
            ));
        }
    }

    #[test]
    fn read_mode_accepts_read_only_tags() {
        let checked = SessionState::CapabilityChecked {
            tag: TagId(3),
            capability: TagCapability {
                status: NdefStatus::ReadOnly,
                capacity: 64,
            },
        };

        let (state, effect) = transition(checked, SessionEvent::Dispatch, SessionMode::Read);

        assert_eq!(state, SessionState::Reading);
        assert_eq!(effect, Effect::Read(TagId(3)));
    }

    #[test]
    fn write_dispatch_carries_capacity() {
        let checked = SessionState::CapabilityChecked {
            tag: TagId(3),
            capability: read_write(),
        };

        let (state, effect) = transition(checked, SessionEvent::Dispatch, SessionMode::Write);

        assert_eq!(state, SessionState::Writing);
        assert_eq!(
            effect,
            Effect::Write {
                tag: TagId(3),
                capacity: 512
            }
        );
    }

    #[test]
    fn read_completion_decodes_records() {
        let (state, effect) = transition(
            SessionState::Reading,
            SessionEvent::ReadDone(vec![encode_text("A"), encode_text("B")]),
            SessionMode::Read,
        );

        assert_eq!(state, SessionState::Completed);
        assert_eq!(
            effect,
            Effect::Complete {
                status: "Scan complete".to_string(),
                outcome: SessionOutcome::ReadResult {
                    text: "A\n\nB".to_string()
                },
            }
        );
    }

    #[test]
    fn empty_tag_reads_as_empty_text() {
        let (_, effect) = transition(
            SessionState::Reading,
            SessionEvent::ReadDone(vec![]),
            SessionMode::Read,
        );

        assert_eq!(
            effect,
            Effect::Complete {
                status: "Scan complete".to_string(),
                outcome: SessionOutcome::ReadResult {
                    text: String::new()
                },
            }
        );
    }

    #[test]
    fn adapter_failure_short_circuits_from_any_active_state() {
        for state in [
            SessionState::Scanning,
            SessionState::Connected(TagId(1)),
            SessionState::Reading,
            SessionState::Writing,
        ] {
            let (next, effect) = transition(
                state,
                SessionEvent::AdapterFailed("lost tag".to_string()),
                SessionMode::Read,
            );

            assert_eq!(next, SessionState::Invalidated);
            assert!(matches!(
                effect,
                Effect::Complete {
                    outcome: SessionOutcome::Failure {
                        error: SessionError::AdapterError(_)
                    },
                    ..
                }
            ));
        }
    }

    #[test]
    fn invalidated_is_terminal() {
        let (state, effect) = transition(
            SessionState::Invalidated,
            SessionEvent::WriteDone,
            SessionMode::Write,
        );

        assert_eq!(state, SessionState::Invalidated);
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn events_before_start_are_dropped() {
        let (state, effect) = transition(
            SessionState::Idle,
            SessionEvent::TagsDetected(vec![TagId(1)]),
            SessionMode::Read,
        );

        assert_eq!(state, SessionState::Idle);
        assert_eq!(effect, Effect::None);
    }
}

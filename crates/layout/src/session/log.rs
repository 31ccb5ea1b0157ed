//! Numbered history of the commands the input system has applied.
//!
//! Each handled command becomes a [`TransitionRecord`]: its sequence number,
//! the outcome, and the mode the session was left in. The record goes into a
//! bounded history and out as a [`CommandResolved`] event. The event stream
//! has no cap, so a driver that queued a batch can collect one outcome per
//! command however long the batch was.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::{EditMode, SessionCommand, SessionOutcome};

/// Records kept in [`TransitionLog`]; older ones are dropped.
pub const HISTORY_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Position of the command among all commands handled by this app.
    pub seq: u64,
    pub command: SessionCommand,
    pub outcome: SessionOutcome,
    /// Short name of the mode after the command (`browsing`, `placing`, ...).
    pub mode: &'static str,
}

/// Sent once per applied [`SessionInput`](super::SessionInput), in input order.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CommandResolved(pub TransitionRecord);

#[derive(Resource, Debug, Clone, Default)]
pub struct TransitionLog {
    history: VecDeque<TransitionRecord>,
    next_seq: u64,
}

impl TransitionLog {
    /// Number the command, keep it in the history and hand the record back.
    pub fn record(
        &mut self,
        command: SessionCommand,
        outcome: SessionOutcome,
        mode: &EditMode,
    ) -> TransitionRecord {
        let record = TransitionRecord {
            seq: self.next_seq,
            command,
            outcome,
            mode: mode.name(),
        };
        self.next_seq += 1;
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(record.clone());
        record
    }

    /// Commands handled since startup, including those no longer retained.
    pub fn total(&self) -> u64 {
        self.next_seq
    }

    /// Retained records, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.history.iter()
    }

    pub fn last(&self) -> Option<&TransitionRecord> {
        self.history.back()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

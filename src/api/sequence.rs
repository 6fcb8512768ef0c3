//! Request sequencing for overlapping server calls.
//!
//! Every request is issued on a [`Channel`]. On a read channel a new request
//! supersedes the previous one: its cancellation token is tripped and, should its
//! response still arrive, [`RequestSequencer::complete`] reports it as stale so the
//! caller drops it. Only the most recently issued listing or search can change
//! the state rendered to the user.
//!
//! Write channels never supersede. Each delete, add, edit or import keeps its
//! own ticket and token, and its completion is reported exactly once.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Independent request streams. Requests on different channels never supersede
/// each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Listing shown on the home page grid.
    IndexListing,
    /// Listing shown in the management tables.
    ManagementListing,
    /// Movie creation form.
    AddMovie,
    /// Single-field edit form.
    EditField,
    /// Delete confirmation.
    DeleteMovie,
    /// Metadata provider search.
    ThirdPartySearch,
    /// Details of one provider movie.
    ThirdPartyDetails,
    /// Import of a provider movie.
    ThirdPartyImport,
}

impl Channel {
    /// Whether a new request on this channel makes the pending one obsolete.
    ///
    /// True for refetches and provider lookups. Mutations must all reach the
    /// server and all report back.
    #[must_use]
    pub const fn supersedes(self) -> bool {
        matches!(
            self,
            Self::IndexListing
                | Self::ManagementListing
                | Self::ThirdPartySearch
                | Self::ThirdPartyDetails
        )
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub channel: Channel,
    pub seq: u64,
}

/// Shared flag telling an in-flight request that nobody waits for it anymore.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Marks the request as cancelled.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Lifecycle of a channel.
///
/// A write channel stays `Pending` while any of its requests is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
    Cancelled,
}

/// Result of handing a completion to the sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion belongs to the latest request and must be applied.
    Current,
    /// A newer request was issued since; the completion must be discarded.
    Stale,
}

#[derive(Debug, Default)]
struct ChannelSlot {
    latest: u64,
    token: CancellationToken,
    state: Operation,
    /// In-flight requests of a write channel, by sequence number.
    writes: HashMap<u64, CancellationToken>,
}

/// Issues tickets and decides which completions are still relevant.
///
/// # Examples
///
/// ```
/// use videotheque::api::{Channel, Completion, RequestSequencer};
///
/// let mut sequencer = RequestSequencer::default();
/// let first = sequencer.issue(Channel::ManagementListing);
/// let second = sequencer.issue(Channel::ManagementListing);
///
/// assert_eq!(sequencer.complete(second, true), Completion::Current);
/// assert_eq!(sequencer.complete(first, true), Completion::Stale);
/// ```
#[derive(Debug, Default)]
pub struct RequestSequencer {
    next_seq: u64,
    slots: HashMap<Channel, ChannelSlot>,
}

impl RequestSequencer {
    /// Issues a new request on `channel`.
    ///
    /// On a read channel whatever was pending there is cancelled. On a write
    /// channel the new request simply joins the in-flight ones.
    pub fn issue(&mut self, channel: Channel) -> Ticket {
        self.next_seq += 1;
        let seq = self.next_seq;

        let slot = self.slots.entry(channel).or_default();
        if !channel.supersedes() {
            slot.writes.insert(seq, CancellationToken::default());
            slot.latest = seq;
            slot.state = Operation::Pending;
            return Ticket { channel, seq };
        }
        if slot.state == Operation::Pending {
            slot.token.cancel();
            tracing::debug!(?channel, superseded = slot.latest, seq, "request superseded");
        }
        slot.latest = seq;
        slot.token = CancellationToken::default();
        slot.state = Operation::Pending;

        Ticket { channel, seq }
    }

    /// Cancellation token of the request identified by `ticket`.
    ///
    /// A superseded or unknown ticket gets an already-cancelled token.
    #[must_use]
    pub fn token(&self, ticket: Ticket) -> CancellationToken {
        let slot = self.slots.get(&ticket.channel);
        if !ticket.channel.supersedes() {
            if let Some(token) = slot.and_then(|s| s.writes.get(&ticket.seq)) {
                return token.clone();
            }
        }
        match slot {
            Some(slot) if ticket.channel.supersedes() && slot.latest == ticket.seq => {
                slot.token.clone()
            }
            _ => {
                let token = CancellationToken::default();
                token.cancel();
                token
            }
        }
    }

    /// Records the completion of `ticket` and tells whether it is still current.
    pub fn complete(&mut self, ticket: Ticket, succeeded: bool) -> Completion {
        let Some(slot) = self.slots.get_mut(&ticket.channel) else {
            return Completion::Stale;
        };
        if !ticket.channel.supersedes() {
            if slot.writes.remove(&ticket.seq).is_none() {
                tracing::debug!(channel = ?ticket.channel, seq = ticket.seq, "unknown or repeated completion");
                return Completion::Stale;
            }
            slot.state = if !slot.writes.is_empty() {
                Operation::Pending
            } else if succeeded {
                Operation::Succeeded
            } else {
                Operation::Failed
            };
            return Completion::Current;
        }
        if slot.latest != ticket.seq || slot.state != Operation::Pending {
            tracing::debug!(channel = ?ticket.channel, seq = ticket.seq, "discarding stale completion");
            return Completion::Stale;
        }
        slot.state = if succeeded {
            Operation::Succeeded
        } else {
            Operation::Failed
        };
        Completion::Current
    }

    /// Abandons the pending requests on `channel`, if any.
    pub fn cancel(&mut self, channel: Channel) {
        if let Some(slot) = self.slots.get_mut(&channel) {
            if slot.state == Operation::Pending {
                slot.token.cancel();
                for (_, token) in slot.writes.drain() {
                    token.cancel();
                }
                slot.state = Operation::Cancelled;
            }
        }
    }

    #[must_use]
    pub fn state(&self, channel: Channel) -> Operation {
        self.slots
            .get(&channel)
            .map_or(Operation::Idle, |slot| slot.state)
    }

    #[must_use]
    pub fn is_pending(&self, channel: Channel) -> bool {
        self.state(channel) == Operation::Pending
    }
}

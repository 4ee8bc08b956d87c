use serde_json::Value;

/// Where one host-peer negotiation stands. One machine per counterpart,
/// owned and driven by a single endpoint loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    OfferSent,
    AnswerReceived,
    IceExchanging,
    Connected,
    Closed,
}

/// What to do with a remote candidate.
#[derive(Debug, PartialEq)]
pub enum CandidateAction {
    /// The remote description is in place, hand it to the transport.
    Apply(Value),
    /// Arrived before the remote description, buffered for later.
    Hold,
    /// The negotiation is closed, drop it.
    Discard,
}

/// Pure bookkeeping for one negotiation. Candidates may arrive in any order
/// relative to the offer and answer; whatever shows up too early is parked
/// in `pending` until the remote description lands. Stale or duplicate
/// messages never error, they just fail to advance the machine.
#[derive(Debug)]
pub struct Negotiation {
    state: NegotiationState,
    pending: Vec<Value>,
}

impl Negotiation {
    pub fn new() -> Self {
        Self {
            state: NegotiationState::Idle,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == NegotiationState::Connected
    }

    /// Host side: the offer went out. Valid once, from `Idle`.
    pub fn mark_offer_sent(&mut self) -> bool {
        if self.state != NegotiationState::Idle {
            return false;
        }
        self.state = NegotiationState::OfferSent;
        true
    }

    /// Host side: the counterpart answered our offer. `Some` carries the
    /// candidates buffered so far and moves the machine to `IceExchanging`;
    /// `None` means the answer is stale (duplicate, or the negotiation is
    /// already past that point) and must be ignored.
    pub fn accept_answer(&mut self) -> Option<Vec<Value>> {
        if self.state != NegotiationState::OfferSent {
            return None;
        }
        self.state = NegotiationState::IceExchanging;
        Some(std::mem::take(&mut self.pending))
    }

    /// Peer side: true while no offer has been answered yet. Everything
    /// after the first accepted offer reads false.
    pub fn offer_acceptable(&self) -> bool {
        self.state == NegotiationState::Idle
    }

    /// Peer side: our answer went out and the remote description is in
    /// place. Returns the candidates buffered while idle.
    pub fn answer_published(&mut self) -> Vec<Value> {
        if self.state != NegotiationState::Idle {
            return Vec::new();
        }
        self.state = NegotiationState::AnswerReceived;
        std::mem::take(&mut self.pending)
    }

    /// Candidates are additive and never transition the machine.
    pub fn accept_candidate(&mut self, candidate: Value) -> CandidateAction {
        match self.state {
            NegotiationState::Closed => CandidateAction::Discard,
            NegotiationState::AnswerReceived
            | NegotiationState::IceExchanging
            | NegotiationState::Connected => CandidateAction::Apply(candidate),
            NegotiationState::Idle | NegotiationState::OfferSent => {
                self.pending.push(candidate);
                CandidateAction::Hold
            }
        }
    }

    /// The transport reports the pair is live. True when that newly
    /// completed the negotiation.
    pub fn complete(&mut self) -> bool {
        if matches!(
            self.state,
            NegotiationState::Connected | NegotiationState::Closed
        ) {
            return false;
        }
        self.state = NegotiationState::Connected;
        true
    }

    pub fn close(&mut self) {
        self.state = NegotiationState::Closed;
        self.pending.clear();
    }
}

impl Default for Negotiation {
    fn default() -> Self {
        Self::new()
    }
}

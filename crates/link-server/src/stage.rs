//! Link-cable protocol state machine.
//!
//! A trade session is a fixed sequence of stages:
//!
//! ```text
//! Init -> Connect -> Seed -> Trade Block -> Finalize Trade Block
//!      -> Patch List -> Select Trade -> Wait For Deal
//!                          ^    |            |   |
//!                          |    +- cancel ---+---+--> Connect
//!                          +---- reject -----+
//! ```
//!
//! Every tick a stage first checks its transition rules against the bytes
//! it has received so far, in order; the first rule that matches ends the
//! stage and the tick does nothing else. Otherwise the stage does its
//! per-tick I/O: normally one read followed by one write.

use std::fmt;
use std::mem;
use std::sync::Arc;

use link_core::TradeBlock;
use link_protocol::wire_types::{
    is_slot_selection, ACCEPT_PAIR, CANCEL, CONNECT_HANDSHAKE, DEAL_ACCEPT, FOLLOW,
    PATCH_LIST_HANDSHAKE, REJECT_PAIR, SEED_HANDSHAKE, SELECT_FIRST_SLOT,
};
use link_protocol::{patch_trade_block, PatchListData, ProtocolError};
use tracing::{debug, error};

use crate::channel::ByteChannel;

/// Which phase of the protocol a [`Stage`] implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Init,
    Connect,
    Seed,
    TradeBlock,
    FinalizeTradeBlock,
    PatchList,
    SelectTrade,
    WaitForAccept,
}

impl StageKind {
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Init => "Init",
            StageKind::Connect => "Connect",
            StageKind::Seed => "Seed",
            StageKind::TradeBlock => "Trade Block",
            StageKind::FinalizeTradeBlock => "Finalize Trade Block",
            StageKind::PatchList => "Patch List",
            StageKind::SelectTrade => "Select Trade",
            StageKind::WaitForAccept => "Wait For Deal",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the driver should do after a tick.
#[derive(Debug)]
pub enum Transition {
    /// Keep ticking the current stage.
    Stay,
    /// Replace the current stage (and its buffer) with this one.
    Advance(Stage),
    /// The session cannot continue.
    Halt,
}

/// Bytes queued for the peer, sent one per tick.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Upload {
    bytes: Vec<u8>,
    pos: usize,
}

impl Upload {
    fn new(bytes: Vec<u8>) -> Self {
        Upload { bytes, pos: 0 }
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }

    fn is_done(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// State owned by one stage instance; never shared across stages.
#[derive(Debug, Clone)]
enum StageState {
    Idle,
    TradeBlock {
        upload: Upload,
        patch_list: PatchListData,
    },
    Finalize {
        patch_list: PatchListData,
    },
    PatchList {
        upload: Upload,
    },
    SelectTrade {
        cancelled: bool,
    },
}

/// One transition rule: when `when` holds, move on to `next`.
struct Rule {
    when: fn(&Stage) -> bool,
    next: StageKind,
}

// -----------------------------------------------------------------------------
// Transition table
// -----------------------------------------------------------------------------

const INIT_RULES: &[Rule] = &[Rule {
    when: received_any,
    next: StageKind::Connect,
}];

const CONNECT_RULES: &[Rule] = &[Rule {
    when: connect_handshake_done,
    next: StageKind::Seed,
}];

const SEED_RULES: &[Rule] = &[Rule {
    when: seed_handshake_done,
    next: StageKind::TradeBlock,
}];

const TRADE_BLOCK_RULES: &[Rule] = &[Rule {
    when: upload_done,
    next: StageKind::FinalizeTradeBlock,
}];

const FINALIZE_RULES: &[Rule] = &[Rule {
    when: patch_list_handshake_done,
    next: StageKind::PatchList,
}];

const PATCH_LIST_RULES: &[Rule] = &[Rule {
    when: upload_done,
    next: StageKind::SelectTrade,
}];

const SELECT_TRADE_RULES: &[Rule] = &[
    Rule {
        when: trade_cancelled,
        next: StageKind::Connect,
    },
    Rule {
        when: slot_selected,
        next: StageKind::WaitForAccept,
    },
];

const WAIT_FOR_ACCEPT_RULES: &[Rule] = &[
    Rule {
        when: deal_rejected,
        next: StageKind::SelectTrade,
    },
    Rule {
        when: deal_accepted,
        next: StageKind::Connect,
    },
];

fn received_any(s: &Stage) -> bool {
    !s.buf.is_empty()
}

fn connect_handshake_done(s: &Stage) -> bool {
    s.buf.ends_with(&CONNECT_HANDSHAKE)
}

fn seed_handshake_done(s: &Stage) -> bool {
    s.buf.ends_with(&SEED_HANDSHAKE)
}

fn patch_list_handshake_done(s: &Stage) -> bool {
    s.buf.ends_with(&PATCH_LIST_HANDSHAKE)
}

fn upload_done(s: &Stage) -> bool {
    match &s.state {
        StageState::TradeBlock { upload, .. } | StageState::PatchList { upload } => {
            upload.is_done()
        }
        _ => false,
    }
}

fn trade_cancelled(s: &Stage) -> bool {
    matches!(s.state, StageState::SelectTrade { cancelled: true })
}

fn slot_selected(s: &Stage) -> bool {
    matches!(s.buf.as_slice(), [.., slot, 0x00] if is_slot_selection(*slot))
}

fn deal_rejected(s: &Stage) -> bool {
    s.buf.ends_with(&REJECT_PAIR)
}

fn deal_accepted(s: &Stage) -> bool {
    s.buf.ends_with(&ACCEPT_PAIR)
}

// -----------------------------------------------------------------------------
// Stage
// -----------------------------------------------------------------------------

/// One protocol phase together with the bytes received during it.
///
/// Every stage also carries the offer of its session, so the Trade Block
/// stage can be rebuilt after each return to Connect.
#[derive(Debug, Clone)]
pub struct Stage {
    kind: StageKind,
    state: StageState,
    buf: Vec<u8>,
    offer: Arc<TradeBlock>,
}

impl Stage {
    fn with_state(kind: StageKind, state: StageState) -> Self {
        Stage {
            kind,
            state,
            buf: Vec::new(),
            offer: Arc::new(TradeBlock::scripted_offer()),
        }
    }

    /// Offer `offer` from the next Trade Block stage on, instead of the
    /// scripted one.
    pub fn with_offer(mut self, offer: Arc<TradeBlock>) -> Self {
        self.offer = offer;
        self
    }

    /// Announce the follow role.
    pub fn init() -> Self {
        Self::with_state(StageKind::Init, StageState::Idle)
    }

    /// Echo until the peer starts the seed exchange.
    pub fn connect() -> Self {
        Self::with_state(StageKind::Connect, StageState::Idle)
    }

    /// Echo the random seed until the peer starts the trade block.
    pub fn seed() -> Self {
        Self::with_state(StageKind::Seed, StageState::Idle)
    }

    /// Send the scripted offer.
    pub fn trade_block() -> Result<Self, ProtocolError> {
        Self::offering(&TradeBlock::scripted_offer())
    }

    /// Send `block`, byte for byte, while discarding the peer's block.
    pub fn offering(block: &TradeBlock) -> Result<Self, ProtocolError> {
        let out = patch_trade_block(block)?;

        let stage = Self::with_state(
            StageKind::TradeBlock,
            StageState::TradeBlock {
                upload: Upload::new(out.patched),
                patch_list: out.patch_list,
            },
        );
        Ok(stage.with_offer(Arc::new(block.clone())))
    }

    /// Echo until the peer starts the patch list; `patch_list` is sent
    /// by the stage that follows.
    pub fn finalize_trade_block(patch_list: PatchListData) -> Self {
        Self::with_state(
            StageKind::FinalizeTradeBlock,
            StageState::Finalize { patch_list },
        )
    }

    /// Send the patch list while discarding the peer's.
    pub fn patch_list(patch_list: PatchListData) -> Self {
        Self::with_state(
            StageKind::PatchList,
            StageState::PatchList {
                upload: Upload::new(patch_list.as_bytes().to_vec()),
            },
        )
    }

    /// Mirror the peer's menu choice with our only Pokémon.
    pub fn select_trade() -> Self {
        Self::with_state(
            StageKind::SelectTrade,
            StageState::SelectTrade { cancelled: false },
        )
    }

    /// Keep accepting until the peer confirms or backs out.
    pub fn wait_for_accept() -> Self {
        Self::with_state(StageKind::WaitForAccept, StageState::Idle)
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn offer(&self) -> &TradeBlock {
        &self.offer
    }

    /// Bytes received since this stage started.
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Run one tick against `channel`.
    pub async fn update<C: ByteChannel>(&mut self, channel: &mut C) -> Transition {
        let this: &Stage = self;
        let next = this
            .rules()
            .iter()
            .find(|rule| (rule.when)(this))
            .map(|rule| rule.next);

        if let Some(next) = next {
            return self.successor(next);
        }

        self.tick(channel).await;
        Transition::Stay
    }

    fn rules(&self) -> &'static [Rule] {
        match self.kind {
            StageKind::Init => INIT_RULES,
            StageKind::Connect => CONNECT_RULES,
            StageKind::Seed => SEED_RULES,
            StageKind::TradeBlock => TRADE_BLOCK_RULES,
            StageKind::FinalizeTradeBlock => FINALIZE_RULES,
            StageKind::PatchList => PATCH_LIST_RULES,
            StageKind::SelectTrade => SELECT_TRADE_RULES,
            StageKind::WaitForAccept => WAIT_FOR_ACCEPT_RULES,
        }
    }

    fn successor(&mut self, next: StageKind) -> Transition {
        let offer = Arc::clone(&self.offer);

        let stage = match next {
            StageKind::Init => Stage::init(),
            StageKind::Connect => Stage::connect(),
            StageKind::Seed => Stage::seed(),
            StageKind::TradeBlock => match Stage::offering(&offer) {
                Ok(stage) => stage,
                Err(e) => {
                    error!("cannot build trade block: {}", e);
                    return Transition::Halt;
                }
            },
            StageKind::FinalizeTradeBlock => Stage::finalize_trade_block(self.take_patch_list()),
            StageKind::PatchList => Stage::patch_list(self.take_patch_list()),
            StageKind::SelectTrade => Stage::select_trade(),
            StageKind::WaitForAccept => Stage::wait_for_accept(),
        };

        Transition::Advance(stage.with_offer(offer))
    }

    /// Hand the cached patch list on to the next stage.
    fn take_patch_list(&mut self) -> PatchListData {
        match &mut self.state {
            StageState::TradeBlock { patch_list, .. } | StageState::Finalize { patch_list } => {
                mem::take(patch_list)
            }
            _ => PatchListData::empty(),
        }
    }

    async fn consume<C: ByteChannel>(&mut self, channel: &mut C) -> u8 {
        let b = channel.read().await;
        self.buf.push(b);
        b
    }

    async fn tick<C: ByteChannel>(&mut self, channel: &mut C) {
        match self.kind {
            StageKind::Init => {
                channel.write(FOLLOW).await;
                self.consume(channel).await;
                channel.write(FOLLOW).await;
            }
            StageKind::Connect | StageKind::Seed | StageKind::FinalizeTradeBlock => {
                let b = self.consume(channel).await;
                channel.write(b).await;
            }
            StageKind::TradeBlock | StageKind::PatchList => {
                self.consume(channel).await;

                let next = match &mut self.state {
                    StageState::TradeBlock { upload, .. } | StageState::PatchList { upload } => {
                        upload.next_byte()
                    }
                    _ => None,
                };
                if let Some(b) = next {
                    channel.write(b).await;
                }
            }
            StageKind::SelectTrade => {
                let b = self.consume(channel).await;

                if b == CANCEL {
                    debug!(client = %channel.id(), "trade cancelled by peer");
                    if let StageState::SelectTrade { cancelled } = &mut self.state {
                        *cancelled = true;
                    }
                } else if b >= SELECT_FIRST_SLOT {
                    channel.write(SELECT_FIRST_SLOT).await;
                } else {
                    channel.write(0x00).await;
                }
            }
            StageKind::WaitForAccept => {
                self.consume(channel).await;
                channel.write(DEAL_ACCEPT).await;
            }
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

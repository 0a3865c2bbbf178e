//! Per-connection driver loop.
//!
//! Owns one [`ByteChannel`] and the active [`Stage`], and keeps ticking
//! until the peer goes away or the stage machine gives up. There is no
//! step limit: the session lasts as long as the peer keeps sending.

use tracing::info;

use crate::channel::ByteChannel;
use crate::stage::{Stage, Transition};

/// Drives the stage machine for a single peer.
#[derive(Debug)]
pub struct Trader<C> {
    channel: C,
    stage: Stage,
}

impl<C: ByteChannel> Trader<C> {
    /// Start a session at the Init stage.
    pub fn new(channel: C) -> Self {
        Self::starting_at(channel, Stage::init())
    }

    pub fn starting_at(channel: C, stage: Stage) -> Self {
        Trader { channel, stage }
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Advance by one tick. Returns `false` once the session is over.
    pub async fn step(&mut self) -> bool {
        let transition = self.stage.update(&mut self.channel).await;
        let client = self.channel.id();

        if !self.channel.is_alive() {
            info!(client = %client, "serial is dead.");
            return false;
        }

        match transition {
            Transition::Stay => true,
            Transition::Halt => {
                info!(client = %client, "{} -> none", self.stage);
                false
            }
            Transition::Advance(next) => {
                info!(client = %client, "{} -> {}", self.stage, next);
                self.stage = next;
                true
            }
        }
    }

    /// Run until the session ends, then hand the channel back.
    pub async fn run(mut self) -> C {
        while self.step().await {}

        info!(client = %self.channel.id(), "session ended.");
        self.channel
    }
}

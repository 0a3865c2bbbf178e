// crates/link-server/tests/common/mod.rs
#![allow(dead_code)]

use std::collections::VecDeque;

use link_server::{ByteChannel, ClientId, Stage, Trader, NO_DATA};

/// In-memory peer: replays a fixed inbound script and records every byte
/// written back. Runs dry like a closed socket.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    inbound: VecDeque<u8>,
    pub outbound: Vec<u8>,
    dead: bool,
}

impl ScriptedChannel {
    pub fn new(script: &[u8]) -> Self {
        ScriptedChannel {
            inbound: script.iter().copied().collect(),
            outbound: Vec::new(),
            dead: false,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }

    pub fn pending(&self) -> usize {
        self.inbound.len()
    }
}

impl ByteChannel for ScriptedChannel {
    async fn read(&mut self) -> u8 {
        match self.inbound.pop_front() {
            Some(b) if !self.dead => b,
            _ => {
                self.dead = true;
                NO_DATA
            }
        }
    }

    async fn write(&mut self, b: u8) {
        if !self.dead {
            self.outbound.push(b);
        }
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn id(&self) -> ClientId {
        ClientId(1)
    }
}

/// Tick `stage` once per scripted byte, asserting it never leaves early.
pub async fn tick_through(stage: &mut Stage, channel: &mut ScriptedChannel, bytes: &[u8]) {
    channel.feed(bytes);
    for _ in 0..bytes.len() {
        match stage.update(channel).await {
            link_server::Transition::Stay => {}
            other => panic!("{} left early: {:?}", stage, other),
        }
    }
}

/// Step the trader until the script is used up, then once more so the
/// final transition rule gets evaluated.
pub async fn drain(trader: &mut Trader<ScriptedChannel>) {
    while trader.channel().pending() > 0 {
        assert!(trader.step().await, "session ended early in {}", trader.stage());
    }
    assert!(trader.step().await, "session ended in {}", trader.stage());
}

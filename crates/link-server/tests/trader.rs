// crates/link-server/tests/trader.rs
mod common;

use std::sync::Arc;

use common::{drain, ScriptedChannel};
use link_core::TradeBlock;
use link_protocol::wire_types::{
    ACCEPT_PAIR, CANCEL, CONNECTED, CONNECT_HANDSHAKE, DEAL_ACCEPT, FOLLOW, LEAD,
    PATCH_LIST_HANDSHAKE, PATCH_LIST_LEN, REJECT_PAIR, SEED_HANDSHAKE, SELECT_FIRST_SLOT,
};
use link_protocol::{decode_trade_block, patch_trade_block, TRADE_BLOCK_LEN};
use link_server::{ByteChannel, Stage, StageKind, Trader};

/// What a lead console sends for one full trade, up to the menu.
fn script_until_menu() -> Vec<u8> {
    let mut script = vec![LEAD];
    script.extend_from_slice(&[CONNECTED, 0x00]);
    script.extend_from_slice(&CONNECT_HANDSHAKE);
    script.extend_from_slice(&[0x47, 0x8A, 0x13]);
    script.extend_from_slice(&SEED_HANDSHAKE);
    script.extend(std::iter::repeat(0x11).take(TRADE_BLOCK_LEN));
    script.extend_from_slice(&PATCH_LIST_HANDSHAKE);
    script.extend(std::iter::repeat(0x00).take(PATCH_LIST_LEN));
    script
}

#[tokio::test]
async fn full_trade_ends_back_in_connect() {
    let mut script = script_until_menu();
    script.extend_from_slice(&[SELECT_FIRST_SLOT, 0x00]);
    script.extend_from_slice(&ACCEPT_PAIR);

    let mut trader = Trader::new(ScriptedChannel::new(&script));
    drain(&mut trader).await;

    assert_eq!(trader.stage().kind(), StageKind::Connect);
    assert!(trader.channel().is_alive());

    let offer = patch_trade_block(&TradeBlock::scripted_offer()).expect("offer encodes");

    let mut expected = vec![FOLLOW, FOLLOW, CONNECTED, 0x00];
    expected.extend_from_slice(&CONNECT_HANDSHAKE);
    expected.extend_from_slice(&[0x47, 0x8A, 0x13]);
    expected.extend_from_slice(&SEED_HANDSHAKE);
    expected.extend_from_slice(&offer.patched);
    expected.extend_from_slice(&PATCH_LIST_HANDSHAKE);
    expected.extend_from_slice(offer.patch_list.as_bytes());
    expected.extend_from_slice(&[SELECT_FIRST_SLOT, 0x00]);
    expected.extend_from_slice(&[DEAL_ACCEPT, DEAL_ACCEPT]);

    assert_eq!(trader.channel().outbound, expected);
}

#[tokio::test]
async fn rejected_deal_can_be_retried() {
    let mut script = script_until_menu();
    script.extend_from_slice(&[0x61, 0x00]);
    script.extend_from_slice(&REJECT_PAIR);

    let mut trader = Trader::new(ScriptedChannel::new(&script));
    drain(&mut trader).await;
    assert_eq!(trader.stage().kind(), StageKind::SelectTrade);

    let sent = &trader.channel().outbound;
    assert_eq!(
        &sent[sent.len() - 4..],
        &[SELECT_FIRST_SLOT, 0x00, DEAL_ACCEPT, DEAL_ACCEPT]
    );

    // The menu is live again: a new pick goes through.
    let mut trader =
        Trader::starting_at(ScriptedChannel::new(&[0x62, 0x00]), Stage::select_trade());
    drain(&mut trader).await;
    assert_eq!(trader.stage().kind(), StageKind::WaitForAccept);
}

#[tokio::test]
async fn cancel_from_menu_restarts_handshake() {
    let mut script = script_until_menu();
    script.push(CANCEL);

    let mut trader = Trader::new(ScriptedChannel::new(&script));
    drain(&mut trader).await;

    assert_eq!(trader.stage().kind(), StageKind::Connect);
}

#[tokio::test]
async fn session_ends_when_the_peer_goes_quiet() {
    let trader = Trader::new(ScriptedChannel::new(&[LEAD]));

    let channel = trader.run().await;

    assert!(!channel.is_alive());
    // Init -> Connect, then the first Connect read runs dry.
    assert_eq!(channel.outbound, vec![FOLLOW, FOLLOW]);
}

#[tokio::test]
async fn step_reports_dead_channel() {
    let mut trader = Trader::new(ScriptedChannel::new(&[]));

    assert!(!trader.step().await);
    assert_eq!(trader.stage().kind(), StageKind::Init);
    assert_eq!(trader.channel().outbound, vec![FOLLOW]);
}

#[tokio::test]
async fn unsendable_offer_ends_the_session_after_seed() {
    let block = decode_trade_block(&[0xFE; TRADE_BLOCK_LEN]).expect("full-length block");
    let stage = Stage::seed().with_offer(Arc::new(block));
    let mut trader = Trader::starting_at(ScriptedChannel::new(&SEED_HANDSHAKE), stage);

    for _ in 0..SEED_HANDSHAKE.len() {
        assert!(trader.step().await);
    }

    assert!(!trader.step().await);
    assert_eq!(trader.stage().kind(), StageKind::Seed);
    assert!(trader.channel().is_alive());
    assert_eq!(trader.channel().outbound, SEED_HANDSHAKE.to_vec());
}

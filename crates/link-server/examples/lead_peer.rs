//! Plays the lead side of one full trade against a running link-server
//! and prints the offer it receives.
//!
//! ```text
//! cargo run -p link-server --example lead_peer
//! ```

use std::env;

use anyhow::{bail, Context, Result};
use link_core::TradeBlock;
use link_protocol::wire_types::{
    ACCEPT_PAIR, CONNECT_HANDSHAKE, LEAD, PATCH_LIST_HANDSHAKE, PATCH_LIST_LEN, SEED_HANDSHAKE,
    SELECT_FIRST_SLOT,
};
use link_protocol::{decode_trade_block, patch_trade_block, PatchListData, TRADE_BLOCK_LEN};
use link_server::config::DEFAULT_SOCKET_PATH;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;

/// Send each byte and collect the follower's reply to it.
async fn exchange(stream: &mut UnixStream, bytes: &[u8]) -> Result<Vec<u8>> {
    let mut replies = Vec::with_capacity(bytes.len());
    for &b in bytes {
        stream.write_u8(b).await?;
        replies.push(stream.read_u8().await?);
    }
    Ok(replies)
}

#[tokio::main]
async fn main() -> Result<()> {
    let path = env::var("LINK_SOCKET_PATH").unwrap_or_else(|_| DEFAULT_SOCKET_PATH.to_string());

    println!("Connecting to {}...", path);
    let mut stream = UnixStream::connect(&path)
        .await
        .with_context(|| format!("connecting to {}", path))?;

    // The follower speaks first, then answers our role byte.
    let role = stream.read_u8().await?;
    let role_again = exchange(&mut stream, &[LEAD]).await?;
    println!("follower role: {:#04x} / {:#04x}", role, role_again[0]);

    exchange(&mut stream, &CONNECT_HANDSHAKE).await?;
    exchange(&mut stream, &SEED_HANDSHAKE).await?;

    let ours = patch_trade_block(&TradeBlock::default())?;
    let mut theirs = exchange(&mut stream, &ours.patched).await?;
    if theirs.len() != TRADE_BLOCK_LEN {
        bail!("short trade block: {} bytes", theirs.len());
    }

    exchange(&mut stream, &PATCH_LIST_HANDSHAKE).await?;

    let their_patches = exchange(&mut stream, ours.patch_list.as_bytes()).await?;
    let their_patches = PatchListData::try_from(&their_patches[..PATCH_LIST_LEN])?;
    their_patches.decode()?.restore(&mut theirs);

    let offer = decode_trade_block(&theirs)?;
    println!("trainer {} offers:", offer.trainer_name);
    for (slot, mon) in offer.members().enumerate() {
        println!(
            "  slot {}: species {:#04x} \"{}\" level {} (OT {} / {})",
            slot,
            mon.species,
            offer.nicknames[slot],
            mon.level,
            offer.original_trainer_names[slot],
            mon.original_trainer_id
        );
    }

    let picked = exchange(&mut stream, &[SELECT_FIRST_SLOT, 0x00]).await?;
    println!("follower picked {:#04x}", picked[0]);

    let deal = exchange(&mut stream, &ACCEPT_PAIR).await?;
    println!("follower answered {:02x?}, trade done.", deal);

    Ok(())
}

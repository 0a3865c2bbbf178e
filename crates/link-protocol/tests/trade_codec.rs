// crates/link-protocol/tests/trade_codec.rs
use link_core::{
    EffortValues, Name, PartyData, SpeciesType, Stats, StatusCondition, TradeBlock,
};
use link_protocol::wire_types::{PATCH_MARKER, SENTINEL};
use link_protocol::{
    decode_party_data, decode_trade_block, encode_party_data, encode_trade_block,
    patch_trade_block, PatchListData, ProtocolError, PARTY_DATA_LEN, TRADE_BLOCK_LEN,
};

const PARTY_START: usize = 19;
const OT_NAMES_START: usize = PARTY_START + 6 * PARTY_DATA_LEN;
const NICKNAMES_START: usize = OT_NAMES_START + 6 * 11;

fn encoded(block: &TradeBlock) -> Vec<u8> {
    let mut out = Vec::new();
    encode_trade_block(block, &mut out);
    out
}

fn busy_party_member() -> PartyData {
    PartyData {
        species: 0xB1,
        hp: 0xABCD,
        level: 100,
        status: StatusCondition::BURNED,
        type1: SpeciesType::Fire,
        type2: SpeciesType::Flying,
        catch_rate: 45,
        moves: [1, 2, 3, 4],
        original_trainer_id: 0xFFFF,
        experience: [0x0F, 0x42, 0x40],
        effort_values: EffortValues(Stats::new(0xFFFF, 1, 2, 3, 4)),
        individual_values: 0xFFFF,
        move_pp: [35, 30, 25, 20],
        level_copy: 100,
        stats: Stats::new(300, 250, 200, 150, 100),
    }
}

#[test]
fn serialized_length_is_fixed() {
    assert_eq!(TRADE_BLOCK_LEN, 415);
    assert_eq!(encoded(&TradeBlock::default()).len(), TRADE_BLOCK_LEN);
    assert_eq!(encoded(&TradeBlock::scripted_offer()).len(), TRADE_BLOCK_LEN);

    let mut full = TradeBlock::scripted_offer();
    full.party = [busy_party_member(); 6];
    full.party_size = 6;
    assert_eq!(encoded(&full).len(), TRADE_BLOCK_LEN);
}

#[test]
fn fields_land_at_their_big_endian_offsets() {
    let raw = encoded(&TradeBlock::scripted_offer());

    assert_eq!(raw[0], 0x80);
    assert_eq!(raw[1], 0x50);
    assert_eq!(raw[11], 1);
    assert_eq!(&raw[12..14], &[0x85, 0xFF]);

    let mon = &raw[PARTY_START..PARTY_START + PARTY_DATA_LEN];
    assert_eq!(mon[0], 0x85);
    assert_eq!(&mon[1..3], &[0x00, 0x04]);
    assert_eq!(mon[3], 5);
    assert_eq!(&mon[5..8], &[0x15, 0x15, 0xFF]);
    assert_eq!(&mon[12..14], &1337u16.to_be_bytes());
    assert_eq!(&mon[14..17], &[0x00, 0x00, 0xFF]);
    assert_eq!(mon[33], 5);
    assert_eq!(&mon[34..36], &[0x00, 0x0A]);

    assert_eq!(raw[OT_NAMES_START], 0x80);
    assert_eq!(raw[NICKNAMES_START], 0x80);
    assert_eq!(raw[NICKNAMES_START + 11], 0x50);
}

#[test]
fn sentinel_free_block_is_sent_unchanged() {
    let out = patch_trade_block(&TradeBlock::scripted_offer()).expect("scripted offer builds");

    assert!(!out.raw.contains(&SENTINEL));
    assert_eq!(out.patched, out.raw);
    assert!(out.offsets.is_empty());
    assert_eq!(out.patch_list, PatchListData::empty());
    assert!(out.patch_list.decode().expect("decodes").is_empty());
}

#[test]
fn sentinel_bytes_are_neutralized_and_listed() {
    let mut block = TradeBlock::scripted_offer();
    block.party[0].hp = 0x00FE;
    block.party[2].catch_rate = SENTINEL;
    block.nicknames[5].0[0] = SENTINEL;

    let out = patch_trade_block(&block).expect("block builds");

    let expected = [
        PARTY_START + 2,
        PARTY_START + 2 * PARTY_DATA_LEN + 7,
        NICKNAMES_START + 5 * 11,
    ];
    assert_eq!(out.offsets.as_slice(), &expected);

    for (i, (&raw, &sent)) in out.raw.iter().zip(&out.patched).enumerate() {
        if raw == SENTINEL {
            assert!(expected.contains(&i));
            assert_eq!(sent, PATCH_MARKER);
        } else {
            assert_eq!(sent, raw, "byte {} changed", i);
        }
    }

    // 404 is past the first page: switch marker, then 404 - 0xFC + 1.
    assert_eq!(
        &out.patch_list.as_bytes()[..5],
        &[0x16, 0x73, 0xFF, 0x99, 0xFF]
    );
    assert_eq!(out.patch_list.decode().expect("decodes"), out.offsets);

    let mut restored = out.patched.clone();
    out.offsets.restore(&mut restored);
    assert_eq!(restored, out.raw);
}

#[test]
fn decode_mirrors_encode() {
    let mut block = TradeBlock::scripted_offer();
    block.party[3] = busy_party_member();
    block.nicknames[3] = Name::from_text("CHARIZARD").expect("encodable");

    let raw = encoded(&block);
    assert_eq!(decode_trade_block(&raw), Ok(block));

    let mut one = Vec::new();
    encode_party_data(&busy_party_member(), &mut one);
    assert_eq!(one.len(), PARTY_DATA_LEN);
    assert_eq!(decode_party_data(&one), Ok(busy_party_member()));
}

#[test]
fn truncated_input_is_rejected() {
    let raw = encoded(&TradeBlock::scripted_offer());

    assert_eq!(
        decode_trade_block(&raw[..TRADE_BLOCK_LEN - 1]),
        Err(ProtocolError::Truncated {
            expected: TRADE_BLOCK_LEN,
            actual: TRADE_BLOCK_LEN - 1,
        })
    );
    assert!(matches!(
        decode_party_data(&raw[..10]),
        Err(ProtocolError::Truncated { .. })
    ));
}

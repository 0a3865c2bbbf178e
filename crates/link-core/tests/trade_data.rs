// crates/link-core/tests/trade_data.rs
use link_core::{
    decode_char, encode_char, Name, SpeciesType, StatusCondition, TextError, TradeBlock,
    NAME_LEN, TEXT_TERMINATOR,
};

#[test]
fn name_encodes_and_pads_with_terminator() {
    let name = Name::from_text("RED").expect("RED is encodable");

    assert_eq!(&name.0[..3], &[0x91, 0x84, 0x83]);
    assert!(name.0[3..].iter().all(|&b| b == TEXT_TERMINATOR));
    assert_eq!(name.to_string(), "RED");
}

#[test]
fn name_round_trips_mixed_text() {
    let err = Name::from_text("Mr. Mime 2!").unwrap_err();
    assert_eq!(err, TextError::TooLong { len: 11, max: NAME_LEN - 1 });

    let name = Name::from_text("Mr.Mime-2!").expect("ten characters fit");
    assert_eq!(name.to_string(), "Mr.Mime-2!");
}

#[test]
fn name_rejects_unmapped_characters() {
    assert_eq!(Name::from_text("AB#"), Err(TextError::Unmapped('#')));
    assert_eq!(Name::from_text("é"), Err(TextError::Unmapped('é')));
}

#[test]
fn name_display_stops_at_terminator_and_masks_unknown_bytes() {
    let mut raw = [TEXT_TERMINATOR; NAME_LEN];
    raw[0] = 0x80;
    raw[1] = 0x00;
    raw[2] = 0xF6;
    raw[4] = 0x81;

    assert_eq!(Name(raw).to_string(), "A?0");
    assert_eq!(Name::EMPTY.to_string(), "");
}

#[test]
fn character_map_is_symmetric_for_supported_glyphs() {
    for b in 0u8..=0xFF {
        if let Some(c) = decode_char(b) {
            assert_eq!(encode_char(c), Some(b), "glyph {:?}", c);
        }
    }

    assert_eq!(decode_char(TEXT_TERMINATOR), None);
    assert_eq!(encode_char('\n'), None);
}

#[test]
fn species_type_preserves_unknown_codes() {
    assert_eq!(SpeciesType::from_u8(0x15), SpeciesType::Water);
    assert_eq!(SpeciesType::Water.as_u8(), 0x15);
    assert_eq!(SpeciesType::from_u8(0x0B), SpeciesType::Other(0x0B));
    assert_eq!(SpeciesType::Other(0x0B).as_u8(), 0x0B);
}

#[test]
fn status_flags_combine() {
    let status = StatusCondition::POISONED | StatusCondition::PARALYZED;

    assert_eq!(status.bits(), 0x48);
    assert!(status.contains(StatusCondition::POISONED));
    assert!(!status.contains(StatusCondition::ASLEEP));
    assert!(StatusCondition::NONE.is_none());
}

#[test]
fn scripted_offer_has_one_member() {
    let block = TradeBlock::scripted_offer();

    assert_eq!(block.party_size, 1);
    assert_eq!(block.party_members[0], 0x85);
    assert_eq!(block.party_members[1], 0xFF);
    assert_eq!(block.trainer_name.to_string(), "A");
    assert_eq!(block.nicknames[0].to_string(), "A");
    assert_eq!(block.original_trainer_names[1], Name::EMPTY);

    let members: Vec<_> = block.members().collect();
    assert_eq!(members.len(), 1);

    let mon = members[0];
    assert_eq!(mon.species, 0x85);
    assert_eq!(mon.level, mon.level_copy);
    assert_eq!(mon.type1, SpeciesType::Water);
    assert_eq!(mon.original_trainer_id, 1337);
    assert_eq!(mon.experience_points(), 0xFF);
    assert_eq!(mon.stats.to_array(), [10, 5, 5, 5, 5]);
}

#[test]
fn scripted_offer_pads_with_terminators_not_zeros() {
    let block = TradeBlock::scripted_offer();

    assert!(block.trainer_name.0[1..].iter().all(|&b| b == TEXT_TERMINATOR));
    assert!(block.party_members[1..].iter().all(|&b| b == 0xFF));
    for name in block.nicknames[1..].iter().chain(&block.original_trainer_names[1..]) {
        assert_eq!(name.0, [TEXT_TERMINATOR; NAME_LEN]);
    }
}

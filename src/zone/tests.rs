use proptest::prelude::*;

use super::*;
use crate::config::SlopTolerance;
use crate::testutil::StreamBuilder;

#[test]
fn test_bool_record_with_padding_closes_at_declared_end() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'A', |b| {
        b.bool(true).zeros(5);
    });
    assert_eq!(builder.len(), 10);
    let mut zone = builder.zone();

    let header = zone.open_record(RecordProbe::Sw(Some(b'A'))).unwrap();
    assert_eq!(header.end, 10);
    assert_eq!(zone.input_mut().read_bool(), Some(true));
    let status = zone.close_record(&header, "Bool");
    assert_eq!(status, CloseStatus::Skipped(5));
    assert_eq!(zone.tell(), header.start + 10);
    assert_eq!(zone.level(), 0);
}

#[test]
fn test_flag_zone_skips_unread_fields() {
    let mut builder = StreamBuilder::new();
    builder.flag_zone(0x30, 3, &[7, 8, 9]).u8(0x55);
    let mut zone = builder.zone();

    let flags = zone.open_flag_zone().unwrap();
    assert_eq!(flags, 0x30);
    let after_header = zone.tell();
    assert_eq!(zone.input_mut().read_u8(), Some(7));
    assert_eq!(zone.close_flag_zone("Flags"), CloseStatus::Tolerated(2));
    assert_eq!(zone.tell(), after_header + 3);
    assert_eq!(zone.input_mut().read_u8(), Some(0x55));
}

#[test]
fn test_flag_zone_skip_follows_configured_tolerance() {
    let mut builder = StreamBuilder::new();
    builder.flag_zone(0x20, 3, &[4, 5, 6]);
    let mut zone = builder.zone_with(DecoderConfig::new().with_slop(SlopTolerance::strict()));

    zone.open_flag_zone().unwrap();
    zone.input_mut().read_u8();
    assert_eq!(zone.close_flag_zone("Flags"), CloseStatus::Skipped(2));
    assert_eq!(zone.tell(), 4);
    assert!(zone.diagnostics().any(|d| matches!(
        d,
        Diagnostic::UnreadBytes {
            family: RecordFamily::Flag,
            count: 2,
            tolerated: false,
            ..
        }
    )));
}

#[test]
fn test_flag_zone_reports_four_byte_width() {
    // one header byte + three sub-field bytes: 4 bytes in total
    let mut builder = StreamBuilder::new();
    builder.flag_zone(0x10, 3, &[1, 2, 3]);
    let mut zone = builder.zone();
    let start = zone.tell();
    {
        let mut flags = zone.flag_scope("Flags").unwrap();
        assert_eq!(flags.flags(), 0x10);
        flags.input_mut().read_u8();
    }
    assert_eq!(zone.tell(), start + 4);
}

#[test]
fn test_tag_mismatch_restores_cursor() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'B', |b| {
        b.u16(1);
    });
    let mut zone = builder.zone();

    assert!(zone.open_record(RecordProbe::Sw(Some(b'A'))).is_none());
    assert_eq!(zone.tell(), 0);
    assert!(zone.open_record(RecordProbe::Sc(None)).is_none());
    assert_eq!(zone.tell(), 0);
    assert_eq!(zone.tag_mismatches(), 2);
    assert!(zone.diagnostics().is_empty());

    let header = zone.open_record(RecordProbe::Sw(None)).unwrap();
    assert_eq!(header.tag, RecordTag::Char(b'B'));
}

#[test]
fn test_repeated_tag_mismatches_are_counted_not_stored() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'B', |b| {
        b.u16(1);
    });
    let mut zone = builder.zone();

    for _ in 0..1000 {
        assert!(zone.open_record(RecordProbe::Sw(Some(b'Z'))).is_none());
        assert!(zone.open_record(RecordProbe::Sc(None)).is_none());
    }
    assert_eq!(zone.tell(), 0);
    assert_eq!(zone.tag_mismatches(), 2000);
    assert!(zone.diagnostics().is_empty());
}

#[test]
fn test_non_printable_sw_tag_rejected() {
    let mut builder = StreamBuilder::new();
    builder.u32((8 << 8) | 0x01).u32(0);
    let mut zone = builder.zone();
    assert!(zone.open_record(RecordProbe::Sw(None)).is_none());
    assert_eq!(zone.tell(), 0);
}

#[test]
fn test_child_end_healed_to_parent() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'P', |b| {
        // child claims 100 bytes but the parent holds 8
        b.u32((100 << 8) | u32::from(b'C')).u32(0xDEAD_BEEF);
    });
    builder.u8(0x77);
    let mut zone = builder.zone();

    let parent = zone.open_record(RecordProbe::Sw(Some(b'P'))).unwrap();
    let child = zone.open_record(RecordProbe::Sw(Some(b'C'))).unwrap();
    assert_eq!(child.end, parent.end);
    assert!(zone.diagnostics().any(|d| matches!(
        d,
        Diagnostic::TruncatedRecord {
            declared: 104,
            healed: 12,
            ..
        }
    )));
    zone.close_record(&child, "Child");
    zone.close_record(&parent, "Parent");
    assert_eq!(zone.input_mut().read_u8(), Some(0x77));
}

#[test]
fn test_record_end_healed_to_stream() {
    let mut builder = StreamBuilder::new();
    builder.u32((64 << 8) | u32::from(b'T')).u16(3);
    let mut zone = builder.zone();
    let header = zone.open_record(RecordProbe::Sw(Some(b'T'))).unwrap();
    assert_eq!(header.end, 6);
    zone.close_record(&header, "T");
    assert_eq!(zone.tell(), 6);
}

#[test]
fn test_overrun_moves_cursor_back() {
    let mut builder = StreamBuilder::new();
    builder
        .sc(0x4201, |b| {
            b.u16(5);
        })
        .u32(0x1234_5678);
    let mut zone = builder.zone();

    let header = zone.open_record(RecordProbe::Sc(Some(0x4201))).unwrap();
    assert_eq!(header.end, 8);
    zone.input_mut().read_u32();
    assert_eq!(zone.close_record(&header, "Cell"), CloseStatus::Overrun(2));
    assert_eq!(zone.tell(), 8);
}

#[test]
fn test_slop_tolerance_per_family() {
    let mut builder = StreamBuilder::new();
    builder.sdr(b"DrOb", 2, |b| {
        b.u16(1).zeros(3);
    });
    let mut zone = builder.zone();
    let header = zone.open_sdr_header(Some(b"DrOb")).unwrap();
    assert_eq!(header.version, Some(2));
    zone.input_mut().read_u16();
    assert_eq!(zone.close_record(&header, "SdrObj"), CloseStatus::Tolerated(3));

    let mut strict = builder.zone_with(DecoderConfig::new().with_slop(SlopTolerance::strict()));
    let header = strict.open_sdr_header(None).unwrap();
    strict.input_mut().read_u16();
    assert_eq!(strict.close_record(&header, "SdrObj"), CloseStatus::Skipped(3));
    assert!(strict.diagnostics().any(|d| matches!(
        d,
        Diagnostic::UnreadBytes {
            count: 3,
            tolerated: false,
            ..
        }
    )));
}

#[test]
fn test_other_families() {
    let mut builder = StreamBuilder::new();
    builder
        .plain(|b| {
            b.u8(1);
        })
        .compat(3, |b| {
            b.u16(2);
        })
        .sfx(0x0042, 1, |b| {
            b.u8(9);
        });
    let mut zone = builder.zone();

    let plain = zone.open_record(RecordProbe::Plain).unwrap();
    assert_eq!(plain.len(), 5);
    zone.close_record(&plain, "Plain");

    let compat = zone.open_record(RecordProbe::VersionCompat).unwrap();
    assert_eq!(compat.version, Some(3));
    assert_eq!(zone.input_mut().read_u16(), Some(2));
    assert_eq!(zone.close_record(&compat, "Compat"), CloseStatus::Exact);

    let sfx = zone.open_record(RecordProbe::Sfx(Some(0x0042))).unwrap();
    let ext = sfx.sfx.unwrap();
    assert_eq!(ext.version, 1);
    assert_eq!(zone.input_mut().read_u8(), Some(9));
    assert_eq!(zone.close_record(&sfx, "Sfx"), CloseStatus::Exact);
    assert!(zone.input().is_end());
}

#[test]
fn test_sfx_end_of_records() {
    let mut builder = StreamBuilder::new();
    builder.u32(0x0000_00FF);
    let mut zone = builder.zone();
    assert!(zone.open_record(RecordProbe::Sfx(None)).is_none());
    assert_eq!(zone.tell(), 0);
}

#[test]
fn test_scope_closes_on_early_exit() {
    fn read_first(zone: &mut StarZone) -> Option<u16> {
        let mut record = zone.scope(RecordProbe::Sw(Some(b'X')), "X")?;
        let value = record.input_mut().read_u16()?;
        // stop reading half way through
        record.input_mut().read_u8()?;
        Some(value)
    }

    let mut builder = StreamBuilder::new();
    builder.sw(b'X', |b| {
        b.u16(7).u8(1).zeros(4);
    });
    builder.u8(0xEE);
    let mut zone = builder.zone();
    assert_eq!(read_first(&mut zone), Some(7));
    assert_eq!(zone.level(), 0);
    assert_eq!(zone.input_mut().read_u8(), Some(0xEE));
}

#[test]
fn test_close_out_of_order_unwinds_inner_records() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'O', |b| {
        b.sw(b'I', |b| {
            b.u32(0);
        });
    });
    let mut zone = builder.zone();
    let outer = zone.open_record(RecordProbe::Sw(Some(b'O'))).unwrap();
    let _inner = zone.open_record(RecordProbe::Sw(Some(b'I'))).unwrap();
    zone.close_record(&outer, "Outer");
    assert_eq!(zone.level(), 0);
    assert_eq!(zone.tell(), outer.end);
    assert!(zone.diagnostics().any(|d| matches!(d, Diagnostic::UnbalancedClose { .. })));

    // closing again is harmless
    assert_eq!(zone.close_record(&outer, "Outer"), CloseStatus::Unbalanced);
    assert_eq!(zone.tell(), outer.end);
}

#[test]
fn test_depth_cap() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'a', |b| {
        b.sw(b'b', |b| {
            b.sw(b'c', |b| {
                b.u8(0);
            });
        });
    });
    let mut zone = builder.zone_with(DecoderConfig::new().with_max_depth(2));
    assert!(zone.open_record(RecordProbe::Sw(None)).is_some());
    assert!(zone.open_record(RecordProbe::Sw(None)).is_some());
    let before = zone.tell();
    assert!(zone.open_record(RecordProbe::Sw(None)).is_none());
    assert_eq!(zone.tell(), before);
    assert!(zone.diagnostics().any(|d| matches!(d, Diagnostic::DepthExceeded { depth: 3 })));
    assert!(!zone.enter_nested());
}

#[test]
fn test_version_predicates() {
    let mut zone = StreamBuilder::new().zone();
    zone.set_version(0x0205);
    assert!(zone.is_compatible_with(version::SWG_LONGIDX));
    assert!(!zone.is_compatible_with(version::SWG_LONGRECS));
    assert!(zone.is_compatible_with_range(0x0201, 0x0209));
    assert!(!zone.is_compatible_with_range(0x0100, 0x0205));
}

fn sw_header_bytes(version: u16, charset: u8) -> StreamBuilder {
    let mut builder = StreamBuilder::new();
    builder.bytes(b"SW5HDR\0");
    let mut body = StreamBuilder::new();
    body.u16(version)
        .u16(0x0008)
        .i32(-1)
        .u32(0)
        .u32(0);
    if version > 0x0201 {
        body.u8(1).u8(2);
    }
    body.zeros(16).u8(charset).u8(3).zeros(2);
    builder.u8(body.len() as u8).bytes(&body.build());
    builder
}

#[test]
fn test_read_sw_header() {
    let mut builder = sw_header_bytes(0x0210, 76);
    builder.u8(0x99);
    let mut zone = builder.zone();
    let header = zone.read_sw_header().unwrap();
    assert_eq!(header.generation, 5);
    assert_eq!(header.version, 0x0210);
    assert!(header.file_flags.contains(SwFileFlags::HAS_PASSWORD));
    assert_eq!(header.redline_mode, Some(1));
    assert_eq!(header.charset, 76);
    assert_eq!(zone.version(), 0x0210);
    assert_eq!(zone.charset(), 76);
    // padding after the known fields is skipped
    assert_eq!(zone.input_mut().read_u8(), Some(0x99));
}

#[test]
fn test_old_header_has_no_redline_fields() {
    let mut zone = sw_header_bytes(0x0200, 1).zone();
    let header = zone.read_sw_header().unwrap();
    assert_eq!(header.redline_mode, None);
    assert_eq!(header.compat_version, None);
}

#[test]
fn test_missing_magic_is_fatal() {
    let mut builder = StreamBuilder::new();
    builder.bytes(b"SW9HDR\0").zeros(40);
    let mut zone = builder.zone();
    assert!(matches!(zone.read_sw_header(), Err(Error::InvalidHeader(_))));
}

#[test]
fn test_empty_stream_is_fatal() {
    let result = StarZone::new(StarInput::new(Vec::new()), "empty", DecoderConfig::new());
    assert!(matches!(result, Err(Error::NoInput)));
}

#[test]
fn test_string_pool() {
    let mut builder = StreamBuilder::new();
    builder.sw(b'!', |b| {
        b.u8(1).u16(2);
        b.u16(0x3000).byte_string("Standard");
        b.u16(0).byte_string("Überschrift");
    });
    let mut zone = builder.zone();
    zone.set_version(version::SWG_POOLIDS);
    assert!(zone.read_string_pool());
    assert_eq!(zone.get_pool_name(0), Some("Standard"));
    assert_eq!(zone.get_pool_name(1), Some("Überschrift"));
    assert_eq!(zone.pool_names()[0].pool_id, 0x3000);
    assert_eq!(zone.get_pool_name(2), None);
    assert_eq!(zone.get_pool_name(0xFFFF), None);
    assert_eq!(zone.get_pool_name(0xFFF0), Some(""));
    assert!(zone.input().is_end());
}

#[test]
fn test_record_size_table_resolves_overflow() {
    let mut builder = StreamBuilder::new();
    // record at 0 whose 24-bit size is the overflow marker
    builder.u32(0xFFFF_FF00 | u32::from(b'Z')).u16(4).u16(5);
    let table_pos = builder.len() as u32;
    builder.sw(b'%', |b| {
        b.u32(0).u32(8);
    });
    let mut zone = builder.zone();
    assert!(zone.read_record_size_table(u64::from(table_pos)));
    assert_eq!(zone.tell(), 0);
    let header = zone.open_record(RecordProbe::Sw(Some(b'Z'))).unwrap();
    assert_eq!(header.end, 8);
}

#[test]
fn test_multi_record_entries() {
    let mut builder = StreamBuilder::new();
    builder.multi(&[&[1, 2, 3], &[4]]).u8(0xAB);
    let mut zone = builder.zone();

    let multi = zone.open_multi_record().unwrap();
    assert_eq!(zone.tell(), 4);
    assert_eq!(zone.multi_entries_left(), 2);

    let first = zone.open_multi_entry().unwrap();
    assert_eq!(zone.input_mut().read_u8(), Some(1));
    assert_eq!(zone.close_record(&first, "Entry"), CloseStatus::Skipped(2));

    let second = zone.open_multi_entry().unwrap();
    assert_eq!(zone.input_mut().read_u8(), Some(4));
    zone.close_record(&second, "Entry");
    assert!(zone.open_multi_entry().is_none());

    assert_eq!(zone.close_multi_record("Multi"), CloseStatus::Exact);
    assert_eq!(zone.tell(), multi.end);
    assert_eq!(zone.input_mut().read_u8(), Some(0xAB));
}

#[test]
fn test_multi_record_without_table() {
    let mut builder = StreamBuilder::new();
    builder.u32(2).u16(0).u16(0x1234).u32(0);
    let mut zone = builder.zone();
    assert!(zone.open_multi_record().is_none());
    assert_eq!(zone.tell(), 0);
}

#[test]
fn test_strings() {
    let mut builder = StreamBuilder::new();
    builder.byte_string("caf\u{e9}").u16(2).u16(0x48).u16(0x49).u16(5);
    let mut zone = builder.zone();
    assert_eq!(zone.read_byte_string().as_deref(), Some("café"));
    assert_eq!(zone.read_unicode_string().as_deref(), Some("HI"));
    let before = zone.tell();
    assert_eq!(zone.read_byte_string(), None);
    assert_eq!(zone.tell(), before);
}

proptest! {
    /// Closing always lands on the declared end, however much the body read.
    #[test]
    fn prop_close_lands_on_declared_end(
        body_len in 0usize..64,
        read in 0usize..96,
        trailing in 0usize..8,
    ) {
        let mut builder = StreamBuilder::new();
        builder.sw(b'R', |b| {
            b.zeros(body_len);
        });
        builder.zeros(trailing);
        let mut zone = builder.zone();
        let header = zone.open_record(RecordProbe::Sw(Some(b'R'))).unwrap();
        let _ = zone.input_mut().skip(read as u64);
        zone.close_record(&header, "R");
        prop_assert_eq!(zone.tell(), header.end);
        prop_assert_eq!(header.end, 4 + body_len as u64);
    }

    /// Nested records never escape their parent, whatever they declare.
    #[test]
    fn prop_child_within_parent(declared in 4u32..0x00FF_FFFF, body in 4usize..32) {
        let mut builder = StreamBuilder::new();
        builder.sw(b'P', |b| {
            b.u32((declared << 8) | u32::from(b'C')).zeros(body);
        });
        let mut zone = builder.zone();
        let parent = zone.open_record(RecordProbe::Sw(Some(b'P'))).unwrap();
        if let Some(child) = zone.open_record(RecordProbe::Sw(Some(b'C'))) {
            prop_assert!(child.end <= parent.end);
            zone.close_record(&child, "C");
        }
        zone.close_record(&parent, "P");
        prop_assert_eq!(zone.tell(), parent.end);
    }
}

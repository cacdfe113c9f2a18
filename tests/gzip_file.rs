#![cfg(feature = "gzip")]

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use heatmap::ttf::{self, DecodeError, DecodeOptions, Decoder, consts::SLICE_MARKER_HEX};
use heatmap::{Entry, TimestampEntry};
use std::io::Write;

fn push_record(data: &mut Vec<u8>, hex: u32, lat: i32, lon: i32, alt: i16, gs: i16) {
    data.extend_from_slice(&hex.to_le_bytes());
    data.extend_from_slice(&lat.to_le_bytes());
    data.extend_from_slice(&lon.to_le_bytes());
    data.extend_from_slice(&alt.to_le_bytes());
    data.extend_from_slice(&gs.to_le_bytes());
}

fn make_heatmap() -> Vec<u8> {
    let stamp: u64 = 1_700_000_000_000;
    let mut data = Vec::new();
    push_record(&mut data, 0, 0, 0, 0, 0);
    push_record(
        &mut data,
        SLICE_MARKER_HEX,
        (stamp >> 32) as i32,
        stamp as u32 as i32,
        5000,
        0,
    );
    for addr in 0..100u32 {
        push_record(&mut data, addr, 48_000_000, 11_000_000, 1000, 300);
    }
    let callsign = *b"EWG7AB  ";
    push_record(
        &mut data,
        0x4b_1a2c,
        (1 << 30) | 7000,
        i32::from_le_bytes(callsign[0..4].try_into().unwrap()),
        i16::from_le_bytes(callsign[4..6].try_into().unwrap()),
        i16::from_le_bytes(callsign[6..8].try_into().unwrap()),
    );
    data
}

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

#[test]
fn decodes_gzip_stream() {
    let compressed = gzip(&make_heatmap());
    let records: Vec<_> = Decoder::new(GzDecoder::new(&compressed[..]), DecodeOptions::default())
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(records.len(), 102);
    assert_eq!(records[0].seq, 1);
    assert_eq!(records.last().unwrap().seq, 102);

    let Entry::Timestamp(TimestampEntry::Interval(slice)) = &records[0].entry else {
        panic!("expected a slice timestamp, got {:?}", records[0].entry);
    };
    assert_eq!(
        slice.slice_stamp().unwrap().to_rfc3339(),
        "2023-11-14T22:13:20+00:00"
    );

    let Entry::Squawk(squawk) = &records[101].entry else {
        panic!("expected a squawk entry, got {:?}", records[101].entry);
    };
    assert_eq!(squawk.squawk, 7000);
    assert_eq!(squawk.callsign(), "EWG7AB");
}

#[test]
fn opens_gzip_file() {
    let path = std::env::temp_dir().join(format!("heatmap-test-{}.ttf", std::process::id()));
    std::fs::write(&path, gzip(&make_heatmap())).unwrap();

    let decoder = ttf::open(&path, DecodeOptions::default()).unwrap();
    let count = decoder.filter(|r| r.is_ok()).count();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(count, 102);
}

#[test]
fn truncated_gzip_payload_is_reported() {
    let mut data = make_heatmap();
    data.truncate(data.len() - 3);
    let compressed = gzip(&data);

    let results: Vec<_> =
        Decoder::new(GzDecoder::new(&compressed[..]), DecodeOptions::default()).collect();
    assert_eq!(results.len(), 102);
    assert!(results[..101].iter().all(|r| r.is_ok()));
    assert!(matches!(
        results[101],
        Err(DecodeError::TruncatedRecord {
            offset: 1632,
            len: 13
        })
    ));
}

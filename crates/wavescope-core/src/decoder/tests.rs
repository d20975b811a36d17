//! Tests for the decoder module.

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::{decode, decode_bytes, decode_file, duration_seconds, WaveDecoder, HEADER_LEN};
use crate::buffers::SampleBuffers;
use crate::config::{DecodeConfig, TimeAxis};
use crate::error::DecodeError;
use crate::header::{FourCc, WaveHeader};

// =========================================================================
// Fixture helpers
// =========================================================================

/// Builds the fixed 36-byte header.
fn fixed_header(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Vec<u8> {
    let block_align = channels * (bits_per_sample / 8);
    let byte_rate = sample_rate * block_align as u32;

    let mut out = Vec::with_capacity(HEADER_LEN);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8]) {
    out.extend_from_slice(tag);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
}

fn patch_riff_size(out: &mut [u8]) {
    let size = (out.len() - 8) as u32;
    out[4..8].copy_from_slice(&size.to_le_bytes());
}

/// 16-bit stereo payload where frame `i` holds `(i, -i)`.
fn ramp_payload_16(frames: usize) -> Vec<u8> {
    let mut payload = Vec::with_capacity(frames * 4);
    for i in 0..frames {
        let value = i as i16;
        payload.extend_from_slice(&value.to_le_bytes());
        payload.extend_from_slice(&value.wrapping_neg().to_le_bytes());
    }
    payload
}

fn wav_16bit(frames: usize) -> Vec<u8> {
    let mut out = fixed_header(2, 44100, 16);
    push_chunk(&mut out, b"data", &ramp_payload_16(frames));
    patch_riff_size(&mut out);
    out
}

fn decode_default(bytes: &[u8]) -> (WaveHeader, SampleBuffers) {
    let mut header = WaveHeader::new();
    let buffers = decode_bytes(bytes, &mut header, &DecodeConfig::default()).unwrap();
    (header, buffers)
}

// =========================================================================
// Header extraction
// =========================================================================

#[test]
fn test_header_fields_populated() {
    let bytes = wav_16bit(10);
    let (header, _) = decode_default(&bytes);

    assert_eq!(header.riff_id, FourCc::RIFF);
    assert_eq!(header.chunk_size, (bytes.len() - 8) as u32);
    assert_eq!(header.format, FourCc::WAVE);
    assert_eq!(header.fmt_id, FourCc::FMT);
    assert_eq!(header.fmt_size, 16);
    assert_eq!(header.audio_format, 1);
    assert_eq!(header.channels, 2);
    assert_eq!(header.sample_rate, 44100);
    assert_eq!(header.byte_rate, 176400);
    assert_eq!(header.block_align, 4);
    assert_eq!(header.bits_per_sample, 16);
    assert_eq!(header.data_id, FourCc::DATA);
    assert_eq!(header.data_size, 40);
    assert_eq!(header.sample_size, 4);
    assert_eq!(header.number_of_samples, 10);
}

#[test]
fn test_pcm16_extreme_frame() {
    let mut bytes = fixed_header(2, 8000, 16);
    push_chunk(&mut bytes, b"data", &[0x00, 0x80, 0xFF, 0x7F]);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(buffers.channel1, vec![-32768.0]);
    assert_eq!(buffers.channel2, vec![32767.0]);
    assert_eq!(buffers.time, vec![1.0]);
    assert_eq!(header.number_of_samples, 1);
}

#[test]
fn test_duration_uses_float_division() {
    let bytes = wav_16bit(100);
    let (header, _) = decode_default(&bytes);
    assert_eq!(header.duration, 100.0 / 44100.0);
    assert!(header.duration > 0.0);
}

#[test]
fn test_duration_seconds_zero_rate() {
    assert_eq!(duration_seconds(1000, 0), 0.0);
    assert_eq!(duration_seconds(22050, 44100), 0.5);
}

// =========================================================================
// Truncation and tag checks
// =========================================================================

#[test]
fn test_truncated_header() {
    let bytes = wav_16bit(4);
    for len in [0, 1, 12, 35] {
        let mut header = WaveHeader::new();
        let err = decode_bytes(&bytes[..len], &mut header, &DecodeConfig::default()).unwrap_err();
        match err {
            DecodeError::TruncatedHeader { expected, actual } => {
                assert_eq!(expected, 36);
                assert_eq!(actual, len);
            }
            other => panic!("expected TruncatedHeader, got {:?}", other),
        }
    }
}

#[test]
fn test_header_only_file_has_no_data() {
    let bytes = fixed_header(2, 44100, 16);
    let mut header = WaveHeader::new();
    let err = decode_bytes(&bytes, &mut header, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, DecodeError::DataChunkNotFound { searched_from: 36 }));
}

#[test]
fn test_tolerant_mode_ignores_form_type() {
    let mut bytes = wav_16bit(3);
    bytes[8..12].copy_from_slice(b"WAVX");
    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.format, FourCc::new(*b"WAVX"));
    assert_eq!(buffers.len(), 3);
}

#[test]
fn test_strict_mode_rejects_form_type() {
    let mut bytes = wav_16bit(3);
    bytes[8..12].copy_from_slice(b"WAVX");
    let mut header = WaveHeader::new();
    let config = DecodeConfig::default().with_strict(true);
    let err = decode_bytes(&bytes, &mut header, &config).unwrap_err();
    match err {
        DecodeError::InvalidFormatTag { found } => assert_eq!(found.to_string(), "WAVX"),
        other => panic!("expected InvalidFormatTag, got {:?}", other),
    }
}

#[test]
fn test_strict_mode_accepts_wave() {
    let bytes = wav_16bit(3);
    let mut header = WaveHeader::new();
    let buffers = decode_bytes(&bytes, &mut header, &DecodeConfig::strict()).unwrap();
    assert_eq!(buffers.len(), 3);
}

// =========================================================================
// Data chunk search
// =========================================================================

#[test]
fn test_no_data_tag() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"LIST", &[0u8; 64]);
    let mut header = WaveHeader::new();
    let err = decode_bytes(&bytes, &mut header, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, DecodeError::DataChunkNotFound { .. }));
    assert_eq!(err.code(), "WAV_003");
}

#[test]
fn test_zero_size_data_marker_is_skipped() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"JUNK", &[0u8; 6]);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(5));
    patch_riff_size(&mut bytes);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.data_size, 20);
    assert_eq!(header.number_of_samples, 5);
    assert_eq!(buffers.channel1, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(buffers.channel2, vec![0.0, -1.0, -2.0, -3.0, -4.0]);
}

#[test]
fn test_repeated_zero_size_markers() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(2));

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.data_size, 8);
    assert_eq!(buffers.len(), 2);
}

#[test]
fn test_only_zero_size_markers() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"data", &[]);
    let mut header = WaveHeader::new();
    let err = decode_bytes(&bytes, &mut header, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, DecodeError::DataChunkNotFound { .. }));
}

#[test]
fn test_data_tag_at_odd_offset() {
    let mut bytes = fixed_header(2, 44100, 16);
    // Odd-length chunk with no pad byte pushes the data tag off alignment.
    push_chunk(&mut bytes, b"LIST", &[1, 2, 3]);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(3));

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.data_size, 12);
    assert_eq!(buffers.channel1, vec![0.0, 1.0, 2.0]);
}

#[test]
fn test_overlapping_tag_prefix() {
    let mut bytes = fixed_header(2, 44100, 16);
    bytes.extend_from_slice(b"ddadat");
    push_chunk(&mut bytes, b"data", &ramp_payload_16(1));

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.data_size, 4);
    assert_eq!(buffers.len(), 1);
}

#[test]
fn test_data_tag_without_size_field() {
    let mut bytes = fixed_header(2, 44100, 16);
    bytes.extend_from_slice(b"data\x10\x00");
    let mut header = WaveHeader::new();
    let err = decode_bytes(&bytes, &mut header, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, DecodeError::DataChunkNotFound { .. }));
}

#[test]
fn test_locate_data_chunk_from_resume_offset() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(1));
    let second_tag = bytes.len() as u64;
    push_chunk(&mut bytes, b"data", &ramp_payload_16(2));

    let mut decoder = WaveDecoder::new(Cursor::new(bytes), DecodeConfig::default());
    let first = decoder.locate_data_chunk(36).unwrap();
    assert_eq!(first.tag_offset, 36);
    assert_eq!(first.payload_offset, 44);
    assert_eq!(first.size, 4);

    let second = decoder.locate_data_chunk(first.payload_offset).unwrap();
    assert_eq!(second.tag_offset, second_tag);
    assert_eq!(second.size, 8);
}

// =========================================================================
// Frame decoding
// =========================================================================

#[test]
fn test_pcm24_frames() {
    let mut payload = Vec::new();
    payload.extend_from_slice(&[0xFF, 0xFF, 0x7F, 0x00, 0x00, 0x80]);
    payload.extend_from_slice(&[0x01, 0x00, 0x00, 0xFF, 0xFF, 0xFF]);
    let mut bytes = fixed_header(2, 48000, 24);
    push_chunk(&mut bytes, b"data", &payload);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.block_align, 6);
    assert_eq!(buffers.channel1, vec![8_388_607.0, 1.0]);
    assert_eq!(buffers.channel2, vec![-8_388_608.0, -1.0]);
}

#[test]
fn test_float32_frames() {
    let mut payload = Vec::new();
    for (l, r) in [(0.5f32, -0.5f32), (1.0, 0.25)] {
        payload.extend_from_slice(&l.to_le_bytes());
        payload.extend_from_slice(&r.to_le_bytes());
    }
    let mut bytes = fixed_header(2, 48000, 32);
    push_chunk(&mut bytes, b"data", &payload);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.block_align, 8);
    assert_eq!(buffers.channel1, vec![0.5, 1.0]);
    assert_eq!(buffers.channel2, vec![-0.5, 0.25]);
}

#[test]
fn test_unsupported_block_align_yields_no_samples() {
    // 8-bit stereo: two-byte frames.
    let mut bytes = fixed_header(2, 8000, 8);
    push_chunk(&mut bytes, b"data", &[0x80; 10]);

    let (header, buffers) = decode_default(&bytes);
    assert!(buffers.is_empty());
    assert_eq!(header.number_of_samples, 5);
}

#[test]
fn test_unsupported_block_align_rejected_when_configured() {
    let mut bytes = fixed_header(1, 8000, 16);
    push_chunk(&mut bytes, b"data", &[0u8; 8]);

    let mut header = WaveHeader::new();
    let err = decode_bytes(&bytes, &mut header, &DecodeConfig::strict()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnsupportedBlockAlign { block_align: 2 }
    ));
}

#[test]
fn test_zero_block_align_terminates() {
    let mut bytes = fixed_header(0, 8000, 16);
    push_chunk(&mut bytes, b"data", &[0u8; 16]);

    let (header, buffers) = decode_default(&bytes);
    assert!(buffers.is_empty());
    assert_eq!(header.number_of_samples, 0);
    assert_eq!(header.duration, 0.0);
}

#[test]
fn test_payload_bounded_by_data_size() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(3));
    push_chunk(&mut bytes, b"LIST", &[0x11; 16]);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.number_of_samples, 3);
    assert_eq!(buffers.len(), 3);
    assert!(header.number_of_samples * header.block_align as u64 <= header.data_size as u64);
}

#[test]
fn test_overstated_data_size_stops_at_end_of_source() {
    let mut bytes = fixed_header(2, 44100, 16);
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&1000u32.to_le_bytes());
    bytes.extend_from_slice(&ramp_payload_16(4));
    // Trailing partial frame.
    bytes.extend_from_slice(&[0x01, 0x02]);

    let (header, buffers) = decode_default(&bytes);
    assert_eq!(header.data_size, 1000);
    assert_eq!(header.number_of_samples, 4);
    assert_eq!(buffers.len(), 4);
}

// =========================================================================
// Decimation and time axis
// =========================================================================

#[test]
fn test_decimation_keeps_every_nth_frame() {
    let bytes = wav_16bit(1000);
    let mut header = WaveHeader::new();
    let config = DecodeConfig::default().with_decimation(4);
    let buffers = decode_bytes(&bytes, &mut header, &config).unwrap();

    assert_eq!(buffers.len(), 250);
    assert_eq!(&buffers.time[..3], &[4.0, 8.0, 12.0]);
    assert_eq!(buffers.time[249], 1000.0);
    // Frame ordinal n holds sample value n - 1.
    assert_eq!(&buffers.channel1[..3], &[3.0, 7.0, 11.0]);
    assert_eq!(header.number_of_samples, 1000);
}

#[test]
fn test_decimation_with_remainder() {
    let bytes = wav_16bit(10);
    let mut header = WaveHeader::new();
    let config = DecodeConfig::default().with_decimation(3);
    let buffers = decode_bytes(&bytes, &mut header, &config).unwrap();

    assert_eq!(buffers.time, vec![3.0, 6.0, 9.0]);
    assert_eq!(header.number_of_samples, 10);
}

#[test]
fn test_time_axis_frame_ordinal_starts_at_one() {
    let (_, buffers) = decode_default(&wav_16bit(3));
    assert_eq!(buffers.time, vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_time_axis_seconds() {
    let bytes = wav_16bit(44100);
    let mut header = WaveHeader::new();
    let config = DecodeConfig::default()
        .with_time_axis(TimeAxis::Seconds)
        .with_decimation(22050);
    let buffers = decode_bytes(&bytes, &mut header, &config).unwrap();
    assert_eq!(buffers.time, vec![0.5, 1.0]);
}

// =========================================================================
// Idempotence and reuse
// =========================================================================

#[test]
fn test_decoding_twice_is_identical() {
    let mut bytes = fixed_header(2, 44100, 16);
    push_chunk(&mut bytes, b"data", &[]);
    push_chunk(&mut bytes, b"data", &ramp_payload_16(64));

    let (first_header, first) = decode_default(&bytes);
    let (second_header, second) = decode_default(&bytes);
    assert_eq!(first_header, second_header);
    assert_eq!(first, second);
}

#[test]
fn test_decoder_reuse_rewinds_source() {
    let bytes = wav_16bit(8);
    let mut decoder = WaveDecoder::new(Cursor::new(bytes), DecodeConfig::default());

    let mut header = WaveHeader::new();
    let first = decoder.decode(&mut header).unwrap();
    header.reset();
    let second = decoder.decode(&mut header).unwrap();
    assert_eq!(first, second);
    assert_eq!(header.number_of_samples, 8);
}

#[test]
fn test_decode_into_replaces_previous_samples() {
    let mut buffers = SampleBuffers::new();
    buffers.channel1.extend([9.0; 5]);
    buffers.channel2.extend([9.0; 5]);
    buffers.time.extend([9.0; 5]);

    let mut header = WaveHeader::new();
    let mut decoder = WaveDecoder::new(Cursor::new(wav_16bit(2)), DecodeConfig::default());
    decoder.decode_into(&mut header, &mut buffers).unwrap();
    assert_eq!(buffers.channel1, vec![0.0, 1.0]);
    assert_eq!(buffers.time, vec![1.0, 2.0]);
}

#[test]
fn test_decode_generic_source() {
    let mut header = WaveHeader::new();
    let buffers = decode(Cursor::new(wav_16bit(5)), &mut header, &DecodeConfig::preview()).unwrap();
    assert_eq!(buffers.time, vec![4.0]);
}

#[test]
fn test_decode_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.wav");
    let mut header = WaveHeader::new();
    let err = decode_file(&path, &mut header, &DecodeConfig::default()).unwrap_err();
    assert!(matches!(err, DecodeError::UnopenableSource { .. }));
    assert!(err.to_string().contains("missing.wav"));
}

#[test]
fn test_decode_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ramp.wav");
    std::fs::write(&path, wav_16bit(12)).unwrap();

    let mut header = WaveHeader::new();
    let buffers = decode_file(&path, &mut header, &DecodeConfig::default()).unwrap();
    assert_eq!(buffers.len(), 12);
    assert_eq!(header.number_of_samples, 12);
}

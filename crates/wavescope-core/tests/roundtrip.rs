//! Encoder/decoder round-trip tests.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wavescope-core --test roundtrip
//! ```

use pretty_assertions::assert_eq;
use wavescope_core::{
    decode_bytes, decode_file, encode_file, encode_to_vec, DecodeConfig, ToneGenerator,
    WaveHeader, WaveSession,
};

fn template(bits_per_sample: u16) -> WaveHeader {
    WaveHeader::tone_template(8000, 0.25, 250.0, 30000).with_bits_per_sample(bits_per_sample)
}

// ============================================================================
// Header recovery
// ============================================================================

#[test]
fn round_trip_recovers_format_fields() {
    for bits in [16u16, 24, 32] {
        let original = template(bits);
        let wav = encode_to_vec(&original).unwrap();

        let mut header = WaveHeader::new();
        let samples = decode_bytes(&wav, &mut header, &DecodeConfig::default()).unwrap();

        assert_eq!(header.sample_rate, original.sample_rate, "bits={}", bits);
        assert_eq!(header.channels, original.channels, "bits={}", bits);
        assert_eq!(header.bits_per_sample, original.bits_per_sample, "bits={}", bits);
        assert_eq!(header.number_of_samples, 2000, "bits={}", bits);
        assert_eq!(samples.len(), 2000, "bits={}", bits);
        assert_eq!(header.duration, 0.25, "bits={}", bits);
    }
}

#[test]
fn decoded_header_matches_encoder_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    let written = encode_file(&path, &template(16)).unwrap();

    let mut header = WaveHeader::new();
    decode_file(&path, &mut header, &DecodeConfig::strict()).unwrap();

    // Tone parameters are not stored in the file.
    let expected = WaveHeader {
        max_amplitude: 0,
        frequency: 0.0,
        ..written
    };
    assert_eq!(header, expected);
}

// ============================================================================
// Sample values
// ============================================================================

#[test]
fn pcm16_samples_match_generator() {
    let wav = encode_to_vec(&template(16)).unwrap();
    let mut header = WaveHeader::new();
    let samples = decode_bytes(&wav, &mut header, &DecodeConfig::default()).unwrap();

    let tone = ToneGenerator::new(8000, 250.0, 30000, 2000);
    for (i, (left, right)) in tone.enumerate() {
        assert_eq!(samples.channel1[i], left.round() as f32, "frame {}", i);
        assert_eq!(samples.channel2[i], right.round() as f32, "frame {}", i);
    }
}

#[test]
fn pcm24_samples_are_scaled_pcm16() {
    let wav = encode_to_vec(&template(24)).unwrap();
    let mut header = WaveHeader::new();
    let samples = decode_bytes(&wav, &mut header, &DecodeConfig::default()).unwrap();

    let tone = ToneGenerator::new(8000, 250.0, 30000, 2000);
    for (i, (left, _)) in tone.enumerate() {
        let expected = (left * 256.0).round() as f32;
        assert_eq!(samples.channel1[i], expected, "frame {}", i);
    }
}

#[test]
fn float_samples_are_normalized() {
    let wav = encode_to_vec(&template(32)).unwrap();
    let mut header = WaveHeader::new();
    let samples = decode_bytes(&wav, &mut header, &DecodeConfig::default()).unwrap();

    assert!(samples.peak_channel1() <= 1.0);
    assert!(samples.peak_channel2() <= 1.0);
    assert!(samples.peak_channel2() > 0.5);
}

// ============================================================================
// Decimation and sessions
// ============================================================================

#[test]
fn preview_profile_decimates_round_trip() {
    let wav = encode_to_vec(&template(16)).unwrap();
    let mut header = WaveHeader::new();
    let samples = decode_bytes(&wav, &mut header, &DecodeConfig::preview()).unwrap();

    assert_eq!(samples.len(), 500);
    assert_eq!(samples.time[0], 4.0);
    assert_eq!(header.number_of_samples, 2000);
}

#[test]
fn session_reload_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tone.wav");
    encode_file(&path, &template(24)).unwrap();

    let mut session = WaveSession::new();
    session.load_file(&path, &DecodeConfig::default()).unwrap();
    let first_header = session.header().clone();
    let first_samples = session.samples().clone();

    session.reset();
    session.load_file(&path, &DecodeConfig::default()).unwrap();
    assert_eq!(session.header(), &first_header);
    assert_eq!(session.samples(), &first_samples);
}

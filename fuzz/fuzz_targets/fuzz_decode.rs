#![no_main]

use libfuzzer_sys::fuzz_target;
use wavescope_core::{decode_bytes, DecodeConfig, WaveHeader};

fuzz_target!(|data: &[u8]| {
    for config in [DecodeConfig::full(), DecodeConfig::preview(), DecodeConfig::strict()] {
        let mut header = WaveHeader::new();
        if let Ok(samples) = decode_bytes(data, &mut header, &config) {
            assert_eq!(samples.channel1.len(), samples.time.len());
            assert_eq!(samples.channel2.len(), samples.time.len());
            assert!(
                header.number_of_samples * u64::from(header.block_align)
                    <= u64::from(header.data_size)
            );
        }
    }
});

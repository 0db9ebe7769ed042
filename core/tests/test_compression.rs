#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use airgap_codec::compression::{
        compress, decompress, decompress_bounded, deflate, inflate, CompressionError,
        DEFAULT_LEVEL_DEFLATE,
    };

    #[test]
    fn roundtrip_repetitive_text_shrinks() {
        let input = b"descriptor wsh(sortedmulti(2,...)) ".repeat(40);
        let packed = compress(&input).expect("compress");
        assert!(packed.len() < input.len());
        assert_eq!(decompress(&packed).expect("decompress"), input);
    }

    #[test]
    fn output_is_raw_deflate_without_zlib_header() {
        let packed = compress(b"abc").unwrap();
        // zlib streams start with 0x78
        assert_ne!(packed[0], 0x78);
        assert_eq!(inflate(&packed, 16).unwrap(), b"abc");
    }

    #[test]
    fn corrupt_stream_is_an_error() {
        let err = decompress(&[0xff, 0xff, 0xff, 0xff]).unwrap_err();
        assert!(matches!(err, CompressionError::DecompressFailed { .. }), "{:?}", err);
    }

    #[test]
    fn inflate_bound_is_enforced() {
        let packed = compress(&vec![0u8; 10_000]).unwrap();
        let err = decompress_bounded(&packed, 100).unwrap_err();
        assert_eq!(err, CompressionError::OutputTooLarge { max: 100 });

        // exactly at the bound is fine
        assert_eq!(decompress_bounded(&packed, 10_000).unwrap().len(), 10_000);
    }

    #[test]
    fn every_level_inflates_the_same() {
        let input = b"hello hello hello hello".repeat(8);
        assert_eq!(compress(&input).unwrap(), deflate(&input, DEFAULT_LEVEL_DEFLATE).unwrap());
        for level in [0u32, 1, 6, 9, 42] {
            let packed = deflate(&input, level).unwrap();
            assert_eq!(inflate(&packed, input.len()).unwrap(), input, "level {}", level);
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let packed = compress(&data).unwrap();
            prop_assert_eq!(decompress(&packed).unwrap(), data);
        }
    }
}

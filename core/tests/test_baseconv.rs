#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use airgap_codec::baseconv::{
        base_decode, base_encode, decode_raw, detect_encodings, encode_raw, hint_encodings, Base,
        BaseError, Bech32Variant, Encoding,
    };

    const ALL_BASES: [Base; 4] = [Base::B32, Base::B43, Base::B58, Base::B64];

    #[test]
    fn known_vectors_hello_world() {
        let data = b"hello world";
        assert_eq!(base_encode(data, Base::B32), "NBSWY3DPEB3W64TMMQ");
        assert_eq!(base_encode(data, Base::B58), "StV1DL6CwTryKyV");
        assert_eq!(base_encode(data, Base::B64), "aGVsbG8gd29ybGQ=");
    }

    #[test]
    fn base43_small_values() {
        assert_eq!(base_encode(&[0xff], Base::B43), "5.");
        assert_eq!(base_decode("5.", Base::B43).unwrap(), vec![0xff]);
    }

    #[test]
    fn leading_zeros_survive_positional_bases() {
        let data = [0u8, 0, 1];
        assert_eq!(base_encode(&data, Base::B43), "001");
        assert_eq!(base_encode(&data, Base::B58), "112");
        for base in [Base::B43, Base::B58] {
            let text = base_encode(&data, base);
            assert_eq!(base_decode(&text, base).unwrap(), data.to_vec());
        }
    }

    #[test]
    fn empty_input_is_empty_output() {
        for base in ALL_BASES {
            assert_eq!(base_encode(&[], base), "");
            assert!(base_decode("", base).unwrap().is_empty());
        }
    }

    #[test]
    fn base32_accepts_trailing_padding() {
        let padded = base_decode("NBSWY3DPEB3W64TMMQ======", Base::B32).unwrap();
        assert_eq!(padded, b"hello world");
    }

    #[test]
    fn base32_rejects_impossible_lengths() {
        for text in ["A", "ABC", "ABCDEF", "ABCDEFGHA"] {
            let err = base_decode(text, Base::B32).unwrap_err();
            assert!(matches!(err, BaseError::InvalidLength { base: Base::B32, .. }), "{}", text);
        }
    }

    #[test]
    fn forbidden_characters_are_reported_with_position() {
        let err = base_decode("AB!D", Base::B32).unwrap_err();
        assert_eq!(err, BaseError::InvalidCharacter { base: Base::B32, character: '!', index: 2 });

        let err = base_decode("12l", Base::B58).unwrap_err();
        assert!(matches!(err, BaseError::InvalidCharacter { base: Base::B58, character: 'l', .. }));

        let err = base_decode("0a", Base::B43).unwrap_err();
        assert!(matches!(err, BaseError::InvalidCharacter { base: Base::B43, character: 'a', index: 1 }));

        assert!(matches!(base_decode("@@@@", Base::B64), Err(BaseError::Decode { base: Base::B64, .. })));
    }

    #[test]
    fn raw_base_numbers_are_verified() {
        assert_eq!(encode_raw(b"x", 58).unwrap(), base_encode(b"x", Base::B58));
        assert_eq!(encode_raw(b"x", 16).unwrap_err(), BaseError::UnsupportedBase { raw: 16 });
        assert_eq!(decode_raw("00", 10).unwrap_err(), BaseError::UnsupportedBase { raw: 10 });
        assert!(Base::verify(43).is_ok());
        assert!(Base::verify(44).is_err());
    }

    #[test]
    fn unsupported_base_message_uses_hex() {
        let msg = BaseError::UnsupportedBase { raw: 16 }.to_string();
        assert!(msg.contains("0x10"), "{}", msg);
    }

    #[test]
    fn hint_is_range_only() {
        assert_eq!(hint_encodings("DEADBEEF"), vec![Base::B32, Base::B43, Base::B58, Base::B64]);
        assert_eq!(hint_encodings("abc"), vec![Base::B58, Base::B64]);
        assert!(hint_encodings("").is_empty());
        assert!(hint_encodings("a b").is_empty());
    }

    #[test]
    fn detect_upper_hex_first() {
        let found = detect_encodings("DEADBEEF");
        assert_eq!(found.first(), Some(&Encoding::HexUpper));
        assert!(found.contains(&Encoding::Base32));
        assert!(found.contains(&Encoding::Base58));
        assert_eq!(&found[found.len() - 2..], &[Encoding::Ascii, Encoding::Utf8]);
    }

    #[test]
    fn detect_lower_hex() {
        let found = detect_encodings("deadbeef");
        assert_eq!(found.first(), Some(&Encoding::Hex));
        assert!(!found.contains(&Encoding::HexUpper));
        assert!(!found.contains(&Encoding::Base32));
    }

    #[test]
    fn detect_bech32_address() {
        let found = detect_encodings("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4");
        assert!(found.contains(&Encoding::Bech32(Bech32Variant::Bech32)), "{:?}", found);
    }

    #[test]
    fn detect_latin1_without_ascii() {
        let found = detect_encodings("café");
        assert_eq!(found, vec![Encoding::Latin1]);
    }

    #[test]
    fn detect_wide_utf8() {
        let found = detect_encodings("₿itcoin");
        assert_eq!(found.last(), Some(&Encoding::Utf8));
        assert!(!found.contains(&Encoding::Ascii));
    }

    #[test]
    fn detect_empty_is_empty() {
        assert!(detect_encodings("").is_empty());
    }

    #[test]
    fn detect_base64_requires_canonical_text() {
        let text = base_encode(b"hello world", Base::B64);
        assert!(detect_encodings(&text).contains(&Encoding::Base64));
        // non-zero trailing bits are not canonical base64
        assert!(!detect_encodings("aGVsbG8gd29ybGR=").contains(&Encoding::Base64));
    }

    #[test]
    fn encoding_display_tags() {
        assert_eq!(Encoding::HexUpper.to_string(), "HEX");
        assert_eq!(Encoding::Base43.to_string(), "43");
        assert_eq!(Encoding::Latin1.to_string(), "latin-1");
        assert_eq!(Encoding::Base58.base(), Some(Base::B58));
        assert_eq!(Encoding::Utf8.base(), None);
    }

    proptest! {
        #[test]
        fn prop_bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..200)) {
            for base in ALL_BASES {
                let text = base_encode(&data, base);
                prop_assert_eq!(base_decode(&text, base).unwrap(), data.clone());
            }
        }

        #[test]
        fn prop_base58_text_round_trip(text in "[1-9A-HJ-NP-Za-km-z]{1,40}") {
            let bytes = base_decode(&text, Base::B58).unwrap();
            prop_assert_eq!(base_encode(&bytes, Base::B58), text);
        }

        #[test]
        fn prop_base43_text_round_trip(text in "[1-9A-Z$*+./:-][0-9A-Z$*+./:-]{0,30}") {
            let bytes = base_decode(&text, Base::B43).unwrap();
            prop_assert_eq!(base_encode(&bytes, Base::B43), text);
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use airgap_codec::bbqr::{BbqrData, BbqrEncoding, FileType};
    use airgap_codec::qr::{
        detect_format, parse_pmofn_qr_part, Frame, QrError, QrFormat, QrPartParser, QrResult,
        UrDecoder, UrError, UrPayload,
    };

    const TEST_DATA_B58: &str = "UUucvki6KWyS35DhetbWPw1DiaccbHKywScF96E8VUwEnN1gss947UasRfkNxtrkzCeHziHyMCuoiQ2mSYsbYXuV3YwYBZwFh1c6xtBAEK1aDgPwMgqf74xTzf3m4KH4iUU5nHTqroDpoRZR59meafTCUBChZ5NJ8MoUdKE6avyYdSm5kUb4npmFpMpJ9S3qd2RedHMoQFRiXK3jwdH81emAEsFYSW3Kb7caPcWjkza4S4EEWWbaggofGFmxE5gNNg4A4LNC2ZUGLsALZffNvg3yh3qg6rFxhkiyzWc44kx9Khp6Evm1j4Njh8kjifkngLTPFtX3uWNLAB1XrvpPMx6kkkhr7RnFVrA4JsDp5BwVGAXBoSBLTqweFevZ5";

    const TEST_PARTS_FORMAT_PMOFN: [&str; 3] = [
        "p2of3 4iUU5nHTqroDpoRZR59meafTCUBChZ5NJ8MoUdKE6avyYdSm5kUb4npmFpMpJ9S3qd2RedHMoQFRiXK3jwdH81emAEsFYSW3Kb7caPcWjkza4S4EEWWbaggofGFmxE5",
        "p1of3 UUucvki6KWyS35DhetbWPw1DiaccbHKywScF96E8VUwEnN1gss947UasRfkNxtrkzCeHziHyMCuoiQ2mSYsbYXuV3YwYBZwFh1c6xtBAEK1aDgPwMgqf74xTzf3m4KH",
        "p3of3 gNNg4A4LNC2ZUGLsALZffNvg3yh3qg6rFxhkiyzWc44kx9Khp6Evm1j4Njh8kjifkngLTPFtX3uWNLAB1XrvpPMx6kkkhr7RnFVrA4JsDp5BwVGAXBoSBLTqweFevZ5",
    ];

    /// Fountain decoder stand-in: completes once every `ur:` index 1..=n was seen.
    struct MockUrDecoder {
        expected: Option<usize>,
        seen: Vec<usize>,
        processed: usize,
    }

    impl MockUrDecoder {
        fn new() -> Self {
            Self { expected: None, seen: Vec::new(), processed: 0 }
        }
    }

    impl UrDecoder for MockUrDecoder {
        // frames look like `ur:bytes/<i>-<n>/payload` or `ur:bytes/payload`
        fn receive_part(&mut self, part: &str) -> Result<(), UrError> {
            let body = &part[3..];
            let mut fields = body.split('/');
            let _ty = fields.next().ok_or_else(|| UrError("no type".into()))?;
            let second = fields.next().ok_or_else(|| UrError("no body".into()))?;
            self.processed += 1;
            match fields.next() {
                Some(_) => {
                    let (i, n) = second.split_once('-').ok_or_else(|| UrError("bad seq".into()))?;
                    let i: usize = i.parse().map_err(|_| UrError("bad index".into()))?;
                    let n: usize = n.parse().map_err(|_| UrError("bad count".into()))?;
                    self.expected = Some(n);
                    if !self.seen.contains(&i) {
                        self.seen.push(i);
                    }
                }
                None => self.seen = vec![1],
            }
            Ok(())
        }

        fn is_complete(&self) -> bool {
            match self.expected {
                Some(n) => self.seen.len() == n,
                None => !self.seen.is_empty(),
            }
        }

        fn expected_part_count(&self) -> Option<usize> {
            self.expected
        }

        fn received_part_count(&self) -> usize {
            self.seen.len()
        }

        fn processed_parts_count(&self) -> usize {
            self.processed
        }

        fn estimated_percent_complete(&self) -> f64 {
            match self.expected {
                Some(n) => self.seen.len() as f64 / n as f64,
                None => 0.0,
            }
        }

        fn result(&self) -> Option<UrPayload> {
            self.is_complete()
                .then(|| UrPayload { ur_type: "bytes".into(), cbor: vec![0xa1, 0x01] })
        }
    }

    #[test]
    fn detect_prefixes() {
        assert_eq!(detect_format("p1of3 abc"), QrFormat::Pmofn);
        assert_eq!(detect_format("UR:BYTES/abc"), QrFormat::Ur);
        assert_eq!(detect_format("B$ZP0100ABC"), QrFormat::Bbqr);
        assert_eq!(detect_format(TEST_DATA_B58), QrFormat::None);
        assert_eq!(detect_format("pizza of the day"), QrFormat::None);
    }

    #[test]
    fn pmofn_header_parsing() {
        assert_eq!(parse_pmofn_qr_part("p2of3 abc").unwrap(), ("abc", 2, 3));
        assert_eq!(parse_pmofn_qr_part("p12of20 x y").unwrap(), ("x y", 12, 20));
        assert_eq!(parse_pmofn_qr_part("p4of3 abc").unwrap_err(), QrError::PartOutOfRange { index: 4, total: 3 });
        assert_eq!(parse_pmofn_qr_part("p0of3 abc").unwrap_err(), QrError::PartOutOfRange { index: 0, total: 3 });
        assert_eq!(parse_pmofn_qr_part("pxof3 abc").unwrap_err(), QrError::MalformedPmofn);
        assert_eq!(parse_pmofn_qr_part("p1of3").unwrap_err(), QrError::MalformedPmofn);
    }

    #[test]
    fn single_text_frame() {
        let mut p = QrPartParser::new();
        assert!(!p.is_complete());
        p.parse(TEST_DATA_B58).unwrap();
        assert_eq!(p.format(), Some(QrFormat::None));
        assert_eq!(p.total_count(), Some(1));
        assert_eq!(p.parsed_count(), 1);
        assert!(p.is_complete());
        assert_eq!(p.result().unwrap(), QrResult::Text(TEST_DATA_B58.to_string()));
    }

    #[test]
    fn single_binary_frame_is_returned_verbatim() {
        let bytes = vec![0x70, 0x73, 0x62, 0x74, 0xff, 0x00];
        let mut p = QrPartParser::new();
        p.parse(bytes.clone()).unwrap();
        assert_eq!(p.result().unwrap(), QrResult::Bytes(bytes));
    }

    #[test]
    fn text_resembling_pmofn_opens_plain_session() {
        let mut p = QrPartParser::new();
        p.parse("proof of stake").unwrap();
        assert_eq!(p.format(), Some(QrFormat::None));
        assert_eq!(p.result().unwrap(), QrResult::Text("proof of stake".into()));
    }

    #[test]
    fn pmofn_out_of_order() {
        let mut p = QrPartParser::new();
        for (seen, part) in TEST_PARTS_FORMAT_PMOFN.iter().enumerate() {
            assert!(!p.is_complete());
            p.parse(*part).unwrap();
            assert_eq!(p.parsed_count(), seen + 1);
        }
        assert_eq!(p.format(), Some(QrFormat::Pmofn));
        assert_eq!(p.total_count(), Some(3));
        assert!(p.is_complete());
        assert_eq!(p.result().unwrap(), QrResult::Text(TEST_DATA_B58.to_string()));
    }

    #[test]
    fn duplicate_frames_do_not_complete() {
        let mut p = QrPartParser::new();
        p.parse(TEST_PARTS_FORMAT_PMOFN[0]).unwrap();
        p.parse(TEST_PARTS_FORMAT_PMOFN[0]).unwrap();
        assert_eq!(p.parsed_count(), 1);
        assert!(!p.is_complete());
        assert!(matches!(p.result(), Err(QrError::Incomplete { parsed: 1, total: Some(3) })));
    }

    #[test]
    fn bad_frames_leave_session_intact() {
        let mut p = QrPartParser::new();
        p.parse(TEST_PARTS_FORMAT_PMOFN[1]).unwrap();

        assert_eq!(p.parse("p2of4 abc").unwrap_err(), QrError::TotalMismatch { have: 4, expected: 3 });
        assert_eq!(p.parse("p9of3 abc").unwrap_err(), QrError::PartOutOfRange { index: 9, total: 3 });
        assert_eq!(p.parse("just text").unwrap_err(), QrError::MalformedPmofn);
        assert_eq!(p.parsed_count(), 1);

        p.parse(TEST_PARTS_FORMAT_PMOFN[0]).unwrap();
        p.parse(TEST_PARTS_FORMAT_PMOFN[2]).unwrap();
        assert_eq!(p.result().unwrap(), QrResult::Text(TEST_DATA_B58.to_string()));
    }

    #[test]
    fn oversized_pmofn_totals_rejected() {
        for text in ["p1of18446744073709551615 x", "p1of10000000000 x", "p1of10000 x"] {
            let mut p = QrPartParser::new();
            assert!(matches!(p.parse(text), Err(QrError::PartOutOfRange { index: 1, .. })), "{}", text);
            assert!(!p.is_complete());
            assert_eq!(p.format(), None);
            assert_eq!(p.total_count(), None);

            // the session still accepts a well-formed capture afterwards
            for part in TEST_PARTS_FORMAT_PMOFN {
                p.parse(part).unwrap();
            }
            assert_eq!(p.result().unwrap(), QrResult::Text(TEST_DATA_B58.to_string()));
        }
        assert_eq!(parse_pmofn_qr_part("p9999of9999 x").unwrap(), ("x", 9999, 9999));
    }

    #[test]
    fn oversized_total_mid_session_is_rejected() {
        let mut p = QrPartParser::new();
        p.parse(TEST_PARTS_FORMAT_PMOFN[0]).unwrap();
        assert!(matches!(p.parse("p3of18446744073709551615 x"), Err(QrError::PartOutOfRange { .. })));
        assert!(!p.is_complete());
        assert_eq!(p.total_count(), Some(3));
    }

    #[test]
    fn pmofn_completion_needs_both_ends() {
        let mut p = QrPartParser::new();
        p.parse("p2of3 b").unwrap();
        p.parse("p3of3 c").unwrap();
        assert!(!p.is_complete());
        p.parse("p1of3 a").unwrap();
        assert!(p.is_complete());
        assert_eq!(p.result().unwrap(), QrResult::Text("abc".into()));
    }

    #[test]
    fn bbqr_session() {
        let mut p = QrPartParser::new();
        // "hello" as hex, in two parts, zero-based indexes
        assert!(matches!(p.parse("B$HU02"), Err(QrError::Bbqr(_))));
        assert_eq!(p.format(), None);
        p.parse("B$HU0201").unwrap();
        assert!(!p.is_complete());
        p.parse("B$HU020068656C6C6F").unwrap();
        assert_eq!(p.bbqr_params(), Some((BbqrEncoding::Hex, FileType::UnicodeText)));
        assert!(p.is_complete());
        assert_eq!(p.result().unwrap(), QrResult::Bbqr(BbqrData::Text("hello".into())));
    }

    #[test]
    fn bbqr_rejects_mixed_headers() {
        let mut p = QrPartParser::new();
        p.parse("B$2P0200AAAAAAAA").unwrap();
        assert_eq!(p.parse("B$HP0201AA").unwrap_err(), QrError::BbqrMismatch);
        assert_eq!(p.parse("B$2B0201AA").unwrap_err(), QrError::BbqrMismatch);
        assert_eq!(p.parse("B$2P0301AA").unwrap_err(), QrError::TotalMismatch { have: 3, expected: 2 });
        assert!(matches!(p.parse("B$2P02"), Err(QrError::Bbqr(_))));
        assert_eq!(p.parsed_count(), 1);
    }

    #[test]
    fn ur_without_decoder_is_unavailable() {
        let mut p = QrPartParser::new();
        assert_eq!(p.parse("ur:bytes/1-2/abc").unwrap_err(), QrError::UrUnavailable);
        assert_eq!(p.format(), None);
    }

    #[test]
    fn ur_single_part() {
        let mut p = QrPartParser::with_ur_decoder(Box::new(MockUrDecoder::new()));
        p.parse("ur:bytes/payload").unwrap();
        assert_eq!(p.format(), Some(QrFormat::Ur));
        assert_eq!(p.total_count(), Some(1));
        assert_eq!(p.parsed_count(), 1);
        assert!(p.is_complete());
        assert_eq!(
            p.result().unwrap(),
            QrResult::Ur(UrPayload { ur_type: "bytes".into(), cbor: vec![0xa1, 0x01] })
        );
    }

    #[test]
    fn ur_multi_part_progress() {
        let mut p = QrPartParser::with_ur_decoder(Box::new(MockUrDecoder::new()));
        p.parse("ur:bytes/1-4/a").unwrap();
        p.parse("ur:bytes/1-4/a").unwrap();
        p.parse("ur:bytes/3-4/c").unwrap();
        assert_eq!(p.total_count(), Some(8));
        // ceil(0.5 * 8 / 2) + 2 received
        assert_eq!(p.parsed_count(), 4);
        assert_eq!(p.processed_parts_count(), 3);
        assert!(!p.is_complete());

        // non-UR frames are rejected once the session is UR
        assert!(matches!(p.parse("p1of2 x"), Err(QrError::FormatMismatch { expected: QrFormat::Ur, .. })));

        p.parse("ur:bytes/2-4/b").unwrap();
        p.parse("ur:bytes/4-4/d").unwrap();
        assert!(p.is_complete());
        assert!(matches!(p.result(), Ok(QrResult::Ur(_))));
    }

    #[test]
    fn ur_decoder_rejections_are_reported() {
        let mut p = QrPartParser::with_ur_decoder(Box::new(MockUrDecoder::new()));
        let err = p.parse("ur:bytes/x-4/a").unwrap_err();
        assert_eq!(err, QrError::UrRejected { msg: "bad index".into() });
        assert_eq!(p.format(), None);
    }

    #[test]
    fn frame_helpers() {
        assert_eq!(Frame::from("abc").as_text(), Some("abc"));
        assert_eq!(Frame::from(vec![1u8, 2]).as_text(), None);
        assert_eq!(Frame::from(vec![1u8, 2]).len(), 2);
        assert!(Frame::from("").is_empty());
    }

    proptest! {
        #[test]
        fn prop_pmofn_any_order(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
            let mut p = QrPartParser::new();
            for (n, i) in order.iter().enumerate() {
                prop_assert!(!p.is_complete());
                p.parse(TEST_PARTS_FORMAT_PMOFN[*i]).unwrap();
                prop_assert_eq!(p.parsed_count(), n + 1);
            }
            prop_assert_eq!(p.result().unwrap(), QrResult::Text(TEST_DATA_B58.to_string()));
        }

        #[test]
        fn prop_pmofn_header_never_panics(index in 0u64..10_000, total in any::<u64>()) {
            let text = format!("p{}of{} x", index, total);
            let mut p = QrPartParser::new();
            let accepted = p.parse(text.as_str()).is_ok();
            let in_range = total >= 1 && total <= 9999 && index >= 1 && index <= total;
            prop_assert_eq!(accepted, in_range);
            prop_assert_eq!(p.is_complete(), in_range && total == 1);
        }
    }
}

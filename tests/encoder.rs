use pack::prelude::*;
use pack_strategy::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn binary_round_trip(v in arb_value()) {
        let enc = encode_full(&v);
        prop_assert_eq!(enc.len(), v.size_hint());

        let dec = v.ty().unmarshal_value(&enc, &DecodeConfig::default());
        prop_assert_eq!(dec, Ok(v));
    }

    #[test]
    fn json_round_trip(v in arb_value()) {
        let text = v.to_string();
        let dec = v.ty().unmarshal_value_json(text.as_bytes());
        prop_assert_eq!(dec, Ok(v));
    }

    #[test]
    fn type_round_trip(ty in arb_type()) {
        prop_assert!(ty.equals(&ty));

        let bytes = marshal_type(&ty);
        prop_assert_eq!(bytes.len(), ty.size_hint());
        let dec = unmarshal_type(&bytes, &DecodeConfig::default()).unwrap();
        prop_assert!(dec.equals(&ty));

        let text = serde_json::to_string(&ty).unwrap();
        let dec: Type = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(dec, ty);
    }

    #[test]
    fn different_shapes_differ(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(a.equals(&b), a == b);
    }

    #[test]
    fn typed_binary_keeps_order(t in arb_typed()) {
        let enc = encode_full(&t);
        let dec: Typed = decode_full(&enc, &DecodeConfig::default()).unwrap();
        prop_assert_eq!(dec, t);
    }

    #[test]
    fn typed_json_keeps_content(t in arb_typed()) {
        let text = serde_json::to_string(&t).unwrap();
        let dec: Typed = serde_json::from_str(&text).unwrap();
        for field in t.as_struct() {
            prop_assert_eq!(dec.get(&field.name), Some(&field.value));
        }
        prop_assert_eq!(dec.as_struct().len(), t.as_struct().len());
    }

    #[test]
    fn truncated_input_fails(v in arb_value()) {
        let enc = encode_full(&v);
        if !enc.is_empty() {
            let res = v.ty().unmarshal_value(&enc[..enc.len() - 1], &DecodeConfig::default());
            prop_assert!(res.is_err());
        }
    }
}

#[test]
fn kind_bytes_are_stable() {
    let cfg = DecodeConfig::default();
    for byte in 0..=u8::MAX {
        let res: Result<Kind, _> = decode_full(&[byte], &cfg);
        match Kind::from_u8(byte) {
            Some(kind) => assert_eq!(res, Ok(kind)),
            None => assert_eq!(res, Err(DecodingError::UnsupportedKind(byte))),
        }
    }
}

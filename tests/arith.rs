use pack::prelude::*;
use pack_strategy::*;
use proptest::prelude::*;

macro_rules! identities {
    ($name:ident, $model:ident, $prim:ty) => {
        proptest! {
            #[test]
            fn $name(x in any::<$prim>(), y in any::<$prim>()) {
                let x = $model::new(x);
                prop_assert_eq!(x + $model::ZERO, x);
                prop_assert_eq!(x - $model::ZERO, x);

                let y = $model::new(y);
                if let Some(sum) = x.checked_add(y) {
                    prop_assert_eq!(sum - y, x);
                } else {
                    prop_assert!(x.get() > <$prim>::MAX - y.get());
                }
            }
        }
    };
}

identities!(u8_identities, U8, u8);
identities!(u16_identities, U16, u16);
identities!(u32_identities, U32, u32);
identities!(u64_identities, U64, u64);

proptest! {
    #[test]
    fn u128_identities(x in arb_u128(), y in arb_u128()) {
        prop_assert_eq!(&x + &U128::zero(), x.clone());
        prop_assert_eq!(&x - &U128::zero(), x.clone());
        match x.checked_add(&y) {
            Some(sum) => {
                prop_assert_eq!(&sum - &y, x);
            }
            None => {
                prop_assert!(x.greater_than(&(&U128::max_value() - &y)));
            }
        }
    }

    #[test]
    fn u256_identities(x in arb_u256(), y in arb_u256()) {
        prop_assert_eq!(&x + &U256::zero(), x.clone());
        prop_assert_eq!(&x - &U256::zero(), x.clone());
        if let Some(sum) = x.checked_add(&y) {
            prop_assert_eq!(&sum - &y, x.clone());
            prop_assert!(sum.greater_than_equal(&x));
        }
    }

    #[test]
    fn u256_widening_preserves_value(x in arb_u128()) {
        let wide = U256::from(x.clone());
        prop_assert_eq!(wide.as_biguint(), x.as_biguint());
        prop_assert_eq!(&wide.to_bytes()[16..], &x.to_bytes()[..]);
    }

    #[test]
    fn mul_div(x in any::<u64>(), y in 1..u64::MAX) {
        let (x, y) = (U128::from(U64::new(x)), U128::from(U64::new(y)));
        prop_assert_eq!(&(&x * &y) / &y, x);
    }

    #[test]
    fn uint_json_bounds(x in arb_u256()) {
        let text = serde_json::to_string(&x).unwrap();
        prop_assert_eq!(serde_json::from_str::<U256>(&text).unwrap(), x.clone());

        let narrow = serde_json::from_str::<U128>(&text);
        prop_assert_eq!(narrow.is_ok(), x.as_biguint().bits() <= 128);
    }
}

#[test]
#[should_panic(expected = "overflow")]
fn max_u8_plus_one() { let _ = U8::MAX + U8::new(1); }

#[test]
#[should_panic(expected = "underflow")]
fn zero_u8_minus_one() { let _ = U8::new(0) - U8::new(1); }

#[test]
#[should_panic(expected = "overflow")]
fn max_u64_plus_one() { let _ = U64::MAX + U64::new(1); }

#[test]
#[should_panic(expected = "overflow")]
fn max_u256_plus_one() { let _ = U256::max_value() + U256::from(U8::new(1)); }

#[test]
#[should_panic(expected = "underflow")]
fn zero_u128_minus_one() {
    let mut x = U128::zero();
    x -= U128::from(1u128);
}

#[test]
fn zero_is_zero_everywhere() {
    let a = U256::default();
    let b = U256::from(U8::new(0));
    assert!(a.equal(&b));
    assert!(a.less_than_equal(&b));
    assert!(a.greater_than_equal(&b));
    assert!(!a.less_than(&b));
    assert_eq!(&a + &b, U256::zero());
}

use pack::{
    fixed::FixedBytes,
    kind::Kind,
    list::List,
    scalar::{U16, U32, U64, U8},
    structure::{Struct, StructField},
    typed::Typed,
    types::{StructType, Type, TypeField},
    uint::{U128, U256},
    Value,
};
use proptest::prelude::*;

/// arbitrary Kind for use with proptest
pub fn arb_kind() -> impl Strategy<Value = Kind> { prop::sample::select(Kind::ALL.to_vec()) }

/// arbitrary field name for use with proptest
pub fn arb_name() -> impl Strategy<Value = String> { "[a-zA-Z_][a-zA-Z0-9_]{0,11}" }

/// arbitrary leaf Type for use with proptest
pub fn arb_leaf_type() -> impl Strategy<Value = Type> { arb_kind().prop_filter_map("container kind", Type::leaf) }

/// arbitrary Type for use with proptest
pub fn arb_type() -> impl Strategy<Value = Type> {
    arb_leaf_type().prop_recursive(
        4,  // max depth
        32, // max nodes
        6,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::btree_map(arb_name(), inner.clone(), 0..6).prop_map(|m| {
                    Type::Struct(m.into_iter().map(|(n, t)| TypeField::new(n, t)).collect())
                }),
                inner
                    .prop_filter("list elements need a type", |t| t.kind() != Kind::Nil)
                    .prop_map(|t| Type::List(Box::new(t))),
            ]
        },
    )
}

/// arbitrary struct Type for use with proptest
pub fn arb_struct_type() -> impl Strategy<Value = StructType> {
    prop::collection::btree_map(arb_name(), arb_type(), 0..6)
        .prop_map(|m| m.into_iter().map(|(n, t)| TypeField::new(n, t)).collect())
}

/// arbitrary U128 for use with proptest
pub fn arb_u128() -> impl Strategy<Value = U128> { any::<[u8; 16]>().prop_map(U128::from_bytes) }

/// arbitrary U256 for use with proptest
pub fn arb_u256() -> impl Strategy<Value = U256> { any::<[u8; 32]>().prop_map(U256::from_bytes) }

/// arbitrary fixed-width bytes for use with proptest
pub fn arb_fixed<const N: usize>() -> impl Strategy<Value = FixedBytes<N>> {
    prop::collection::vec(any::<u8>(), N).prop_map(|v| FixedBytes::from_slice(&v).unwrap())
}

fn arb_fields(st: &StructType) -> BoxedStrategy<Struct> {
    let names: Vec<String> = st.iter().map(|f| f.name.clone()).collect();
    let values: Vec<BoxedStrategy<Value>> = st.iter().map(|f| arb_value_of(&f.ty)).collect();
    values
        .prop_map(move |vs| {
            names
                .iter()
                .cloned()
                .zip(vs)
                .map(|(n, v)| StructField::new(n, v))
                .collect()
        })
        .boxed()
}

/// arbitrary Value of the given Type for use with proptest
pub fn arb_value_of(ty: &Type) -> BoxedStrategy<Value> {
    match ty {
        Type::Nil => Just(Value::Nil).boxed(),
        Type::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        Type::U8 => any::<u8>().prop_map(|u| Value::U8(U8::new(u))).boxed(),
        Type::U16 => any::<u16>().prop_map(|u| Value::U16(U16::new(u))).boxed(),
        Type::U32 => any::<u32>().prop_map(|u| Value::U32(U32::new(u))).boxed(),
        Type::U64 => any::<u64>().prop_map(|u| Value::U64(U64::new(u))).boxed(),
        Type::U128 => arb_u128().prop_map(Value::U128).boxed(),
        Type::U256 => arb_u256().prop_map(Value::U256).boxed(),
        Type::String => any::<String>().prop_map(Value::String).boxed(),
        Type::Bytes => any::<Vec<u8>>().prop_map(Value::from).boxed(),
        Type::Bytes32 => arb_fixed::<32>().prop_map(Value::Bytes32).boxed(),
        Type::Bytes65 => arb_fixed::<65>().prop_map(Value::Bytes65).boxed(),
        Type::Struct(st) => arb_fields(st).prop_map(Value::Struct).boxed(),
        Type::List(elem) => {
            let elem = (**elem).clone();
            prop::collection::vec(arb_value_of(&elem), 0..6)
                .prop_map(move |vs| {
                    let mut list = List::empty(elem.clone());
                    for v in vs {
                        list.push(v).unwrap();
                    }
                    Value::List(list)
                })
                .boxed()
        }
    }
}

/// arbitrary Value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> { arb_type().prop_flat_map(|t| arb_value_of(&t)) }

/// arbitrary Struct for use with proptest
pub fn arb_struct() -> impl Strategy<Value = Struct> { arb_struct_type().prop_flat_map(|st| arb_fields(&st)) }

/// arbitrary Typed for use with proptest
pub fn arb_typed() -> impl Strategy<Value = Typed> { arb_struct().prop_map(Typed::new) }

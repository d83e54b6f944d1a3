#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests over generated expressions

mod common;

use calculation::DomainError;
use calculation::domain::verify::verify_operations;
use common::{create_service, execute_integers, shapes};
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 128;

/// Integer-only expressions together with their value.
fn integer_expression() -> impl Strategy<Value = (String, i128)> {
    let leaf = (0i128..10).prop_map(|n| (n.to_string(), n));
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), prop::sample::select(vec!['+', '-', '*']), inner.clone()).prop_map(
                |((l, lv), op, (r, rv))| {
                    let value = match op {
                        '+' => lv + rv,
                        '-' => lv - rv,
                        _ => lv * rv,
                    };
                    (format!("({l}) {op} ({r})"), value)
                }
            ),
            inner.clone().prop_map(|(e, v)| (format!("-({e})"), -v)),
            inner.prop_map(|(e, v)| (format!("({e})"), v)),
        ]
    })
}

/// Expressions over all four operators, including decimals.
fn any_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0u32..1000).prop_map(|n| n.to_string()),
        (0u32..100, 0u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
    ];
    leaf.prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!['+', '-', '*', '/']),
                inner.clone()
            )
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            inner.prop_map(|e| format!("-{e}")),
        ]
    })
}

proptest! {
    #[test]
    fn decomposition_is_topologically_ordered(expression in any_expression()) {
        let service = create_service();
        match service.decompose(&expression) {
            Ok(ops) => prop_assert!(verify_operations(&ops).is_ok()),
            Err(DomainError::DivisionByZero) => {}
            Err(e) => prop_assert!(false, "unexpected error {e:?} for {expression}"),
        }
    }

    #[test]
    fn decomposition_structure_is_deterministic(expression in any_expression()) {
        let service = create_service();
        let first = service.decompose(&expression);
        let second = service.decompose(&expression);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(shapes(&a), shapes(&b)),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "diverging results {a:?} / {b:?}"),
        }
    }

    #[test]
    fn executing_operations_preserves_value((expression, value) in integer_expression()) {
        let service = create_service();
        let decomposition = service.decompose_with_result(&expression).unwrap();
        prop_assert_eq!(
            execute_integers(&decomposition.operations, &decomposition.result),
            value
        );
    }

    #[test]
    fn arbitrary_input_never_panics(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let service = create_service();
        if let Ok(ops) = service.decompose(&input) {
            prop_assert!(verify_operations(&ops).is_ok());
        }
    }
}

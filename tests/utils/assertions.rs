//! Custom assertions for contract testing

/// Assert a `try_*` client call failed with a specific contract error
#[macro_export]
macro_rules! assert_contract_error {
    ($result:expr, $expected_error:expr) => {
        match $result {
            Err(Ok(code)) => assert_eq!(code, $expected_error, "Contract error code mismatch"),
            Err(Err(other)) => panic!("Expected contract error, got host error {:?}", other),
            Ok(_) => panic!("Expected contract error but succeeded"),
        }
    };
}

/// Assert two amounts differ by at most `tolerance` ulps
#[macro_export]
macro_rules! assert_within {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let (left, right): (u128, u128) = ($left, $right);
        assert!(
            left.abs_diff(right) <= $tolerance,
            "{} and {} differ by more than {}",
            left,
            right,
            $tolerance
        );
    }};
}

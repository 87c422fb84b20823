use thiserror::Error;

/// Reasons a raw integer is refused as a [`BitAware`](crate::BitAware) value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    #[error("expected integer")]
    ExpectedInteger,
    #[error("value must be positive")]
    NotPositive,
    #[error("value does not fit in 64 bits")]
    Overflow,
    #[error("value exceeds possible flag setup")]
    ExceedsFlagSetup,
}

/// A flag set declaration that can never be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DefinitionError {
    #[error("value {value} for '{name}' is not a power of two")]
    NotPowerOfTwo { name: &'static str, value: u64 },
    #[error("'{name}' is declared more than once")]
    DuplicateName { name: &'static str },
}

/// An exact-value lookup that matched no member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{value} is not a valid {set}")]
pub struct LookupError {
    pub set: &'static str,
    pub value: u64,
}

#[test]
fn messages() {
    use alloc::string::ToString;
    assert_eq!(Error::ExpectedInteger.to_string(), "expected integer");
    assert_eq!(Error::NotPositive.to_string(), "value must be positive");
    assert_eq!(
        Error::ExceedsFlagSetup.to_string(),
        "value exceeds possible flag setup"
    );
    let err = DefinitionError::NotPowerOfTwo {
        name: "BAD",
        value: 6,
    };
    assert_eq!(err.to_string(), "value 6 for 'BAD' is not a power of two");
    let err = LookupError {
        set: "Permission",
        value: 3,
    };
    assert_eq!(err.to_string(), "3 is not a valid Permission");
}

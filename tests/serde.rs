#![cfg(feature = "serde-1")]

use bit_aware::{flag_set, BitAware, Unbound};

flag_set! {
    pub struct Permission {
        READ = 1,
        WRITE = 2,
        EXEC = 4,
    }
}

#[test]
fn serializes_as_integer() {
    let value = BitAware::<Permission>::new(5).unwrap();
    assert_eq!(serde_json::to_string(&value).unwrap(), "5");
    let back: BitAware<Permission> = serde_json::from_str("5").unwrap();
    assert_eq!(back, value);
}

#[test]
fn deserialize_validates() {
    let err = serde_json::from_str::<BitAware<Permission>>("8").unwrap_err();
    assert!(err.to_string().contains("value exceeds possible flag setup"));
    let err = serde_json::from_str::<BitAware<Unbound>>("0").unwrap_err();
    assert!(err.to_string().contains("value must be positive"));
    let err = serde_json::from_str::<BitAware<Unbound>>("-3").unwrap_err();
    assert!(err.to_string().contains("value must be positive"));
}

#[test]
fn deserialize_rejects_non_integers() {
    let err = serde_json::from_str::<BitAware<Unbound>>("1.5").unwrap_err();
    assert!(err.to_string().starts_with("expected integer"));
    let err = serde_json::from_str::<BitAware<Unbound>>("\"5\"").unwrap_err();
    assert!(err.to_string().starts_with("expected integer"));
    let err = serde_json::from_str::<BitAware<Unbound>>("true").unwrap_err();
    assert!(err.to_string().starts_with("expected integer"));
}

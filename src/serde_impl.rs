use crate::error::Error;
use crate::value::{BitAware, Binding};
use core::fmt::{Display, Formatter};
use core::marker::PhantomData;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Serialized as the plain integer
impl<B: Binding> Serialize for BitAware<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get())
    }
}

struct BitAwareVisitor<B>(PhantomData<B>);

impl<'de, B: Binding> Visitor<'de> for BitAwareVisitor<B> {
    type Value = BitAware<B>;

    fn expecting(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("integer")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<BitAware<B>, E> {
        BitAware::new(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<BitAware<B>, E> {
        BitAware::new(v).map_err(E::custom)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<BitAware<B>, E> {
        BitAware::new(v).map_err(E::custom)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<BitAware<B>, E> {
        BitAware::validate(v).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<BitAware<B>, E> {
        Err(not_integer(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<BitAware<B>, E> {
        Err(not_integer(v))
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<BitAware<B>, E> {
        Err(not_integer(v))
    }
}

fn not_integer<E: de::Error>(v: impl Display) -> E {
    log::debug!("rejected {v}: {}", Error::ExpectedInteger);
    E::custom(Error::ExpectedInteger)
}

/// Accepts integers only, validated like [`BitAware::new`]
impl<'de, B: Binding> Deserialize<'de> for BitAware<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // self-describing formats report strings and floats to the visitor
        if deserializer.is_human_readable() {
            deserializer.deserialize_any(BitAwareVisitor(PhantomData))
        } else {
            deserializer.deserialize_u64(BitAwareVisitor(PhantomData))
        }
    }
}

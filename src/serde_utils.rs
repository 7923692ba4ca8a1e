/// Serde utility functions for tool argument and response decoding
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde::de::{self, Unexpected, Visitor};
use std::fmt;

/// Deserialize an optional integer that may arrive as a JSON float.
///
/// MCP clients frequently encode every number as a float, so `10.0` and `10`
/// must both decode. Fractions are truncated toward zero.
///
/// - Missing field (with `#[serde(default)]`) → `None`
/// - Field is `null` → `None`
/// - `10`, `10.0`, `10.7` → `Some(10)`
///
/// Usage:
/// ```ignore
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
///     limit: Option<i64>,
/// }
/// ```
pub fn lenient_i64<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientI64Visitor;

    impl<'de> Visitor<'de> for LenientI64Visitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a number")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(LenientI64Visitor)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_finite() && v >= i64::MIN as f64 && v < i64::MAX as f64 {
                Ok(Some(v.trunc() as i64))
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    de.deserialize_option(LenientI64Visitor)
}

/// Deserialize a value where an explicit `null` means the type's default.
///
/// Pair with `#[serde(default)]` so a missing field decodes the same way:
/// `"memos": null` and no `memos` key both yield an empty list.
pub fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

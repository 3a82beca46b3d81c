//! Primitives behind the defaulted field discipline shared by every extension.
//!
//! Encoders in this crate drop defaulted fields before rendering
//! (`skip_serializing_if = "codec::is_default"`). The textual [`elide`] pass is
//! kept for hosts that already hold a rendered fragment; both agree because
//! every float goes through the canonical renderer below.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest magnitude rendered as an integer. Past this, `f64` cannot hold
/// every integer exactly and the shortest float rendering is used instead.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Wraps a value in the present/absent carrier. Zero is a present value.
pub fn boxed<T>(value: T) -> Option<T> {
    Some(value)
}

/// Unwraps a carrier whose presence has already been tested.
///
/// An absent carrier yields `T::default()`.
pub fn unboxed<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Deserializes a member that is present in the input as `Some`, even when
/// its value is `null`. Pair with `#[serde(default)]` for the absent case.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub fn is_default<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Removes the first occurrence of `literal` from a rendered JSON object and
/// repairs the separators left behind.
///
/// `literal` has the form `"<name>":<canonical number>`, e.g. `"ior":1.5`.
/// See [`elision_literal`].
pub fn elide(fragment: &str, literal: &str) -> String {
    sanitize(&fragment.replacen(literal, "", 1))
}

/// Collapses `,,` to `,`, a leading `{,` to `{` and a trailing `,}` to `}`.
pub fn sanitize(fragment: &str) -> String {
    let mut repaired = fragment.to_owned();
    while repaired.contains(",,") {
        repaired = repaired.replace(",,", ",");
    }
    if repaired.starts_with("{,") {
        repaired.replace_range(..2, "{");
    }
    if repaired.ends_with(",}") {
        let len = repaired.len();
        repaired.replace_range(len - 2.., "}");
    }
    repaired
}

/// Renders the `"<name>":<value>` literal that [`elide`] looks for.
pub fn elision_literal(name: &str, value: f32) -> Result<String, serde_json::Error> {
    let name = serde_json::to_string(name)?;
    let value = serde_json::to_string(&Canonical(value))?;
    Ok(format!("{name}:{value}"))
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Some(value as i64)
    } else {
        None
    }
}

/// Serializes integer-valued floats without a fractional part (`1`, not `1.0`).
pub fn serialize_canonical_f32<S: Serializer>(
    value: &f32,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match integral(f64::from(*value)) {
        Some(value) => serializer.serialize_i64(value),
        None => serializer.serialize_f32(*value),
    }
}

pub fn serialize_canonical_f64<S: Serializer>(
    value: &f64,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match integral(*value) {
        Some(value) => serializer.serialize_i64(value),
        None => serializer.serialize_f64(*value),
    }
}

pub fn serialize_canonical_f64_opt<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(value) => serialize_canonical_f64(value, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn serialize_canonical_f32_seq<S: Serializer>(
    values: &[f32],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(values.len()))?;
    for value in values {
        seq.serialize_element(&Canonical(*value))?;
    }
    seq.end()
}

/// An `f32` that serializes through [`serialize_canonical_f32`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canonical(pub f32);

impl Serialize for Canonical {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_canonical_f32(&self.0, serializer)
    }
}

/// Declares a newtype over `f32` carrying a fixed default, rendered canonically.
macro_rules! defaulted_f32 {
    ($(#[$meta:meta])* $vis:vis struct $name:ident = $default:expr;) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub f32);

        impl $name {
            pub const DEFAULT: f32 = $default;

            pub fn is_default(&self) -> bool {
                self.0 == Self::DEFAULT
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self(Self::DEFAULT)
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $crate::codec::serialize_canonical_f32(&self.0, serializer)
            }
        }

        impl From<f32> for $name {
            fn from(value: f32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for f32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use defaulted_f32;

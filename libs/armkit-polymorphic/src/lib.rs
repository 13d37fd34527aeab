//! Discriminated-union codec for polymorphic JSON payloads.
//!
//! A family is a closed Rust enum whose variant is chosen by one string field of the
//! payload (`kind`, `templateKind`, ...). Decoding reads only that field first, looks
//! the value up in the family's variant table and then decodes the whole document into
//! the selected type. Values missing from the table select the family's base variant,
//! so payloads from newer producers still decode.
//!
//! Families are declared with [`discriminated_union!`]:
//!
//! ```
//! use armkit_polymorphic::{Polymorphic, discriminated_union};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct Volume {
//!     pub kind: Option<String>,
//!     #[serde(rename = "mountPath")]
//!     pub mount_path: Option<String>,
//! }
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! pub struct EphemeralVolume {
//!     #[serde(rename = "mountPath")]
//!     pub mount_path: Option<String>,
//!     #[serde(rename = "managedStore")]
//!     pub managed_store: Option<String>,
//! }
//!
//! discriminated_union! {
//!     pub enum VolumeClassification {
//!         field = "kind",
//!         base = Base(Volume) by kind,
//!         "ephemeral" => Ephemeral(EphemeralVolume),
//!     }
//! }
//!
//! let v: VolumeClassification =
//!     serde_json::from_str(r#"{"kind":"ephemeral","managedStore":"memory"}"#).unwrap();
//! assert_eq!(v.discriminator(), Some("ephemeral"));
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod codec;
mod macros;

pub use codec::{CodecError, decode, decode_array, decode_map, decode_value, encode};

use serde::de::DeserializeOwned;
use serde_json::Value;

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json;
}

/// Decoder for one concrete variant.
pub type VariantDecoder<U> = fn(&Value) -> Result<U, serde_json::Error>;

/// One entry of a family's variant table.
pub struct Variant<U: 'static> {
    pub tag: &'static str,
    pub decode: VariantDecoder<U>,
}

/// A discriminated-union family.
pub trait Polymorphic: Sized + 'static {
    /// Human-readable family name used in error messages.
    const FAMILY: &'static str;
    /// JSON field carrying the discriminator.
    const FIELD: &'static str;
    /// Known discriminator values and their decoders, in declaration order.
    const VARIANTS: &'static [Variant<Self>];
    /// Decoder used for missing or unrecognized discriminators.
    const BASE: VariantDecoder<Self>;

    /// The discriminator this value encodes with.
    fn discriminator(&self) -> Option<&str>;

    /// True for the fallback variant.
    fn is_base(&self) -> bool;

    /// Encode into a JSON value that carries the discriminator.
    ///
    /// # Errors
    /// Returns the serializer error of the inner value.
    fn to_value(&self) -> Result<Value, serde_json::Error>;

    /// Pick the decoder for a discriminator value.
    #[must_use]
    fn decoder_for(tag: Option<&str>) -> VariantDecoder<Self> {
        tag.and_then(|t| Self::VARIANTS.iter().find(|v| v.tag == t))
            .map_or(Self::BASE, |v| v.decode)
    }

    /// Whether `tag` names a known (non-base) variant.
    #[must_use]
    fn is_known(tag: &str) -> bool {
        Self::VARIANTS.iter().any(|v| v.tag == tag)
    }
}

/// Decode `value` as `T` and wrap it into the family enum.
///
/// # Errors
/// Returns the deserializer error when `value` does not fit `T`.
#[doc(hidden)]
pub fn construct<U, T>(value: &Value) -> Result<U, serde_json::Error>
where
    T: DeserializeOwned + Into<U>,
{
    T::deserialize(value).map(Into::into)
}

/// Serialize a known variant and stamp its discriminator into the object.
///
/// # Errors
/// Returns the serializer error of `inner`.
#[doc(hidden)]
pub fn tagged_value<T: serde::Serialize>(
    field: &str,
    tag: &str,
    inner: &T,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(inner)?;
    if let Value::Object(map) = &mut value {
        map.insert(field.to_owned(), Value::String(tag.to_owned()));
    }
    Ok(value)
}

/// Serialize a base value, dropping a discriminator that names a known variant.
///
/// # Errors
/// Returns the serializer error of `inner`.
#[doc(hidden)]
pub fn base_value<U: Polymorphic, T: serde::Serialize>(
    inner: &T,
) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(inner)?;
    if let Value::Object(map) = &mut value {
        let shadows_variant = map
            .get(U::FIELD)
            .and_then(Value::as_str)
            .is_some_and(U::is_known);
        if shadows_variant {
            map.remove(U::FIELD);
        }
    }
    Ok(value)
}

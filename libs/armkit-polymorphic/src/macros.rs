/// Declare a discriminated-union family.
///
/// Generates the enum, its [`Polymorphic`](crate::Polymorphic) table, `From` impls for
/// every variant type, and `Serialize`/`Deserialize` impls that route through the codec.
///
/// Known variant types do not carry the discriminator field; it is derived from the
/// variant when encoding. The base type keeps the raw discriminator in `$base_field`
/// so unknown values survive a round trip. A base value whose `$base_field` names a
/// known variant reports and encodes no discriminator.
#[macro_export]
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            field = $field:literal,
            base = $base:ident($base_ty:ty) by $base_field:ident,
            $( $(#[$vmeta:meta])* $tag:literal => $variant:ident($ty:ty) ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )*
            /// Fallback for missing or unrecognized discriminators.
            $base($base_ty),
        }

        impl $crate::Polymorphic for $name {
            const FAMILY: &'static str = stringify!($name);
            const FIELD: &'static str = $field;
            const VARIANTS: &'static [$crate::Variant<Self>] = &[
                $( $crate::Variant { tag: $tag, decode: $crate::construct::<Self, $ty> }, )*
            ];
            const BASE: $crate::VariantDecoder<Self> = $crate::construct::<Self, $base_ty>;

            fn discriminator(&self) -> Option<&str> {
                match self {
                    $( Self::$variant(_) => Some($tag), )*
                    Self::$base(base) => base
                        .$base_field
                        .as_deref()
                        .filter(|tag| !<Self as $crate::Polymorphic>::is_known(tag)),
                }
            }

            fn is_base(&self) -> bool {
                matches!(self, Self::$base(_))
            }

            fn to_value(
                &self,
            ) -> Result<$crate::__private::serde_json::Value, $crate::__private::serde_json::Error>
            {
                match self {
                    $( Self::$variant(inner) => $crate::tagged_value($field, $tag, inner), )*
                    Self::$base(base) => $crate::base_value::<Self, _>(base),
                }
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*

        impl From<$base_ty> for $name {
            fn from(value: $base_ty) -> Self {
                Self::$base(value)
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                use $crate::__private::serde::ser::Error as _;
                let value = $crate::Polymorphic::to_value(self).map_err(S::Error::custom)?;
                $crate::__private::serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::Error as _;
                let value =
                    <$crate::__private::serde_json::Value as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::decode_value::<Self>(&value)
                    .map_err(D::Error::custom)?
                    .ok_or_else(|| D::Error::custom(concat!(stringify!($name), " must not be null")))
            }
        }
    };
}

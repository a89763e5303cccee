//! Declarative helpers for entities, string enumerations and polymorphic
//! slots.
//!
//! Each macro also implements `Deserialize` by running the collect-all
//! decoder, so `serde_json::from_value` applies the same rules as
//! [`Entity::decode`](crate::Entity::decode).

/// Declare a type as an [`Entity`](crate::Entity) with a literal `type` tag.
///
/// The tag defaults to the type name. Also implements `Deserialize`
/// through [`Entity::decode`](crate::Entity::decode); a rejected document
/// becomes a deserializer error listing every violation.
#[macro_export]
macro_rules! entity {
    ($name:ident) => {
        $crate::entity!($name, stringify!($name));
    };
    ($name:ident, $tag:expr) => {
        impl $crate::Entity for $name {
            const TYPE: &'static str = $tag;
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::Entity>::decode(&value).map_err(::serde::de::Error::custom)
            }
        }
    };
}

/// Define a closed set of string values.
///
/// Generates the enum plus `as_str`, `all`, `VALUES`, `Display`, `FromStr`,
/// `Serialize`/`Deserialize` (as the string value) and
/// [`Decode`](crate::Decode), which
/// rejects anything outside the set with a constraint violation.
///
/// ```
/// hbs_core::string_enum! {
///     /// Fan ventilation direction.
///     pub enum Direction {
///         In => "Intake",
///         Out => "Exhaust",
///     }
/// }
/// assert_eq!(Direction::In.as_str(), "Intake");
/// assert_eq!("Exhaust".parse::<Direction>().unwrap(), Direction::Out);
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Every accepted string value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            /// Every variant, in declaration order.
            pub fn all() -> &'static [$name] {
                &[$(Self::$variant),+]
            }

            /// The wire string for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $value, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::HbsError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s {
                    $( $value => Ok(Self::$variant), )+
                    other => Err($crate::HbsError::UnknownEnumValue {
                        enum_name: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let text = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                text.parse().map_err(::serde::de::Error::custom)
            }
        }

        impl $crate::Decode for $name {
            fn decode_value(
                value: &::serde_json::Value,
                cx: &mut $crate::Context,
            ) -> $crate::Decoded<Self> {
                let Some(text) = value.as_str() else {
                    return Err(cx.report(
                        $crate::ViolationKind::TypeMismatch { expected: "string" },
                        Some(value),
                    ));
                };
                text.parse().map_err(|_| {
                    cx.report(
                        $crate::ViolationKind::ConstraintViolation {
                            constraint: format!("must be one of: {}", Self::VALUES.join(", ")),
                        },
                        Some(value),
                    )
                })
            }
        }
    };
}

/// Define a polymorphic slot: a closed set of entities dispatched by their
/// `type` tag.
///
/// The generated enum encodes as the contained entity (which emits its own
/// tag) and decodes by exact tag match. A missing tag, a non-string tag or a
/// tag outside the set is rejected; there is no structural fallback.
#[macro_export]
macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident($ty:ty) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize)]
        #[serde(untagged)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant($ty), )+
        }

        impl $name {
            /// Tags accepted by this slot.
            pub const TAGS: &'static [&'static str] = &[$(<$ty as $crate::Entity>::TYPE),+];

            /// Tag of the contained entity.
            pub fn type_name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => <$ty as $crate::Entity>::TYPE, )+
                }
            }

            /// Decode a standalone fragment through this slot.
            pub fn decode_from(
                value: &::serde_json::Value,
            ) -> ::std::result::Result<Self, $crate::ValidationError> {
                let mut cx = $crate::Context::new();
                match <Self as $crate::Decode>::decode_value(value, &mut cx) {
                    Ok(decoded) if cx.is_clean() => Ok(decoded),
                    _ => Err($crate::ValidationError {
                        entity: stringify!($name),
                        violations: cx.into_violations(),
                    }),
                }
            }
        }

        impl $crate::Decode for $name {
            fn decode_value(
                value: &::serde_json::Value,
                cx: &mut $crate::Context,
            ) -> $crate::Decoded<Self> {
                let tag = cx.discriminate(value, Self::TAGS)?;
                $(
                    if tag == <$ty as $crate::Entity>::TYPE {
                        return <$ty as $crate::Decode>::decode_value(value, cx).map(Self::$variant);
                    }
                )+
                Err(cx.report(
                    $crate::ViolationKind::UnrecognizedDiscriminator {
                        received: tag.to_string(),
                        allowed: Self::TAGS.to_vec(),
                    },
                    Some(value),
                ))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let value = <::serde_json::Value as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::decode_from(&value).map_err(::serde::de::Error::custom)
            }
        }

        $(
            impl From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

//! Data transfer objects exchanged over the REST API.
//!
//! Every type here is serialized to or deserialized from JSON and documented with
//! `utoipa` so it appears in the generated OpenAPI schema. Status-like enums are
//! declared with [`string_enum!`], which gives them the lowercase string form used
//! both on the wire and in the database.

pub mod activity;
pub mod advertisement;
pub mod api;
pub mod brand;
pub mod category;
pub mod dashboard;
pub mod debt;
pub mod delivery;
pub mod homepage;
pub mod inventory;
pub mod invoice;
pub mod news;
pub mod notification;
pub mod order;
pub mod product;
pub mod translation;
pub mod user;
pub mod voucher;

/// A stored or submitted string did not match any variant of a `string_enum!` type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Declares a fieldless enum with a fixed lowercase string per variant.
///
/// Generates `as_str`, `Display`, `FromStr` (failing with [`UnknownVariant`]) and the
/// serde/utoipa derives, so the same strings are used in JSON and in status columns.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    other => Err($crate::model::UnknownVariant {
                        kind: stringify!($name),
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use string_enum;

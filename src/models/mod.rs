pub mod audit_log;
pub mod care_match;
pub mod care_request;
pub mod document;
pub mod notification;
pub mod payment;
pub mod provider_profile;
pub mod tariff;
pub mod user;

/// Error returned when a stored or submitted wire value does not name a known variant.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a text-backed enum: serde uses the wire strings, rows decode through
/// `TryFrom<String>` and binds go through `as_str`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::models::UnknownVariant;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(crate::models::UnknownVariant {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = crate::models::UnknownVariant;

            fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

pub(crate) use wire_enum;

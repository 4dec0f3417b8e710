//! Per-entity category enumerations.
//!
//! Categories persist as lowercase strings. An unknown string loads as the
//! `General` variant instead of failing the whole collection.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! category_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            General,
            $($variant),+
        }

        impl $name {
            /// Every category, in display order.
            pub const ALL: &'static [$name] = &[$name::General, $($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::General => "general",
                    $($name::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "general" => Ok($name::General),
                    $($text => Ok($name::$variant),)+
                    other => Err(format!("unknown {} category: {other}", stringify!($name))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Ok(raw.parse().unwrap_or_else(|_| {
                    tracing::warn!(category = %raw, "unknown category, using general");
                    $name::General
                }))
            }
        }
    };
}

category_enum! {
    /// Link categories.
    LinkCategory {
        Work => "work",
        Learning => "learning",
        Tools => "tools",
        Entertainment => "entertainment",
        Social => "social",
    }
}

category_enum! {
    /// PDF document categories.
    PdfCategory {
        Work => "work",
        Education => "education",
        Personal => "personal",
        Reference => "reference",
        Invoices => "invoices",
    }
}

category_enum! {
    /// Password categories.
    PasswordCategory {
        Social => "social",
        Work => "work",
        Banking => "banking",
        Shopping => "shopping",
        Entertainment => "entertainment",
    }
}

category_enum! {
    /// Task categories.
    TaskCategory {
        Work => "work",
        Personal => "personal",
        Health => "health",
        Learning => "learning",
        Urgent => "urgent",
    }
}

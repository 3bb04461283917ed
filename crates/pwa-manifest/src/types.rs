//! Closed value sets for the manifest members that the builder validates.
//!
//! Each enum serializes as its plain schema string and parses from it; parsing
//! anything outside the set yields [`ManifestError::InvalidValue`].

use crate::manifest::ManifestError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every accepted value, in schema order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Manifest member this value is stored under.
            pub const FIELD: &'static str = $field;

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Comma-separated list of the accepted strings, for diagnostics.
            pub fn allowed() -> String {
                Self::ALL
                    .iter()
                    .copied()
                    .map(Self::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl FromStr for $name {
            type Err = ManifestError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(ManifestError::InvalidValue {
                        field: $field,
                        value: other.to_owned(),
                        allowed: Self::allowed(),
                    }),
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

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }
    };
}

closed_enum!(
    /// Preferred display mode (`display` member).
    DisplayMode, field = "display" {
        Fullscreen => "fullscreen",
        Standalone => "standalone",
        MinimalUi => "minimal-ui",
        Browser => "browser",
    }
);

closed_enum!(
    /// Default screen orientation (`orientation` member).
    Orientation, field = "orientation" {
        Any => "any",
        Natural => "natural",
        Landscape => "landscape",
        LandscapePrimary => "landscape-primary",
        LandscapeSecondary => "landscape-secondary",
        Portrait => "portrait",
        PortraitPrimary => "portrait-primary",
        PortraitSecondary => "portrait-secondary",
    }
);

closed_enum!(
    /// Base text direction (`dir` member).
    TextDirection, field = "dir" {
        Ltr => "ltr",
        Rtl => "rtl",
        Auto => "auto",
    }
);

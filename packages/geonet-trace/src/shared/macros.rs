//! Shared macros for the codebase
//!
//! `wire_enum!` declares a fieldless enum whose wire names follow the host
//! server's convention (`esriFMUpstream`, `esriFEEdges`, ...). Parsing accepts
//! both the prefixed wire name and the bare variant name.

#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All variants in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire name as used in requests and responses
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s == $wire || s == stringify!($variant) {
                        return Ok($name::$variant);
                    }
                )+
                Err(format!(
                    "'{}' is not a valid {} (expected one of: {})",
                    s,
                    stringify!($name),
                    [$($wire),+].join(", ")
                ))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

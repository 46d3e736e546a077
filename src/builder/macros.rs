//! Macros for compile-time checked state and event names.

/// Generate an enum whose variants name states or events.
///
/// Each variant is mapped to an identifier; the enum implements
/// [`AsSymbol`](crate::core::AsSymbol), so it can be passed anywhere a
/// state or event name is expected instead of a string.
///
/// # Example
///
/// ```
/// use statewise::identifier_enum;
/// use statewise::core::AsSymbol;
///
/// identifier_enum! {
///     pub enum Pose {
///         Standing => standing,
///         Walking => walking,
///     }
/// }
///
/// assert_eq!(Pose::Walking.name(), "walking");
/// assert_eq!(Pose::Standing.to_symbol().unwrap(), "standing");
/// assert_eq!(Pose::ALL.len(), 2);
/// ```
#[macro_export]
macro_rules! identifier_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $symbol:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($symbol)),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl $crate::core::AsSymbol for $name {
            fn to_symbol(
                &self,
            ) -> ::std::result::Result<$crate::core::Symbol, $crate::core::InvalidIdentifier> {
                $crate::core::Symbol::parse(self.name())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::AsSymbol;

    identifier_enum! {
        enum Pose {
            Standing => standing,
            Walking => walking,
            Running => running,
        }
    }

    identifier_enum! {
        /// Movement events.
        pub enum Move {
            Walk => walk,
            Run => run,
        }
    }

    #[test]
    fn identifier_enum_maps_variants_to_names() {
        assert_eq!(Pose::Standing.name(), "standing");
        assert_eq!(Pose::Running.to_string(), "running");
        assert_eq!(Move::Run.to_symbol().unwrap(), "run");
    }

    #[test]
    fn all_lists_variants_in_order() {
        assert_eq!(Pose::ALL, &[Pose::Standing, Pose::Walking, Pose::Running]);
        assert_eq!(Move::ALL.len(), 2);
    }
}

//! Macros for declaring simple state enums.

/// Generate a fieldless state enum together with its
/// [`State`](crate::core::State) implementation.
///
/// # Example
///
/// ```
/// use puzzleroom::state_enum;
/// use puzzleroom::core::State;
///
/// state_enum! {
///     #[derive(Copy, Eq)]
///     pub enum LeverState {
///         Up,
///         Down,
///         Jammed,
///     }
///     final: [Jammed]
/// }
///
/// assert_eq!(LeverState::Down.name(), "Down");
/// assert!(LeverState::Jammed.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}

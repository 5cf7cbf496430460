//! `define_port_error!`, shared by every port in this module.
//!
//! Repository, hasher and token codec failures are all small `thiserror`
//! enums. Services match on the variants to pick an [`ErrorCode`] (a
//! duplicate email becomes `EMAIL_ALREADY_EXISTS`, an unreachable store
//! becomes `INTERNAL_SERVER_ERROR`), so the enums stay free of HTTP concerns.
//!
//! [`ErrorCode`]: crate::domain::ErrorCode

/// Declare a port error enum with one snake_case constructor per variant.
///
/// Each variant is either a unit (`Expired => "..."`) or carries named fields
/// (`Query { message: String } => "...: {message}"`). Constructor parameters
/// take `impl Into<FieldType>` so adapters can pass `&str` for `String`.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@fields $variant [] [] $( $field : $ty, )*);
    };

    // Accumulates `name: impl Into<T>` parameters and `name: name.into()`
    // initialisers one field at a time.
    (@fields $variant:ident [$($args:tt)*] [$($assign:tt)*]) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($args)*) -> Self {
                Self::$variant { $($assign)* }
            }
        }
    };

    (
        @fields $variant:ident [$($args:tt)*] [$($assign:tt)*]
        $field:ident : $ty:ty, $($rest:tt)*
    ) => {
        define_port_error!(
            @fields
            $variant
            [$($args)* $field: impl Into<$ty>,]
            [$($assign)* $field: $field.into(),]
            $($rest)*
        );
    };
}

pub(crate) use define_port_error;

//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for generated constructors and messages.
    define_port_error! {
        pub enum StoragePortError {
            Unavailable => "storage unavailable",
            Rejected { message: String } => "rejected: {message}",
            Missing { id: i32 } => "record {id} missing",
            Failed { message: String, attempts: u32 } => "failed: {message} after {attempts}",
        }
    }

    #[test]
    fn unit_variants_get_snake_case_constructors() {
        assert_eq!(StoragePortError::unavailable().to_string(), "storage unavailable");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StoragePortError::rejected("duplicate");
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = StoragePortError::missing(42);
        assert_eq!(err, StoragePortError::Missing { id: 42 });
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StoragePortError::failed("timeout", 3_u32);
        assert_eq!(err.to_string(), "failed: timeout after 3");
    }
}

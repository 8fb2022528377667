//! Helper macro for declaring port error enums.
//!
//! Every variant carries a single `message` field and gets a snake_case
//! constructor accepting anything convertible into `String`, so adapters can
//! write `CaptureRepositoryError::connection("pool closed")`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $message:literal
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { message: String },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant {
                            message: message.into(),
                        }
                    }
                }
            )*

            /// Human-readable detail carried by every variant.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message.as_str(),)*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StoragePortError {
            Unreachable => "store unreachable: {message}",
            Rejected => "store rejected write: {message}",
        }
    }

    #[test]
    fn constructors_accept_str() {
        let err = StoragePortError::unreachable("socket closed");
        assert_eq!(err.to_string(), "store unreachable: socket closed");
        assert_eq!(err.message(), "socket closed");
    }

    #[test]
    fn variants_keep_distinct_messages() {
        let err = StoragePortError::rejected(String::from("disk full"));
        assert!(matches!(err, StoragePortError::Rejected { .. }));
        assert_eq!(err.to_string(), "store rejected write: disk full");
    }
}

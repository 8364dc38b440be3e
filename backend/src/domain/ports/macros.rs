//! Helper macro for port error enums.
//!
//! Every driven-port failure in this crate carries a single human-readable
//! `message`, so the macro only accepts message variants. For each variant
//! it emits a snake-case constructor taking `impl Into<String>`, and it
//! emits one shared `message()` accessor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $display:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a `", stringify!($variant), "` error.")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )+

            /// Adapter-supplied detail, without the variant prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message.as_str(),)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;

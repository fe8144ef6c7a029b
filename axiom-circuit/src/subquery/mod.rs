use axiom_codec::types::native::SubqueryType;
use serde::{Deserialize, Serialize};

/// Declares a fixed set of field variants with their on-chain field indices, plus the
/// `u32` conversions in both directions.
macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $idx:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub const fn field_idx(self) -> u32 {
                match self {
                    $($name::$variant => $idx as u32),*
                }
            }
        }

        impl From<$name> for u32 {
            fn from(field: $name) -> u32 {
                field.field_idx()
            }
        }

        impl TryFrom<u32> for $name {
            type Error = u32;

            fn try_from(idx: u32) -> Result<Self, u32> {
                Self::ALL.iter().copied().find(|field| field.field_idx() == idx).ok_or(idx)
            }
        }
    };
}

/// One builder method per listed field, each delegating to `self.field`.
macro_rules! field_accessors {
    ($field:ident { $($name:ident => $variant:ident),* $(,)? }) => {
        $(
            pub fn $name(&mut self) -> Result<SubqueryHandle, BuildError> {
                self.field($field::$variant)
            }
        )*
    };
}

pub mod account;
pub mod header;
pub mod mapping;
pub mod receipt;
pub mod registry;
pub mod storage;
pub mod tx;
pub mod utils;
pub mod validate;

pub use account::{AccountBuilder, AccountField};
pub use header::{HeaderBuilder, HeaderField};
pub use mapping::MappingBuilder;
pub use receipt::{LogBuilder, ReceiptBuilder, ReceiptField};
pub use storage::StorageBuilder;
pub use tx::{TxBuilder, TxField};

/// Reference to a registered subquery. Usable as an output before its value is resolved.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct SubqueryHandle {
    pub index: u32,
    pub subquery_type: SubqueryType,
}


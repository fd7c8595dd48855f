// src/records/mod.rs
//! Typed records produced by the extractors.
//!
//! Each record is declared once through [`record!`], which emits the struct,
//! its `Default` (the declared per-field defaults), a builder with one typed
//! setter per field, and the flat tabular view used by the exporters.

use chrono::NaiveDate;

pub mod fight;
pub mod profile;
pub mod rating;
pub mod snippet;

pub use fight::{Fight, FightBuilder};
pub use profile::{BoxerProfile, BoxerProfileBuilder};
pub use rating::{RatingPage, RatingRow, RatingRowBuilder};
pub use snippet::{FightSnippet, FightSnippetBuilder};

/// Flat row view of a record: stable column names plus stringified cells.
pub trait Tabular {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

/// Renders one field value as a table cell.
pub trait ToCell {
    fn to_cell(&self) -> String;
}

macro_rules! display_cell {
    ($($ty:ty),*) => {
        $(impl ToCell for $ty {
            fn to_cell(&self) -> String { self.to_string() }
        })*
    };
}

display_cell!(u32, u64, i32, f64, String);

impl ToCell for NaiveDate {
    fn to_cell(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl<T: ToCell> ToCell for Option<T> {
    fn to_cell(&self) -> String {
        self.as_ref().map(ToCell::to_cell).unwrap_or_default()
    }
}

impl ToCell for Vec<String> {
    fn to_cell(&self) -> String {
        self.join("|")
    }
}

/// Declares a record type and its builder.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident / $builder:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl Default for $name {
            fn default() -> Self {
                Self { $( $field: $default, )* }
            }
        }

        #[doc = concat!("Accumulates the fields of one [`", stringify!($name), "`] during extraction.")]
        #[derive(Debug, Default)]
        pub struct $builder {
            record: $name,
        }

        #[allow(dead_code)]
        impl $builder {
            pub fn new() -> Self {
                Self::default()
            }

            $(
                pub fn $field(&mut self, value: impl Into<$ty>) -> &mut Self {
                    self.record.$field = value.into();
                    self
                }
            )*

            /// Fields set so far, for extractors that derive from earlier ones.
            pub fn peek(&self) -> &$name {
                &self.record
            }

            pub fn build(self) -> $name {
                self.record
            }
        }

        impl $crate::records::Tabular for $name {
            fn headers() -> Vec<&'static str> {
                vec![$( stringify!($field), )*]
            }

            fn to_row(&self) -> Vec<String> {
                use $crate::records::ToCell;
                vec![$( self.$field.to_cell(), )*]
            }
        }
    };
}

pub(crate) use record;

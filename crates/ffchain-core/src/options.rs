//! Option groups: phase- and media-scoped bundles of fields.
//!
//! Every group is declared with [`option_group!`], which generates, per
//! attribute, a getter plus `set_<attr>`, `with_<attr>` and `clear_<attr>`.
//! Tokens are produced in declaration order.

use std::fmt::Debug;

use serde::Serialize;

pub use audio::{AudioInputOptions, AudioOutputOptions};
pub use global::GlobalOptions;
pub use image::{ImageInputOptions, ImageOutputOptions};
pub use video::{VideoInputOptions, VideoOutputOptions};

/// The command segment a group renders into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Global,
    Input,
    Output,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

pub trait OptionGroup: Debug {
    /// Type name of the group, used in error messages.
    fn name(&self) -> &'static str;
    fn phase(&self) -> Phase;
    /// `None` for global options.
    fn media(&self) -> Option<MediaKind>;
    /// Tokens of all set attributes, in declaration order.
    fn command_args(&self) -> Vec<String>;
}

/// Groups that go before `-i <input>`.
pub trait InputGroup: OptionGroup {}

/// Groups that go between the input and the output path.
pub trait OutputGroup: OptionGroup {}

/// Lowest accepted frame rate; ffmpeg rejects zero.
pub(crate) const MIN_FRAME_RATE: f64 = 0.00001;

macro_rules! option_group {
    (
        $(#[$meta:meta])*
        pub struct $group:ident ($phase:ident $(, $media:ident)?) {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $desc:ty = $init:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $group {
            validation: $crate::field::Validation,
            $( $field: $crate::field::Field<$desc>, )*
        }

        impl Default for $group {
            fn default() -> Self {
                Self {
                    validation: $crate::field::Validation::Strict,
                    $(
                        $field: {
                            static DESCRIPTOR: $desc = $init;
                            $crate::field::Field::new(stringify!($field), &DESCRIPTOR)
                        },
                    )*
                }
            }
        }

        impl $group {
            /// An empty group that rejects invalid values with an error.
            pub fn new() -> Self {
                Self::default()
            }

            /// An empty group that logs invalid values and leaves the
            /// attribute unset instead of failing.
            pub fn lenient() -> Self {
                Self::default().with_validation($crate::field::Validation::Lenient)
            }

            pub fn with_validation(mut self, validation: $crate::field::Validation) -> Self {
                self.validation = validation;
                self
            }

            pub const fn validation(&self) -> $crate::field::Validation {
                self.validation
            }

            paste::paste! {
                $(
                    $(#[$field_meta])*
                    pub fn $field(
                        &self,
                    ) -> Option<&<$desc as $crate::descriptor::Descriptor>::Value> {
                        self.$field.get()
                    }

                    pub fn [<set_ $field>](
                        &mut self,
                        value: impl Into<$crate::value::RawValue>,
                    ) -> $crate::error::Result<&mut Self> {
                        self.$field.set(value.into(), self.validation)?;
                        Ok(self)
                    }

                    pub fn [<with_ $field>](
                        mut self,
                        value: impl Into<$crate::value::RawValue>,
                    ) -> $crate::error::Result<Self> {
                        self.$field.set(value.into(), self.validation)?;
                        Ok(self)
                    }

                    pub fn [<clear_ $field>](&mut self) -> &mut Self {
                        self.$field.clear();
                        self
                    }
                )*
            }
        }

        impl $crate::options::OptionGroup for $group {
            fn name(&self) -> &'static str {
                stringify!($group)
            }

            fn phase(&self) -> $crate::options::Phase {
                $crate::options::Phase::$phase
            }

            fn media(&self) -> Option<$crate::options::MediaKind> {
                None $( .or(Some($crate::options::MediaKind::$media)) )?
            }

            fn command_args(&self) -> Vec<String> {
                let mut args = Vec::new();
                $( args.extend(self.$field.to_args()); )*
                args
            }
        }
    };
}

pub(crate) use option_group;

mod audio;
mod global;
mod image;
mod video;

#[cfg(test)]
mod tests;

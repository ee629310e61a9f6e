#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

//! Typed construction and execution of ffmpeg command lines.
//!
//! Option values are validated when they are set, grouped by the command
//! segment they belong to and rendered in the order ffmpeg expects:
//! `<global> <input options> -i <input> <output options> <output>`.

pub mod builder;
pub mod command;
pub mod constants;
pub mod descriptor;
pub mod error;
pub mod field;
pub mod options;
pub mod probe;
pub mod report;
pub mod runner;
pub mod util;
pub mod value;

pub use builder::Builder;
pub use command::{CommandLine, Program};
pub use error::{Error, Result};
pub use field::Validation;
pub use options::{
    AudioInputOptions,
    AudioOutputOptions,
    GlobalOptions,
    ImageInputOptions,
    ImageOutputOptions,
    InputGroup,
    MediaKind,
    OptionGroup,
    OutputGroup,
    Phase,
    VideoInputOptions,
    VideoOutputOptions,
};
pub use report::{BatchReport, FileReport, Invocation, Outcome, RunReport};
pub use runner::{InputKind, Runner};
pub use value::{RawValue, Timestamp};

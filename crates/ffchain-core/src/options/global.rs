use super::option_group;
use crate::{
    constants::LOG_LEVELS,
    descriptor::{Choice, Flag},
};

option_group! {
    /// Flags that apply to the whole invocation. They are rendered first.
    pub struct GlobalOptions(Global) {
        /// `-y` when true, `-n` when false.
        overwrite: Flag = Flag::pair("-y", "-n"),
        hide_banner: Flag = Flag::single("-hide_banner"),
        loglevel: Choice = Choice::new("-loglevel", LOG_LEVELS),
        /// `-stats` when true, `-nostats` when false.
        stats: Flag = Flag::pair("-stats", "-nostats"),
    }
}

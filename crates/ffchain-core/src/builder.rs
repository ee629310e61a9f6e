use std::path::PathBuf;

use crate::{
    command::{CommandLine, Program},
    error::{Error, Result},
    options::{GlobalOptions, InputGroup, OptionGroup, OutputGroup, Phase},
    report::RunReport,
    runner::Runner,
};

/// Fluent front end over [`Runner`].
///
/// ```no_run
/// use ffchain_core::{Builder, GlobalOptions, VideoOutputOptions, AudioOutputOptions};
///
/// # fn main() -> ffchain_core::Result<()> {
/// Builder::new("in.mp4", "out.mp4")
///     .with_global_options(&GlobalOptions::new().with_overwrite(true)?)
///     .with_output_options(&VideoOutputOptions::new().with_codec("libx265")?.with_crf(28)?)
///     .with_output_options(&AudioOutputOptions::new().with_codec("aac")?.with_bitrate("64k")?)
///     .run()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    runner: Runner,
}

impl Builder {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            runner: Runner::new(input, output),
        }
    }

    #[must_use]
    pub fn with_global_options(mut self, options: &GlobalOptions) -> Self {
        self.runner.extend(Phase::Global, options.command_args());
        self
    }

    /// Options placed before `-i <input>`.
    #[must_use]
    pub fn with_input_options(mut self, options: &impl InputGroup) -> Self {
        self.runner.extend(Phase::Input, options.command_args());
        self
    }

    /// Options placed between the input and the output path.
    #[must_use]
    pub fn with_output_options(mut self, options: &impl OutputGroup) -> Self {
        self.runner.extend(Phase::Output, options.command_args());
        self
    }

    /// Adds a group chosen at runtime, checking that it belongs to `phase`.
    pub fn with_options(mut self, phase: Phase, options: &dyn OptionGroup) -> Result<Self> {
        if options.phase() != phase {
            return Err(Error::TypeMismatch {
                name:     format!("with_{phase}_options"),
                expected: format!("{phase} options"),
                found:    options.name().to_owned(),
            });
        }
        self.runner.extend(phase, options.command_args());
        Ok(self)
    }

    #[must_use]
    pub fn program(mut self, program: Program) -> Self {
        self.runner.set_program(program);
        self
    }

    /// Container extensions picked up when the input is a directory.
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.set_extensions(extensions);
        self
    }

    /// The command that would run for the configured input and output.
    pub fn command_line(&self) -> CommandLine {
        self.runner.command_line(self.runner.input(), self.runner.output())
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    pub fn into_runner(self) -> Runner {
        self.runner
    }

    pub fn run(&self) -> Result<RunReport> {
        self.runner.run()
    }
}

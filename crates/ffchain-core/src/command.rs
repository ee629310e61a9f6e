use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::Command,
};

/// An executable, plus arguments that always come before anything else.
///
/// Leading arguments allow running the tool through a wrapper, e.g.
/// `nice -n 10 ffmpeg ...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    path:    OsString,
    leading: Vec<OsString>,
}

impl Program {
    pub fn new(path: impl Into<OsString>) -> Self {
        Self {
            path:    path.into(),
            leading: Vec::new(),
        }
    }

    pub fn ffmpeg() -> Self {
        Self::new("ffmpeg")
    }

    pub fn ffprobe() -> Self {
        Self::new("ffprobe")
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn path(&self) -> &OsStr {
        &self.path
    }

    /// Whether the executable can be found (absolute path or `PATH` lookup).
    pub fn is_available(&self) -> bool {
        which::which(&self.path).is_ok()
    }

    pub(crate) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.path);
        cmd.args(&self.leading);
        cmd
    }

    pub(crate) fn display_name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::ffmpeg()
    }
}

/// A fully linearized invocation.
///
/// Tokens always come out as
/// `<global..> <input options..> -i <input> <output options..> <output>`;
/// ffmpeg applies options to the next file named after them, so this order
/// is part of its argument grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program:        Program,
    pub global:         Vec<String>,
    pub input_options:  Vec<String>,
    pub input:          PathBuf,
    pub output_options: Vec<String>,
    pub output:         PathBuf,
}

impl CommandLine {
    /// Every argument after the program path, leading arguments included.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.program.leading.clone();
        args.extend(self.global.iter().map(Into::into));
        args.extend(self.input_options.iter().map(Into::into));
        args.push("-i".into());
        args.push(self.input.as_os_str().to_owned());
        args.extend(self.output_options.iter().map(Into::into));
        args.push(self.output.as_os_str().to_owned());
        args
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub(crate) fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.program.path());
        cmd.args(self.args());
        cmd
    }
}

impl fmt::Display for CommandLine {
    /// Shell-quoted, for logs and dry runs. Non-UTF-8 paths are shown lossily.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = std::iter::once(self.program.path())
            .chain(self.args().iter().map(OsString::as_os_str))
            .map(|w| w.to_string_lossy().into_owned())
            .collect();
        match shlex::try_join(words.iter().map(String::as_str)) {
            Ok(joined) => f.write_str(&joined),
            Err(_) => f.write_str(&words.join(" ")),
        }
    }
}

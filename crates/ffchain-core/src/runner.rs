use std::{
    fs,
    io,
    path::{Path, PathBuf},
    process::Stdio,
};

use path_abs::PathAbs;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    command::{CommandLine, Program},
    constants::BATCH_EXTENSIONS,
    error::{Error, Result},
    options::Phase,
    report::{BatchReport, FileReport, Invocation, Outcome, RunReport},
    util::read_in_dir,
};

/// What the input path turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    File,
    Directory,
}

/// Owns the rendered tokens of one command and runs it against a file or
/// every matching file of a directory.
#[derive(Debug, Clone)]
pub struct Runner {
    program:     Program,
    input:       PathBuf,
    output:      PathBuf,
    global_args: Vec<String>,
    input_args:  Vec<String>,
    output_args: Vec<String>,
    extensions:  Vec<String>,
}

impl Runner {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            program:     Program::default(),
            input:       input.into(),
            output:      output.into(),
            global_args: Vec::new(),
            input_args:  Vec::new(),
            output_args: Vec::new(),
            extensions:  BATCH_EXTENSIONS.iter().map(|&e| e.to_owned()).collect(),
        }
    }

    pub fn set_program(&mut self, program: Program) {
        self.program = program;
    }

    /// Replaces the extensions picked up in directory mode.
    pub fn set_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
    }

    /// Appends already-rendered tokens to the bucket of `phase`.
    pub fn extend(&mut self, phase: Phase, args: impl IntoIterator<Item = String>) {
        let bucket = match phase {
            Phase::Global => &mut self.global_args,
            Phase::Input => &mut self.input_args,
            Phase::Output => &mut self.output_args,
        };
        bucket.extend(args);
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn command_line(&self, input: &Path, output: &Path) -> CommandLine {
        CommandLine {
            program:        self.program.clone(),
            global:         self.global_args.clone(),
            input_options:  self.input_args.clone(),
            input:          input.to_path_buf(),
            output_options: self.output_args.clone(),
            output:         output.to_path_buf(),
        }
    }

    /// Classifies the input path. Nothing is spawned when this fails.
    pub fn resolve(&self) -> Result<InputKind> {
        let meta = match fs::metadata(&self.input) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::PathNotFound(self.input.clone()));
            },
            Err(e) => return Err(e.into()),
        };
        if meta.is_file() {
            Ok(InputKind::File)
        } else if meta.is_dir() {
            Ok(InputKind::Directory)
        } else {
            Err(Error::InvalidInputKind(self.input.clone()))
        }
    }

    /// The commands [`run`](Self::run) would execute, without executing them.
    pub fn plan(&self) -> Result<Vec<CommandLine>> {
        match self.resolve()? {
            InputKind::File => Ok(vec![self.command_line(&self.input, &self.output)]),
            InputKind::Directory => Ok(self
                .batch_files()?
                .iter()
                .filter_map(|file| {
                    let target = self.output.join(file.file_name()?);
                    (!same_path(file, &target)).then(|| self.command_line(file, &target))
                })
                .collect()),
        }
    }

    #[instrument(skip(self), fields(input = ?self.input, output = ?self.output))]
    pub fn run(&self) -> Result<RunReport> {
        match self.resolve()? {
            InputKind::File => {
                let invocation = self.run_file(&self.input, &self.output)?;
                Ok(RunReport::File(FileReport {
                    input:   self.input.clone(),
                    output:  self.output.clone(),
                    outcome: invocation.into(),
                }))
            },
            InputKind::Directory => self.run_batch().map(RunReport::Batch),
        }
    }

    /// Runs one file and waits for it. A non-zero exit is an error.
    pub fn run_file(&self, input: &Path, output: &Path) -> Result<Invocation> {
        let line = self.command_line(input, output);
        info!("Running: {}", line);

        let mut cmd = line.to_command();
        // ffmpeg reads its overwrite prompt answer from stdin; EOF means "no".
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::piped());

        let out = cmd.output().map_err(|source| Error::Spawn {
            program: self.program.display_name(),
            source,
        })?;

        if !out.status.success() {
            debug!("{} exited with {}", self.program.display_name(), out.status);
            return Err(Error::ProcessFailed {
                command:     line.to_string(),
                exit_status: out.status,
                stderr:      out.stderr.into(),
            });
        }

        let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
        if !stderr.trim().is_empty() {
            debug!("stderr of {:?}:\n{}", input, stderr.trim_end());
        }
        info!("Finished {:?}", output);

        Ok(Invocation {
            command: line.to_string(),
            exit_code: out.status.code(),
            stderr,
        })
    }

    /// Files a directory run would process, sorted by name.
    pub fn batch_files(&self) -> Result<Vec<PathBuf>> {
        Ok(read_in_dir(&self.input, &self.extensions)?)
    }

    /// Runs every matching file of the input directory, one at a time.
    ///
    /// Failures of individual files are logged and recorded; only failing to
    /// list the directory or to create the output directory aborts the batch.
    pub fn run_batch(&self) -> Result<BatchReport> {
        let files = self.batch_files()?;
        let total = files.len();
        info!("{} files found in {:?}", total, self.input);

        if total > 0 {
            fs::create_dir_all(&self.output)?;
        }

        let mut report = BatchReport::default();
        for (i, file) in files.into_iter().enumerate() {
            let Some(name) = file.file_name() else {
                continue;
            };
            let target = self.output.join(name);
            info!("[{}/{}] {:?}", i + 1, total, name);

            let outcome = if same_path(&file, &target) {
                warn!("Skipping {:?}: output would overwrite the source", file);
                Outcome::Skipped {
                    reason: "output path is the input file".into(),
                }
            } else {
                match self.run_file(&file, &target) {
                    Ok(invocation) => invocation.into(),
                    Err(e) => {
                        error!("Failed to convert {:?}: {}", name, e);
                        Outcome::Failed {
                            error: e.to_string(),
                        }
                    },
                }
            };

            report.files.push(FileReport {
                input: file,
                output: target,
                outcome,
            });
        }

        info!(
            "Batch done: {} succeeded, {} skipped, {} failed",
            report.succeeded(),
            report.skipped(),
            report.failed()
        );
        Ok(report)
    }
}

fn same_path(a: &Path, b: &Path) -> bool {
    match (PathAbs::new(a), PathAbs::new(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests;

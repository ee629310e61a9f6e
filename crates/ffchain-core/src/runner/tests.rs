use std::fs::{self, File};

use quickcheck_macros::quickcheck;

use super::*;
use crate::report::Outcome;

/// Stands in for ffmpeg: creates its last argument, or fails when any
/// argument mentions "bad".
const FAKE_FFMPEG: &str = r#"
for arg; do last="$arg"; done
case "$*" in *bad*) echo "simulated failure" >&2; exit 1;; esac
: > "$last"
"#;

fn fake_ffmpeg() -> Program {
    Program::new("sh").with_args(["-c", FAKE_FFMPEG, "fake-ffmpeg"])
}

fn runner(input: &Path, output: &Path) -> Runner {
    let mut runner = Runner::new(input, output);
    runner.set_program(fake_ffmpeg());
    runner
}

#[quickcheck]
fn buckets_linearize_in_fixed_order(
    global: Vec<String>,
    input_opts: Vec<String>,
    output_opts: Vec<String>,
) -> bool {
    let mut runner = Runner::new("in.mp4", "out.mp4");
    // Output first so that call order cannot leak into token order.
    runner.extend(Phase::Output, output_opts.clone());
    runner.extend(Phase::Input, input_opts.clone());
    runner.extend(Phase::Global, global.clone());

    let mut expected: Vec<String> = global;
    expected.extend(input_opts);
    expected.push("-i".into());
    expected.push("in.mp4".into());
    expected.extend(output_opts);
    expected.push("out.mp4".into());

    let line = runner.command_line(runner.input(), runner.output());
    let args: Vec<String> = line
        .args()
        .into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    args == expected
}

#[test]
fn missing_input_is_path_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.mp4");
    let err = runner(&missing, &dir.path().join("out.mp4")).run().unwrap_err();
    assert!(matches!(err, Error::PathNotFound(p) if p == missing));
}

#[cfg(unix)]
#[test]
fn unreadable_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("clip.mp4");
    File::create(&file).unwrap();

    // A path below a regular file fails with ENOTDIR, not ENOENT.
    let err = runner(&file.join("inner.mp4"), dir.path()).resolve().unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() != io::ErrorKind::NotFound), "{err:?}");
}

#[cfg(unix)]
#[test]
fn device_input_is_invalid_kind() {
    let err = runner(Path::new("/dev/null"), Path::new("/tmp/out.mp4")).run().unwrap_err();
    assert!(matches!(err, Error::InvalidInputKind(_)));
}

#[test]
fn resolve_classifies_files_and_directories() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("a.mp4");
    File::create(&file).unwrap();

    assert_eq!(runner(&file, dir.path()).resolve().unwrap(), InputKind::File);
    assert_eq!(runner(dir.path(), dir.path()).resolve().unwrap(), InputKind::Directory);
}

#[cfg(unix)]
#[test]
fn single_file_success() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    let output = dir.path().join("clip.out.mp4");
    File::create(&input).unwrap();

    let report = runner(&input, &output).run().unwrap();
    assert!(report.is_success());
    match report {
        RunReport::File(file) => {
            assert_eq!(file.output, output);
            assert!(matches!(file.outcome, Outcome::Succeeded { exit_code: Some(0), .. }));
        },
        RunReport::Batch(_) => panic!("expected a single-file report"),
    }
    assert!(output.exists());
}

#[cfg(unix)]
#[test]
fn single_file_failure_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.mp4");
    File::create(&input).unwrap();

    let err = runner(&input, &dir.path().join("out.mp4")).run().unwrap_err();
    match err {
        Error::ProcessFailed {
            exit_status,
            stderr,
            command,
        } => {
            assert_eq!(exit_status.code(), Some(1));
            assert!(stderr.to_string().contains("simulated failure"));
            assert!(command.contains("bad.mp4"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_program_is_spawn_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("clip.mp4");
    File::create(&input).unwrap();

    let mut runner = Runner::new(&input, dir.path().join("out.mp4"));
    runner.set_program(Program::new("ffchain-no-such-ffmpeg"));
    assert!(matches!(runner.run(), Err(Error::Spawn { .. })));
}

#[cfg(unix)]
#[test]
fn batch_isolates_failures() {
    let src = tempfile::tempdir().unwrap();
    let out = src.path().join("converted");
    for name in ["a.mp4", "bad.mkv", "c.MOV", "notes.txt"] {
        File::create(src.path().join(name)).unwrap();
    }

    let report = runner(src.path(), &out).run().unwrap();
    assert!(!report.is_success());
    let RunReport::Batch(batch) = report else {
        panic!("expected a batch report");
    };

    let names: Vec<_> = batch
        .files
        .iter()
        .map(|f| f.input.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.mp4", "bad.mkv", "c.MOV"]);
    assert!(batch.files[0].succeeded());
    assert!(batch.files[1].failed());
    assert!(batch.files[2].succeeded());
    assert_eq!((batch.succeeded(), batch.skipped(), batch.failed()), (2, 0, 1));

    assert!(out.join("a.mp4").exists());
    assert!(out.join("c.MOV").exists());
    assert!(!out.join("bad.mkv").exists());
}

#[test]
fn empty_batch_creates_nothing() {
    let src = tempfile::tempdir().unwrap();
    File::create(src.path().join("readme.txt")).unwrap();
    let out = src.path().join("converted");

    let report = runner(src.path(), &out).run().unwrap();
    assert_eq!(report, RunReport::Batch(BatchReport::default()));
    assert!(!out.exists());
}

#[cfg(unix)]
#[test]
fn batch_skips_files_that_would_overwrite_themselves() {
    let src = tempfile::tempdir().unwrap();
    File::create(src.path().join("a.mp4")).unwrap();
    fs::write(src.path().join("b.webm"), b"original").unwrap();

    let RunReport::Batch(batch) = runner(src.path(), src.path()).run().unwrap() else {
        panic!("expected a batch report");
    };
    assert_eq!(batch.skipped(), 2);
    assert_eq!(fs::read(src.path().join("b.webm")).unwrap(), b"original");
}

#[test]
fn custom_extensions() {
    let src = tempfile::tempdir().unwrap();
    File::create(src.path().join("a.mp4")).unwrap();
    File::create(src.path().join("b.ts")).unwrap();

    let mut runner = runner(src.path(), src.path());
    runner.set_extensions(["ts"]);
    let RunReport::Batch(batch) = runner.run().unwrap() else {
        panic!("expected a batch report");
    };
    assert_eq!(batch.files.len(), 1);
    assert!(batch.files[0].input.ends_with("b.ts"));
}

#[test]
fn plan_lists_batch_commands_without_running() {
    let src = tempfile::tempdir().unwrap();
    let out = src.path().join("converted");
    File::create(src.path().join("b.avi")).unwrap();
    File::create(src.path().join("a.webm")).unwrap();

    let plan = runner(src.path(), &out).plan().unwrap();
    let outputs: Vec<_> = plan.iter().map(|line| line.output().to_path_buf()).collect();
    assert_eq!(outputs, [out.join("a.webm"), out.join("b.avi")]);
    assert!(!out.exists());
}

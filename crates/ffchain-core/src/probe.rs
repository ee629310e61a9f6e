use std::{path::Path, process::Stdio};

use tracing::{debug, error};

use crate::command::Program;

/// Stream fields tried in order; the first usable one wins.
const RATE_KEYS: [&str; 2] = ["avg_frame_rate", "r_frame_rate"];

/// Measures the frame rate of the first video stream of `path` with ffprobe.
///
/// Returns `None` when ffprobe cannot be run or reports no usable rate.
pub fn frame_rate(program: &Program, path: &Path) -> Option<f64> {
    for (i, key) in RATE_KEYS.iter().enumerate() {
        let last = i + 1 == RATE_KEYS.len();

        let mut cmd = program.command();
        cmd.args(["-v", "error", "-select_streams", "v:0", "-show_entries"])
            .arg(format!("stream={key}"))
            .args(["-of", "default=noprint_wrappers=1:nokey=1"])
            .arg(path)
            .stdin(Stdio::null());

        let out = match cmd.output() {
            Ok(out) if out.status.success() => out,
            Ok(out) => {
                if last {
                    error!(
                        "{} failed on {:?}: {}",
                        program.display_name(),
                        path,
                        String::from_utf8_lossy(&out.stderr).trim()
                    );
                }
                continue;
            },
            Err(e) => {
                if last {
                    error!("Failed to run {}: {}", program.display_name(), e);
                }
                continue;
            },
        };

        let stdout = String::from_utf8_lossy(&out.stdout);
        let first = stdout.lines().next().unwrap_or_default();
        if let Some(fps) = parse_rate(first) {
            debug!("{:?}: {} = {} ({})", path, key, first.trim(), fps);
            return Some(fps);
        }
        if last {
            error!("No usable frame rate for {:?} (got {:?})", path, first.trim());
        }
    }
    None
}

/// Parses an ffprobe rate such as `30000/1001` or `25`.
///
/// `0/0`, a zero denominator, empty and non-positive values yield `None`.
pub fn parse_rate(s: &str) -> Option<f64> {
    let s = s.trim();
    let rate = match s.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.trim().parse().ok()?;
            let den: f64 = den.trim().parse().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        },
        None => s.parse().ok()?,
    };
    (rate.is_finite() && rate > 0.0).then_some(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractions_and_plain_numbers() {
        let ntsc = parse_rate("30000/1001").unwrap();
        assert!((ntsc - 29.97).abs() < 0.001);
        assert_eq!(parse_rate("25"), Some(25.0));
        assert_eq!(parse_rate(" 24/1\n"), Some(24.0));
    }

    #[test]
    fn unusable_rates_are_none() {
        for s in ["0/0", "", "25/0", "N/A", "-25"] {
            assert_eq!(parse_rate(s), None, "{s:?}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_second_key() {
        // avg_frame_rate is unknown, r_frame_rate is not.
        let script = r#"case "$*" in *avg_frame_rate*) echo "0/0";; *) echo "24000/1001";; esac"#;
        let program = Program::new("sh").with_args(["-c", script, "fake-ffprobe"]);

        let fps = frame_rate(&program, Path::new("clip.mp4")).unwrap();
        assert!((fps - 23.976).abs() < 0.001);
    }

    #[test]
    fn missing_program_is_none() {
        let program = Program::new("ffchain-no-such-ffprobe");
        assert_eq!(frame_rate(&program, Path::new("clip.mp4")), None);
    }
}

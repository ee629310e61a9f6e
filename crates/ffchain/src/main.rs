use std::{
    ffi::OsString,
    fs::File,
    io::BufWriter,
    panic,
    path::{Path, PathBuf},
    process,
};

use anyhow::{anyhow, bail, ensure, Context};
use clap::{ArgAction, Parser};
use ffchain_core::{
    probe,
    AudioOutputOptions,
    Builder,
    GlobalOptions,
    Program,
    RawValue,
    RunReport,
    Timestamp,
    Validation,
    VideoInputOptions,
    VideoOutputOptions,
};
use ffchain_logging::init_logging;
use tracing::{info, instrument, level_filters::LevelFilter, warn};

fn main() -> anyhow::Result<()> {
    let orig_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        orig_hook(panic_info);
        process::exit(1);
    }));
    run()
}

/// Build and run ffmpeg commands from validated options
///
/// The input may be a single file or a directory; in the latter case every
/// video in it is converted into the output directory, and a failing file
/// does not stop the others.
#[derive(Parser, Debug)]
#[clap(name = "ffchain", version)]
pub struct CliOpts {
    /// Input file, or a directory of videos
    #[clap(short, long)]
    pub input: PathBuf,

    /// Output file, or output directory when the input is a directory
    #[clap(short, long)]
    pub output: PathBuf,

    /// ffmpeg executable
    #[clap(long, env = "FFCHAIN_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: OsString,

    /// ffprobe executable, used by --auto-fps
    #[clap(long, env = "FFCHAIN_FFPROBE", default_value = "ffprobe")]
    pub ffprobe: OsString,

    /// Overwrite output files without asking
    #[clap(short = 'y', help_heading = "Global")]
    pub overwrite: bool,

    /// Never overwrite output files
    #[clap(short = 'n', conflicts_with = "overwrite", help_heading = "Global")]
    pub never_overwrite: bool,

    /// Suppress ffmpeg's banner
    #[clap(long, help_heading = "Global")]
    pub hide_banner: bool,

    /// ffmpeg log level (quiet, panic, fatal, error, warning, info, verbose,
    /// debug, trace)
    #[clap(long, help_heading = "Global")]
    pub loglevel: Option<String>,

    /// Print encoding progress
    #[clap(long, help_heading = "Global")]
    pub stats: bool,

    /// Do not print encoding progress
    #[clap(long, conflicts_with = "stats", help_heading = "Global")]
    pub no_stats: bool,

    /// Seek to this position in the input, as seconds or HH:MM:SS[.mmm]
    #[clap(long = "ss", value_parser = parse_time, help_heading = "Input")]
    pub start_time: Option<TimeArg>,

    /// Read at most this much of the input
    #[clap(long, value_parser = parse_time, help_heading = "Input")]
    pub input_duration: Option<TimeArg>,

    /// Force the input container format
    #[clap(long, help_heading = "Input")]
    pub input_format: Option<String>,

    /// Loop the input this many extra times (-1 loops forever)
    #[clap(long, allow_hyphen_values = true, help_heading = "Input")]
    pub stream_loop: Option<i64>,

    /// Output container format
    #[clap(long, help_heading = "Video")]
    pub format: Option<String>,

    /// Video codec, e.g. libx265
    #[clap(long, help_heading = "Video")]
    pub video_codec: Option<String>,

    /// Constant rate factor, 0 to 51
    #[clap(long, help_heading = "Video")]
    pub crf: Option<i64>,

    /// Encoder preset
    #[clap(long, help_heading = "Video")]
    pub preset: Option<String>,

    /// Encoder tuning
    #[clap(long, help_heading = "Video")]
    pub tune: Option<String>,

    /// Output frame rate
    #[clap(long, help_heading = "Video")]
    pub fps: Option<f64>,

    /// Pick the output frame rate from the source: 29.97 for 29.97 and
    /// 59.94 fps sources, 24 otherwise
    ///
    /// Requires a single input file and ffprobe.
    #[clap(long, conflicts_with = "fps", help_heading = "Video")]
    pub auto_fps: bool,

    /// Frame size, WIDTHxHEIGHT or an alias such as hd720
    #[clap(long, help_heading = "Video")]
    pub size: Option<String>,

    /// Pixel format
    #[clap(long, help_heading = "Video")]
    pub pix_fmt: Option<String>,

    /// Video bitrate, e.g. 2500k or 2.5m
    #[clap(long, help_heading = "Video")]
    pub video_bitrate: Option<String>,

    /// MP4/MOV muxer flags, e.g. faststart
    #[clap(long, help_heading = "Video")]
    pub movflags: Option<String>,

    /// Private x265 parameters, e.g. log-level=error
    #[clap(long, allow_hyphen_values = true, help_heading = "Video")]
    pub x265_params: Option<String>,

    /// Limit the output duration
    #[clap(short = 't', long, value_parser = parse_time, help_heading = "Video")]
    pub duration: Option<TimeArg>,

    /// Container metadata, may be repeated
    #[clap(long, value_name = "KEY=VALUE", value_parser = parse_key_val, help_heading = "Video")]
    pub metadata: Vec<(String, String)>,

    /// Audio codec, e.g. aac
    #[clap(long, help_heading = "Audio")]
    pub audio_codec: Option<String>,

    /// Audio bitrate, e.g. 64k
    #[clap(long, help_heading = "Audio")]
    pub audio_bitrate: Option<String>,

    /// Audio sample rate, e.g. 48000 or 44.1k
    #[clap(long, help_heading = "Audio")]
    pub sample_rate: Option<String>,

    /// Number of audio channels
    #[clap(long, help_heading = "Audio")]
    pub channels: Option<i64>,

    /// Drop invalid option values with a warning instead of failing
    #[clap(long, help_heading = "Run")]
    pub lenient: bool,

    /// Print the commands without running them
    #[clap(long, help_heading = "Run")]
    pub dry_run: bool,

    /// Write a JSON report of the run to this file
    #[clap(long, help_heading = "Run")]
    pub report: Option<PathBuf>,

    /// Also write logs to this file
    #[clap(long, help_heading = "Run")]
    pub log_file: Option<PathBuf>,

    /// More logging, repeat for even more
    #[clap(short, long, action = ArgAction::Count, help_heading = "Run")]
    pub verbose: u8,

    /// Only log errors
    #[clap(short, long, conflicts_with = "verbose", help_heading = "Run")]
    pub quiet: bool,
}

/// A time given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeArg {
    Seconds(f64),
    Clock(Timestamp),
}

impl From<TimeArg> for RawValue {
    fn from(t: TimeArg) -> Self {
        match t {
            TimeArg::Seconds(s) => Self::Float(s),
            TimeArg::Clock(ts) => Self::Time(ts),
        }
    }
}

/// Parses `90`, `1.5`, `01:30` or `00:01:30.500`.
fn parse_time(s: &str) -> Result<TimeArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    let number = |p: &str| -> Result<f64, String> {
        p.trim()
            .parse::<f64>()
            .map_err(|_| format!("{s:?} is not seconds or HH:MM:SS[.mmm]"))
    };
    let whole = |p: &str| -> Result<i64, String> {
        p.trim()
            .parse::<i64>()
            .map_err(|_| format!("{s:?} is not seconds or HH:MM:SS[.mmm]"))
    };

    let (hours, minutes, secs) = match parts.as_slice() {
        [secs] => return Ok(TimeArg::Seconds(number(secs)?)),
        [m, secs] => (0, whole(m)?, *secs),
        [h, m, secs] => (whole(h)?, whole(m)?, *secs),
        _ => return Err(format!("{s:?} is not seconds or HH:MM:SS[.mmm]")),
    };
    let secs = Timestamp::from_secs_f64(number(secs)?)
        .ok_or_else(|| format!("{s:?} has an out of range seconds field"))?;
    Ok(TimeArg::Clock(Timestamp {
        hours,
        minutes,
        ..secs
    }))
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {s:?}"))?;
    Ok((key.trim().to_owned(), value.to_owned()))
}

/// Frame rate to encode at, given the source rate.
fn target_fps(source: f64) -> f64 {
    let rounded = (source * 1000.0).round() / 1000.0;
    if [59.94, 29.97].contains(&rounded) {
        29.97
    } else {
        24.0
    }
}

/// Sets each attribute whose command-line value is present.
macro_rules! set_present {
    ($group:expr, $( $flag:literal => $setter:ident($value:expr) ),+ $(,)?) => {
        $(
            if let Some(value) = $value {
                $group
                    .$setter(value)
                    .with_context(|| format!("invalid value for {}", $flag))?;
            }
        )+
    };
}

pub struct Groups {
    pub global:       GlobalOptions,
    pub input:        VideoInputOptions,
    pub video_output: VideoOutputOptions,
    pub audio_output: AudioOutputOptions,
}

pub fn build_groups(args: &CliOpts) -> anyhow::Result<Groups> {
    let validation = if args.lenient {
        Validation::Lenient
    } else {
        Validation::Strict
    };

    let mut global = GlobalOptions::default().with_validation(validation);
    let overwrite = match (args.overwrite, args.never_overwrite) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let stats = match (args.stats, args.no_stats) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    set_present!(global,
        "-y/-n" => set_overwrite(overwrite),
        "--hide-banner" => set_hide_banner(args.hide_banner.then_some(true)),
        "--loglevel" => set_loglevel(args.loglevel.clone()),
        "--stats/--no-stats" => set_stats(stats),
    );

    let mut input = VideoInputOptions::default().with_validation(validation);
    set_present!(input,
        "--input-format" => set_format(args.input_format.clone()),
        "--ss" => set_start_time(args.start_time),
        "--input-duration" => set_duration(args.input_duration),
        "--stream-loop" => set_stream_loop(args.stream_loop),
    );

    let mut video_output = VideoOutputOptions::default().with_validation(validation);
    set_present!(video_output,
        "--format" => set_format(args.format.clone()),
        "--video-codec" => set_codec(args.video_codec.clone()),
        "--video-bitrate" => set_bitrate(args.video_bitrate.clone()),
        "--fps" => set_fps(args.fps),
        "--size" => set_size(args.size.clone()),
        "--pix-fmt" => set_pixel_format(args.pix_fmt.clone()),
        "--duration" => set_duration(args.duration),
        "--preset" => set_preset(args.preset.clone()),
        "--crf" => set_crf(args.crf),
        "--metadata" => set_metadata((!args.metadata.is_empty()).then(|| args.metadata.clone())),
        "--movflags" => set_movflags(args.movflags.clone()),
        "--tune" => set_tune(args.tune.clone()),
        "--x265-params" => set_x265_params(args.x265_params.clone()),
    );

    let mut audio_output = AudioOutputOptions::default().with_validation(validation);
    set_present!(audio_output,
        "--audio-codec" => set_codec(args.audio_codec.clone()),
        "--audio-bitrate" => set_bitrate(args.audio_bitrate.clone()),
        "--sample-rate" => set_sample_rate(args.sample_rate.clone()),
        "--channels" => set_channels(args.channels),
    );

    Ok(Groups {
        global,
        input,
        video_output,
        audio_output,
    })
}

fn write_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create report {path:?}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .with_context(|| format!("Failed to write report {path:?}"))?;
    info!("Report written to {:?}", path);
    Ok(())
}

#[instrument(skip_all)]
pub fn run() -> anyhow::Result<()> {
    let args = CliOpts::parse();

    let level = match (args.quiet, args.verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    let _guard = init_logging(level, args.log_file.as_deref())
        .context("Failed to initialize logging")?;

    let mut groups = build_groups(&args)?;

    if args.auto_fps {
        ensure!(
            args.input.is_file(),
            "--auto-fps needs a single input file, {:?} is not one",
            args.input
        );
        let ffprobe = Program::new(args.ffprobe.clone());
        let Some(source) = probe::frame_rate(&ffprobe, &args.input) else {
            bail!("Could not detect the frame rate of {:?}", args.input);
        };
        let target = target_fps(source);
        info!("FPS: {:.3} -> {}", source, target);
        groups
            .video_output
            .set_fps(target)
            .context("invalid auto-detected frame rate")?;
    }

    let program = Program::new(args.ffmpeg.clone());
    let builder = Builder::new(&args.input, &args.output)
        .program(program.clone())
        .with_global_options(&groups.global)
        .with_input_options(&groups.input)
        .with_output_options(&groups.video_output)
        .with_output_options(&groups.audio_output);

    if args.dry_run {
        for line in builder.runner().plan()? {
            println!("{line}");
        }
        return Ok(());
    }

    ensure!(
        program.is_available(),
        "{:?} was not found. Install ffmpeg or point --ffmpeg / FFCHAIN_FFMPEG at it",
        program.path()
    );

    let report = builder
        .run()
        .with_context(|| format!("Failed to convert {:?}", args.input))?;

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }

    match &report {
        RunReport::Batch(batch) if batch.failed() > 0 => {
            Err(anyhow!("{} of {} files failed", batch.failed(), batch.files.len()))
        },
        RunReport::Batch(batch) => {
            if batch.skipped() > 0 {
                warn!("{} files were skipped", batch.skipped());
            }
            Ok(())
        },
        RunReport::File(_) => Ok(()),
    }
}

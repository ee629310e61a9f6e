use quickcheck_macros::quickcheck;

use super::*;
use crate::{error::Error, field::Validation, value::Timestamp};

#[test]
fn empty_groups_render_nothing() {
    assert!(GlobalOptions::new().command_args().is_empty());
    assert!(VideoOutputOptions::new().command_args().is_empty());
    assert!(AudioInputOptions::new().command_args().is_empty());
    assert!(ImageOutputOptions::new().command_args().is_empty());
}

#[test]
fn global_flags() {
    let opts = GlobalOptions::new()
        .with_overwrite(true)
        .unwrap()
        .with_hide_banner(true)
        .unwrap()
        .with_loglevel("error")
        .unwrap()
        .with_stats(false)
        .unwrap();
    assert_eq!(
        opts.command_args(),
        ["-y", "-hide_banner", "-loglevel", "error", "-nostats"]
    );

    let opts = GlobalOptions::new()
        .with_overwrite(false)
        .unwrap()
        .with_hide_banner(false)
        .unwrap()
        .with_stats(true)
        .unwrap();
    assert_eq!(opts.command_args(), ["-n", "-stats"]);
}

#[test]
fn tokens_follow_declaration_order() {
    // Set in reverse; rendered in declaration order.
    let mut opts = VideoOutputOptions::new();
    opts.set_crf(28)
        .unwrap()
        .set_preset("slow")
        .unwrap()
        .set_fps(29.97)
        .unwrap()
        .set_codec("libx265")
        .unwrap();

    assert_eq!(
        opts.command_args(),
        ["-c:v", "libx265", "-r", "29.97", "-preset", "slow", "-crf", "28"]
    );
}

#[test]
fn video_output_full_render() {
    let opts = VideoOutputOptions::new()
        .with_format("mp4")
        .unwrap()
        .with_codec("libx264")
        .unwrap()
        .with_audio_codec("copy")
        .unwrap()
        .with_bitrate("2.5m")
        .unwrap()
        .with_size("HD720")
        .unwrap()
        .with_pixel_format("yuv420p")
        .unwrap()
        .with_duration(Timestamp::new(0, 0, 30, 0))
        .unwrap()
        .with_metadata([("title", "Demo")])
        .unwrap()
        .with_movflags("faststart")
        .unwrap()
        .with_tune("film")
        .unwrap();

    assert_eq!(
        opts.command_args(),
        [
            "-f", "mp4", "-c:v", "libx264", "-c:a", "copy", "-b:v", "2500000", "-s", "hd720",
            "-pix_fmt", "yuv420p", "-t", "00:00:30.000", "-metadata", "title=Demo", "-movflags",
            "faststart", "-tune", "film",
        ]
    );
}

#[test]
fn audio_groups() {
    let input = AudioInputOptions::new()
        .with_start_time(5)
        .unwrap()
        .with_sample_rate("44.1k")
        .unwrap()
        .with_channels(2)
        .unwrap();
    assert_eq!(input.command_args(), ["-ss", "5.000", "-ac", "2", "-ar", "44100"]);
    assert_eq!(input.sample_rate(), Some(&44100));

    let output = AudioOutputOptions::new()
        .with_codec("aac")
        .unwrap()
        .with_bitrate("128k")
        .unwrap();
    assert_eq!(output.command_args(), ["-c:a", "aac", "-b:a", "128000"]);
}

#[test]
fn image_groups() {
    let input = ImageInputOptions::new()
        .with_image_loop(1)
        .unwrap()
        .with_framerate(1)
        .unwrap();
    assert_eq!(input.command_args(), ["-loop", "1", "-framerate", "1"]);
    let mut looped = input.clone();
    assert!(matches!(
        looped.set_image_loop(2),
        Err(Error::RangeViolation { .. })
    ));
    assert_eq!(looped.image_loop(), Some(&1));

    let output = ImageOutputOptions::new()
        .with_codec("png")
        .unwrap()
        .with_frames(1)
        .unwrap();
    assert_eq!(output.command_args(), ["-c:v", "png", "-frames:v", "1"]);
}

#[test]
fn setting_twice_is_idempotent() {
    let mut opts = VideoOutputOptions::new();
    opts.set_crf(23).unwrap();
    let once = opts.command_args();
    opts.set_crf(23).unwrap();
    assert_eq!(opts.command_args(), once);
}

#[test]
fn clear_removes_tokens() {
    let mut opts = VideoOutputOptions::new()
        .with_codec("libx265")
        .unwrap()
        .with_crf(28)
        .unwrap();
    opts.clear_crf();
    assert_eq!(opts.crf(), None);
    assert_eq!(opts.command_args(), ["-c:v", "libx265"]);
}

#[test]
fn strict_choice_rejection_leaves_unset() {
    let mut opts = VideoOutputOptions::new();
    let err = opts.set_codec("notacodec").unwrap_err();
    assert!(matches!(err, Error::InvalidChoice { .. }));
    assert_eq!(opts.codec(), None);
    assert!(opts.command_args().is_empty());
}

#[test]
fn lenient_groups_drop_invalid_values() {
    let opts = VideoOutputOptions::lenient()
        .with_codec("libx265")
        .unwrap()
        .with_preset("ludicrous")
        .unwrap()
        .with_crf(99)
        .unwrap();
    assert_eq!(opts.validation(), Validation::Lenient);
    assert_eq!(opts.preset(), None);
    assert_eq!(opts.crf(), None);
    assert_eq!(opts.command_args(), ["-c:v", "libx265"]);
}

#[test]
fn lenient_invalid_value_unsets_previous() {
    let mut opts = AudioOutputOptions::lenient();
    opts.set_bitrate("128k").unwrap();
    opts.set_bitrate("lots").unwrap();
    assert_eq!(opts.bitrate(), None);
}

#[test]
fn metadata_skips_empty_sides() {
    let opts = AudioOutputOptions::new()
        .with_metadata(vec![("artist", "Someone"), ("album", ""), ("", "x")])
        .unwrap();
    assert_eq!(opts.command_args(), ["-metadata", "artist=Someone"]);
}

#[test]
fn group_identity() {
    let video = VideoOutputOptions::new();
    assert_eq!(video.name(), "VideoOutputOptions");
    assert_eq!(video.phase(), Phase::Output);
    assert_eq!(video.media(), Some(MediaKind::Video));

    let global = GlobalOptions::new();
    assert_eq!(global.phase(), Phase::Global);
    assert_eq!(global.media(), None);

    assert_eq!(ImageInputOptions::new().phase(), Phase::Input);
    assert_eq!(ImageInputOptions::new().media(), Some(MediaKind::Image));
    assert_eq!(AudioOutputOptions::new().media(), Some(MediaKind::Audio));
    assert_eq!(Phase::Output.to_string(), "output");
}

#[quickcheck]
fn crf_setter_matches_bounds(crf: i64) -> bool {
    let mut opts = VideoOutputOptions::new();
    let ok = opts.set_crf(crf).is_ok();
    ok == (0..=51).contains(&crf) && opts.crf().is_some() == ok
}

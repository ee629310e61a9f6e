use super::{option_group, InputGroup, OutputGroup, MIN_FRAME_RATE};
use crate::{
    constants::{
        AUDIO_CODECS, FRAME_SIZE_ALIASES, MOVFLAGS, PRESETS, TUNES, VIDEO_CODECS, VIDEO_FORMATS,
        VIDEO_PIXEL_FORMATS,
    },
    descriptor::{Bitrate, Choice, Float, Int, Metadata, Text, Time, VideoSize},
};

option_group! {
    /// Options for reading a video source.
    pub struct VideoInputOptions(Input, Video) {
        format: Choice = Choice::new("-f", VIDEO_FORMATS),
        codec: Choice = Choice::new("-c:v", VIDEO_CODECS),
        start_time: Time = Time::new("-ss"),
        duration: Time = Time::new("-t"),
        fps: Float = Float::new("-r").min(MIN_FRAME_RATE),
        size: VideoSize = VideoSize::new("-s", FRAME_SIZE_ALIASES),
        pixel_format: Choice = Choice::new("-pix_fmt", VIDEO_PIXEL_FORMATS),
        stream_loop: Int = Int::new("-stream_loop").min(-1),
    }
}

impl InputGroup for VideoInputOptions {}

option_group! {
    /// Options for encoding a video output.
    ///
    /// `audio_codec` lives here as well so that a single group can describe
    /// a typical "re-encode video, copy audio" job.
    pub struct VideoOutputOptions(Output, Video) {
        format: Choice = Choice::new("-f", VIDEO_FORMATS),
        codec: Choice = Choice::new("-c:v", VIDEO_CODECS),
        audio_codec: Choice = Choice::new("-c:a", AUDIO_CODECS),
        bitrate: Bitrate = Bitrate::new("-b:v"),
        fps: Float = Float::new("-r").min(MIN_FRAME_RATE),
        size: VideoSize = VideoSize::new("-s", FRAME_SIZE_ALIASES),
        pixel_format: Choice = Choice::new("-pix_fmt", VIDEO_PIXEL_FORMATS),
        qscale: Float = Float::new("-qscale:v").min(0.0),
        duration: Time = Time::new("-t"),
        preset: Choice = Choice::new("-preset", PRESETS),
        /// Constant rate factor, 0 (lossless) to 51.
        crf: Int = Int::new("-crf").min(0).max(51),
        metadata: Metadata = Metadata::new("-metadata"),
        movflags: Choice = Choice::new("-movflags", MOVFLAGS),
        tune: Choice = Choice::new("-tune", TUNES),
        /// Private x265 parameters, e.g. `log-level=error`.
        x265_params: Text = Text::new("-x265-params"),
    }
}

impl OutputGroup for VideoOutputOptions {}

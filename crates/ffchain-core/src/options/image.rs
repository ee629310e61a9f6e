use super::{option_group, InputGroup, OutputGroup, MIN_FRAME_RATE};
use crate::{
    constants::{FRAME_SIZE_ALIASES, IMAGE_CODECS, IMAGE_FORMATS, IMAGE_PIXEL_FORMATS},
    descriptor::{Choice, Float, Int, Time, VideoSize},
};

option_group! {
    /// Options for reading still images or image sequences.
    pub struct ImageInputOptions(Input, Image) {
        format: Choice = Choice::new("-f", IMAGE_FORMATS),
        start_time: Time = Time::new("-ss"),
        /// `-loop`: 1 repeats the image forever, 0 reads it once.
        image_loop: Int = Int::new("-loop").min(-1).max(1),
        framerate: Float = Float::new("-framerate").min(MIN_FRAME_RATE),
    }
}

impl InputGroup for ImageInputOptions {}

option_group! {
    /// Options for writing still images or image sequences.
    pub struct ImageOutputOptions(Output, Image) {
        format: Choice = Choice::new("-f", IMAGE_FORMATS),
        codec: Choice = Choice::new("-c:v", IMAGE_CODECS),
        qscale: Float = Float::new("-qscale:v").min(0.0),
        /// Number of frames to write.
        frames: Int = Int::new("-frames:v").min(1),
        framerate: Float = Float::new("-r").min(MIN_FRAME_RATE),
        size: VideoSize = VideoSize::new("-s", FRAME_SIZE_ALIASES),
        pixel_format: Choice = Choice::new("-pix_fmt", IMAGE_PIXEL_FORMATS),
        compression_level: Int = Int::new("-compression_level").min(0).max(100),
        crf: Int = Int::new("-crf").min(0).max(51),
    }
}

impl OutputGroup for ImageOutputOptions {}

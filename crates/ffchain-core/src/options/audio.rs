use super::{option_group, InputGroup, OutputGroup};
use crate::{
    constants::{AUDIO_CODECS, AUDIO_FORMATS},
    descriptor::{Bitrate, Choice, Float, Int, Metadata, SampleRate, Time},
};

option_group! {
    pub struct AudioInputOptions(Input, Audio) {
        format: Choice = Choice::new("-f", AUDIO_FORMATS),
        codec: Choice = Choice::new("-c:a", AUDIO_CODECS),
        start_time: Time = Time::new("-ss"),
        duration: Time = Time::new("-t"),
        channels: Int = Int::new("-ac").min(1),
        sample_rate: SampleRate = SampleRate::new("-ar"),
        /// Number of extra input loops; -1 loops forever.
        stream_loop: Int = Int::new("-stream_loop").min(-1),
    }
}

impl InputGroup for AudioInputOptions {}

option_group! {
    pub struct AudioOutputOptions(Output, Audio) {
        format: Choice = Choice::new("-f", AUDIO_FORMATS),
        codec: Choice = Choice::new("-c:a", AUDIO_CODECS),
        bitrate: Bitrate = Bitrate::new("-b:a"),
        sample_rate: SampleRate = SampleRate::new("-ar"),
        channels: Int = Int::new("-ac").min(1),
        qscale: Float = Float::new("-qscale:a").min(0.0),
        duration: Time = Time::new("-t"),
        metadata: Metadata = Metadata::new("-metadata"),
    }
}

impl OutputGroup for AudioOutputOptions {}

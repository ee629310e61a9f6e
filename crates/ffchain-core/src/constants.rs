//! Allow-lists shared by every option group, one table per domain.

pub const LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

// Image

pub const IMAGE_FORMATS: &[&str] = &[
    "image2", "image2pipe", "png", "jpeg", "jpg", "gif", "bmp", "tiff", "webp", "avif", "heif",
    "v4l2", "dshow", "mjpeg",
];

pub const IMAGE_CODECS: &[&str] = &[
    "png", "mjpeg", "libwebp", "av1", "hevc", "libx264", "gif", "bmp", "tiff", "copy",
];

pub const IMAGE_PIXEL_FORMATS: &[&str] = &[
    "yuv420p", "yuv422p", "yuv444p", "rgb24", "bgr24", "rgba", "bgra", "gray", "monow", "monob",
    "yuyv422", "pal8",
];

// Audio

pub const AUDIO_FORMATS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "ogg", "m4a", "aiff", "s16le", "f32be", "pcm_s16le", "pcm_s24le",
    "pcm_f32le", "alsa", "pulse", "opus", "ac3", "eac3", "dts",
];

pub const AUDIO_CODECS: &[&str] = &[
    "mp3", "libmp3lame", "flac", "aac", "libfdk_aac", "opus", "libopus", "vorbis", "libvorbis",
    "s16le", "f32be", "pcm_s16le", "pcm_s24le", "pcm_f32le", "ac3", "eac3", "dts", "copy",
];

// Video

pub const VIDEO_FORMATS: &[&str] = &[
    "mp4", "avi", "mov", "mkv", "matroska", "m4v", "webm", "flv", "mpeg", "3gp", "ts", "ogv",
    "asf", "wmv", "rawvideo", "yuv4mpegpipe", "gif",
];

pub const VIDEO_CODECS: &[&str] = &[
    "libx264", "h264", "h264_nvenc", "libx265", "hevc", "hevc_nvenc", "vp9", "libvpx-vp9", "vp8",
    "libvpx", "av1", "libaom-av1", "mpeg4", "mpeg2video", "prores", "dnxhd", "ffv1", "rawvideo",
    "mjpeg", "gif", "copy",
];

pub const VIDEO_PIXEL_FORMATS: &[&str] = &[
    "yuv420p", "yuv422p", "yuv444p", "rgb24", "bgr24", "rgba", "bgra", "gray", "monow", "monob",
    "yuyv422", "nv12", "nv21", "p010le", "p010be",
];

/// Size abbreviations understood by ffmpeg's `-s` option.
pub const FRAME_SIZE_ALIASES: &[&str] = &[
    "sqcif", "qcif", "cif", "4cif", "16cif", "qqvga", "qvga", "vga", "svga", "xga", "uxga", "qxga",
    "sxga", "qsxga", "qzxga", "wsxga", "wuxga", "woxga", "wqsxga", "wquxga", "whsxfga", "hsxga",
    "cga", "ega", "hd480", "hd720", "hd1080", "uhd2160", "8k", "ntsc", "pal", "qntsc", "qpal",
    "sntsc", "spal", "film", "ntsc-film", "2k", "2kflat", "2kscope", "4k", "4kflat", "4kscope",
];

pub const PRESETS: &[&str] = &[
    "ultrafast", "superfast", "veryfast", "faster", "fast", "medium", "slow", "slower", "veryslow",
    "placebo",
];

pub const TUNES: &[&str] = &[
    "film", "animation", "grain", "stillimage", "fastdecode", "zerolatency", "psnr", "ssim",
];

pub const MOVFLAGS: &[&str] = &[
    "faststart", "frag_keyframe", "empty_moov", "default_base_moof", "dash", "frag_custom",
    "separate_moof", "frag_every_frame",
];

/// Container extensions picked up when the input is a directory.
pub const BATCH_EXTENSIONS: &[&str] = &["mp4", "mkv", "mov", "avi", "webm"];

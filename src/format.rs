use std::path::Path;
use strum_macros::Display;

/// Audio formats that loudgain has a scanning preset for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum AudioFormat {
    Flac,
    Ogg,
    Mp3,
    M4a,
    Opus,
    Wma,
    Wav,
    Aiff,
    Wv,
    Ape,
}

impl AudioFormat {
    /// Every format with a preset, in table order
    pub const ALL: [AudioFormat; 10] = [
        Self::Flac,
        Self::Ogg,
        Self::Mp3,
        Self::M4a,
        Self::Opus,
        Self::Wma,
        Self::Wav,
        Self::Aiff,
        Self::Wv,
        Self::Ape,
    ];

    /// The file extension this format is recognized by, including the leading dot
    #[inline]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Flac => ".flac",
            Self::Ogg => ".ogg",
            Self::Mp3 => ".mp3",
            Self::M4a => ".m4a",
            Self::Opus => ".opus",
            Self::Wma => ".wma",
            Self::Wav => ".wav",
            Self::Aiff => ".aiff",
            Self::Wv => ".wv",
            Self::Ape => ".ape",
        }
    }

    /// Command-line tokens passed to loudgain ahead of the file list.
    ///
    /// All presets write extended tags with album gain and clipping prevention;
    /// the extra flags pick the tag flavour each container supports.
    pub fn preset(self) -> &'static [&'static str] {
        match self {
            Self::Flac | Self::Ogg | Self::Opus => &["custom", "-a", "-k", "-s", "e"],
            Self::Mp3 => &["custom", "-I3", "-S", "-L", "-a", "-k", "-s", "e"],
            Self::M4a | Self::Wma => &["custom", "-L", "-a", "-k", "-s", "e"],
            Self::Wav | Self::Aiff => &["custom", "-I3", "-L", "-a", "-k", "-s", "e"],
            Self::Wv | Self::Ape => &["custom", "-S", "-a", "-k", "-s", "e"],
        }
    }

    /// Looks up the format for an extension string such as `".flac"`.
    ///
    /// Matching is exact: `".FLAC"` and `"flac"` are not recognized.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// Creates an AudioFormat from a file path based on its extension
    ///
    /// The extension is the part of the file name after its last dot, so a
    /// dotfile like `.flac` has none and is not an audio file.
    #[inline]
    pub fn from_path(value: impl AsRef<Path>) -> Option<Self> {
        let extension = value.as_ref().extension()?.to_str()?;
        Self::from_extension(&format!(".{extension}"))
    }
}

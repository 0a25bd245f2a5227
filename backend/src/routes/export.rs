use serde::{Deserialize, Serialize};

/// Image formats a renderer may be asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Svg,
    Png,
    Pdf,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
            ImageFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "image/svg+xml",
            ImageFormat::Png => "image/png",
            ImageFormat::Pdf => "application/pdf",
        }
    }

    /// Download filename, `plot.<ext>`.
    pub fn filename(&self) -> String {
        format!("plot.{}", self.extension())
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "pdf" => Ok(Self::Pdf),
            _ => Err(format!("Unknown image format: {}", s)),
        }
    }
}

/// A serialized chart ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub const ON_EXPORT: &str = "on_export";

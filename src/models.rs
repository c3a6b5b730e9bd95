use serde::{Deserialize, Serialize};

/// Inbound selection for `POST /api/wallpaper`. Fields default to empty so an
/// absent key is reported as a missing parameter rather than a serde error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WallpaperRequest {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub style: String,
}

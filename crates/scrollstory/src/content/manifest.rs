use serde::{Deserialize, Serialize};

use crate::api::types::{Rgba, SectionKind};

/// Everything the page renders, loaded once from JSON at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub site: SiteConfig,
    /// Reveal timings. Every field has a default.
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Ordered sections, top of the page first.
    pub sections: Vec<SectionDescriptor>,
}

/// Global site metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub audio: AudioConfig,
}

/// The single background track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Opaque path handed to the host's audio element.
    #[serde(default)]
    pub src: String,
    /// Target volume the fade-in ramps to.
    #[serde(default = "default_volume")]
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            src: String::new(),
            volume: default_volume(),
        }
    }
}

/// Reveal timings in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How long photos take to fade in.
    pub image_duration: f32,
    /// How long text takes to appear.
    pub text_duration: f32,
    /// Delay before text appears after the image.
    pub text_delay: f32,
    /// Parallax strength (0 = none, 1 = strong).
    pub parallax_strength: f32,
    /// Image scale while hidden (1 = no zoom).
    pub image_scale: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            image_duration: 1.2,
            text_duration: 0.8,
            text_delay: 0.4,
            parallax_strength: 0.1,
            image_scale: 1.02,
        }
    }
}

/// One full-viewport content unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionDescriptor {
    /// Unique across the page.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// May contain `\n` line breaks; each line reveals on its own stagger.
    pub text: String,
    #[serde(default, rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default, rename = "alt", skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(default, rename = "music", skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
    /// Hex colour that replaces the kind's background treatment.
    #[serde(
        default,
        rename = "bg_color",
        alias = "bgColor",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_override: Option<String>,
}

impl SectionDescriptor {
    /// Text split on line breaks.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Parsed override colour, `None` when absent or malformed.
    pub fn background_color(&self) -> Option<Rgba> {
        self.background_override.as_deref().and_then(Rgba::from_hex)
    }
}

fn default_true() -> bool {
    true
}

fn default_volume() -> f32 {
    0.5
}

use glam::Vec2;

use crate::api::types::{Rgba, SectionKind};

/// Page base tone.
pub const BASE: Rgba = Rgba::new(26, 24, 22, 1.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgba,
    /// Position along the gradient in [0, 1].
    pub at: f32,
}

impl ColorStop {
    pub const fn new(color: Rgba, at: f32) -> Self {
        Self { color, at }
    }
}

/// Background treatment of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Rgba),
    Radial {
        /// Ellipse radii in percent of the section size.
        radii_pct: Vec2,
        /// Centre in percent of the section size.
        center_pct: Vec2,
        stops: Vec<ColorStop>,
    },
    Linear {
        angle_deg: f32,
        stops: Vec<ColorStop>,
    },
}

impl Background {
    /// Pick the treatment for a section. An override colour wins.
    pub fn for_section(kind: SectionKind, index: usize, override_color: Option<Rgba>) -> Self {
        if let Some(color) = override_color {
            return Background::Solid(color);
        }
        match kind {
            SectionKind::Opening => Background::Radial {
                radii_pct: Vec2::new(80.0, 60.0),
                center_pct: Vec2::splat(50.0),
                stops: vec![
                    ColorStop::new(Rgba::new(50, 46, 41, 0.4), 0.0),
                    ColorStop::new(BASE, 1.0),
                ],
            },
            SectionKind::Closing => Background::Linear {
                angle_deg: 180.0,
                stops: vec![
                    ColorStop::new(BASE, 0.0),
                    ColorStop::new(Rgba::new(20, 18, 16, 1.0), 1.0),
                ],
            },
            SectionKind::Photo => {
                // Alternate warmth so consecutive photos don't read as one band.
                let warmth = if index % 2 == 0 {
                    Rgba::new(42, 39, 35, 0.3)
                } else {
                    Rgba::new(45, 46, 40, 0.3)
                };
                Background::Linear {
                    angle_deg: 180.0,
                    stops: vec![
                        ColorStop::new(BASE, 0.0),
                        ColorStop::new(warmth, 0.5),
                        ColorStop::new(BASE, 1.0),
                    ],
                }
            }
        }
    }

    /// Numeric tag for the frame buffer: 0 solid, 1 radial, 2 linear.
    pub fn code(&self) -> f32 {
        match self {
            Background::Solid(_) => 0.0,
            Background::Radial { .. } => 1.0,
            Background::Linear { .. } => 2.0,
        }
    }

    /// CSS `background` value.
    pub fn to_css(&self) -> String {
        match self {
            Background::Solid(color) => color.to_string(),
            Background::Radial {
                radii_pct,
                center_pct,
                stops,
            } => format!(
                "radial-gradient(ellipse {}% {}% at {}% {}%, {})",
                radii_pct.x,
                radii_pct.y,
                center_pct.x,
                center_pct.y,
                css_stops(stops)
            ),
            Background::Linear { angle_deg, stops } => {
                format!("linear-gradient({}deg, {})", angle_deg, css_stops(stops))
            }
        }
    }
}

fn css_stops(stops: &[ColorStop]) -> String {
    stops
        .iter()
        .map(|s| format!("{} {}%", s.color, s.at * 100.0))
        .collect::<Vec<_>>()
        .join(", ")
}

//! Frame buffer layout shared with the host page script.
//! Must stay in sync with the JavaScript reader.
//!
//! Layout (all values f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Sections: section_count × 27 floats]
//! [Lines: section_count × max_lines × 5 floats]
//! ```
//!
//! Section count and line capacity are written into the header so the host
//! can compute offsets without hard-coding them.

use bytemuck::{Pod, Zeroable};

use crate::api::types::SectionKind;
use crate::reveal::style::RevealStyle;

/// Number of floats in the header.
pub const HEADER_FLOATS: usize = 16;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per style record: opacity, x, y, blur, scale.
pub const STYLE_FLOATS: usize = 5;

/// Floats per section record.
pub const SECTION_FLOATS: usize = 12 + 3 * STYLE_FLOATS;

/// Section flag bits.
pub const FLAG_HAS_IMAGE: u32 = 1;
pub const FLAG_HAS_INDICATOR: u32 = 1 << 1;
pub const FLAG_AMBIENT_GLOW: u32 = 1 << 2;

/// Page-wide state, first 16 floats of every frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub protocol_version: f32,
    pub frame_counter: f32,
    pub section_count: f32,
    pub max_lines: f32,
    /// Current eased scroll offset in CSS pixels.
    pub scroll_y: f32,
    pub scroll_limit: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Volume the audio element should be at (0 while muted).
    pub volume: f32,
    pub target_volume: f32,
    pub playing: f32,
    pub muted: f32,
    pub unlocked: f32,
    /// Film grain translation in percent.
    pub grain_x: f32,
    pub grain_y: f32,
    /// Index of the first visible section, -1 if none.
    pub active_section: f32,
}

/// One element's animated style.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StyleRecord {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub blur: f32,
    pub scale: f32,
}

impl From<RevealStyle> for StyleRecord {
    fn from(style: RevealStyle) -> Self {
        Self {
            opacity: style.opacity,
            x: style.offset.x,
            y: style.offset.y,
            blur: style.blur,
            scale: style.scale,
        }
    }
}

/// Per-line text style; identical wire shape to [`StyleRecord`].
pub type LineRecord = StyleRecord;

/// One section's state for the current frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SectionRecord {
    pub visible: f32,
    pub revealed: f32,
    /// 0 opening, 1 photo, 2 closing.
    pub kind: f32,
    /// See `Background::code`.
    pub background: f32,
    /// See `ImageState::code`.
    pub image_state: f32,
    pub image_aspect: f32,
    pub corner_radius: f32,
    /// Image translation in percent of its height.
    pub parallax: f32,
    pub top: f32,
    pub height: f32,
    /// Lines written to the line region, at most `max_lines`.
    pub line_count: f32,
    pub flags: f32,
    pub text: StyleRecord,
    pub image: StyleRecord,
    pub indicator: StyleRecord,
}

pub fn kind_code(kind: SectionKind) -> f32 {
    match kind {
        SectionKind::Opening => 0.0,
        SectionKind::Photo => 1.0,
        SectionKind::Closing => 2.0,
    }
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub section_count: usize,
    pub max_lines: usize,

    /// Size of the section region in floats.
    pub section_data_floats: usize,
    /// Size of the line region in floats.
    pub line_data_floats: usize,

    /// Offset (in floats) where section records begin.
    pub section_data_offset: usize,
    /// Offset (in floats) where line records begin.
    pub line_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

impl FrameLayout {
    pub fn new(section_count: usize, max_lines: usize) -> Self {
        let section_data_floats = section_count * SECTION_FLOATS;
        let line_data_floats = section_count * max_lines * STYLE_FLOATS;

        let section_data_offset = HEADER_FLOATS;
        let line_data_offset = section_data_offset + section_data_floats;

        let buffer_total_floats = line_data_offset + line_data_floats;

        Self {
            section_count,
            max_lines,
            section_data_floats,
            line_data_floats,
            section_data_offset,
            line_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn section_offset(&self, index: usize) -> usize {
        self.section_data_offset + index * SECTION_FLOATS
    }

    pub fn line_offset(&self, section: usize, line: usize) -> usize {
        self.line_data_offset + (section * self.max_lines + line) * STYLE_FLOATS
    }
}

/// Flat f32 storage the host reads through a pointer every frame.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    layout: FrameLayout,
    data: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(layout: FrameLayout) -> Self {
        let data = vec![0.0; layout.buffer_total_floats];
        Self { layout, data }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn write_header(&mut self, header: &FrameHeader) {
        copy_record(&mut self.data, 0, header);
    }

    /// Out-of-range indices are ignored.
    pub fn write_section(&mut self, index: usize, record: &SectionRecord) {
        if index < self.layout.section_count {
            let at = self.layout.section_offset(index);
            copy_record(&mut self.data, at, record);
        }
    }

    /// Lines past `max_lines` are dropped.
    pub fn write_line(&mut self, section: usize, line: usize, record: &LineRecord) {
        if section < self.layout.section_count && line < self.layout.max_lines {
            let at = self.layout.line_offset(section, line);
            copy_record(&mut self.data, at, record);
        }
    }

    pub fn header(&self) -> FrameHeader {
        read_record(&self.data, 0)
    }

    pub fn section(&self, index: usize) -> Option<SectionRecord> {
        (index < self.layout.section_count)
            .then(|| read_record(&self.data, self.layout.section_offset(index)))
    }

    pub fn line(&self, section: usize, line: usize) -> Option<LineRecord> {
        (section < self.layout.section_count && line < self.layout.max_lines)
            .then(|| read_record(&self.data, self.layout.line_offset(section, line)))
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_ptr(&self) -> *const f32 {
        self.data.as_ptr()
    }
}

fn copy_record<T: Pod>(data: &mut [f32], at: usize, record: &T) {
    let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(record));
    data[at..at + floats.len()].copy_from_slice(floats);
}

fn read_record<T: Pod>(data: &[f32], at: usize) -> T {
    let floats = std::mem::size_of::<T>() / 4;
    bytemuck::pod_read_unaligned(bytemuck::cast_slice(&data[at..at + floats]))
}

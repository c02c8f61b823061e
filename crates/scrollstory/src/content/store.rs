use std::collections::HashSet;

use crate::api::types::{SectionId, SectionKind};
use crate::content::manifest::{AnimationConfig, PageContent, SectionDescriptor, SiteConfig};
use crate::error::{ContentError, ContentResult};

/// The story that ships with the crate.
const DEFAULT_STORY: &str = include_str!("../../content/story.json");

/// Validated, read-only section list for the page's lifetime.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content: PageContent,
}

impl ContentStore {
    /// Parse and validate content from a JSON string.
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let content: PageContent = serde_json::from_str(json)?;
        Self::new(content)
    }

    /// Validate already-deserialized content.
    pub fn new(content: PageContent) -> ContentResult<Self> {
        validate(&content)?;
        log::debug!(
            "content: {} sections for \"{}\"",
            content.sections.len(),
            content.site.title
        );
        Ok(Self { content })
    }

    /// The embedded default story.
    pub fn default_story() -> ContentResult<Self> {
        Self::from_json(DEFAULT_STORY)
    }

    /// Serialized content, for a host that builds the DOM from it.
    pub fn to_json(&self) -> ContentResult<String> {
        Ok(serde_json::to_string(&self.content)?)
    }

    pub fn site(&self) -> &SiteConfig {
        &self.content.site
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.content.animation
    }

    pub fn get(&self, id: SectionId) -> Option<&SectionDescriptor> {
        self.content.sections.get(id.index())
    }

    /// Look a section up by its configured string id.
    pub fn find(&self, id: &str) -> Option<SectionId> {
        self.content
            .sections
            .iter()
            .position(|s| s.id == id)
            .map(|i| SectionId(i as u32))
    }

    /// Iterate sections in page order.
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &SectionDescriptor)> {
        self.content
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| (SectionId(i as u32), s))
    }

    /// Whether this section's visibility drives the background track.
    pub fn is_audio_bearing(&self, id: SectionId) -> bool {
        self.content.site.audio.enabled
            && self
                .get(id)
                .is_some_and(|s| s.audio_ref.as_deref().is_some_and(|r| !r.is_empty()))
    }

    /// Longest line count across all sections.
    pub fn max_lines(&self) -> usize {
        self.content
            .sections
            .iter()
            .map(SectionDescriptor::line_count)
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.content.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.sections.is_empty()
    }
}

fn validate(content: &PageContent) -> ContentResult<()> {
    if content.sections.is_empty() {
        return Err(ContentError::Empty);
    }

    let volume = content.site.audio.volume;
    if !(0.0..=1.0).contains(&volume) {
        return Err(ContentError::InvalidVolume(volume));
    }

    let mut seen = HashSet::with_capacity(content.sections.len());
    for section in &content.sections {
        if section.id.trim().is_empty() {
            return Err(ContentError::invalid("", "section id is empty"));
        }
        if !seen.insert(section.id.as_str()) {
            return Err(ContentError::DuplicateId(section.id.clone()));
        }
        if section.text.trim().is_empty() {
            return Err(ContentError::invalid(&section.id, "text is empty"));
        }
        if section.kind == SectionKind::Photo
            && section.image_ref.as_deref().map_or(true, |r| r.trim().is_empty())
        {
            return Err(ContentError::invalid(&section.id, "photo section needs an image"));
        }
        if let Some(raw) = &section.background_override {
            if section.background_color().is_none() {
                return Err(ContentError::invalid(
                    &section.id,
                    format!("background override `{}` is not a hex colour", raw),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(sections: &str) -> String {
        format!(
            r#"{{ "site": {{ "title": "t", "audio": {{ "src": "/a.mp3" }} }}, "sections": {} }}"#,
            sections
        )
    }

    #[test]
    fn default_story_loads() {
        let store = ContentStore::default_story().unwrap();
        assert_eq!(store.len(), 9);
        assert_eq!(store.get(SectionId(0)).unwrap().kind, SectionKind::Opening);
        assert_eq!(store.get(SectionId(8)).unwrap().kind, SectionKind::Closing);
        assert_eq!(store.site().audio.volume, 0.5);
        assert_eq!(store.max_lines(), 3);
        assert!(store.is_audio_bearing(SectionId(4)));
    }

    #[test]
    fn serialized_content_reloads() {
        let store = ContentStore::default_story().unwrap();
        let again = ContentStore::from_json(&store.to_json().unwrap()).unwrap();
        assert_eq!(again.len(), store.len());
        assert_eq!(again.site().title, store.site().title);
        assert_eq!(again.get(SectionId(1)), store.get(SectionId(1)));
    }

    #[test]
    fn find_by_string_id() {
        let store = ContentStore::default_story().unwrap();
        assert_eq!(store.find("memory-2"), Some(SectionId(2)));
        assert_eq!(store.find("nope"), None);
    }

    #[test]
    fn rejects_empty() {
        let err = ContentStore::from_json(&content("[]")).unwrap_err();
        assert!(matches!(err, ContentError::Empty));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = content(
            r#"[{ "id": "a", "type": "opening", "text": "x" },
                { "id": "a", "type": "closing", "text": "y" }]"#,
        );
        assert!(matches!(
            ContentStore::from_json(&json).unwrap_err(),
            ContentError::DuplicateId(id) if id == "a"
        ));
    }

    #[test]
    fn rejects_photo_without_image() {
        let json = content(r#"[{ "id": "p", "type": "photo", "text": "x" }]"#);
        assert!(matches!(
            ContentStore::from_json(&json).unwrap_err(),
            ContentError::InvalidSection { .. }
        ));
    }

    #[test]
    fn rejects_bad_colour_override() {
        let json = content(r#"[{ "id": "o", "type": "opening", "text": "x", "bg_color": "red" }]"#);
        assert!(ContentStore::from_json(&json).is_err());
    }

    #[test]
    fn rejects_out_of_range_volume() {
        let json = r#"{ "site": { "title": "t", "audio": { "volume": 1.5 } },
                        "sections": [{ "id": "o", "type": "opening", "text": "x" }] }"#;
        assert!(matches!(
            ContentStore::from_json(json).unwrap_err(),
            ContentError::InvalidVolume(_)
        ));
    }

    #[test]
    fn sections_without_music_do_not_drive_audio() {
        let json = content(r#"[{ "id": "o", "type": "opening", "text": "x" }]"#);
        let store = ContentStore::from_json(&json).unwrap();
        assert!(!store.is_audio_bearing(SectionId(0)));
    }

    #[test]
    fn disabled_audio_silences_everything() {
        let json = r#"{ "site": { "title": "t", "audio": { "enabled": false } },
                        "sections": [{ "id": "o", "type": "opening", "text": "x", "music": "/a.mp3" }] }"#;
        let store = ContentStore::from_json(json).unwrap();
        assert!(!store.is_audio_bearing(SectionId(0)));
    }
}

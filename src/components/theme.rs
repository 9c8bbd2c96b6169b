//! Persisted light/dark theme applied through the root `data-theme` attribute.

use crate::domain::model::Theme;
use crate::domain::ports::{Document, KeyValueStore};

pub const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Debug, Clone)]
pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The persisted theme; an unreadable store counts as light.
    pub fn stored_theme(&self) -> Theme {
        match self.store.get_item(&self.key) {
            Ok(flag) => Theme::from_flag(flag.as_deref()),
            Err(e) => {
                tracing::debug!("Theme store unreadable, using default: {}", e);
                Theme::Light
            }
        }
    }

    /// Marks the root dark when the persisted flag says so. Runs before any
    /// other component touches the page.
    pub fn apply_stored(&self, doc: &mut dyn Document) -> Theme {
        let theme = self.stored_theme();
        if theme == Theme::Dark {
            let root = doc.root();
            doc.set_attribute(root, THEME_ATTRIBUTE, "dark");
        }
        tracing::debug!("Applied stored theme: {}", theme);
        theme
    }

    pub fn toggle(&mut self, doc: &mut dyn Document) -> Theme {
        let root = doc.root();
        let next = current_theme(doc).toggled();
        doc.set_attribute(
            root,
            THEME_ATTRIBUTE,
            match next {
                Theme::Dark => "dark",
                Theme::Light => "",
            },
        );
        if let Err(e) = self.store.set_item(&self.key, next.as_flag()) {
            tracing::debug!("Theme not persisted: {}", e);
        }
        tracing::info!("Theme switched to {}", next);
        next
    }
}

pub fn current_theme(doc: &dyn Document) -> Theme {
    Theme::from_flag(doc.attribute_value(doc.root(), THEME_ATTRIBUTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_dom::MemoryDocument;
    use crate::adapters::storage::{MemoryStore, UnavailableStore};

    #[test]
    fn test_stored_dark_applies_to_root() {
        let mut doc = MemoryDocument::new();
        let themes = ThemeStore::new(MemoryStore::new().with_item("agni-theme", "dark"), "agni-theme");

        assert_eq!(themes.apply_stored(&mut doc), Theme::Dark);
        assert_eq!(doc.attribute(doc.root(), "data-theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_stored_light_leaves_root_untouched() {
        let mut doc = MemoryDocument::new();
        let themes = ThemeStore::new(MemoryStore::new().with_item("agni-theme", "light"), "agni-theme");

        assert_eq!(themes.apply_stored(&mut doc), Theme::Light);
        assert_eq!(doc.attribute(doc.root(), "data-theme"), None);
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let mut doc = MemoryDocument::new();
        let mut themes = ThemeStore::new(MemoryStore::new(), "agni-theme");

        assert_eq!(themes.toggle(&mut doc), Theme::Dark);
        assert_eq!(doc.attribute(doc.root(), "data-theme").as_deref(), Some("dark"));
        assert_eq!(
            themes.store().get_item("agni-theme").unwrap().as_deref(),
            Some("dark")
        );

        assert_eq!(themes.toggle(&mut doc), Theme::Light);
        assert_eq!(doc.attribute(doc.root(), "data-theme").as_deref(), Some(""));
        assert_eq!(
            themes.store().get_item("agni-theme").unwrap().as_deref(),
            Some("light")
        );
    }

    #[test]
    fn test_unavailable_storage_is_a_no_op() {
        let mut doc = MemoryDocument::new();
        let mut themes = ThemeStore::new(UnavailableStore, "agni-theme");

        assert_eq!(themes.apply_stored(&mut doc), Theme::Light);
        assert_eq!(themes.toggle(&mut doc), Theme::Dark);
        assert_eq!(current_theme(&doc), Theme::Dark);
    }
}

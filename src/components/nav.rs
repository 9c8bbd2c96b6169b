use crate::domain::model::ElementId;
use crate::domain::ports::Document;
use crate::domain::selector::Selector;

pub const ACTIVE_CLASS: &str = "active";
pub const OPEN_CLASS: &str = "open";

/// Marks the navigation link for the current page.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    links: Selector,
}

impl NavHighlighter {
    pub fn new(links: Selector) -> Self {
        Self { links }
    }

    /// Adds `active` to the first link whose `data-nav` equals the body's
    /// `data-page`. Returns the highlighted link, if any.
    pub fn highlight(&self, doc: &mut dyn Document) -> Option<ElementId> {
        let page = doc.body().and_then(|body| doc.attribute(body, "data-page"))?;
        let link = doc
            .query_all(&self.links)
            .into_iter()
            .find(|link| doc.attribute_value(*link, "data-nav") == Some(page.as_str()))?;
        doc.add_class(link, ACTIVE_CLASS);
        tracing::debug!("Highlighted nav link for page `{}`", page);
        Some(link)
    }
}

/// The hamburger button that opens and closes the navigation on small screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileNavToggle {
    trigger: ElementId,
    nav: ElementId,
}

impl MobileNavToggle {
    /// `None` unless both the trigger and the nav container exist.
    pub fn bind(doc: &dyn Document, trigger: &Selector, nav: &Selector) -> Option<Self> {
        Some(Self {
            trigger: doc.query(trigger)?,
            nav: doc.query(nav)?,
        })
    }

    pub fn trigger(&self) -> ElementId {
        self.trigger
    }

    pub fn nav(&self) -> ElementId {
        self.nav
    }

    /// Returns whether the menu is open afterwards.
    pub fn toggle(&self, doc: &mut dyn Document) -> bool {
        doc.toggle_class(self.nav, OPEN_CLASS, None)
    }
}

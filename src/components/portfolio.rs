use crate::domain::model::ElementId;
use crate::domain::ports::Document;

pub const ACTIVE_CLASS: &str = "active";
pub const SHOW_ALL: &str = "all";

/// Whether an item with `category` is shown under `filter`. A button without
/// `data-filter` only matches items without `data-category`.
pub fn is_shown(filter: Option<&str>, category: Option<&str>) -> bool {
    filter == Some(SHOW_ALL) || filter == category
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioFilter {
    buttons: Vec<ElementId>,
    items: Vec<ElementId>,
    selected: Option<String>,
}

impl PortfolioFilter {
    /// `None` unless there is at least one button and one item.
    pub fn new(buttons: Vec<ElementId>, items: Vec<ElementId>) -> Option<Self> {
        if buttons.is_empty() || items.is_empty() {
            return None;
        }
        Some(Self {
            buttons,
            items,
            selected: None,
        })
    }

    pub fn buttons(&self) -> &[ElementId] {
        &self.buttons
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    /// The current filter; `all` until a button is chosen.
    pub fn selected(&self) -> &str {
        self.selected.as_deref().unwrap_or(SHOW_ALL)
    }

    /// Activates `button` and recomputes every item's visibility from its
    /// `data-filter`. Returns `false` for elements that are not filter buttons.
    pub fn select_button(&mut self, doc: &mut dyn Document, button: ElementId) -> bool {
        if !self.buttons.contains(&button) {
            return false;
        }
        let filter = doc.attribute(button, "data-filter");
        self.mark_active(doc, Some(button));
        self.apply(doc, filter.as_deref());
        self.selected = filter;
        true
    }

    /// Selects by value: the first button with a matching `data-filter`
    /// becomes active (none if no button carries the value).
    pub fn set_filter(&mut self, doc: &mut dyn Document, value: &str) {
        let button = self
            .buttons
            .iter()
            .copied()
            .find(|b| doc.attribute_value(*b, "data-filter") == Some(value));
        self.mark_active(doc, button);
        self.apply(doc, Some(value));
        self.selected = Some(value.to_string());
    }

    fn mark_active(&self, doc: &mut dyn Document, active: Option<ElementId>) {
        for b in &self.buttons {
            doc.remove_class(*b, ACTIVE_CLASS);
        }
        if let Some(b) = active {
            doc.add_class(b, ACTIVE_CLASS);
        }
    }

    fn apply(&self, doc: &mut dyn Document, filter: Option<&str>) {
        let mut shown = 0;
        for item in &self.items {
            let visible = is_shown(filter, doc.attribute_value(*item, "data-category"));
            doc.set_style_property(*item, "display", if visible { "" } else { "none" });
            shown += usize::from(visible);
        }
        tracing::debug!(
            "Portfolio filter {:?}: {} of {} items shown",
            filter,
            shown,
            self.items.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_dom::{Element, MemoryDocument};

    struct Fixture {
        doc: MemoryDocument,
        buttons: Vec<ElementId>,
        items: Vec<ElementId>,
    }

    fn fixture() -> Fixture {
        let mut doc = MemoryDocument::new();
        let buttons = ["all", "a", "b"]
            .iter()
            .map(|f| doc.append_to_body(Element::new("button").class("filter-btn").attr("data-filter", f)))
            .collect();
        let items = ["a", "b", "a"]
            .iter()
            .map(|c| doc.append_to_body(Element::new("div").class("portfolio-item").attr("data-category", c)))
            .collect();
        Fixture { doc, buttons, items }
    }

    fn hidden(doc: &MemoryDocument, items: &[ElementId]) -> Vec<bool> {
        items
            .iter()
            .map(|el| doc.style_property(*el, "display").as_deref() == Some("none"))
            .collect()
    }

    #[test]
    fn test_category_filter_shows_matching_items() {
        let Fixture { mut doc, buttons, items } = fixture();
        let mut filter = PortfolioFilter::new(buttons.clone(), items.clone()).unwrap();
        assert_eq!(filter.selected(), "all");

        assert!(filter.select_button(&mut doc, buttons[1]));
        assert_eq!(filter.selected(), "a");
        assert_eq!(hidden(&doc, &items), vec![false, true, false]);

        assert!(filter.select_button(&mut doc, buttons[0]));
        assert_eq!(hidden(&doc, &items), vec![false, false, false]);
    }

    #[test]
    fn test_only_clicked_button_is_active() {
        let Fixture { mut doc, buttons, items } = fixture();
        let mut filter = PortfolioFilter::new(buttons.clone(), items).unwrap();

        filter.select_button(&mut doc, buttons[1]);
        filter.select_button(&mut doc, buttons[2]);
        let active: Vec<bool> = buttons.iter().map(|b| doc.has_class(*b, "active")).collect();
        assert_eq!(active, vec![false, false, true]);
    }

    #[test]
    fn test_set_filter_by_value() {
        let Fixture { mut doc, buttons, items } = fixture();
        let mut filter = PortfolioFilter::new(buttons.clone(), items.clone()).unwrap();

        filter.set_filter(&mut doc, "b");
        assert!(doc.has_class(buttons[2], "active"));
        assert_eq!(hidden(&doc, &items), vec![true, false, true]);

        filter.set_filter(&mut doc, "c");
        assert!(buttons.iter().all(|b| !doc.has_class(*b, "active")));
        assert_eq!(hidden(&doc, &items), vec![true, true, true]);
    }

    #[test]
    fn test_non_button_is_ignored() {
        let Fixture { mut doc, buttons, items } = fixture();
        let mut filter = PortfolioFilter::new(buttons, items.clone()).unwrap();
        assert!(!filter.select_button(&mut doc, items[0]));
        assert_eq!(hidden(&doc, &items), vec![false, false, false]);
    }

    #[test]
    fn test_missing_attributes() {
        assert!(is_shown(Some("all"), None));
        assert!(is_shown(None, None));
        assert!(!is_shown(None, Some("a")));
        assert!(PortfolioFilter::new(Vec::new(), vec![ElementId::new(1)]).is_none());
    }
}

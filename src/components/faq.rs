use crate::domain::model::ElementId;
use crate::domain::ports::Document;
use crate::domain::selector::Selector;

pub const OPEN_CLASS: &str = "open";

/// Independent open/closed FAQ items; any number may be open at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqAccordion {
    // (question, item) pairs; items without a question are skipped
    entries: Vec<(ElementId, ElementId)>,
}

impl FaqAccordion {
    pub fn bind(doc: &dyn Document, items: &Selector, question: &Selector) -> Self {
        let entries = doc
            .query_all(items)
            .into_iter()
            .filter_map(|item| doc.query_within(item, question).map(|q| (q, item)))
            .collect();
        Self { entries }
    }

    /// `(question, item)` pairs in document order. A question nested in
    /// several items appears once per item.
    pub fn entries(&self) -> &[(ElementId, ElementId)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the item is open afterwards.
    pub fn toggle(&self, doc: &mut dyn Document, item: ElementId) -> bool {
        doc.toggle_class(item, OPEN_CLASS, None)
    }

    pub fn is_open(doc: &dyn Document, item: ElementId) -> bool {
        doc.has_class(item, OPEN_CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_dom::{Element, MemoryDocument};

    fn faq_page() -> (MemoryDocument, Vec<ElementId>) {
        let mut doc = MemoryDocument::new();
        let mut items = Vec::new();
        for open in [false, true, false] {
            let mut spec = Element::new("div").class("faq-item");
            if open {
                spec = spec.class("open");
            }
            let item = doc.append_to_body(spec);
            doc.append(item, Element::new("button").class("faq-question"));
            doc.append(item, Element::new("div").class("faq-answer"));
            items.push(item);
        }
        // an item without a question never binds
        doc.append_to_body(Element::new("div").class("faq-item"));
        (doc, items)
    }

    fn accordion(doc: &MemoryDocument) -> FaqAccordion {
        FaqAccordion::bind(
            doc,
            &Selector::parse(".faq-item").unwrap(),
            &Selector::parse(".faq-question").unwrap(),
        )
    }

    #[test]
    fn test_binds_only_items_with_questions() {
        let (doc, items) = faq_page();
        let faq = accordion(&doc);
        assert_eq!(faq.len(), 3);
        let items_bound: Vec<_> = faq.entries().iter().map(|(_, item)| *item).collect();
        assert_eq!(items_bound, items);
    }

    #[test]
    fn test_nested_items_share_a_question() {
        let mut doc = MemoryDocument::new();
        let outer = doc.append_to_body(Element::new("div").class("faq-item"));
        let inner = doc.append(outer, Element::new("div").class("faq-item"));
        let question = doc.append(inner, Element::new("button").class("faq-question"));

        let faq = accordion(&doc);
        assert_eq!(faq.entries(), &[(question, outer), (question, inner)]);
    }

    #[test]
    fn test_items_toggle_independently() {
        let (mut doc, items) = faq_page();
        let faq = accordion(&doc);

        assert!(faq.toggle(&mut doc, items[0]));
        assert!(FaqAccordion::is_open(&doc, items[0]));
        assert!(FaqAccordion::is_open(&doc, items[1]));
        assert!(!FaqAccordion::is_open(&doc, items[2]));

        assert!(!faq.toggle(&mut doc, items[1]));
        assert!(FaqAccordion::is_open(&doc, items[0]));
        assert!(!FaqAccordion::is_open(&doc, items[1]));
    }
}

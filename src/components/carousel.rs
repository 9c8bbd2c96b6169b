use crate::domain::model::ElementId;
use crate::domain::ports::Document;

pub const ACTIVE_CLASS: &str = "active";

pub fn next_index(index: usize, len: usize) -> usize {
    (index + 1) % len
}

pub fn prev_index(index: usize, len: usize) -> usize {
    (index + len - 1) % len
}

/// Testimonial slider: exactly one item carries `active` at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    items: Vec<ElementId>,
    index: usize,
}

impl Carousel {
    /// Shows the first item. `None` for an empty list.
    pub fn new(doc: &mut dyn Document, items: Vec<ElementId>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let mut carousel = Self { items, index: 0 };
        carousel.show(doc, 0);
        Some(carousel)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn active(&self) -> ElementId {
        self.items[self.index]
    }

    pub fn show(&mut self, doc: &mut dyn Document, index: usize) {
        self.index = index % self.items.len();
        for (i, item) in self.items.iter().enumerate() {
            doc.toggle_class(*item, ACTIVE_CLASS, Some(i == self.index));
        }
    }

    pub fn next(&mut self, doc: &mut dyn Document) -> usize {
        let index = next_index(self.index, self.items.len());
        self.show(doc, index);
        self.index
    }

    pub fn prev(&mut self, doc: &mut dyn Document) -> usize {
        let index = prev_index(self.index, self.items.len());
        self.show(doc, index);
        self.index
    }
}

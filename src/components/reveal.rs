//! Reveal-on-scroll: elements get `visible` the first time they scroll into
//! view, or immediately when the page cannot observe intersections.

use crate::config::Capabilities;
use crate::core::observer::ViewportObserver;
use crate::domain::model::{ElementId, IntersectionEntry};
use crate::domain::ports::Document;

pub const VISIBLE_CLASS: &str = "visible";

pub trait RevealStrategy: std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Called once at load with every element marked for reveal.
    fn start(&mut self, doc: &mut dyn Document, targets: &[ElementId]);

    /// Returns how many elements were revealed by this batch.
    fn on_intersection(&mut self, doc: &mut dyn Document, entries: &[IntersectionEntry]) -> usize;

    /// Elements still waiting to be revealed.
    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
pub struct ObservedReveal {
    observer: ViewportObserver,
}

impl ObservedReveal {
    pub fn new(threshold: f64) -> Self {
        Self {
            observer: ViewportObserver::new(threshold),
        }
    }
}

impl RevealStrategy for ObservedReveal {
    fn name(&self) -> &'static str {
        "observed"
    }

    fn start(&mut self, _doc: &mut dyn Document, targets: &[ElementId]) {
        for el in targets {
            self.observer.observe(*el);
        }
    }

    fn on_intersection(&mut self, doc: &mut dyn Document, entries: &[IntersectionEntry]) -> usize {
        let revealed = self.observer.take_first_intersections(entries);
        for entry in &revealed {
            doc.add_class(entry.target, VISIBLE_CLASS);
        }
        revealed.len()
    }

    fn pending(&self) -> usize {
        self.observer.observed().len()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EagerReveal;

impl RevealStrategy for EagerReveal {
    fn name(&self) -> &'static str {
        "eager"
    }

    fn start(&mut self, doc: &mut dyn Document, targets: &[ElementId]) {
        for el in targets {
            doc.add_class(*el, VISIBLE_CLASS);
        }
    }

    fn on_intersection(&mut self, _doc: &mut dyn Document, _entries: &[IntersectionEntry]) -> usize {
        0
    }

    fn pending(&self) -> usize {
        0
    }
}

pub fn reveal_strategy(capabilities: Capabilities, threshold: f64) -> Box<dyn RevealStrategy> {
    if capabilities.intersection_observer {
        Box::new(ObservedReveal::new(threshold))
    } else {
        Box::new(EagerReveal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_dom::{Element, MemoryDocument};
    use std::time::Duration;

    fn cards(doc: &mut MemoryDocument, n: usize) -> Vec<ElementId> {
        (0..n)
            .map(|_| doc.append_to_body(Element::new("section").class("reveal")))
            .collect()
    }

    fn seen(el: ElementId, ratio: f64) -> IntersectionEntry {
        IntersectionEntry::new(el, ratio, Duration::from_millis(100))
    }

    #[test]
    fn test_observed_reveal_marks_once() {
        let mut doc = MemoryDocument::new();
        let els = cards(&mut doc, 2);
        let mut strategy = reveal_strategy(Capabilities::default(), 0.18);
        assert_eq!(strategy.name(), "observed");

        strategy.start(&mut doc, &els);
        assert!(!doc.has_class(els[0], "visible"));
        assert_eq!(strategy.pending(), 2);

        assert_eq!(strategy.on_intersection(&mut doc, &[seen(els[0], 0.5)]), 1);
        assert!(doc.has_class(els[0], "visible"));
        assert!(!doc.has_class(els[1], "visible"));

        // leaving and re-entering the viewport changes nothing
        doc.remove_class(els[0], "visible");
        assert_eq!(strategy.on_intersection(&mut doc, &[seen(els[0], 1.0)]), 0);
        assert!(!doc.has_class(els[0], "visible"));
        assert_eq!(strategy.pending(), 1);
    }

    #[test]
    fn test_below_threshold_stays_pending() {
        let mut doc = MemoryDocument::new();
        let els = cards(&mut doc, 1);
        let mut strategy = ObservedReveal::new(0.18);
        strategy.start(&mut doc, &els);

        assert_eq!(strategy.on_intersection(&mut doc, &[seen(els[0], 0.1)]), 0);
        assert_eq!(strategy.pending(), 1);
    }

    #[test]
    fn test_eager_fallback_reveals_everything_at_start() {
        let mut doc = MemoryDocument::new();
        let els = cards(&mut doc, 3);
        let caps = Capabilities {
            intersection_observer: false,
        };
        let mut strategy = reveal_strategy(caps, 0.18);
        assert_eq!(strategy.name(), "eager");

        strategy.start(&mut doc, &els);
        assert!(els.iter().all(|el| doc.has_class(*el, "visible")));
        assert_eq!(strategy.pending(), 0);
    }
}

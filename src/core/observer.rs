use crate::domain::model::{ElementId, IntersectionEntry};

/// Threshold-based viewport observation for a set of elements.
///
/// Entries for elements that are not observed are ignored. An entry qualifies
/// when its target intersects the viewport with at least `threshold` of its
/// area; qualifying targets are unobserved as they are delivered, so each
/// element is reported at most once.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    threshold: f64,
    targets: Vec<ElementId>,
}

impl ViewportObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            targets: Vec::new(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn observe(&mut self, el: ElementId) {
        if !self.targets.contains(&el) {
            self.targets.push(el);
        }
    }

    pub fn unobserve(&mut self, el: ElementId) {
        self.targets.retain(|t| *t != el);
    }

    pub fn is_observing(&self, el: ElementId) -> bool {
        self.targets.contains(&el)
    }

    pub fn observed(&self) -> &[ElementId] {
        &self.targets
    }

    fn qualifies(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting() && entry.intersection_ratio >= self.threshold
    }

    pub fn take_first_intersections(&mut self, entries: &[IntersectionEntry]) -> Vec<IntersectionEntry> {
        let mut delivered = Vec::new();
        for entry in entries {
            if self.is_observing(entry.target) && self.qualifies(entry) {
                self.unobserve(entry.target);
                delivered.push(entry.clone());
            }
        }
        delivered
    }
}

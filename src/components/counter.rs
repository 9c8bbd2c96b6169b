use crate::config::CounterConfig;
use crate::core::observer::ViewportObserver;
use crate::domain::model::{ElementId, IntersectionEntry};
use crate::domain::ports::Document;
use std::time::Duration;

/// Reads a counter's `data-target`. Missing or non-numeric targets count as 0.
pub fn parse_target(raw: Option<&str>) -> f64 {
    match raw.map(str::trim) {
        None | Some("") => 0.0,
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                tracing::warn!("Counter target `{}` is not a number, using 0", s);
                0.0
            }
        },
    }
}

/// Text shown at `progress` (0..=1) of the way to `target`.
pub fn counter_text(progress: f64, target: f64, suffix_min: f64, suffix: &str) -> String {
    let value = format_count((progress.clamp(0.0, 1.0) * target).floor());
    if target >= suffix_min {
        format!("{}{}", value, suffix)
    } else {
        value
    }
}

/// Whole numbers print in full below 1e21 and in exponent form (`1e+21`)
/// from there on, as page text does.
fn format_count(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() < 1e21 {
        return format!("{}", value);
    }
    let exp = format!("{:e}", value);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CounterAnimation {
    element: ElementId,
    target: f64,
    started_at: Duration,
    duration: Duration,
}

impl CounterAnimation {
    pub fn new(element: ElementId, target: f64, started_at: Duration, duration: Duration) -> Self {
        Self {
            element,
            target,
            started_at,
            duration,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }
}

/// Counts `[data-counter]` elements up from zero the first time they are
/// seen. Each counter animates once.
#[derive(Debug, Clone)]
pub struct CounterAnimator {
    observer: ViewportObserver,
    running: Vec<CounterAnimation>,
    duration: Duration,
    suffix_min: f64,
    suffix: String,
}

impl CounterAnimator {
    pub fn new(config: &CounterConfig) -> Self {
        Self {
            observer: ViewportObserver::new(config.threshold),
            running: Vec::new(),
            duration: config.duration(),
            suffix_min: config.suffix_min,
            suffix: config.suffix.clone(),
        }
    }

    pub fn start(&mut self, targets: &[ElementId]) {
        for el in targets {
            self.observer.observe(*el);
        }
    }

    /// Starts an animation for each counter seen for the first time. The
    /// animation clock starts at the entry's time.
    pub fn on_intersection(&mut self, doc: &dyn Document, entries: &[IntersectionEntry]) -> usize {
        let seen = self.observer.take_first_intersections(entries);
        for entry in &seen {
            let target = parse_target(doc.attribute_value(entry.target, "data-target"));
            tracing::debug!("Counter {:?} animating to {}", entry.target, target);
            self.running.push(CounterAnimation::new(
                entry.target,
                target,
                entry.time,
                self.duration,
            ));
        }
        seen.len()
    }

    /// Renders one animation frame. Finished animations render their final
    /// value on this frame and are dropped.
    pub fn on_frame(&mut self, doc: &mut dyn Document, now: Duration) -> usize {
        let suffix_min = self.suffix_min;
        let suffix = self.suffix.as_str();
        self.running.retain(|anim| {
            let progress = anim.progress(now);
            doc.set_text_content(
                anim.element,
                &counter_text(progress, anim.target, suffix_min, suffix),
            );
            progress < 1.0
        });
        self.running.len()
    }

    pub fn running(&self) -> &[CounterAnimation] {
        &self.running
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.observer.observed().len()
    }
}

use std::time::Duration;

/// Opaque handle to an element in a [`Document`](crate::domain::ports::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than `"dark"` reads as light.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn as_flag(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_flag())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: ElementId,
    pub intersection_ratio: f64,
    pub time: Duration,
}

impl IntersectionEntry {
    pub fn new(target: ElementId, intersection_ratio: f64, time: Duration) -> Self {
        Self {
            target,
            intersection_ratio,
            time,
        }
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersection_ratio > 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click(ElementId),
    Submit(ElementId),
    Intersection(Vec<IntersectionEntry>),
    AnimationFrame(Duration),
    /// The page clock advanced to the given time; due intervals fire.
    Clock(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub form: ElementId,
    pub url: String,
    pub method: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Delivered,
    Rejected { status: u16 },
    Unreachable { reason: String },
}

impl SubmissionOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            SubmissionOutcome::Delivered
        } else {
            SubmissionOutcome::Rejected { status }
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmissionOutcome::Delivered)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormStatus {
    pub message: String,
    pub color: Option<String>,
}

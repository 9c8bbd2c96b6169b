pub mod adapters;
pub mod components;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{Element, FileStore, HttpTransport, MemoryDocument, MemoryStore, UnavailableStore};
pub use config::SiteConfig;
pub use crate::core::site::SiteScript;
pub use domain::model::{
    ElementId, FormStatus, IntersectionEntry, PageEvent, SubmissionOutcome, SubmissionRequest,
    Theme,
};
pub use domain::ports::{Document, FormTransport, KeyValueStore};
pub use domain::selector::Selector;
pub use utils::error::{Result, SiteError};

pub mod events;
pub mod observer;
pub mod site;
pub mod timers;

pub use crate::domain::model::{ElementId, IntersectionEntry, PageEvent, Theme};
pub use crate::domain::ports::{Document, FormTransport, KeyValueStore};
pub use crate::utils::error::Result;
pub use site::SiteScript;

pub mod carousel;
pub mod contact;
pub mod counter;
pub mod faq;
pub mod nav;
pub mod portfolio;
pub mod reveal;
pub mod theme;

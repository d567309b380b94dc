pub mod browsing;
pub mod content;

pub mod document;
pub mod history;

pub mod ease;
pub mod interpolate;
pub mod timeline;

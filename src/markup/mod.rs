pub mod document;
pub mod path_data;
pub mod shapes;

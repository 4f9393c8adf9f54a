pub mod ids;
pub mod layer;
pub mod path;
pub mod path_string;

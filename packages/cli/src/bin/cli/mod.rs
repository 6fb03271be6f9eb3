pub mod catalog;
pub mod model;
pub mod pins;
pub mod shell;

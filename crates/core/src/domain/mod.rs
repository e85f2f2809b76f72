pub mod movie;
pub mod selection;

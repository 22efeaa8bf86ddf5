pub mod compare;
pub mod line;

pub mod cpp;
pub mod python;

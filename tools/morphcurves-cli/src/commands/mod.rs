pub mod bake;
pub mod convert;
pub mod info;

pub mod frame;
pub mod selection;

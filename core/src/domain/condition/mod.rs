pub mod conversion;
pub mod entities;
pub mod ports;
pub mod value_objects;

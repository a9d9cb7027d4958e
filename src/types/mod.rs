pub mod measurement;
pub mod records;
pub mod station;
pub mod table;
pub mod window;

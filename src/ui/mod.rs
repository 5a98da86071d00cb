pub mod analysis;
pub mod panels;
pub mod plot;
pub mod table;

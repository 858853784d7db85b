pub mod csv;
pub mod envelope;
pub mod links;

pub mod errors;
pub mod http;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use startup::run;

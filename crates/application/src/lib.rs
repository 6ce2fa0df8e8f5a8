//! rewriteng application layer: rewrite rules, the handler chain ports and
//! the rewrite use case.
pub mod ports;
pub mod services;
pub mod use_cases;

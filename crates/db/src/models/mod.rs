//! Row models and response DTOs.
//!
//! Entity structs derive `FromRow` + `Serialize` and match their table's
//! columns; composite structs assemble several rows for a single response.

pub mod question;
pub mod topic;
pub mod verification;

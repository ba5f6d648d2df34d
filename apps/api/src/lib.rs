//! Resume analysis: the analysis HTTP service, the report parser for its output, and the
//! submission controller that drives one client-side analysis run.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod report;
pub mod routes;
pub mod state;
pub mod submission;

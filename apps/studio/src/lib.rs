//! Client-side core of the resume builder: validated section data, the
//! persisted editing session, the step wizard and the single gateway to the
//! remote generation service.

pub mod config;
pub mod errors;
pub mod flow;
pub mod models;
pub mod notify;
pub mod remote;
pub mod session;
pub mod state;
pub mod upload;
pub mod validation;
pub mod workflows;

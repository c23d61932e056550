//! Narrative analysis: payload assembly and dispatch to the text
//! generation collaborator.

pub mod analysis_service;
pub mod payload_service;

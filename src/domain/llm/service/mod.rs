pub mod narrative_service;

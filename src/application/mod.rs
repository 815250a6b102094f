// Application layer - Session, view and dashboard coordination
pub mod dashboard_poller;
pub mod mission_api;
pub mod session_service;
pub mod token_store;
pub mod view_controller;

#[cfg(test)]
pub mod testing;

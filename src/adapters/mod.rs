// Adapters layer: CSV input and the remote administration API.

pub mod csv_loader;
pub mod role_service;
pub mod xmlmc;

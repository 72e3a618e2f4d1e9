pub mod appointments;
pub mod availability;
pub mod blocks;
pub mod clock;
pub mod db;
pub mod directory;
pub mod error;
pub mod identity;
pub mod inventory;
pub mod models;
pub mod routes;
pub mod state;

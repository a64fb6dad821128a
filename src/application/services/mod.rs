//! Application services

pub mod reconcile;

pub use reconcile::ReconcileService;

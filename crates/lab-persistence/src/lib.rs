//! Implementación Diesel/SQLite del contrato `LabRepository`.
//! Este archivo expone el módulo `schema` y reexporta el repositorio;
//! la implementación detallada está en `lab_persistence.rs`.

mod lab_persistence;
pub mod schema;

pub use lab_persistence::{new_from_env, new_sqlite_for_test, DieselLabRepository};

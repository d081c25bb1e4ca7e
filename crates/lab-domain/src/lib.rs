mod catalog;
mod errors;
mod molecule;
mod repository;
mod simulation;
mod stats;

pub use catalog::{DiscoveryTarget, ReferenceDrug, REFERENCE_DRUGS, TARGETS};
pub use errors::DomainError;
pub use molecule::{MoleculeRecord, MoleculeStatus, NewMolecule};
pub use repository::{InMemoryLabRepository, LabRepository};
pub use simulation::{NewSimulation, SimulationRecord};
pub use stats::DiscoveryStats;

//! lab-workflow: la máquina de etapas del asistente de descubrimiento
//!
//! Este crate define la sesión (`DiscoverySession`) como un objeto de
//! estado explícito con una transición por método, el enum de etapas
//! (`DiscoveryStage`) y el error del flujo (`WorkflowError`). La sesión
//! opera contra los contratos `LabRepository` y `GenerativeAssistant`,
//! de modo que las transiciones se prueban con el repo en memoria y el
//! asistente determinista.

pub mod errors;
pub mod session;
pub mod stage;

pub use errors::WorkflowError;
pub use session::DiscoverySession;
pub use stage::DiscoveryStage;

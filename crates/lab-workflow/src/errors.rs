use thiserror::Error;

// Errores comunes de la sesion de descubrimiento.
//
// Este enum centraliza los errores que pueden ocurrir durante el avance
// del asistente: errores del almacenamiento (`DomainError`), errores del
// servicio generativo (`AssistantError`) y validaciones de etapa.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Errores originados por la capa de persistencia.
    #[error("Error de dominio: {0}")]
    Domain(#[from] lab_domain::DomainError),

    /// Errores originados por el servicio generativo.
    #[error("Error del asistente: {0}")]
    Assistant(#[from] lab_assistant::AssistantError),

    /// Errores de validacion local de la sesion (por ejemplo avanzar
    /// de etapa sin completar la accion previa).
    #[error("Error de validacion: {0}")]
    Validation(String),
}

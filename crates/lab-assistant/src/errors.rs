// errors.rs
use thiserror::Error;

/// Errores de la frontera con el servicio generativo.
#[derive(Debug, Error)]
pub enum AssistantError {
  /// Falta la clave de API (GEMINI_API_KEY) al construir el cliente.
  #[error("Falta la clave de API: {0}")]
  MissingApiKey(String),
  /// Error de red/transporte al llamar al servicio.
  #[error("Error de red: {0}")]
  Network(#[from] reqwest::Error),
  /// El servicio respondió con un estado o cuerpo inesperado.
  #[error("Respuesta inesperada del servicio: {0}")]
  Api(String),
  /// Fallo inyectado por un stub (sólo pruebas/desarrollo).
  #[error("Fallo simulado: {0}")]
  Scripted(String),
}

// assistant.rs
use crate::{AssistantError, GeneratedCandidate};
use async_trait::async_trait;

/// Capacidad única que el flujo de descubrimiento consume: generar
/// candidatos, puntuar uno contra el blanco y redactar el resumen del
/// ganador. Las tres operaciones viajan juntas para poder sustituir el
/// servicio completo por un stub determinista en pruebas.
#[async_trait]
pub trait GenerativeAssistant: Send + Sync {
  /// Genera hasta 5 candidatos inspirados en el fármaco de referencia.
  /// Una respuesta imparseable degrada a lista vacía, no a error.
  async fn generate_candidates(&self,
                               reference_drug: &str,
                               target: &str)
                               -> Result<Vec<GeneratedCandidate>, AssistantError>;

  /// Devuelve un score de docking (kcal/mol, más negativo = mejor)
  /// parseado del texto libre del modelo; -7.5 si no hay número.
  async fn score_candidate(&self, name: &str, smiles: &str, target: &str) -> Result<f64, AssistantError>;

  /// Resumen narrativo (texto/markdown) del candidato ganador.
  async fn summarize_candidate(&self,
                               name: &str,
                               smiles: &str,
                               docking_score: f64,
                               target: &str)
                               -> Result<String, AssistantError>;
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Etapas del asistente de descubrimiento, en orden estricto. No hay
/// saltos hacia adelante sin completar la accion de la etapa previa y el
/// unico retroceso permitido es el reset completo a `Selection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStage {
    /// Pseudo-etapa inicial: elegir blanco y farmaco de referencia.
    Selection,
    /// Pantalla de confirmacion; la unica salida dispara la generacion.
    Setup,
    Generation,
    Screening,
    Docking,
    /// Etapa terminal; la unica salida es el reset completo.
    Results,
}

impl DiscoveryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryStage::Selection => "selection",
            DiscoveryStage::Setup => "setup",
            DiscoveryStage::Generation => "generation",
            DiscoveryStage::Screening => "screening",
            DiscoveryStage::Docking => "docking",
            DiscoveryStage::Results => "results",
        }
    }
}

impl fmt::Display for DiscoveryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

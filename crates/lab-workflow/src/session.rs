// Archivo: session.rs
// Propósito: la sesión del asistente como objeto de estado explícito.
//
// Nota: la sesión vive en memoria del cliente (no hay durabilidad del
// lado del servidor). Cada transición es un método que valida la etapa
// actual y devuelve `Result`, de modo que el orden del flujo se puede
// probar sin UI y sin red.
use crate::errors::WorkflowError;
use crate::stage::DiscoveryStage;
use chrono::Utc;
use lab_assistant::GenerativeAssistant;
use lab_domain::{DiscoveryStats, DiscoveryTarget, LabRepository, MoleculeRecord, MoleculeStatus, NewMolecule,
                 NewSimulation, ReferenceDrug};

/// Sesión de descubrimiento: cinco etapas lineales sobre un blanco y un
/// fármaco de referencia elegidos.
///
/// Las llamadas externas de cada etapa se esperan secuencialmente (el
/// docking puntúa de a un candidato por vez para poder mostrar el avance)
/// y ningún resultado se reintenta automáticamente: ante un fallo la
/// sesión queda en la misma etapa con un estado visible y el usuario
/// decide reintentar o resetear.
pub struct DiscoverySession {
    stage: DiscoveryStage,
    target: Option<DiscoveryTarget>,
    reference: Option<ReferenceDrug>,
    candidates: Vec<MoleculeRecord>,
    status_line: String,
    insight: String,
    stats: DiscoveryStats,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self { stage: DiscoveryStage::Selection,
               target: None,
               reference: None,
               candidates: Vec::new(),
               status_line: String::new(),
               insight: String::new(),
               stats: DiscoveryStats::default() }
    }

    pub fn stage(&self) -> DiscoveryStage {
        self.stage
    }

    pub fn target(&self) -> Option<&DiscoveryTarget> {
        self.target.as_ref()
    }

    pub fn reference(&self) -> Option<&ReferenceDrug> {
        self.reference.as_ref()
    }

    pub fn candidates(&self) -> &[MoleculeRecord] {
        &self.candidates
    }

    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    pub fn insight(&self) -> &str {
        &self.insight
    }

    pub fn stats(&self) -> DiscoveryStats {
        self.stats
    }

    fn require_stage(&self, allowed: &[DiscoveryStage], action: &str) -> Result<(), WorkflowError> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(WorkflowError::Validation(format!("no se puede {} desde la etapa '{}'", action, self.stage)))
        }
    }

    fn chosen(&self) -> Result<(DiscoveryTarget, ReferenceDrug), WorkflowError> {
        match (self.target, self.reference) {
            (Some(t), Some(r)) => Ok((t, r)),
            _ => Err(WorkflowError::Validation("falta elegir blanco y fármaco de referencia".to_string())),
        }
    }

    /// Elegir el blanco biológico. Sólo válido en `Selection`.
    pub fn choose_target(&mut self, target: DiscoveryTarget) -> Result<(), WorkflowError> {
        self.require_stage(&[DiscoveryStage::Selection], "elegir blanco")?;
        self.target = Some(target);
        Ok(())
    }

    /// Elegir el fármaco de referencia. Sólo válido en `Selection`.
    pub fn choose_reference(&mut self, reference: ReferenceDrug) -> Result<(), WorkflowError> {
        self.require_stage(&[DiscoveryStage::Selection], "elegir referencia")?;
        self.reference = Some(reference);
        Ok(())
    }

    /// `Selection` → `Setup`. Bloqueado mientras falte alguna elección.
    pub fn enter_lab(&mut self) -> Result<(), WorkflowError> {
        self.require_stage(&[DiscoveryStage::Selection], "entrar al laboratorio")?;
        self.chosen()?;
        self.stage = DiscoveryStage::Setup;
        Ok(())
    }

    /// `Setup` → `Generation`: pide candidatos al servicio generativo y
    /// persiste cada uno con estado `candidate`, capturando los ids que
    /// asigna el almacenamiento. Reinvocable desde `Generation` como
    /// reintento manual; ante un fallo la sesión permanece aquí con un
    /// mensaje visible.
    pub async fn run_generation(&mut self,
                                assistant: &dyn GenerativeAssistant,
                                repo: &dyn LabRepository)
                                -> Result<usize, WorkflowError> {
        self.require_stage(&[DiscoveryStage::Setup, DiscoveryStage::Generation], "generar candidatos")?;
        let (target, reference) = self.chosen()?;
        self.stage = DiscoveryStage::Generation;
        self.status_line = format!("AI is now 'thinking' and creating new chemical structures based on {}...",
                                   reference.name);

        match self.generation_inner(assistant, repo, &target, &reference).await {
            Ok(count) => {
                self.status_line =
                    format!("Success! AI has digitally created {} potential medicine candidates.", count);
                Ok(count)
            }
            Err(e) => {
                self.status_line = "Oops! The digital lab encountered an error.".to_string();
                Err(e)
            }
        }
    }

    async fn generation_inner(&mut self,
                              assistant: &dyn GenerativeAssistant,
                              repo: &dyn LabRepository,
                              target: &DiscoveryTarget,
                              reference: &ReferenceDrug)
                              -> Result<usize, WorkflowError> {
        let generated = assistant.generate_candidates(reference.name, target.name).await?;
        self.candidates.clear();
        for g in &generated {
            let new_molecule = NewMolecule { smiles: g.smiles.clone(),
                                             name: Some(g.name.clone()),
                                             molecular_weight: Some(g.molecular_weight),
                                             logp: Some(g.logp),
                                             h_bond_donors: Some(g.h_bond_donors),
                                             h_bond_acceptors: Some(g.h_bond_acceptors),
                                             admet_score: Some(g.admet_score),
                                             docking_score: None,
                                             description: Some(g.description.clone()),
                                             status: MoleculeStatus::Candidate };
            let id = repo.insert_molecule(&new_molecule)?;
            self.candidates.push(MoleculeRecord { id,
                                                  smiles: new_molecule.smiles,
                                                  name: new_molecule.name,
                                                  molecular_weight: new_molecule.molecular_weight,
                                                  logp: new_molecule.logp,
                                                  h_bond_donors: new_molecule.h_bond_donors,
                                                  h_bond_acceptors: new_molecule.h_bond_acceptors,
                                                  admet_score: new_molecule.admet_score,
                                                  docking_score: None,
                                                  description: new_molecule.description,
                                                  status: MoleculeStatus::Candidate,
                                                  created_at_ts: Utc::now().timestamp_millis() });
        }
        self.stats = repo.compute_stats()?;
        Ok(self.candidates.len())
    }

    /// `Generation` → `Screening`: marca todos los candidatos en memoria
    /// como `screened`. El cambio de estado es advisory y NO se persiste
    /// (las filas del almacenamiento sólo se insertan o se borran en
    /// bloque, nunca se actualizan). La demora simulada de la etapa es
    /// asunto de la UI, no de la sesión.
    pub fn run_screening(&mut self) -> Result<(), WorkflowError> {
        self.require_stage(&[DiscoveryStage::Generation], "correr el screening")?;
        if self.candidates.is_empty() {
            return Err(WorkflowError::Validation("no hay candidatos generados para filtrar".to_string()));
        }
        self.stage = DiscoveryStage::Screening;
        for c in &mut self.candidates {
            c.status = MoleculeStatus::Screened;
        }
        self.status_line =
            "Safety check complete. All candidates are 'drug-like' and passed the first test.".to_string();
        Ok(())
    }

    /// `Screening` → `Docking` → `Results`: puntúa cada candidato en el
    /// orden original, uno por vez; ordena ascendente por score (más
    /// negativo liga mejor, así el ganador queda primero); persiste un
    /// registro de simulación referenciando al ganador; pide el resumen
    /// narrativo del ganador y refresca los agregados.
    ///
    /// Cualquier fallo de scoring o del resumen es fatal para la etapa:
    /// la sesión queda en `Docking` con el error visible y se puede
    /// reinvocar (vuelve a puntuar todo).
    pub async fn run_docking(&mut self,
                             assistant: &dyn GenerativeAssistant,
                             repo: &dyn LabRepository)
                             -> Result<MoleculeRecord, WorkflowError> {
        self.require_stage(&[DiscoveryStage::Screening, DiscoveryStage::Docking], "correr el docking")?;
        if self.candidates.is_empty() {
            return Err(WorkflowError::Validation("no hay candidatos filtrados para el docking".to_string()));
        }
        let (target, reference) = self.chosen()?;
        self.stage = DiscoveryStage::Docking;

        match self.docking_inner(assistant, repo, &target, &reference).await {
            Ok(winner) => {
                self.stage = DiscoveryStage::Results;
                self.status_line = "Simulation finished. We found a potential winner!".to_string();
                Ok(winner)
            }
            Err(e) => {
                self.status_line = "Oops! The digital lab encountered an error.".to_string();
                Err(e)
            }
        }
    }

    async fn docking_inner(&mut self,
                           assistant: &dyn GenerativeAssistant,
                           repo: &dyn LabRepository,
                           target: &DiscoveryTarget,
                           reference: &ReferenceDrug)
                           -> Result<MoleculeRecord, WorkflowError> {
        for i in 0..self.candidates.len() {
            let name = self.candidates[i].display_name().to_string();
            let smiles = self.candidates[i].smiles.clone();
            self.status_line = format!("Testing {} against the target...", name);
            log::info!("docking {} contra {}", name, target.name);
            let score = assistant.score_candidate(&name, &smiles, target.name).await?;
            self.candidates[i].docking_score = Some(score);
            self.candidates[i].status = MoleculeStatus::Docked;
        }

        self.candidates
            .sort_by(|a, b| a.docking_score.unwrap_or(0.0).total_cmp(&b.docking_score.unwrap_or(0.0)));
        let winner = self.candidates[0].clone();

        repo.insert_simulation(&NewSimulation { target_protein: Some(target.name.to_string()),
                                                reference_drug: Some(reference.name.to_string()),
                                                molecules_generated: Some(self.candidates.len() as i32),
                                                top_candidate_id: Some(winner.id) })?;

        self.insight = assistant.summarize_candidate(winner.display_name(),
                                                     &winner.smiles,
                                                     winner.docking_score.unwrap_or(0.0),
                                                     target.name)
                                .await?;
        self.stats = repo.compute_stats()?;
        Ok(winner)
    }

    /// Reset completo desde cualquier etapa: vuelve a `Selection` con la
    /// selección, los candidatos, el resumen y el estado en blanco.
    /// Refresca los agregados pero NO llama al reset del almacenamiento;
    /// un fallo al refrescar se tolera y queda en el log. Sin fencing de
    /// llamadas en vuelo: un resultado tardío simplemente se descarta.
    pub fn reset(&mut self, repo: &dyn LabRepository) {
        self.stage = DiscoveryStage::Selection;
        self.target = None;
        self.reference = None;
        self.candidates.clear();
        self.insight.clear();
        self.status_line.clear();
        match repo.compute_stats() {
            Ok(stats) => self.stats = stats,
            Err(e) => log::warn!("no se pudieron refrescar los agregados tras el reset: {}", e),
        }
    }
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}

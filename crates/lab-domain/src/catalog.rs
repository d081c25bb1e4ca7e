// catalog.rs
//
// Catálogo estático de blancos biológicos y fármacos de referencia para la
// etapa de selección del asistente. No se persiste; es material de la UI.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiscoveryTarget {
  pub id: &'static str,
  pub name: &'static str,
  pub common_name: &'static str,
  pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceDrug {
  pub id: &'static str,
  pub name: &'static str,
  pub category: &'static str,
  pub description: &'static str,
}

pub const TARGETS: &[DiscoveryTarget] = &[
  DiscoveryTarget {
    id: "pf_dhfr",
    name: "Plasmodium falciparum DHFR",
    common_name: "Malaria Parasite Enzyme",
    description: "An essential enzyme the malaria parasite needs to multiply. Blocking this stops the infection.",
  },
  DiscoveryTarget {
    id: "sars_cov_2_mpro",
    name: "SARS-CoV-2 Main Protease (Mpro)",
    common_name: "COVID-19 Virus Replication Tool",
    description: "A key protein the COVID-19 virus uses to cut other proteins and replicate itself.",
  },
  DiscoveryTarget {
    id: "hiv_1_protease",
    name: "HIV-1 Protease",
    common_name: "HIV Virus Assembly Tool",
    description: "The 'scissors' the HIV virus uses to create mature, infectious virus particles.",
  },
  DiscoveryTarget {
    id: "egfr_kinase",
    name: "EGFR Kinase Domain",
    common_name: "Cancer Growth Signal",
    description: "A protein that, when overactive, tells cancer cells to grow and divide uncontrollably.",
  },
];

pub const REFERENCE_DRUGS: &[ReferenceDrug] = &[
  ReferenceDrug {
    id: "chloroquine",
    name: "Chloroquine",
    category: "Antimalarial",
    description: "A classic drug used to treat malaria by interfering with the parasite's waste disposal.",
  },
  ReferenceDrug {
    id: "remdesivir",
    name: "Remdesivir",
    category: "Antiviral",
    description: "An antiviral drug that mimics genetic material to confuse and stop virus replication.",
  },
  ReferenceDrug {
    id: "ritonavir",
    name: "Ritonavir",
    category: "Protease Inhibitor",
    description: "A drug that blocks the 'scissors' proteins used by viruses like HIV.",
  },
  ReferenceDrug {
    id: "gefitinib",
    name: "Gefitinib",
    category: "Kinase Inhibitor",
    description: "A targeted therapy that blocks growth signals in certain types of lung cancer.",
  },
];

use serde::Serialize;

use super::model::{TMEntry, Tier};
use crate::model::segment::Segment;

/// Desfecho da resolução. Um conjunto vazio de candidatos é um resultado
/// válido ("não popular"), nunca um erro.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    NoCandidate,
    SingleMatch { entry: TMEntry },
    AmbiguousThenResolved { entry: TMEntry },
}

impl Resolution {
    pub fn entry(&self) -> Option<&TMEntry> {
        match self {
            Resolution::NoCandidate => None,
            Resolution::SingleMatch { entry } | Resolution::AmbiguousThenResolved { entry } => {
                Some(entry)
            }
        }
    }
}

/// Aplica a cascata de política sobre os conjuntos ICE/exact já
/// classificados. O guard terminal (tradução com contexto) é responsabilidade
/// do chamador: aqui todo segmento é elegível.
pub fn resolve(segment: &Segment, ice: &[&TMEntry], exact: &[&TMEntry]) -> Resolution {
    let found = candidates(segment, ice, exact);

    match found.len() {
        0 => Resolution::NoCandidate,
        1 => Resolution::SingleMatch {
            entry: found[0].clone(),
        },
        _ => Resolution::AmbiguousThenResolved {
            entry: narrow(found).clone(),
        },
    }
}

/// Primeira regra com resultado não vazio vence:
/// ICE+enforce, ICE+auto, exact+enforce e, para segmento não traduzido,
/// exact+auto.
fn candidates<'a>(
    segment: &Segment,
    ice: &[&'a TMEntry],
    exact: &[&'a TMEntry],
) -> Vec<&'a TMEntry> {
    if !segment.has_context {
        let enforce_ice = filter_by_tier(ice, Tier::Enforce);
        if !enforce_ice.is_empty() {
            return enforce_ice;
        }

        let auto_ice = filter_by_tier(ice, Tier::Auto);
        if !auto_ice.is_empty() {
            return auto_ice;
        }

        let enforce_exact = filter_by_tier(exact, Tier::Enforce);
        if !enforce_exact.is_empty() {
            return enforce_exact;
        }
    }

    if !segment.is_translated {
        let auto_exact = filter_by_tier(exact, Tier::Auto);
        if !auto_exact.is_empty() {
            return auto_exact;
        }
    }

    Vec::new()
}

/// Filtro por tier com fallback: sem nenhuma entrada marcada com o prefixo,
/// o conjunto volta inalterado (o filtro é preferência, não exclusão).
fn filter_by_tier<'a>(matches: &[&'a TMEntry], tier: Tier) -> Vec<&'a TMEntry> {
    let tiered: Vec<&TMEntry> = matches
        .iter()
        .copied()
        .filter(|e| e.in_tier(tier))
        .collect();

    if !tiered.is_empty() {
        return tiered;
    }

    matches.to_vec()
}

/// Desempate determinístico: menor filepath lexicográfico, depois menor
/// posição dentro do recurso.
fn narrow<'a>(mut found: Vec<&'a TMEntry>) -> &'a TMEntry {
    found.sort_by(|a, b| {
        (a.filepath.as_str(), a.position).cmp(&(b.filepath.as_str(), b.position))
    });
    found[0]
}

use std::path::Path;

use serde::Serialize;

use crate::model::segment::Segment;
use crate::services::translation_memory::model::TMEntry;
use crate::services::translation_memory::ranking::{self, RankedMatch};
use crate::services::translation_memory::resolver::{self, Resolution};
use crate::services::translation_memory::{classifier, store};

pub struct MatchConfig<'a> {
    pub tm_root: &'a Path,
    pub limit: usize,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MatchReport {
    pub resolution: Resolution,
    pub matches: Vec<RankedMatch>,
    pub total_entries: usize,
}

/// Avaliação completa de um segmento contra a TM em disco: guard terminal,
/// carga, classificação, resolução e shortlist.
pub fn run(segment: &Segment, cfg: MatchConfig) -> MatchReport {
    if segment.keeps_existing_translation() {
        // A resolução nem roda: a TM não é consultada.
        return MatchReport {
            resolution: Resolution::NoCandidate,
            matches: Vec::new(),
            total_entries: 0,
        };
    }

    let entries = store::load_all(cfg.tm_root);
    evaluate(segment, &entries, cfg.limit)
}

/// Decisão + shortlist sobre uma coleção já materializada. A decisão e o topo
/// do ranking têm que concordar; divergência é bug na cascata de pesos e
/// derruba o processo.
pub fn evaluate(segment: &Segment, entries: &[TMEntry], limit: usize) -> MatchReport {
    let limit = limit.max(1);

    let (ice, exact) = classifier::classify(segment, entries);
    let resolution = resolver::resolve(segment, &ice, &exact);
    let matches = ranking::rank(segment, entries, limit);

    if let Some(chosen) = resolution.entry() {
        let top = matches.first().map(|m| &m.entry);
        assert_eq!(
            top,
            Some(chosen),
            "resolver and ranking disagree on the top match"
        );
    }

    MatchReport {
        resolution,
        matches,
        total_entries: entries.len(),
    }
}

use serde::Serialize;

use super::classifier;
use super::model::TMEntry;
use super::similarity;
use crate::model::segment::Segment;

pub const DEFAULT_LIMIT: usize = 10;

/// Entrada anotada para revisão. A entrada original fica intacta: a cópia
/// carrega os campos derivados.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RankedMatch {
    pub score: u32,
    pub binding: bool,
    pub weight: u8,
    pub entry: TMEntry,
}

/// Ordena a coleção inteira pela chave composta: score desc, binding desc,
/// weight desc, filepath asc, position asc. Trunca em `limit`.
pub fn rank(segment: &Segment, entries: &[TMEntry], limit: usize) -> Vec<RankedMatch> {
    let mut ranked: Vec<RankedMatch> = entries
        .iter()
        .map(|e| RankedMatch {
            score: similarity::score(&segment.source_text, &e.source_sentence),
            binding: classifier::is_context_match(segment, e),
            weight: e.population_weight(),
            entry: e.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.binding.cmp(&a.binding))
            .then_with(|| b.weight.cmp(&a.weight))
            .then_with(|| a.entry.filepath.cmp(&b.entry.filepath))
            .then_with(|| a.entry.position.cmp(&b.entry.position))
    });

    ranked.truncate(limit);
    ranked
}

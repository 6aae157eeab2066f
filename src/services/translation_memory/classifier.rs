use super::model::TMEntry;
use crate::model::segment::Segment;

/// Match "in-context exact": mesmo texto, na mesma unidade do mesmo documento.
pub fn is_context_match(segment: &Segment, entry: &TMEntry) -> bool {
    entry.source_sentence == segment.source_text
        && entry.id == segment.id
        && entry.file == segment.file
}

pub fn is_exact_match(segment: &Segment, entry: &TMEntry) -> bool {
    entry.source_sentence == segment.source_text
}

pub fn classify<'a>(
    segment: &Segment,
    entries: &'a [TMEntry],
) -> (Vec<&'a TMEntry>, Vec<&'a TMEntry>) {
    let ice = entries
        .iter()
        .filter(|e| is_context_match(segment, e))
        .collect();

    let exact = entries
        .iter()
        .filter(|e| is_exact_match(segment, e))
        .collect();

    (ice, exact)
}

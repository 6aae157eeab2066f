use std::collections::HashSet;

use serde::Serialize;

use crate::services::translation_memory::model::TMEntry;

#[derive(Debug, Serialize)]
pub struct QaIssue {
    pub filepath: String,
    pub position: usize,
    pub code: String,
    pub message: String,
}

/// Auditoria da coleção carregada: aponta registros que degradam o match.
pub fn run(entries: &[TMEntry]) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();
    let mut seen: HashSet<(&str, usize)> = HashSet::new();

    for e in entries {
        let source_trim = e.source_sentence.trim();
        let target_trim = e.target_sentence.trim();

        if source_trim.is_empty() {
            issues.push(issue(e, "EMPTY_SOURCE", "Entrada sem texto de origem"));
        }

        if target_trim.is_empty() {
            issues.push(issue(e, "EMPTY_TARGET", "Entrada sem tradução armazenada"));
        }

        if !target_trim.is_empty() && target_trim == source_trim {
            issues.push(issue(
                e,
                "SAME_AS_SOURCE",
                "Tradução idêntica ao texto de origem",
            ));
        }

        // Sem id/file a entrada nunca participa de match ICE
        if e.id.trim().is_empty() {
            issues.push(issue(
                e,
                "MISSING_ID",
                "Entrada sem identificador de unidade de tradução",
            ));
        }

        if e.file.trim().is_empty() {
            issues.push(issue(e, "MISSING_FILE", "Entrada sem documento de origem"));
        }

        if !seen.insert((e.filepath.as_str(), e.position)) {
            issues.push(issue(
                e,
                "DUPLICATE_POSITION",
                "Posição repetida dentro do mesmo recurso",
            ));
        }
    }

    issues
}

fn issue(e: &TMEntry, code: &str, message: &str) -> QaIssue {
    QaIssue {
        filepath: e.filepath.clone(),
        position: e.position,
        code: code.to_string(),
        message: message.to_string(),
    }
}

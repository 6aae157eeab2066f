use std::fs;
use std::path::Path;

use super::model::TMEntry;
use crate::parsers::tmx;
use crate::services::encoding;

pub const DEFAULT_TM_ROOT: &str = "tm";

/// Carrega todas as entradas de todos os recursos `*.tmx` sob a raiz da TM.
/// Recurso ilegível ou malformado é pulado; a carga nunca aborta inteira.
pub fn load_all(tm_root: &Path) -> Vec<TMEntry> {
    let pattern = format!("{}/**/*.tmx", tm_root.display());

    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("[TM] invalid glob pattern {pattern}: {e}");
            return Vec::new();
        }
    };

    // Ordem de carga estável independente do filesystem
    let mut files: Vec<_> = paths.flatten().collect();
    files.sort();

    let mut entries: Vec<TMEntry> = Vec::new();

    for path in files {
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("[TM] failed to read {}: {e}", path.display());
                continue;
            }
        };

        let decoded = encoding::decode_bytes(&bytes);
        if decoded.had_errors {
            eprintln!(
                "[TM] {} decoded as {} with replacement characters",
                path.display(),
                decoded.encoding
            );
        }

        let filepath = resource_path(&path, tm_root);

        match tmx::parse(&decoded.text, &filepath) {
            Ok(mut parsed) => entries.append(&mut parsed),
            Err(e) => {
                eprintln!("[TM] skipping {}: {e}", path.display());
            }
        }
    }

    entries
}

/// Caminho do recurso relativo à raiz, com "/" como separador em qualquer
/// plataforma (o prefixo de tier é comparado contra esse formato).
fn resource_path(path: &Path, tm_root: &Path) -> String {
    let rel = path.strip_prefix(tm_root).unwrap_or(path);
    let s = rel.to_string_lossy();

    if std::path::MAIN_SEPARATOR == '/' {
        s.into_owned()
    } else {
        s.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

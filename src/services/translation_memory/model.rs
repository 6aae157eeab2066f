use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TMEntry {
    pub source_language: String,
    pub target_language: String,

    pub source_sentence: String,
    pub target_sentence: String,

    pub id: String,

    pub file: String,

    /// Caminho do recurso relativo à raiz da TM, sempre com separador "/".
    pub filepath: String,

    /// Ordinal da unidade dentro do recurso de origem.
    pub position: usize,
}

/// Camada de autoridade do recurso, codificada no prefixo do caminho.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Enforce,
    Auto,
}

impl Tier {
    pub fn prefix(self) -> &'static str {
        match self {
            Tier::Enforce => "enforce/",
            Tier::Auto => "auto/",
        }
    }

    pub fn weight(self) -> u8 {
        match self {
            Tier::Enforce => 2,
            Tier::Auto => 1,
        }
    }
}

impl TMEntry {
    pub fn in_tier(&self, tier: Tier) -> bool {
        self.filepath.starts_with(tier.prefix())
    }

    /// Peso de auto-população: 2 = enforce, 1 = auto, 0 = apenas referência.
    pub fn population_weight(&self) -> u8 {
        if self.in_tier(Tier::Enforce) {
            Tier::Enforce.weight()
        } else if self.in_tier(Tier::Auto) {
            Tier::Auto.weight()
        } else {
            0
        }
    }
}

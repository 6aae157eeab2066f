use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Segment {
    pub source_lang: String,

    pub source_text: String,

    pub id: String,

    pub file: String,

    #[serde(default)]
    pub section: String,

    #[serde(default)]
    pub is_translated: bool,

    #[serde(default)]
    pub has_context: bool,
}

impl Segment {
    /// Tradução existente feita com consciência de contexto nunca é trocada.
    pub fn keeps_existing_translation(&self) -> bool {
        self.is_translated && self.has_context
    }
}

use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::services::translation_memory::model::TMEntry;

/// Tipos de <prop> aceitos para o documento de origem de uma <tu>.
const FILE_PROPS: [&str; 2] = ["x-file", "file"];

/// Lê um recurso TMX já decodificado e produz as entradas dele, na ordem do
/// arquivo. `filepath` é gravado em cada entrada; `position` é o ordinal da
/// <tu> dentro do recurso.
///
/// Forma reconhecida: <header srclang>, <tu tuid> com <prop type="x-file">
/// e duas ou mais <tuv xml:lang>, cada uma com um <seg>. A variante no idioma
/// do header é a fonte; a primeira das demais é o alvo. Uma <tu> com menos de
/// duas variantes é registro malformado e invalida o recurso inteiro.
pub fn parse(text: &str, filepath: &str) -> Result<Vec<TMEntry>, String> {
    let mut reader = Reader::from_str(text);

    let mut entries: Vec<TMEntry> = Vec::new();

    let mut srclang = String::new();

    // estado da <tu> corrente
    let mut in_tu = false;
    let mut tuid = String::new();
    let mut file = String::new();
    let mut variants: Vec<(String, String)> = Vec::new();

    let mut prop_type: Option<String> = None;
    let mut tuv_lang = String::new();
    let mut in_seg = false;
    let mut seg_text = String::new();

    loop {
        match reader.read_event() {
            Err(e) => {
                return Err(format!(
                    "xml error at byte {}: {e}",
                    reader.buffer_position()
                ))
            }
            Ok(Event::Eof) => break,

            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"header" => {
                    srclang = attr(&e, "srclang")?.unwrap_or_default();
                }
                b"tu" => {
                    in_tu = true;
                    tuid = attr(&e, "tuid")?.unwrap_or_default();
                    file.clear();
                    variants.clear();
                }
                b"prop" if in_tu => {
                    prop_type = attr(&e, "type")?;
                }
                b"tuv" if in_tu => {
                    tuv_lang = match attr(&e, "xml:lang")? {
                        Some(lang) => lang,
                        None => attr(&e, "lang")?.unwrap_or_default(),
                    };
                }
                b"seg" if in_tu => {
                    in_seg = true;
                    seg_text.clear();
                }
                _ => {}
            },

            Ok(Event::Empty(e)) => {
                if e.name().as_ref() == b"header" {
                    srclang = attr(&e, "srclang")?.unwrap_or_default();
                }
            }

            Ok(Event::Text(t)) => {
                let content = t.xml_content().map_err(|e| e.to_string())?;
                if in_seg {
                    seg_text.push_str(&content);
                } else if let Some(p) = prop_type.as_deref() {
                    if FILE_PROPS.contains(&p) {
                        file = content.into_owned();
                    }
                }
            }

            Ok(Event::GeneralRef(r)) => {
                let name = r.decode().map_err(|e| e.to_string())?;
                let resolved: String = if let Some(ch) =
                    r.resolve_char_ref().map_err(|e| e.to_string())?
                {
                    ch.to_string()
                } else if let Some(s) = resolve_xml_entity(&name) {
                    s.to_string()
                } else {
                    // entidade desconhecida: preserva a forma original &name;
                    format!("&{name};")
                };
                if in_seg {
                    seg_text.push_str(&resolved);
                } else if let Some(p) = prop_type.as_deref() {
                    if FILE_PROPS.contains(&p) {
                        file.push_str(&resolved);
                    }
                }
            }

            Ok(Event::CData(t)) => {
                if in_seg {
                    seg_text.push_str(&String::from_utf8_lossy(&t));
                }
            }

            Ok(Event::End(e)) => match e.name().as_ref() {
                b"prop" => prop_type = None,
                b"seg" => {
                    if in_seg {
                        in_seg = false;
                        variants.push((tuv_lang.clone(), seg_text.clone()));
                    }
                }
                b"tu" => {
                    in_tu = false;
                    let entry =
                        build_entry(&srclang, &tuid, &file, &variants, filepath, entries.len())?;
                    entries.push(entry);
                }
                _ => {}
            },

            Ok(_) => {}
        }
    }

    Ok(entries)
}

fn build_entry(
    srclang: &str,
    tuid: &str,
    file: &str,
    variants: &[(String, String)],
    filepath: &str,
    position: usize,
) -> Result<TMEntry, String> {
    if variants.len() < 2 {
        return Err(format!(
            "translation unit {tuid:?} has {} variant(s), need source and target",
            variants.len()
        ));
    }

    let source_idx = variants
        .iter()
        .position(|(lang, _)| !srclang.is_empty() && lang.eq_ignore_ascii_case(srclang))
        .unwrap_or(0);
    let target_idx = if source_idx == 0 { 1 } else { 0 };

    let (source_language, source_sentence) = variants[source_idx].clone();
    let (target_language, target_sentence) = variants[target_idx].clone();

    Ok(TMEntry {
        source_language,
        target_language,
        source_sentence,
        target_sentence,
        id: tuid.to_string(),
        file: file.to_string(),
        filepath: filepath.to_string(),
        position,
    })
}

fn attr(e: &BytesStart, name: &str) -> Result<Option<String>, String> {
    match e.try_get_attribute(name) {
        Ok(Some(a)) => a
            .unescape_value()
            .map(|v| Some(v.into_owned()))
            .map_err(|err| err.to_string()),
        Ok(None) => Ok(None),
        Err(err) => Err(err.to_string()),
    }
}

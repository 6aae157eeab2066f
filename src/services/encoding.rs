use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug)]
pub struct DecodedText {
    pub text: String,
    pub encoding: String,
    pub had_errors: bool,
}

/// Decodifica bytes de um recurso de TM. BOM presente vale mais que qualquer
/// heurística; sem BOM, chardetng decide. Recursos de ferramentas CAT chegam
/// em utf-8, utf-16 e ocasionalmente encodings legados.
pub fn decode_bytes(bytes: &[u8]) -> DecodedText {
    let encoding = match Encoding::for_bom(bytes) {
        Some((encoding, _bom_len)) => encoding,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(bytes, true);
            detector.guess(None, true)
        }
    };

    // decode() consome o BOM quando ele corresponde ao encoding
    let (text, used, had_errors) = encoding.decode(bytes);

    DecodedText {
        text: text.into_owned(),
        encoding: used.name().to_lowercase(),
        had_errors,
    }
}

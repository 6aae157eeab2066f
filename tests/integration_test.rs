use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use memoria_core::model::segment::Segment;
use memoria_core::protocol;
use memoria_core::services::pipeline::{self, MatchConfig};
use memoria_core::services::qa;
use memoria_core::services::translation_memory::resolver::Resolution;
use memoria_core::services::translation_memory::store;

fn segment(text: &str, is_translated: bool, has_context: bool) -> Segment {
    Segment {
        source_lang: "en".to_string(),
        source_text: text.to_string(),
        id: "tu2_0".to_string(),
        file: "batch/S24030067.html".to_string(),
        section: "item2".to_string(),
        is_translated,
        has_context,
    }
}

fn tmx(units: &[(&str, &str, &str, &str)]) -> String {
    let mut body = String::new();
    for (tuid, file, source, target) in units {
        body.push_str(&format!(
            "<tu tuid=\"{tuid}\">\
             <prop type=\"x-file\">{file}</prop>\
             <tuv xml:lang=\"en\"><seg>{source}</seg></tuv>\
             <tuv xml:lang=\"pt-BR\"><seg>{target}</seg></tuv>\
             </tu>"
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\
         <tmx version=\"1.4\"><header srclang=\"en\" datatype=\"plaintext\"/>\
         <body>{body}</body></tmx>"
    )
}

fn write_resource(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Árvore padrão dos testes: um recurso enforce e um auto com a mesma
/// unidade, mais um recurso de referência com texto só parecido.
fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write_resource(
        root,
        "enforce/x.tmx",
        &tmx(&[("tu2_0", "batch/S24030067.html", "FOO", "BAR enforce")]),
    );
    write_resource(
        root,
        "auto/y.tmx",
        &tmx(&[
            ("tu1_0", "batch/S24030067.html", "HELLO", "OLÁ"),
            ("tu2_0", "batch/S24030067.html", "FOO", "BAR auto"),
        ]),
    );
    write_resource(
        root,
        "reference/z.tmx",
        &tmx(&[("tu9_9", "other.html", "FOX", "RAPOSA")]),
    );

    dir
}

#[test]
fn store_tags_entries_with_relative_path_and_ordinal() {
    let dir = sample_tree();
    let entries = store::load_all(dir.path());

    assert_eq!(entries.len(), 4);

    let auto: Vec<_> = entries
        .iter()
        .filter(|e| e.filepath == "auto/y.tmx")
        .collect();
    assert_eq!(auto.len(), 2);
    assert_eq!(auto[0].position, 0);
    assert_eq!(auto[1].position, 1);
    assert_eq!(auto[1].source_sentence, "FOO");
    assert_eq!(auto[1].target_sentence, "BAR auto");
}

#[test]
fn store_skips_malformed_resources() {
    let dir = sample_tree();
    write_resource(dir.path(), "auto/broken.tmx", "<tmx><body><tu tuid=\"a\"");

    let entries = store::load_all(dir.path());
    assert_eq!(entries.len(), 4);
    assert!(entries.iter().all(|e| e.filepath != "auto/broken.tmx"));
}

#[test]
fn store_reads_utf16_resources() {
    let dir = sample_tree();

    let content = tmx(&[("tu5_0", "batch/S24030067.html", "UTF16", "UTF-DEZESSEIS")]);
    let mut bytes = vec![0xFF, 0xFE];
    for unit in content.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    fs::create_dir_all(dir.path().join("reference")).unwrap();
    fs::write(dir.path().join("reference/utf16.tmx"), bytes).unwrap();

    let entries = store::load_all(dir.path());
    let found = entries
        .iter()
        .find(|e| e.filepath == "reference/utf16.tmx")
        .expect("utf16 resource should load");
    assert_eq!(found.source_sentence, "UTF16");
}

#[test]
fn enforce_beats_auto_for_ice_matches() {
    // Cenário de referência: mesma unidade nos tiers enforce e auto.
    let dir = sample_tree();

    let report = pipeline::run(
        &segment("FOO", true, false),
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );

    let chosen = report.resolution.entry().expect("should resolve");
    assert_eq!(chosen.filepath, "enforce/x.tmx");
    assert_eq!(chosen.target_sentence, "BAR enforce");

    // o topo da shortlist, sem os campos derivados, é a mesma entrada
    assert_eq!(&report.matches[0].entry, chosen);
}

#[test]
fn untranslated_segment_takes_auto_exact_match() {
    let dir = sample_tree();

    // HELLO só existe no recurso auto, em outra unidade (match exact, não ICE)
    let mut seg = segment("HELLO", false, false);
    seg.id = "tu7_7".to_string();
    seg.file = "batch/S24030099.html".to_string();

    let report = pipeline::run(
        &seg,
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );

    let chosen = report.resolution.entry().expect("should resolve");
    assert_eq!(chosen.filepath, "auto/y.tmx");
    assert_eq!(chosen.source_sentence, "HELLO");
    assert_eq!(&report.matches[0].entry, chosen);
}

#[test]
fn unmatched_text_yields_no_candidate_but_still_a_shortlist() {
    let dir = sample_tree();

    let report = pipeline::run(
        &segment("FOZ", false, false),
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );

    assert_eq!(report.resolution, Resolution::NoCandidate);
    assert!(!report.matches.is_empty());
    // similaridade ainda ordena a revisão: FOO e FOX na frente
    assert!(report.matches[0].score > report.matches.last().unwrap().score);
}

#[test]
fn guarded_segment_is_left_alone() {
    let dir = sample_tree();

    let report = pipeline::run(
        &segment("FOO", true, true),
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );

    assert_eq!(report.resolution, Resolution::NoCandidate);
    assert!(report.matches.is_empty());
    assert_eq!(report.total_entries, 0);
}

#[test]
fn resolver_agrees_with_ranking_across_segments() {
    let dir = sample_tree();
    let entries = store::load_all(dir.path());

    let segments = vec![
        segment("FOO", true, false),
        segment("FOO", false, false),
        segment("HELLO", false, false),
        segment("FOX", false, false),
        segment("ZZZ", false, false),
    ];

    for seg in segments {
        let report = pipeline::evaluate(&seg, &entries, 10);
        if let Some(chosen) = report.resolution.entry() {
            assert_eq!(
                &report.matches[0].entry, chosen,
                "divergence for {:?}",
                seg.source_text
            );
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let dir = sample_tree();

    let seg = segment("FOO", false, false);
    let first = pipeline::run(
        &seg,
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );
    let second = pipeline::run(
        &seg,
        MatchConfig {
            tm_root: dir.path(),
            limit: 10,
        },
    );

    assert_eq!(first, second);
}

#[test]
fn qa_flags_degenerate_entries() {
    let dir = sample_tree();
    write_resource(
        dir.path(),
        "auto/suspect.tmx",
        &tmx(&[("tu8_0", "batch/S24030067.html", "SAME", "SAME")]),
    );

    let entries = store::load_all(dir.path());
    let issues = qa::run(&entries);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "SAME_AS_SOURCE");
    assert_eq!(issues[0].filepath, "auto/suspect.tmx");
}

#[test]
fn protocol_match_reports_resolution_and_shortlist() {
    let dir = sample_tree();

    let req = serde_json::json!({
        "cmd": "tm.match",
        "id": 7,
        "payload": {
            "tm_root": dir.path().to_string_lossy(),
            "limit": 3,
            "segment": {
                "source_lang": "en",
                "source_text": "FOO",
                "id": "tu2_0",
                "file": "batch/S24030067.html",
                "section": "item2",
                "is_translated": true,
                "has_context": false
            }
        }
    });

    let resp: Value = serde_json::from_str(&protocol::handle(&req.to_string())).unwrap();

    assert_eq!(resp["status"], "ok");
    let report = &resp["payload"]["report"];
    assert_eq!(report["resolution"]["outcome"], "single_match");
    assert_eq!(report["resolution"]["entry"]["filepath"], "enforce/x.tmx");
    assert_eq!(report["matches"].as_array().unwrap().len(), 3);
    assert_eq!(report["matches"][0]["score"], 100);
    assert_eq!(report["matches"][0]["binding"], true);
    assert_eq!(report["matches"][0]["weight"], 2);
    assert_eq!(report["total_entries"], 4);
}

#[test]
fn protocol_shortlist_ranks_without_deciding() {
    let dir = sample_tree();

    let req = serde_json::json!({
        "cmd": "tm.shortlist",
        "id": 8,
        "payload": {
            "tm_root": dir.path().to_string_lossy(),
            "segment": {
                "source_lang": "en",
                "source_text": "FOX",
                "id": "tu0_0",
                "file": "none.html"
            }
        }
    });

    let resp: Value = serde_json::from_str(&protocol::handle(&req.to_string())).unwrap();

    assert_eq!(resp["status"], "ok");
    let matches = resp["payload"]["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0]["entry"]["source_sentence"], "FOX");
}

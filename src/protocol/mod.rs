use std::path::PathBuf;

use serde_json::{json, Value};

use crate::model::segment::Segment;
use crate::services::translation_memory::{classifier, ranking, resolver, store};
use crate::services::{pipeline, qa};

mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload<'a>(req: &'a Value) -> &'a Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn parse_segment_from_payload(payload: &Value) -> Result<Segment, String> {
    let seg_val = payload.get("segment").cloned().unwrap_or(Value::Null);
    if seg_val.is_null() {
        return Err("payload.segment is required".to_string());
    }

    serde_json::from_value(seg_val).map_err(|e| format!("invalid payload.segment: {e}"))
}

fn get_tm_root(payload: &Value) -> PathBuf {
    let root = payload
        .get("tm_root")
        .and_then(|v| v.as_str())
        .unwrap_or(store::DEFAULT_TM_ROOT);
    PathBuf::from(root)
}

fn get_limit(payload: &Value) -> usize {
    payload
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(ranking::DEFAULT_LIMIT)
}

pub fn handle(input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let payload = get_payload(&req);

    match Command::from(get_cmd(&req)) {
        Command::Ping => ok(id, json!({ "message": "memoria-core alive" })),

        Command::TmResolve => {
            let segment = match parse_segment_from_payload(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            // Guard terminal: tradução com contexto não é tocada e a TM nem
            // é carregada.
            if segment.keeps_existing_translation() {
                return ok(
                    id,
                    json!({
                        "resolution": resolver::Resolution::NoCandidate,
                        "kept_existing": true
                    }),
                );
            }

            let entries = store::load_all(&get_tm_root(payload));
            let (ice, exact) = classifier::classify(&segment, &entries);
            let resolution = resolver::resolve(&segment, &ice, &exact);

            ok(
                id,
                json!({
                    "resolution": resolution,
                    "total_entries": entries.len()
                }),
            )
        }

        Command::TmShortlist => {
            let segment = match parse_segment_from_payload(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            let entries = store::load_all(&get_tm_root(payload));
            let matches = ranking::rank(&segment, &entries, get_limit(payload).max(1));

            ok(
                id,
                json!({
                    "matches": matches,
                    "total_entries": entries.len()
                }),
            )
        }

        Command::TmMatch => {
            let segment = match parse_segment_from_payload(payload) {
                Ok(s) => s,
                Err(e) => return err(id, e),
            };

            let tm_root = get_tm_root(payload);
            let cfg = pipeline::MatchConfig {
                tm_root: &tm_root,
                limit: get_limit(payload),
            };

            let report = pipeline::run(&segment, cfg);
            ok(id, json!({ "report": report }))
        }

        Command::TmQa => {
            let entries = store::load_all(&get_tm_root(payload));
            let issues = qa::run(&entries);
            ok(id, json!({ "issues": issues }))
        }

        Command::Unknown => err(id, "unknown command"),
    }
}

#![windows_subsystem = "windows"]
use std::io::{self, BufRead, Write};

use memoria_core::protocol;

fn main() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        // Panic aqui é quebra de invariante (ex.: divergência resolver/ranking):
        // o processo morre em vez de responder com estado suspeito.
        let response = protocol::handle(&line);

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }
}

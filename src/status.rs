// System status display — model artifact presence, sizes, location.

use std::path::Path;

use anyhow::Result;

use crate::scorer::download;

/// Display model status to the terminal.
pub fn show(model_dir: &Path) -> Result<()> {
    println!("Model directory: {}", model_dir.display());

    if !model_dir.exists() {
        println!("Model: not downloaded");
        println!("\nRun `driftnet download-model` to fetch it.");
        return Ok(());
    }

    let mut missing = false;
    for (name, path) in download::artifact_paths(model_dir) {
        match std::fs::metadata(&path) {
            Ok(meta) => println!("  {} ({})", name, format_bytes(meta.len())),
            Err(_) => {
                println!("  {} (missing)", name);
                missing = true;
            }
        }
    }

    if missing {
        println!("\nRun `driftnet download-model` to fetch the missing files.");
    } else {
        println!("\nReady. Try: driftnet score https://example.com");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else if bytes < 1024 * 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}

use bzdir_core::{BatchReport, ComparisonResult, RunConfig};
use std::path::Path;

fn shown(p: Option<&Path>) -> String {
    p.map(|p| p.display().to_string()).unwrap_or_default()
}

pub fn echo_config(cfg: &RunConfig) {
    println!("Process mode: {}", cfg.mode);
    println!("Input files path: {}", shown(cfg.input_path.as_deref()));
    println!("Compressed files path: {}", shown(cfg.compressed_path.as_deref()));
    println!("Decompressed files path: {}", shown(cfg.decompressed_path.as_deref()));
    println!("Log file path: {}", cfg.log_path.display());
}

pub fn handle_batch(label: &str, report: &BatchReport) -> bool {
    println!("\n{label} finished:");
    println!("  files processed:  {}", report.processed.len());
    if !report.skipped.is_empty() {
        println!("  files skipped:    {} {:?}", report.skipped.len(), report.skipped);
    }
    println!("  original size:    {:.3} KB", report.total_original_kb());
    println!("  new size:         {:.3} KB", report.total_new_kb());
    match report.overall_factor() {
        Some(f) => println!("  overall factor:   {f:.3}"),
        None => println!("  overall factor:   n/a"),
    }
    if report.is_clean() {
        return true;
    }
    eprintln!("  files failed:     {}", report.failed.len());
    for (name, err) in &report.failed {
        eprintln!("    {name}: {err}");
    }
    false
}

pub fn handle_verify(cmp: &ComparisonResult) -> bool {
    println!("Deep comparison:");
    println!("Match : {:?}", cmp.matched);
    println!("Mismatch : {:?}", cmp.mismatched);
    println!("Errors : {:?}", cmp.errors);
    cmp.is_clean()
}

pub fn handle_not_a_choice() {
    println!("Error: not a choice");
}

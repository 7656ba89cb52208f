//! Format generation reports as text or JSON.

use super::GenerationReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;

/// Human-readable summary: one row per subdirectory plus totals.
pub fn format_report_text(report: &GenerationReport) -> String {
    let mut out = String::new();

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Subdirectory", "Files", "Bytes"]);
    for row in &report.subdirs {
        table.add_row(vec![
            row.subdir.clone(),
            row.files.to_string(),
            row.bytes.to_string(),
        ]);
    }
    table.add_row(vec![
        "total".to_string(),
        report.total_files().to_string(),
        report.total_bytes().to_string(),
    ]);
    out.push_str(&format!("{}\n", table));

    match (&report.output_root, report.written) {
        (Some(root), true) => {
            out.push_str(&format!("Output: {}\n", root.display()));
            out.push_str(&format!(
                "Directories created: {}\n",
                report.directories_created
            ));
        }
        _ => out.push_str("Output: none (listing only)\n"),
    }
    if report.cancelled {
        out.push_str("Cancelled: yes, remaining files were not generated\n");
    }
    out
}

/// Machine-readable summary.
pub fn format_report_json(report: &GenerationReport) -> String {
    let value = json!({
        "output_root": report.output_root.as_ref().map(|p| p.display().to_string()),
        "written": report.written,
        "cancelled": report.cancelled,
        "total_files": report.total_files(),
        "total_bytes": report.total_bytes(),
        "directories_created": report.directories_created,
        "subdirs": report.subdirs,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

use chrono::Local;
use domain::models::AnalysisReport;
use shared::types::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a completed analysis to `<report_dir>/analysis_<timestamp>.txt` and
/// returns the file path. Failed runs are never persisted; callers only reach
/// this with a successful report.
pub fn write_report(
    report_dir: &str,
    image_path: &Path,
    report: &AnalysisReport,
) -> Result<PathBuf> {
    fs::create_dir_all(report_dir)?;
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let out_path = Path::new(report_dir).join(format!("analysis_{timestamp}.txt"));

    let image_name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.display().to_string());

    let heavy_rule = "═".repeat(63);
    let light_rule = "─".repeat(63);

    let mut body = String::new();
    body.push_str(&format!("{heavy_rule}\n"));
    body.push_str("           MEDICAL IMAGE ANALYSIS REPORT\n");
    body.push_str(&format!("{heavy_rule}\n\n"));
    body.push_str(&format!("Image: {image_name}\n"));
    body.push_str(&format!(
        "Analysis Date: {}\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    body.push_str(&format!("Sources Referenced: {}\n\n", report.sources));
    body.push_str(&format!("{light_rule}\nVISUAL ANALYSIS\n{light_rule}\n\n"));
    body.push_str(&report.vision_analysis);
    body.push_str(&format!(
        "\n\n{light_rule}\nSYNTHESIZED ANALYSIS\n{light_rule}\n\n"
    ));
    body.push_str(&report.synthesis);
    body.push_str(&format!("\n\n{heavy_rule}\n"));

    fs::write(&out_path, body)?;
    Ok(out_path)
}

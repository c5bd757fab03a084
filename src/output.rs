use crate::error::{DashboardError, Result};
use crate::types::{Dashboard, SectionView};
use crate::util::format_int;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs::File;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};
use tracing::info;

fn export_err<E: Into<std::io::Error>>(path: &Path) -> impl FnOnce(E) -> DashboardError + '_ {
    move |e| DashboardError::Export {
        path: path.to_path_buf(),
        source: e.into(),
    }
}

/// Write one section's aggregate as a two-column CSV.
pub fn write_csv(path: &Path, section: &SectionView<'_>) -> Result<()> {
    let file = File::create(path).map_err(export_err(path))?;
    let mut wtr = csv::Writer::from_writer(file);
    let (key_header, value_header) = section.dimension.headers();
    wtr.write_record([key_header, value_header])
        .map_err(export_err::<csv::Error>(path))?;
    for (key, value) in &section.rows {
        wtr.write_record([key.as_str(), value.to_string().as_str()])
            .map_err(export_err::<csv::Error>(path))?;
    }
    wtr.flush().map_err(export_err(path))?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s).map_err(export_err(path))?;
    Ok(())
}

/// Export every aggregate plus `dashboard.json` into `dir`, returning the
/// written paths.
pub fn export(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(export_err(dir))?;
    let mut written = Vec::new();
    for section in dashboard.sections() {
        let path = dir.join(format!("{}.csv", section.dimension.file_stem()));
        write_csv(&path, &section)?;
        written.push(path);
    }
    let path = dir.join("dashboard.json");
    write_json(&path, dashboard)?;
    written.push(path);
    info!(dir = %dir.display(), files = written.len(), "exported dashboard");
    Ok(written)
}

/// Markdown table of the first `max_rows` entries of a section.
pub fn preview_table(section: &SectionView<'_>, max_rows: usize) -> String {
    if section.rows.is_empty() {
        return "(no rows)\n".to_string();
    }
    let (key_header, value_header) = section.dimension.headers();
    let mut builder = Builder::default();
    builder.push_record([key_header.to_string(), value_header.to_string()]);
    for (key, value) in section.rows.iter().take(max_rows) {
        builder.push_record([key.clone(), format_int(*value)]);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    format!("{}\n", table)
}

/// Render the whole dashboard as Markdown for the terminal.
pub fn render_markdown(dashboard: &Dashboard, max_rows: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Successfully loaded and cleaned {} data entries.\n",
        format_int(dashboard.entries)
    );
    for section in dashboard.sections() {
        let _ = writeln!(out, "## {}\n", section.dimension.title());
        out.push_str(&preview_table(&section, max_rows));
        if section.rows.len() > max_rows {
            let _ = writeln!(out, "({} more rows not shown)", section.rows.len() - max_rows);
        }
        let _ = writeln!(out, "\n### Insights & Recommendations\n");
        for insight in section.insights {
            let _ = writeln!(out, "- {}", insight);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "## Concluding Recommendations\n");
    let _ = writeln!(out, "**What's Working**\n");
    for line in &dashboard.conclusions.working {
        let _ = writeln!(out, "- {}", line);
    }
    let _ = writeln!(out, "\n**What Needs Improvement**\n");
    for line in &dashboard.conclusions.needs_improvement {
        let _ = writeln!(out, "- {}", line);
    }
    out
}

//! Export of [`OrderStats`] as a workbook of CSV sheets and as a plain-text report.

use super::OrderStats;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::info;

/// One named table with fixed columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// File name used by [`write_csv_files`], e.g. `orders_by_status.csv`.
    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name.to_lowercase().replace(' ', "_"))
    }

    /// RFC 4180 style: comma separated, `\n` line endings, fields quoted when needed.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        write_csv_row(&mut out, &self.headers);
        for row in &self.rows {
            write_csv_row(&mut out, row);
        }
        out
    }
}

fn write_csv_row(out: &mut String, fields: &[String]) {
    let line: Vec<String> = fields.iter().map(|f| escape_csv(f)).collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// The three sheets: `Summary`, `Orders by Status` and `Best Sellers`.
pub fn workbook(stats: &OrderStats) -> Vec<Sheet> {
    let mut summary = Sheet::new("Summary", &["Metric", "Value"]);
    summary.push(vec!["Daily earnings".into(), stats.daily_earnings.to_string()]);
    summary.push(vec!["Weekly earnings".into(), stats.weekly_earnings.to_string()]);
    summary.push(vec!["Yearly earnings".into(), stats.yearly_earnings.to_string()]);
    summary.push(vec!["Orders today".into(), stats.today_order_count.to_string()]);
    summary.push(vec![
        "Average order value".into(),
        stats.avg_order_value.to_string(),
    ]);

    let mut by_status = Sheet::new("Orders by Status", &["Status", "Count"]);
    for (status, count) in &stats.orders_by_status {
        by_status.push(vec![status.to_string(), count.to_string()]);
    }

    let mut best = Sheet::new("Best Sellers", &["Rank", "Dish", "Quantity", "Revenue"]);
    for (rank, dish) in stats.best_selling_dishes.iter().enumerate() {
        best.push(vec![
            (rank + 1).to_string(),
            dish.name.clone(),
            dish.quantity.to_string(),
            dish.revenue.to_string(),
        ]);
    }

    vec![summary, by_status, best]
}

/// Printable report with the same figures as the workbook.
pub fn render_report(stats: &OrderStats) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "ORDER REPORT");
    let _ = writeln!(out, "============");
    let _ = writeln!(out, "Daily earnings:       {}", stats.daily_earnings);
    let _ = writeln!(out, "Weekly earnings:      {}", stats.weekly_earnings);
    let _ = writeln!(out, "Yearly earnings:      {}", stats.yearly_earnings);
    let _ = writeln!(out, "Orders today:         {}", stats.today_order_count);
    let _ = writeln!(out, "Average order value:  {}", stats.avg_order_value);
    let _ = writeln!(out);
    let _ = writeln!(out, "Orders by status");
    for (status, count) in &stats.orders_by_status {
        let _ = writeln!(out, "  {:<10} {}", status.as_str(), count);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Best sellers");
    if stats.best_selling_dishes.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (rank, dish) in stats.best_selling_dishes.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} x{} ({})",
            rank + 1,
            dish.name,
            dish.quantity,
            dish.revenue
        );
    }
    out
}

/// Writes every sheet of the workbook as a CSV file under `dir`, creating it if needed.
///
/// Returns the written paths in sheet order.
pub async fn write_csv_files(stats: &OrderStats, dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = Vec::new();
    for sheet in workbook(stats) {
        let path = dir.join(sheet.file_name());
        tokio::fs::write(&path, sheet.to_csv()).await?;
        written.push(path);
    }
    info!(dir = %dir.display(), files = written.len(), "Exported statistics");
    Ok(written)
}

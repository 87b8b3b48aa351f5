use crate::domain::model::{InventoryRow, CSV_HEADERS};
use crate::domain::ports::Storage;
use crate::utils::error::{InventoryError, Result};
use chrono::{DateTime, TimeZone};

pub const PREVIEW_ROWS: usize = 3;

/// `<prefix>_<YYYYMMDD_HHMMSS>.csv`
pub fn report_file_name<Tz: TimeZone>(prefix: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{}_{}.csv", prefix, timestamp.format("%Y%m%d_%H%M%S"))
}

/// 產生 CSV 內容；沒有資料列時仍輸出標頭
pub fn render_csv(rows: &[InventoryRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| InventoryError::IoError(e.into_error()))
}

/// 模擬模式的預覽文字：檔名、欄位、筆數與前幾列
pub fn render_preview(file_name: &str, rows: &[InventoryRow]) -> Vec<String> {
    let mut lines = vec![
        format!("→ [DRY-RUN] Would write {} result(s) to {}", rows.len(), file_name),
        format!("  [DRY-RUN] CSV columns: {}", CSV_HEADERS.join(", ")),
    ];

    if !rows.is_empty() {
        lines.push(format!(
            "  [DRY-RUN] Sample data (first {} rows):",
            PREVIEW_ROWS
        ));
        for (i, row) in rows.iter().take(PREVIEW_ROWS).enumerate() {
            lines.push(format!(
                "    {}. {} | {} | {}",
                i + 1,
                row.organization_name,
                row.account_id,
                row.filesystem_id
            ));
        }
    }

    lines
}

pub struct Reporter<S: Storage> {
    storage: S,
    prefix: String,
}

impl<S: Storage> Reporter<S> {
    pub fn new(storage: S, prefix: impl Into<String>) -> Self {
        Self {
            storage,
            prefix: prefix.into(),
        }
    }

    pub fn file_name<Tz: TimeZone>(&self, timestamp: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        report_file_name(&self.prefix, timestamp)
    }

    /// 寫出 CSV，回傳實際檔案路徑
    pub async fn write(&self, rows: &[InventoryRow], file_name: &str) -> Result<String> {
        if rows.is_empty() {
            tracing::warn!("⚠ No FSX file systems found in any account");
        } else {
            tracing::info!("→ Writing results to {}...", file_name);
        }

        let data = render_csv(rows)?;
        tracing::debug!("Writing CSV ({} bytes) to storage", data.len());
        let path = self.storage.write_file(file_name, &data).await?;

        tracing::info!(
            "✓ Successfully wrote {} FSX system(s) to {}",
            rows.len(),
            path
        );
        Ok(path)
    }

    pub fn preview(&self, rows: &[InventoryRow], file_name: &str) {
        for line in render_preview(file_name, rows) {
            println!("{}", line);
        }
    }
}

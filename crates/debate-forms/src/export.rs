// File: src/export.rs
// Purpose: CSV / JSON export of stored registrations

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::admin::AdminSession;
use crate::config::Config;
use crate::error::ExportError;
use crate::model::Clock;
use crate::storage::{KeyValueStore, StorageGateway};
use crate::surface::{AdminSurface, FileSink, Notification, NotificationLevel, Notifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    #[default]
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// A rendered export ready to hand to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

/// `<stem>_<YYYY-MM-DD>.<ext>`
pub fn file_name(stem: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!("{}_{}.{}", stem, date.format("%Y-%m-%d"), format.extension())
}

/// Pretty-printed JSON array, two-space indentation
pub fn to_json<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Quoted CSV with the first record's keys as header
///
/// Records are assumed to share one shape. Every cell is quoted, embedded
/// quotes are doubled, arrays are joined with `"; "`, and null or missing
/// values become empty cells.
pub fn to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let rows: Vec<Value> = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<_, _>>()?;

    let Some(first) = rows.first() else {
        return Ok(String::new());
    };

    let headers: Vec<String> = match first {
        Value::Object(map) => map.keys().cloned().collect(),
        _ => Vec::new(),
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| quote(header))
            .collect::<Vec<_>>()
            .join(","),
    );

    for row in &rows {
        let line = headers
            .iter()
            .map(|header| quote(&cell_text(row.get(header.as_str()))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| cell_text(Some(item)))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
    }
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\"\""))
}

/// Gated export of every stored registration
#[derive(Debug, Clone)]
pub struct Exporter {
    file_stem: String,
    notification: std::time::Duration,
}

impl Exporter {
    pub fn new(config: &Config) -> Self {
        Self {
            file_stem: config.export.file_stem.clone(),
            notification: config.notifications.duration(),
        }
    }

    /// Render the export file without any gating or side effects
    pub fn render<S: KeyValueStore>(
        &self,
        format: ExportFormat,
        gateway: &StorageGateway<S>,
        clock: &dyn Clock,
    ) -> Result<(ExportFile, usize), ExportError> {
        let records = gateway.get_all();
        if records.is_empty() {
            return Err(ExportError::Empty);
        }

        let content = match format {
            ExportFormat::Csv => to_csv(&records)?,
            ExportFormat::Json => to_json(&records)?,
        };

        let file = ExportFile {
            file_name: file_name(&self.file_stem, clock.now().date_naive(), format),
            mime_type: format.mime_type(),
            content,
        };
        Ok((file, records.len()))
    }

    /// Export for an authenticated admin and tell them how it went
    ///
    /// Unauthenticated callers get the login prompt instead. An empty store
    /// produces a warning and no file.
    #[allow(clippy::too_many_arguments)]
    pub fn export<S: KeyValueStore>(
        &self,
        format: ExportFormat,
        session: &AdminSession,
        gateway: &StorageGateway<S>,
        admin: &mut dyn AdminSurface,
        notifier: &mut dyn Notifier,
        sink: &mut dyn FileSink,
        clock: &dyn Clock,
    ) -> Result<usize, ExportError> {
        if !session.is_authenticated() {
            warn!("export requested without admin authentication");
            admin.show_login();
            return Err(ExportError::NotAuthenticated);
        }

        let (file, count) = match self.render(format, gateway, clock) {
            Ok(rendered) => rendered,
            Err(ExportError::Empty) => {
                notifier.notify(&Notification::new(
                    ExportError::Empty.to_string(),
                    NotificationLevel::Warning,
                    self.notification,
                ));
                return Err(ExportError::Empty);
            }
            Err(err) => return Err(err),
        };

        if let Err(reason) = sink.save_file(&file) {
            error!(%reason, file_name = %file.file_name, "Export download failed");
            notifier.notify(&Notification::new(
                "Export failed, please try again",
                NotificationLevel::Error,
                self.notification,
            ));
            return Err(ExportError::Download(reason));
        }
        info!(count, file_name = %file.file_name, "Exported responses");
        notifier.notify(&Notification::new(
            format!("Exported {} responses as {}", count, format),
            NotificationLevel::Success,
            self.notification,
        ));
        Ok(count)
    }
}

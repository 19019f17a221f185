//! Fixed-width table rendering with per-column widths that can be resized.

use super::schema::FileRecord;
use std::collections::BTreeMap;

/// Narrowest a column may be resized to.
pub const MIN_COLUMN_WIDTH: usize = 4;

const SEPARATOR: &str = "  ";
const ELLIPSIS: char = '…';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Name,
    Id,
    Size,
    Created,
    Status,
    Attributes,
}

impl ColumnKind {
    pub fn title(self) -> &'static str {
        match self {
            ColumnKind::Name => "Name",
            ColumnKind::Id => "ID",
            ColumnKind::Size => "Size",
            ColumnKind::Created => "Created",
            ColumnKind::Status => "Status",
            ColumnKind::Attributes => "Attributes",
        }
    }

    fn default_width(self) -> usize {
        match self {
            ColumnKind::Name => 32,
            ColumnKind::Id => 29,
            ColumnKind::Size => 10,
            ColumnKind::Created => 25,
            ColumnKind::Status => 11,
            ColumnKind::Attributes => 60,
        }
    }

    fn cell(self, record: &FileRecord) -> String {
        match self {
            ColumnKind::Name => record.filename.clone(),
            ColumnKind::Id => record.id.clone(),
            ColumnKind::Size => record.bytes.to_string(),
            ColumnKind::Created => record.created_at_display(),
            ColumnKind::Status => record.status.clone().unwrap_or_default(),
            ColumnKind::Attributes => {
                serde_json::to_string(&record.attributes).unwrap_or_default()
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub kind: ColumnKind,
    pub width: usize,
    pub min_width: usize,
}

/// Column widths for the file table.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<Column>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        let columns = [
            ColumnKind::Name,
            ColumnKind::Id,
            ColumnKind::Size,
            ColumnKind::Created,
            ColumnKind::Status,
            ColumnKind::Attributes,
        ]
        .into_iter()
        .map(|kind| Column {
            kind,
            width: kind.default_width(),
            min_width: MIN_COLUMN_WIDTH,
        })
        .collect();
        Self { columns }
    }
}

impl ColumnLayout {
    /// Default layout with widths overridden by column title (case-insensitive).
    /// Unknown titles are returned so the caller can report them.
    pub fn with_widths(widths: &BTreeMap<String, usize>) -> (Self, Vec<String>) {
        let mut layout = Self::default();
        let mut unknown = Vec::new();
        for (title, width) in widths {
            if !layout.set_width(title, *width) {
                unknown.push(title.clone());
            }
        }
        (layout, unknown)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.kind.title().eq_ignore_ascii_case(title))
    }

    /// Set a column's width, clamped at its minimum. Returns false if no
    /// column has that title.
    pub fn set_width(&mut self, title: &str, width: usize) -> bool {
        match self.position(title) {
            Some(i) => {
                let col = &mut self.columns[i];
                col.width = width.max(col.min_width);
                true
            }
            None => false,
        }
    }

    /// Grow or shrink a column by `delta`, as a pointer drag would.
    /// Returns the new width.
    pub fn resize(&mut self, index: usize, delta: isize) -> Option<usize> {
        let col = self.columns.get_mut(index)?;
        let target = col.width.saturating_add_signed(delta);
        col.width = target.max(col.min_width);
        Some(col.width)
    }

    /// Render a header line followed by one line per record.
    pub fn render(&self, records: &[FileRecord]) -> String {
        let mut out = String::new();
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|c| fit(c.kind.title(), c.width))
            .collect();
        push_line(&mut out, &header);

        let rule: Vec<String> = self.columns.iter().map(|c| "-".repeat(c.width)).collect();
        push_line(&mut out, &rule);

        for record in records {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| fit(&c.kind.cell(record), c.width))
                .collect();
            push_line(&mut out, &cells);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String]) {
    out.push_str(cells.join(SEPARATOR).trim_end());
    out.push('\n');
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    let text = text.replace(['\n', '\r'], " ");
    if text.chars().count() <= width {
        return format!("{text:<width$}");
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

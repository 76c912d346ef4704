//! Attendance report export.
//!
//! Building the cell grid is ours; turning it into a file belongs to a
//! [`SheetWriter`]. The `.xlsx` writer ships behind the `xlsx` feature.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::attendance::AttendanceReport;
use crate::error::{ImpactersError, ImpactersResult};

pub const CHECK_MARK: &str = "✔";
pub const SHEET_NAME: &str = "Attendance Report";
pub const DEFAULT_REPORT_FILENAME: &str = "Impacters_Attendance_Report.xlsx";

const IDENTITY_COLUMNS: [&str; 3] = ["Member Name", "Email", "Phone"];
const SUMMARY_COLUMNS: [&str; 2] = ["Total Attended", "Attendance Percentage"];

const IDENTITY_WIDTH: f64 = 25.0;
const EVENT_WIDTH: f64 = 20.0;
const SUMMARY_WIDTH: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Check,
    Empty,
}

impl Cell {
    pub fn as_str(&self) -> &str {
        match self {
            Cell::Text(s) => s.as_str(),
            Cell::Check => CHECK_MARK,
            Cell::Empty => "",
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

/// One sheet of cells: a header row, one row per member, and column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGrid {
    pub sheet_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Width of each column in characters, aligned with `header`
    pub column_widths: Vec<f64>,
}

impl ReportGrid {
    pub fn from_report(report: &AttendanceReport<'_>) -> Self {
        let total = report.total_events();

        let header: Vec<String> = IDENTITY_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(report.events.iter().map(|e| e.label()))
            .chain(SUMMARY_COLUMNS.iter().map(|c| c.to_string()))
            .collect();

        let rows = report
            .rows
            .iter()
            .map(|row| {
                let member = row.member;
                let mut cells: Vec<Cell> = vec![
                    member.name.clone().into(),
                    member.email.clone().into(),
                    member.phone.clone().into(),
                ];
                cells.extend(
                    row.cells
                        .iter()
                        .map(|present| if *present { Cell::Check } else { Cell::Empty }),
                );
                cells.push(format!("{} / {}", row.attended_count, total).into());
                cells.push(format!("{}%", row.percentage).into());
                cells
            })
            .collect();

        let column_widths = std::iter::repeat_n(IDENTITY_WIDTH, IDENTITY_COLUMNS.len())
            .chain(std::iter::repeat_n(EVENT_WIDTH, total))
            .chain(std::iter::repeat_n(SUMMARY_WIDTH, SUMMARY_COLUMNS.len()))
            .collect();

        ReportGrid {
            sheet_name: SHEET_NAME.to_string(),
            header,
            rows,
            column_widths,
        }
    }

    /// Header plus rows as plain strings.
    pub fn to_matrix(&self) -> Vec<Vec<String>> {
        std::iter::once(self.header.clone())
            .chain(
                self.rows
                    .iter()
                    .map(|row| row.iter().map(|c| c.as_str().to_string()).collect()),
            )
            .collect()
    }
}

/// Serializes a grid to a file. Implemented by spreadsheet libraries.
pub trait SheetWriter {
    fn write(&self, grid: &ReportGrid, path: &Path) -> ImpactersResult<()>;
}

/// Write `grid` to `path` with `writer`, failing when no writer is available.
pub fn export_report(
    grid: &ReportGrid,
    writer: Option<&dyn SheetWriter>,
    path: &Path,
) -> ImpactersResult<PathBuf> {
    let writer = writer.ok_or(ImpactersError::ExportUnavailable)?;
    writer.write(grid, path)?;
    info!(path = %path.display(), rows = grid.rows.len(), "Exported attendance report");
    Ok(path.to_path_buf())
}

/// The writer compiled into this build, if any.
pub fn default_writer() -> Option<Box<dyn SheetWriter>> {
    #[cfg(feature = "xlsx")]
    {
        Some(Box::new(xlsx::XlsxWriter))
    }
    #[cfg(not(feature = "xlsx"))]
    {
        None
    }
}

#[cfg(feature = "xlsx")]
pub mod xlsx {
    use std::path::Path;

    use rust_xlsxwriter::{Workbook, XlsxError};

    use super::{Cell, ReportGrid, SheetWriter};
    use crate::error::{ImpactersError, ImpactersResult};

    /// `.xlsx` writer backed by rust_xlsxwriter.
    pub struct XlsxWriter;

    impl SheetWriter for XlsxWriter {
        fn write(&self, grid: &ReportGrid, path: &Path) -> ImpactersResult<()> {
            write_workbook(grid, path)
        }
    }

    fn xlsx_error(e: XlsxError) -> ImpactersError {
        ImpactersError::Export(e.to_string())
    }

    /// Worksheet column for a zero-based grid column.
    pub(crate) fn column_index(col: usize) -> ImpactersResult<u16> {
        u16::try_from(col)
            .map_err(|_| ImpactersError::Export(format!("Report has too many columns ({})", col + 1)))
    }

    /// Worksheet row for a zero-based body row; row 0 holds the header.
    pub(crate) fn row_index(row: usize) -> ImpactersResult<u32> {
        row.checked_add(1)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| ImpactersError::Export(format!("Report has too many rows ({})", row)))
    }

    fn write_workbook(grid: &ReportGrid, path: &Path) -> ImpactersResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&grid.sheet_name).map_err(xlsx_error)?;

        for (col, title) in grid.header.iter().enumerate() {
            worksheet
                .write_string(0, column_index(col)?, title)
                .map_err(xlsx_error)?;
        }

        for (r, row) in grid.rows.iter().enumerate() {
            let row_num = row_index(r)?;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    Cell::Empty => {}
                    cell => {
                        worksheet
                            .write_string(row_num, column_index(col)?, cell.as_str())
                            .map_err(xlsx_error)?;
                    }
                }
            }
        }

        for (col, width) in grid.column_widths.iter().enumerate() {
            worksheet
                .set_column_width(column_index(col)?, *width)
                .map_err(xlsx_error)?;
        }

        workbook.save(path).map_err(xlsx_error)
    }
}

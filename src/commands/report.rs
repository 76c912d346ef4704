use std::path::{Path, PathBuf};

use anyhow::Result;
use impacters_core::export::{ReportGrid, SheetWriter, export_report};
use impacters_core::{AttendanceReport, Store};
use owo_colors::OwoColorize;

use crate::render::{NO_REPORT_DATA, Render};

pub fn show(store: &Store) -> Result<()> {
    let report = AttendanceReport::build(store.members(), store.events());
    println!("{}", report.render());
    Ok(())
}

/// Write the attendance report to `path`, or to `default_path` when none is given.
///
/// Returns the written path, or `None` when there was nothing to export.
pub fn export(
    store: &Store,
    writer: Option<&dyn SheetWriter>,
    path: Option<&Path>,
    default_path: PathBuf,
) -> Result<Option<PathBuf>> {
    let report = AttendanceReport::build(store.members(), store.events());
    if report.is_empty() {
        println!("{}", NO_REPORT_DATA.dimmed());
        return Ok(None);
    }

    let path = path.map(Path::to_path_buf).unwrap_or(default_path);
    let grid = ReportGrid::from_report(&report);
    let written = export_report(&grid, writer, &path)?;

    println!("{} {}", "Exported".green(), written.display());
    Ok(Some(written))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use impacters_core::{ImpactersError, ImpactersResult};

    #[derive(Default)]
    struct RecordingWriter {
        grids: RefCell<Vec<(Vec<Vec<String>>, PathBuf)>>,
    }

    impl SheetWriter for RecordingWriter {
        fn write(&self, grid: &ReportGrid, path: &Path) -> ImpactersResult<()> {
            self.grids.borrow_mut().push((grid.to_matrix(), path.to_path_buf()));
            Ok(())
        }
    }

    #[test]
    fn empty_store_exports_nothing() {
        let writer = RecordingWriter::default();
        let written = export(
            &Store::new(),
            Some(&writer as &dyn SheetWriter),
            None,
            PathBuf::from("report.xlsx"),
        )
        .unwrap();

        assert_eq!(written, None);
        assert!(writer.grids.borrow().is_empty());
    }

    #[test]
    fn missing_writer_is_unavailable() {
        let err = export(&Store::with_demo_data(), None, None, PathBuf::from("report.xlsx"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ImpactersError>(),
            Some(ImpactersError::ExportUnavailable)
        ));
        assert_eq!(err.to_string(), "Excel export library not found.");
    }

    #[test]
    fn explicit_path_wins_over_default() {
        let writer = RecordingWriter::default();
        let written = export(
            &Store::with_demo_data(),
            Some(&writer as &dyn SheetWriter),
            Some(Path::new("out/attendance.xlsx")),
            PathBuf::from("report.xlsx"),
        )
        .unwrap();

        assert_eq!(written, Some(PathBuf::from("out/attendance.xlsx")));
        let grids = writer.grids.borrow();
        let (matrix, _) = &grids[0];
        assert_eq!(matrix.len(), 5);
        assert_eq!(matrix[0][0], "Member Name");
    }
}

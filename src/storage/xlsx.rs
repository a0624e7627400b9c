//! Spreadsheet workbook output.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::error::{AppError, Result};
use crate::models::NormalizedRow;
use crate::storage::TableWriter;

/// Writes a single-sheet workbook with a bold header row.
#[derive(Debug, Clone)]
pub struct XlsxWriter {
    sheet_name: String,
}

impl XlsxWriter {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

impl TableWriter for XlsxWriter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn write(&self, path: &Path, rows: &[NormalizedRow]) -> Result<()> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(&self.sheet_name)?;

        let bold = Format::new().set_bold();
        for (col, header) in (0u16..).zip(NormalizedRow::HEADERS) {
            sheet.write_string_with_format(0, col, header, &bold)?;
        }

        for (idx, row) in rows.iter().enumerate() {
            let row_num = u32::try_from(idx + 1)
                .map_err(|_| AppError::validation("too many rows for a worksheet"))?;
            for (col, value) in (0u16..).zip(row.fields()) {
                sheet.write_string(row_num, col, value)?;
            }
        }

        workbook.save(path)?;
        Ok(())
    }
}

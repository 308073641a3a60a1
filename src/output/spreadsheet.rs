// Spreadsheet export: one row per publication.
//
// `.csv` paths get a plain CSV file; everything else is written as an xlsx
// workbook with a bold header row.

use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

use crate::records::PublicationRecord;

/// Fixed column order for every export format.
pub const COLUMNS: [&str; 5] = ["Title", "Venue", "Year", "Authors", "Citations"];

const SHEET_NAME: &str = "Publications";
const COLUMN_WIDTHS: [f64; 5] = [60.0, 36.0, 8.0, 48.0, 10.0];

/// Write all publications to `path`, choosing the format from its extension.
pub fn save_publications(publications: &[PublicationRecord], path: &Path) -> Result<()> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if is_csv {
        write_csv(publications, path)?;
    } else {
        write_xlsx(publications, path)?;
    }

    info!(
        rows = publications.len(),
        path = %path.display(),
        "Saved publications"
    );
    Ok(())
}

fn write_csv(publications: &[PublicationRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(COLUMNS)
        .context("Failed to write CSV header")?;
    for publication in publications {
        writer
            .serialize(publication)
            .with_context(|| format!("Failed to write row for {:?}", publication.title))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}

fn write_xlsx(publications: &[PublicationRecord], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, (name, width)) in COLUMNS.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *name, &header)?;
            worksheet.set_column_width(col, width)?;
        }

        for (i, publication) in publications.iter().enumerate() {
            let row = u32::try_from(i + 1).context("Too many rows for a worksheet")?;
            worksheet.write_string(row, 0, &publication.title)?;
            worksheet.write_string(row, 1, &publication.venue)?;
            if let Some(year) = publication.year {
                worksheet.write_number(row, 2, year)?;
            }
            worksheet.write_string(row, 3, &publication.authors)?;
            worksheet.write_number(row, 4, publication.citation_count)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save workbook to {}", path.display()))?;
    Ok(())
}

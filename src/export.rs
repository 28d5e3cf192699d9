//! Export of projection results
//!
//! Spreadsheet-friendly CSV for Brazilian locale settings (`;` delimiter,
//! `,` decimals, UTF-8 BOM) and a paginated plain-text report.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use csv::{Terminator, WriterBuilder};
use log::info;

use crate::error::ExportError;
use crate::input::{format_currency, format_decimal};
use crate::projection::{PeriodSnapshot, ProjectionResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_HEADERS: [&str; 9] = [
    "Mês",
    "Juros do Mês (R$)",
    "Capital Investido (R$)",
    "Juros Acumulados (R$)",
    "Total Bruto (R$)",
    "Base de Cálculo IR (R$)",
    "Alíquota IR (%)",
    "Imposto Provisionado (R$)",
    "Total Líquido (R$)",
];

/// Rows per page in the text report
pub const DEFAULT_PAGE_ROWS: usize = 40;

/// Write all snapshots as delimited text, one row per month
pub fn write_csv<W: Write>(mut writer: W, snapshots: &[PeriodSnapshot]) -> Result<(), ExportError> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for snapshot in snapshots {
        csv_writer.write_record(csv_fields(snapshot))?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn csv_fields(snapshot: &PeriodSnapshot) -> [String; 9] {
    [
        snapshot.month.to_string(),
        format_decimal(snapshot.interest_this_period, 2),
        format_decimal(snapshot.total_contributed, 2),
        format_decimal(snapshot.cumulative_interest, 2),
        format_decimal(snapshot.gross_balance, 2),
        format_decimal(snapshot.taxable_gain, 2),
        format_decimal(snapshot.tax_rate, 1),
        format_decimal(snapshot.tax_withheld, 2),
        format_decimal(snapshot.net_balance, 2),
    ]
}

/// Write the CSV export to a file
pub fn export_csv<P: AsRef<Path>>(path: P, result: &ProjectionResult) -> Result<(), ExportError> {
    if result.is_empty() {
        return Err(ExportError::Empty);
    }
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(BufWriter::new(file), &result.snapshots)?;
    info!("wrote {} rows to {}", result.len(), path.display());
    Ok(())
}

/// Download-style file name stamped with the export time
pub fn default_export_file_name(now: DateTime<Utc>) -> String {
    format!("invest-smart-simulacao-{}.csv", now.timestamp_millis())
}

/// Write a paginated text table followed by the summary block
pub fn write_report<W: Write>(
    mut writer: W,
    result: &ProjectionResult,
    page_rows: usize,
) -> Result<(), ExportError> {
    let summary = result.summary().ok_or(ExportError::Empty)?;
    let page_rows = page_rows.max(1);
    let pages = result.snapshots.chunks(page_rows);
    let page_count = pages.len();

    for (page, rows) in pages.enumerate() {
        if page > 0 {
            writeln!(writer)?;
        }
        writeln!(writer, "Página {}/{}", page + 1, page_count)?;
        writeln!(
            writer,
            "{:>5} {:>16} {:>18} {:>18} {:>18} {:>8} {:>16} {:>18}",
            "Mês", "Juros", "Investido", "Juros Acum.", "Bruto", "IR %", "Imposto", "Líquido"
        )?;
        writeln!(writer, "{}", "-".repeat(124))?;
        for row in rows {
            writeln!(
                writer,
                "{:>5} {:>16} {:>18} {:>18} {:>18} {:>8} {:>16} {:>18}",
                row.month,
                format_currency(row.interest_this_period),
                format_currency(row.total_contributed),
                format_currency(row.cumulative_interest),
                format_currency(row.gross_balance),
                format_decimal(row.tax_rate, 1),
                format_currency(row.tax_withheld),
                format_currency(row.net_balance),
            )?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "Resumo:")?;
    writeln!(writer, "  Total Investido:        {}", format_currency(summary.total_contributed))?;
    writeln!(writer, "  Juros Brutos:           {}", format_currency(summary.total_interest))?;
    writeln!(writer, "  Imposto de Renda (IR):  {}", format_currency(summary.total_tax))?;
    writeln!(writer, "  Lucro Líquido:          {}", format_currency(summary.net_profit()))?;
    writeln!(writer, "  Total Bruto Final:      {}", format_currency(summary.final_gross_balance))?;
    writeln!(writer, "  Valor Líquido Final:    {}", format_currency(summary.final_net_balance))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{PeriodType, RateType, SimulationParameters};
    use crate::projection::project;
    use chrono::TimeZone;

    fn sample_result() -> ProjectionResult {
        let params = SimulationParameters::new(5000.0, 500.0, 11.5, RateType::Annual, 3.0, PeriodType::Months);
        project(&params).unwrap()
    }

    #[test]
    fn test_csv_layout() {
        let result = sample_result();
        let mut buf = Vec::new();
        write_csv(&mut buf, &result.snapshots).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], CSV_HEADERS.join(";"));
        assert!(lines[1].starts_with("1;45,56;5500,00;45,56;5545,56;45,56;22,5;"), "{}", lines[1]);
        assert!(!text.contains('\r'));
        for line in &lines[1..] {
            assert_eq!(line.split(';').count(), 9);
        }
    }

    #[test]
    fn test_csv_empty_sequence_writes_header_only() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_export_file_name() {
        let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(default_export_file_name(now), "invest-smart-simulacao-1700000000123.csv");
    }

    #[test]
    fn test_report_paginates_and_summarizes() {
        let params = SimulationParameters::default();
        let result = project(&params).unwrap();
        let mut buf = Vec::new();
        write_report(&mut buf, &result, 25).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("Página 1/3"));
        assert!(text.contains("Página 3/3"));
        assert!(text.contains("Resumo:"));
        assert!(text.contains("R$ 35.000,00"));
    }

    #[test]
    fn test_export_csv_to_file() {
        let result = sample_result();
        let path = std::env::temp_dir().join(format!("invest_projection_test_{}.csv", std::process::id()));
        export_csv(&path, &result).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(bytes.starts_with(UTF8_BOM));
    }
}

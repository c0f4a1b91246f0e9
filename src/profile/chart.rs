//! Bar-chart workbook for a profile report

use super::{Distribution, ProfileReport};
use crate::error::{SheetcastError, SheetcastResult};
use rust_xlsxwriter::{
    Chart, ChartDataLabel, ChartFormat, ChartSolidFill, ChartType, Color, ColNum, Format, RowNum,
    Workbook, Worksheet, XlsxError,
};
use std::path::Path;

const SHEET_NAME: &str = "Profile";
const BAR_COLOR: u32 = 0x2E7D32;

/// Write both distributions and one column chart per distribution
pub fn write_chart_workbook(
    report: &ProfileReport,
    subject: &str,
    output: &Path,
) -> SheetcastResult<()> {
    build_workbook(report, subject, output).map_err(|e| SheetcastError::Chart(e.to_string()))
}

fn build_workbook(report: &ProfileReport, subject: &str, output: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    write_distribution(worksheet, &report.primary, 0)?;
    write_distribution(worksheet, &report.secondary, 4)?;

    let longest = report.primary.entries.len().max(report.secondary.entries.len());
    let chart_row = (longest + 3) as RowNum;
    if let Some(chart) = distribution_chart(&report.primary, subject, 0) {
        worksheet.insert_chart(chart_row, 0, &chart)?;
    }
    if let Some(chart) = distribution_chart(&report.secondary, subject, 4) {
        worksheet.insert_chart(chart_row, 8, &chart)?;
    }

    workbook.save(output)?;
    Ok(())
}

/// Three columns starting at `first_col`: value, count, percent
fn write_distribution(
    worksheet: &mut Worksheet,
    distribution: &Distribution,
    first_col: ColNum,
) -> Result<(), XlsxError> {
    let header = Format::new().set_bold();
    let percent = Format::new().set_num_format("0.00%");

    worksheet.set_column_width(first_col, 24)?;
    worksheet.write_string_with_format(0, first_col, &distribution.column, &header)?;
    worksheet.write_string_with_format(0, first_col + 1, "Records", &header)?;
    worksheet.write_string_with_format(0, first_col + 2, "Share", &header)?;

    for (i, entry) in distribution.entries.iter().enumerate() {
        let row = (i + 1) as RowNum;
        worksheet.write_string(row, first_col, &entry.value)?;
        worksheet.write_number(row, first_col + 1, entry.count as f64)?;
        worksheet.write_number_with_format(row, first_col + 2, entry.percent / 100.0, &percent)?;
    }

    Ok(())
}

/// Column chart over the data written by `write_distribution`
fn distribution_chart(
    distribution: &Distribution,
    subject: &str,
    first_col: ColNum,
) -> Option<Chart> {
    if distribution.entries.is_empty() {
        return None;
    }
    let (header_row, first_row): (RowNum, RowNum) = (0, 1);
    let last_row = distribution.entries.len() as RowNum;

    let mut chart = Chart::new(ChartType::Column);
    chart
        .add_series()
        .set_name((SHEET_NAME, header_row, first_col))
        .set_categories((SHEET_NAME, first_row, first_col, last_row, first_col))
        .set_values((SHEET_NAME, first_row, first_col + 1, last_row, first_col + 1))
        .set_format(
            ChartFormat::new()
                .set_solid_fill(ChartSolidFill::new().set_color(Color::RGB(BAR_COLOR))),
        )
        .set_data_label(ChartDataLabel::new().show_value());

    let title = format!("Distribution by {}\n{}", distribution.column, subject);
    chart.title().set_name(title.as_str());
    chart.x_axis().set_name(distribution.column.as_str());
    chart.y_axis().set_name("Number of records");
    chart.legend().set_hidden();

    Some(chart)
}

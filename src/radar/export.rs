// The Excel export: the answers, the scores and the picture of the chart.

use rust_xlsxwriter::{Format, Image, Workbook};

use crate::radar::*;

pub const ANSWERS_SHEET: &str = "Respostas";
pub const CHART_SHEET: &str = "Gráfico";
pub const ANSWERS_HEADER: [&str; 2] = ["Pergunta", "Resposta"];
pub const CHART_HEADER: [&str; 2] = ["Categoria", "Porcentagem"];
/// The cell where the picture of the chart is placed (E2).
pub const IMAGE_CELL: (u32, u16) = (1, 4);

/// Builds the workbook and returns its content.
///
/// The chart sheet lists each category once: the point that closes the polygon of
/// the series is not repeated.
pub fn export_workbook(
    hierarchy: &Hierarchy,
    answers: &AnswerSet,
    series: &ChartSeries,
    chart_png: &[u8],
) -> RadarResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(ANSWERS_SHEET).context(ExportSnafu {})?;
        for (col, h) in ANSWERS_HEADER.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *h, &bold)
                .context(ExportSnafu {})?;
        }
        let mut row: u32 = 1;
        for (code, question) in hierarchy.sub_items() {
            sheet
                .write_string(row, 0, question.as_str())
                .context(ExportSnafu {})?;
            sheet
                .write_number(row, 1, answers.get(code) as f64)
                .context(ExportSnafu {})?;
            row += 1;
        }
        sheet.set_column_width(0, 80).context(ExportSnafu {})?;
        debug!("export_workbook: {} answers", row - 1);
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(CHART_SHEET).context(ExportSnafu {})?;
        for (col, h) in CHART_HEADER.iter().enumerate() {
            sheet
                .write_string_with_format(0, col as u16, *h, &bold)
                .context(ExportSnafu {})?;
        }
        let n = series.num_categories();
        for idx in 0..n {
            let row = (idx + 1) as u32;
            sheet
                .write_string(row, 0, series.labels[idx].as_str())
                .context(ExportSnafu {})?;
            sheet
                .write_number(row, 1, series.percentages[idx])
                .context(ExportSnafu {})?;
        }
        sheet.set_column_width(0, 40).context(ExportSnafu {})?;
        let image = Image::new_from_buffer(chart_png).context(ExportSnafu {})?;
        sheet
            .insert_image(IMAGE_CELL.0, IMAGE_CELL.1, &image)
            .context(ExportSnafu {})?;
        debug!("export_workbook: {} categories", n);
    }

    let buf = workbook.save_to_buffer().context(ExportSnafu {})?;
    info!("Workbook of {} bytes generated", buf.len());
    Ok(buf)
}

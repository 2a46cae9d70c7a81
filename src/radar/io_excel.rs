use calamine::DataType;

use crate::radar::{
    io_common::{check_exists, get_question_columns, simplify_file_name, CLASS_COLUMN, QUESTION_COLUMN},
    *,
};

pub fn read_excel_questions(path: &str, cfs: &FileSource) -> RadarResult<Vec<QuestionRow>> {
    check_exists(path)?;
    let wrange = get_range(path, cfs)?;

    let mut iter = wrange.rows();
    let header_row = iter.next().context(EmptyExcelSnafu { path })?;
    let header: Vec<Option<String>> = header_row
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    debug!("read_excel_questions: header: {:?}", header);
    let cols = get_question_columns(path, &header)?;

    let mut res: Vec<QuestionRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        let lineno = idx + 2;
        debug!("read_excel_questions: lineno: {:?} row: {:?}", lineno, row);
        let class_code = read_cell(row.get(cols.class_idx), lineno)?;
        let question_text = read_cell(row.get(cols.question_idx), lineno)?;
        match (class_code, question_text) {
            (None, None) => {
                // Empty row, skip.
            }
            (Some(c), Some(q)) => res.push(QuestionRow::new(&c, &q)),
            (None, Some(_)) => {
                return EmptyCellSnafu {
                    path,
                    lineno,
                    column: CLASS_COLUMN,
                }
                .fail();
            }
            (Some(_), None) => {
                return EmptyCellSnafu {
                    path,
                    lineno,
                    column: QUESTION_COLUMN,
                }
                .fail();
            }
        }
    }
    info!(
        "Read {} questionnaire rows from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

/// The content of a cell as text. Numbers are written the way a spreadsheet shows a
/// class code: 1 is `1.0` and 1.5 is `1.5`.
fn read_cell(cell: Option<&DataType>, lineno: usize) -> RadarResult<Option<String>> {
    match cell {
        None | Some(DataType::Empty) => Ok(None),
        Some(DataType::String(s)) if s.trim().is_empty() => Ok(None),
        Some(DataType::String(s)) => Ok(Some(s.trim().to_string())),
        Some(DataType::Float(f)) => Ok(Some(format_code(*f))),
        Some(DataType::Int(i)) => Ok(Some(format!("{}.0", i))),
        Some(c) => ExcelWrongCellTypeSnafu {
            lineno: lineno as u64,
            content: format!("{:?}", c),
        }
        .fail(),
    }
}

fn format_code(f: f64) -> String {
    if f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        format!("{}", f)
    }
}

fn get_range(path: &str, cfs: &FileSource) -> RadarResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                path,
                name: worksheet_name.clone(),
            })?
            .context(OpeningExcelSnafu { path })?;
        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail(),
            [(worksheet_name, wrange)] => {
                debug!("get_range: path: {:?} worksheet: {:?}", &path, &worksheet_name);
                Ok(wrange.clone())
            }
            _ => TooManyWorksheetsSnafu { path }.fail(),
        }
    }
}

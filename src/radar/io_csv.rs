// Primitives for reading CSV files.

use crate::radar::{
    io_common::{check_exists, get_question_columns, simplify_file_name, QuestionColumns},
    *,
};

pub fn read_csv_questions(path: &str) -> RadarResult<Vec<QuestionRow>> {
    check_exists(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;

    let header: Vec<Option<String>> = rdr
        .headers()
        .context(CsvOpenSnafu { path })?
        .iter()
        .map(|s| Some(s.trim_start_matches('\u{feff}').to_string()))
        .collect();
    debug!("read_csv_questions: header: {:?}", header);
    let cols = get_question_columns(path, &header)?;

    let mut res: Vec<QuestionRow> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_questions: lineno: {:?} row: {:?}", lineno, line);
        if line.iter().all(|s| s.trim().is_empty()) {
            continue;
        }
        res.push(parse_line(path, lineno, &line, cols)?);
    }
    info!(
        "Read {} questionnaire rows from {}",
        res.len(),
        simplify_file_name(path)
    );
    Ok(res)
}

fn parse_line(
    path: &str,
    lineno: usize,
    line: &csv::StringRecord,
    cols: QuestionColumns,
) -> RadarResult<QuestionRow> {
    let class_code = line.get(cols.class_idx).unwrap_or("").trim();
    let question_text = line.get(cols.question_idx).unwrap_or("").trim();
    ensure!(
        !class_code.is_empty(),
        EmptyCellSnafu {
            path,
            lineno,
            column: io_common::CLASS_COLUMN
        }
    );
    ensure!(
        !question_text.is_empty(),
        EmptyCellSnafu {
            path,
            lineno,
            column: io_common::QUESTION_COLUMN
        }
    );
    Ok(QuestionRow::new(class_code, question_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    fn path_of(f: &tempfile::NamedTempFile) -> String {
        f.path().display().to_string()
    }

    #[test]
    fn reads_rows_in_order() {
        let f = write_csv("classe,pergunta\n1.0,Governance\n1.1,Q1\n1.2,\"Q2, with a comma\"\n");
        let rows = read_csv_questions(&path_of(&f)).unwrap();
        assert_eq!(
            rows,
            vec![
                QuestionRow::new("1.0", "Governance"),
                QuestionRow::new("1.1", "Q1"),
                QuestionRow::new("1.2", "Q2, with a comma"),
            ]
        );
    }

    #[test]
    fn extra_columns_and_bom() {
        let f = write_csv("\u{feff}pergunta,notes,classe\nGovernance,,1.0\nQ1,x,1.1\n");
        let rows = read_csv_questions(&path_of(&f)).unwrap();
        assert_eq!(rows[1], QuestionRow::new("1.1", "Q1"));
    }

    #[test]
    fn missing_columns() {
        let f = write_csv("code,question\n1.0,Governance\n");
        let err = read_csv_questions(&path_of(&f)).unwrap_err();
        assert!(matches!(err, RadarError::MissingColumns { missing, .. } if missing == "classe, pergunta"));
    }

    #[test]
    fn missing_file() {
        let err = read_csv_questions("/no/such/dir/Pasta1.csv").unwrap_err();
        assert!(matches!(err, RadarError::MissingQuestionFile { .. }));
    }

    #[test]
    fn empty_cells_are_reported_with_line() {
        let f = write_csv("classe,pergunta\n1.0,Governance\n1.1,\n");
        let err = read_csv_questions(&path_of(&f)).unwrap_err();
        assert!(matches!(
            err,
            RadarError::EmptyCell {
                lineno: 3,
                column: "pergunta",
                ..
            }
        ));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let f = write_csv("classe,pergunta\n1.0,Governance\n,\n1.1,Q1\n");
        let rows = read_csv_questions(&path_of(&f)).unwrap();
        assert_eq!(rows.len(), 2);
    }
}

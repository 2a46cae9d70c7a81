use std::collections::HashMap;
use std::path::Path;

use crate::radar::*;

pub const CLASS_COLUMN: &str = "classe";
pub const QUESTION_COLUMN: &str = "pergunta";

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The positions of the mandatory columns of a questionnaire.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct QuestionColumns {
    pub class_idx: usize,
    pub question_idx: usize,
}

/// Given the header of a file (names of each of the columns), finds the position of
/// the class and question columns. All the missing columns are reported at once.
pub fn get_question_columns(path: &str, header: &[Option<String>]) -> RadarResult<QuestionColumns> {
    let col_names: HashMap<String, usize> = header
        .iter()
        .enumerate()
        .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim().to_string(), idx)))
        .collect();

    debug!("get_question_columns: col_names: {:?}", col_names);

    let class_idx = col_names.get(CLASS_COLUMN);
    let question_idx = col_names.get(QUESTION_COLUMN);
    match (class_idx, question_idx) {
        (Some(c), Some(q)) => Ok(QuestionColumns {
            class_idx: *c,
            question_idx: *q,
        }),
        _ => {
            let missing: Vec<&str> = [(CLASS_COLUMN, class_idx), (QUESTION_COLUMN, question_idx)]
                .iter()
                .filter(|(_, idx)| idx.is_none())
                .map(|(name, _)| *name)
                .collect();
            MissingColumnsSnafu {
                path,
                missing: missing.join(", "),
            }
            .fail()
        }
    }
}

/// Checks that the input file exists before handing it over to a reader, so that
/// a missing questionnaire gets its own error.
pub fn check_exists(path: &str) -> RadarResult<()> {
    ensure!(Path::new(path).is_file(), MissingQuestionFileSnafu { path });
    Ok(())
}

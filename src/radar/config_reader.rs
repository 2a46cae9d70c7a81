use crate::radar::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

pub const DEFAULT_TITLE: &str = "Compliance and process maturity matrix";
pub const DEFAULT_WORKBOOK_NAME: &str = "respostas_e_grafico.xlsx";

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputSettings {
    pub title: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "workbookName")]
    pub workbook_name: Option<String>,
    #[serde(rename = "chartName")]
    pub chart_name: Option<String>,
    #[serde(rename = "summaryName")]
    pub summary_name: Option<String>,
    #[serde(rename = "fontPath")]
    pub font_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize, Default)]
pub struct ParticipantConfig {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
}

impl ParticipantConfig {
    pub fn to_form(&self) -> IntakeForm {
        IntakeForm {
            name: self.name.clone().unwrap_or_default(),
            email: self.email.clone().unwrap_or_default(),
            company: self.company.clone().unwrap_or_default(),
            phone: self.phone.clone().unwrap_or_default(),
        }
    }
}

#[derive(PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SurveyConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "questionSources")]
    pub question_sources: Vec<FileSource>,
    pub participant: Option<ParticipantConfig>,
    /// Kept as raw JSON so that the values are checked with the same rules as
    /// an answers file.
    pub answers: Option<JSValue>,
}

impl SurveyConfig {
    pub fn title(&self) -> String {
        self.output_settings
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}

pub fn read_config(path: &str) -> RadarResult<SurveyConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: SurveyConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

pub fn read_summary(path: &str) -> RadarResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Reads an answers file: a JSON object from the question code to the score.
pub fn read_answers(path: &str) -> RadarResult<Vec<(String, i64)>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    parse_answers(&js)
}

pub fn parse_answers(js: &JSValue) -> RadarResult<Vec<(String, i64)>> {
    let obj = js.as_object().context(AnswersNotAnObjectSnafu {})?;
    let mut res: Vec<(String, i64)> = Vec::new();
    for (code, v) in obj.iter() {
        let value = read_js_int(v).context(ParsingAnswerSnafu {
            code: code.clone(),
            content: v.to_string(),
        })?;
        res.push((code.clone(), value));
    }
    Ok(res)
}

// Scores may be written as numbers or as strings.
fn read_js_int(x: &JSValue) -> Option<i64> {
    match x {
        JSValue::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        JSValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_config() {
        let c: SurveyConfig = serde_json::from_value(json!({
            "questionSources": [{"provider": "csv", "filePath": "q.csv"}]
        }))
        .unwrap();
        assert_eq!(c.title(), DEFAULT_TITLE);
        assert_eq!(c.question_sources[0].file_path, "q.csv");
        assert!(c.participant.is_none());
        assert!(c.answers.is_none());
    }

    #[test]
    fn answers_accept_numbers_and_strings() {
        let a = parse_answers(&json!({"1.1": 5, "1.2": "3", "1.3": 2.0})).unwrap();
        assert_eq!(
            a,
            vec![
                ("1.1".to_string(), 5),
                ("1.2".to_string(), 3),
                ("1.3".to_string(), 2)
            ]
        );
    }

    #[test]
    fn answers_reject_garbage() {
        assert!(matches!(
            parse_answers(&json!([1, 2])),
            Err(RadarError::AnswersNotAnObject {})
        ));
        assert!(matches!(
            parse_answers(&json!({"1.1": "lots"})),
            Err(RadarError::ParsingAnswer { .. })
        ));
        assert!(matches!(
            parse_answers(&json!({"1.1": 2.5})),
            Err(RadarError::ParsingAnswer { .. })
        ));
    }

    #[test]
    fn participant_to_form() {
        let p = ParticipantConfig {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        let f = p.to_form();
        assert_eq!(f.name, "Ana");
        assert_eq!(f.email, "");
    }
}

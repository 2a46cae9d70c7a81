use log::{debug, info, warn};

use maturity_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use calamine::{open_workbook, Reader, Xlsx};

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::radar::config_reader::*;

pub mod chart;
pub mod config_reader;
pub mod export;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod prompt;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RadarError {
    #[snafu(display("The questionnaire file {path} was not found"))]
    MissingQuestionFile { path: String },
    #[snafu(display("Make sure that the file {path} contains the columns 'classe' and 'pergunta' (missing: {missing})"))]
    MissingColumns { path: String, missing: String },
    #[snafu(display("Line {lineno} of {path}: the column '{column}' is empty"))]
    EmptyCell {
        path: String,
        lineno: usize,
        column: &'static str,
    },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} is empty"))]
    EmptyExcel { path: String },
    #[snafu(display("The Excel file {path} has no worksheet named {name}"))]
    MissingWorksheet { path: String, name: String },
    #[snafu(display("The Excel file {path} has several worksheets, the worksheet name must be provided"))]
    TooManyWorksheets { path: String },
    #[snafu(display("Line {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("The answers must be a JSON object from the question code to the score"))]
    AnswersNotAnObject {},
    #[snafu(display("The answer to {code} is not a whole number: {content}"))]
    ParsingAnswer { code: String, content: String },
    #[snafu(display("Input type not implemented: {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("No questionnaire provided, use --input or --config"))]
    NoQuestionSource {},
    #[snafu(display("{source}"))]
    Scoring { source: ScoringErrors },
    #[snafu(display("Error on the terminal"))]
    Prompt { source: std::io::Error },
    #[snafu(display("The input ended before the questionnaire was submitted"))]
    EndOfInput {},
    #[snafu(display("Error drawing the chart: {message}"))]
    Drawing { message: String },
    #[snafu(display("Error encoding the chart"))]
    EncodingPng { source: image::ImageError },
    #[snafu(display("There is nothing to chart: no category has any question"))]
    NothingToChart {},
    #[snafu(display("Error generating the Excel file"))]
    Export {
        source: rust_xlsxwriter::XlsxError,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RadarResult<T> = Result<T, RadarError>;

/// The locations of all the inputs and outputs of a run, after merging the
/// configuration file and the command line.
#[derive(PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub title: String,
    pub sources: Vec<FileSource>,
    pub participant: ParticipantConfig,
    pub answers: Option<Vec<(String, i64)>>,
    pub workbook_path: String,
    pub chart_path: Option<String>,
    pub summary_path: Option<String>,
    pub reference_path: Option<String>,
    pub font_path: Option<String>,
}

fn resolve_path(root: Option<&Path>, p: &str) -> String {
    match root {
        Some(r) if Path::new(p).is_relative() => r.join(p).display().to_string(),
        _ => p.to_string(),
    }
}

fn output_path(
    root: Option<&Path>,
    settings: &OutputSettings,
    name: &Option<String>,
) -> Option<String> {
    let n = name.as_ref()?;
    let p: PathBuf = match &settings.output_directory {
        Some(dir) => [dir.as_str(), n.as_str()].iter().collect(),
        None => PathBuf::from(n),
    };
    Some(resolve_path(root, &p.display().to_string()))
}

/// Merges the configuration file (if any) with the command line. The command line
/// takes precedence.
pub fn resolve_settings(args: &Args) -> RadarResult<RunSettings> {
    let (config, root_p): (Option<SurveyConfig>, Option<PathBuf>) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (Some(config), Some(root_p))
        }
        None => (None, None),
    };
    let root = root_p.as_deref();
    let output_settings = config
        .as_ref()
        .map(|c| c.output_settings.clone())
        .unwrap_or_default();

    let sources: Vec<FileSource> = match &args.input {
        Some(input) => vec![FileSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input.clone(),
            excel_worksheet_name: args.excel_worksheet_name.clone(),
        }],
        None => config
            .as_ref()
            .map(|c| c.question_sources.clone())
            .unwrap_or_default()
            .into_iter()
            .map(|cfs| FileSource {
                file_path: resolve_path(root, &cfs.file_path),
                ..cfs
            })
            .collect(),
    };
    ensure!(!sources.is_empty(), NoQuestionSourceSnafu {});

    let from_config = config
        .as_ref()
        .and_then(|c| c.participant.clone())
        .unwrap_or_default();
    let participant = ParticipantConfig {
        name: args.name.clone().or(from_config.name),
        email: args.email.clone().or(from_config.email),
        company: args.company.clone().or(from_config.company),
        phone: args.phone.clone().or(from_config.phone),
    };

    let answers = match (&args.answers, config.as_ref().and_then(|c| c.answers.as_ref())) {
        (Some(p), _) => Some(read_answers(p)?),
        (None, Some(js)) => Some(parse_answers(js)?),
        (None, None) => None,
    };

    let workbook_path = args.out.clone().unwrap_or_else(|| {
        let name = output_settings
            .workbook_name
            .clone()
            .unwrap_or_else(|| DEFAULT_WORKBOOK_NAME.to_string());
        output_path(root, &output_settings, &Some(name.clone())).unwrap_or(name)
    });

    Ok(RunSettings {
        title: config
            .as_ref()
            .map(|c| c.title())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        sources,
        participant,
        answers,
        workbook_path,
        chart_path: args
            .chart
            .clone()
            .or_else(|| output_path(root, &output_settings, &output_settings.chart_name)),
        summary_path: args
            .summary
            .clone()
            .or_else(|| output_path(root, &output_settings, &output_settings.summary_name)),
        reference_path: args.reference.clone(),
        font_path: args
            .font
            .clone()
            .or_else(|| output_settings.font_path.as_ref().map(|p| resolve_path(root, p))),
    })
}

fn read_questions(cfs: &FileSource) -> RadarResult<Vec<QuestionRow>> {
    info!("Attempting to read questionnaire {:?}", cfs.file_path);
    match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_questions(&cfs.file_path),
        "xlsx" | "excel" => io_excel::read_excel_questions(&cfs.file_path, cfs),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

fn build_summary_js(
    title: &str,
    participant: Option<&Participant>,
    hierarchy: &Hierarchy,
    scores: &[CategoryScore],
    answers: &AnswerSet,
) -> JSValue {
    let c = OutputConfig {
        title: title.to_string(),
        name: participant.map(|p| p.name.clone()),
        email: participant.map(|p| p.email.clone()),
        company: participant.map(|p| p.company.clone()),
        phone: participant.map(|p| p.phone.clone()),
    };
    let mut results: Vec<JSValue> = Vec::new();
    for score in scores {
        let mut category_answers: JSMap<String, JSValue> = JSMap::new();
        if let Some(category) = hierarchy.get(&score.code) {
            for code in category.children.keys() {
                category_answers.insert(code.clone(), json!(answers.get(code)));
            }
        }
        results.push(json!({
            "code": score.code,
            "title": score.title,
            "percentage": format!("{:.2}", score.percentage),
            "answers": category_answers
        }));
    }
    json!({
        "config": c,
        "results": results })
}

fn write_file(path: &str, content: &[u8]) -> RadarResult<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path })?;
        }
    }
    fs::write(path, content).context(WritingOutputSnafu { path })
}

/// Runs a questionnaire from start to end: reads the questions, collects the
/// answers (from the settings or on the terminal), scores them, draws the chart
/// and writes the workbook and the summary.
///
/// Returns the summary of the scores.
pub fn run_survey<R: BufRead, W: Write>(
    settings: &RunSettings,
    input: R,
    output: W,
) -> RadarResult<JSValue> {
    let mut rows: Vec<QuestionRow> = Vec::new();
    for cfs in settings.sources.iter() {
        let mut file_rows = read_questions(cfs)?;
        rows.append(&mut file_rows);
    }
    let hierarchy = build_hierarchy(&rows).context(ScoringSnafu {})?;
    info!(
        "Questionnaire with {} categories and {} questions",
        hierarchy.len(),
        hierarchy.sub_items().count()
    );

    let mut prompter = prompt::Prompter::new(input, output);
    let mut session = Session::new();
    let known = settings.participant.to_form();
    match &settings.answers {
        Some(answers) => {
            if session.submit_intake(&known).is_err() {
                prompter.intake(&mut session, &settings.title, &known)?;
            }
            for (code, value) in answers.iter() {
                session
                    .record_answer(&hierarchy, code, *value)
                    .context(ScoringSnafu {})?;
            }
            debug!("run_survey: {} answers read", session.answers().len());
        }
        None => {
            prompter.run(&mut session, &hierarchy, &settings.title, &known)?;
        }
    }
    let mut output = prompter.into_output();

    let scores = aggregate(&hierarchy, session.answers());
    let series = chart_series(&scores);
    for s in scores.iter() {
        writeln!(output, "  {} {}: {:.1}%", s.code, s.title, s.percentage).context(PromptSnafu {})?;
    }

    if series.is_empty() {
        warn!("No category has any question, skipping the chart and the export");
        writeln!(output, "{}", RadarError::NothingToChart {}).context(PromptSnafu {})?;
    } else {
        let with_labels = chart::ensure_label_font(settings.font_path.as_deref());
        let png = chart::render_png(&series, with_labels)?;
        if let Some(chart_path) = &settings.chart_path {
            write_file(chart_path, &png)?;
            writeln!(output, "Chart written to {}", chart_path).context(PromptSnafu {})?;
        }
        let workbook = export::export_workbook(&hierarchy, session.answers(), &series, &png)?;
        write_file(&settings.workbook_path, &workbook)?;
        writeln!(output, "Workbook written to {}", settings.workbook_path)
            .context(PromptSnafu {})?;
    }

    let result_js = build_summary_js(
        &settings.title,
        session.participant(),
        &hierarchy,
        &scores,
        session.answers(),
    );
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {})?;
    match settings.summary_path.as_deref() {
        Some("stdout") => {
            writeln!(output, "{}", pretty_js_stats).context(PromptSnafu {})?;
        }
        Some(p) => {
            write_file(p, pretty_js_stats.as_bytes())?;
        }
        None => {}
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference_path {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(result_js)
}

#[cfg(test)]
fn run_survey_test(test_name: &str, config_lpath: &str, summary_lpath: &str) -> JSValue {
    let _ = env_logger::builder().is_test(true).try_init();
    let test_dir = option_env!("MATRAD_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"));
    info!("Running test {}", test_name);
    let out_dir = tempfile::tempdir().unwrap();
    let args = Args {
        config: Some(format!("{}/{}/{}", test_dir, test_name, config_lpath)),
        reference: Some(format!("{}/{}/{}", test_dir, test_name, summary_lpath)),
        out: Some(out_dir.path().join("out.xlsx").display().to_string()),
        ..Default::default()
    };
    let settings = resolve_settings(&args).unwrap();
    let res = run_survey(&settings, std::io::Cursor::new(Vec::new()), Vec::new());
    match res {
        Ok(js) => {
            assert!(out_dir.path().join("out.xlsx").is_file());
            js
        }
        Err(e) => panic!("An error occured in {}: {}", test_name, e),
    }
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) -> JSValue {
    run_survey_test(
        test_name,
        format!("{}_config.json", test_name).as_str(),
        format!("{}_expected_summary.json", test_name).as_str(),
    )
}

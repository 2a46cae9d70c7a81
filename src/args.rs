use clap::Parser;

/// This is a questionnaire program for maturity matrices. It scores the answers by category,
/// draws a radar chart and exports everything to an Excel workbook.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the questionnaire sources and the outputs.
    /// For more information about the file format, read the documentation of the `manual` module.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) A reference file containing a summary of the scores in JSON format. If provided, matrad will
    /// check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path) The questionnaire. Setting this option overrides the question sources that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: the only worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, optional) The answers in JSON format, as an object from the question code to the score.
    /// If not provided, the questions are asked on the terminal.
    #[clap(short, long, value_parser)]
    pub answers: Option<String>,

    /// (file path, default respostas_e_grafico.xlsx) The Excel workbook to write.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, optional) If specified, the radar chart is also written to this location as a PNG picture.
    #[clap(long, value_parser)]
    pub chart: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the scores will be written in JSON format to
    /// the given location.
    #[clap(short, long, value_parser)]
    pub summary: Option<String>,

    // Intake form
    /// The name of the participant. Asked on the terminal if missing.
    #[clap(long, value_parser)]
    pub name: Option<String>,

    /// The e-mail of the participant.
    #[clap(long, value_parser)]
    pub email: Option<String>,

    /// The company of the participant.
    #[clap(long, value_parser)]
    pub company: Option<String>,

    /// The phone number of the participant.
    #[clap(long, value_parser)]
    pub phone: Option<String>,

    /// (file path, optional) A TrueType font used for the labels of the chart. A system font is looked up
    /// otherwise, and the labels are left out if none is found.
    #[clap(long, value_parser)]
    pub font: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

// ********* Input data structures ***********

use indexmap::IndexMap;
use std::error::Error;
use std::fmt::Display;

/// The highest value a sub item can be scored with.
pub const MAX_ANSWER: u8 = 5;

/// The ticks of the radial axis of the radar chart, in percent.
pub const RADIAL_TICKS: [u32; 6] = [0, 20, 40, 60, 80, 100];

/// One line of the questionnaire, as read from the tabular input.
///
/// A code ending in `.0` (`3.0`) is the title of a category, any other code
/// (`3.2`) is a question scored by the participant.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionRow {
    pub class_code: String,
    pub question_text: String,
}

impl QuestionRow {
    pub fn new(class_code: &str, question_text: &str) -> QuestionRow {
        QuestionRow {
            class_code: class_code.to_string(),
            question_text: question_text.to_string(),
        }
    }
}

/// A category and the sub items attached to it, in input order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategoryGroup {
    pub code: String,
    /// Empty when the category was only created by one of its sub items.
    pub title: String,
    pub children: IndexMap<String, String>,
}

impl CategoryGroup {
    pub fn placeholder(code: &str) -> CategoryGroup {
        CategoryGroup {
            code: code.to_string(),
            title: String::new(),
            children: IndexMap::new(),
        }
    }
}

/// All the categories of a questionnaire, keyed by their code.
///
/// The order is the order in which the categories were first seen in the input,
/// which in turn drives the order of the chart axes and of the export.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Hierarchy {
    pub categories: IndexMap<String, CategoryGroup>,
}

impl Hierarchy {
    pub fn get(&self, code: &str) -> Option<&CategoryGroup> {
        self.categories.get(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryGroup> {
        self.categories.values()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All the sub items, in category order then input order.
    pub fn sub_items(&self) -> impl Iterator<Item = (&String, &String)> {
        self.categories.values().flat_map(|c| c.children.iter())
    }

    pub fn contains_sub_item(&self, code: &str) -> bool {
        self.categories
            .values()
            .any(|c| c.children.contains_key(code))
    }
}

/// The answers of a participant. Sub items that were not answered count as 0.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AnswerSet {
    values: IndexMap<String, u8>,
}

impl AnswerSet {
    pub fn new() -> AnswerSet {
        AnswerSet::default()
    }

    pub fn get(&self, code: &str) -> u8 {
        self.values.get(code).cloned().unwrap_or(0)
    }

    pub fn insert(&mut self, code: &str, value: u8) -> Result<(), ScoringErrors> {
        if value > MAX_ANSWER {
            return Err(ScoringErrors::AnswerOutOfRange {
                code: code.to_string(),
                value: value as i64,
            });
        }
        self.values.insert(code.to_string(), value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u8)> {
        self.values.iter()
    }
}

/// The information requested on the intake screen, as typed.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct IntakeForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
}

/// A participant whose intake form was accepted.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Participant {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
}

// ******** Output data structures *********

/// The score of one category.
#[derive(PartialEq, Debug, Clone)]
pub struct CategoryScore {
    pub code: String,
    pub title: String,
    /// Between 0 and 100.
    pub percentage: f64,
}

/// The labels and percentages of the categories, in category order.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ScoreSummary {
    pub labels: Vec<String>,
    pub percentages: Vec<f64>,
}

/// The series fed to the radar chart. All the vectors have the same length,
/// which is the number of categories plus one: the first point is repeated at
/// the end to close the polygon.
#[derive(PartialEq, Debug, Clone)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub percentages: Vec<f64>,
    /// In radians.
    pub angles: Vec<f64>,
}

impl ChartSeries {
    /// The number of axes in the chart.
    pub fn num_categories(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Errors that prevent the questionnaire from being scored.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringErrors {
    EmptyCode { question: String },
    EmptyQuestion { code: String },
    AnswerOutOfRange { code: String, value: i64 },
    UnknownSubItem { code: String },
    IncompleteIntake { missing: Vec<&'static str> },
    IntakeRequired,
}

impl Error for ScoringErrors {}

impl Display for ScoringErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringErrors::EmptyCode { question } => {
                write!(f, "missing class code for question {:?}", question)
            }
            ScoringErrors::EmptyQuestion { code } => {
                write!(f, "missing question text for class code {}", code)
            }
            ScoringErrors::AnswerOutOfRange { code, value } => write!(
                f,
                "answer {} for {} is outside of the range 0 to {}",
                value, code, MAX_ANSWER
            ),
            ScoringErrors::UnknownSubItem { code } => {
                write!(f, "{} is not a question of this questionnaire", code)
            }
            ScoringErrors::IncompleteIntake { missing } => write!(
                f,
                "please fill in all the fields before proceeding (missing: {})",
                missing.join(", ")
            ),
            ScoringErrors::IntakeRequired => {
                write!(f, "the intake form must be completed first")
            }
        }
    }
}

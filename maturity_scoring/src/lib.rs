pub mod builder;
mod config;
pub mod manual;
pub mod quick_start;
pub mod session;

use log::{debug, info};

use std::f64::consts::PI;

pub use crate::builder::{build_hierarchy, HierarchyBuilder};
pub use crate::config::*;
pub use crate::session::{Session, Stage};

/// The score of one category, between 0 and 100.
///
/// Returns None if the category has no sub items, in which case it is not
/// part of the results.
pub fn category_percentage(category: &CategoryGroup, answers: &AnswerSet) -> Option<f64> {
    let num_questions = category.children.len();
    if num_questions == 0 {
        return None;
    }
    let total: u64 = category
        .children
        .keys()
        .map(|code| answers.get(code) as u64)
        .sum();
    let max_total = (num_questions as u64) * (MAX_ANSWER as u64);
    Some(100.0 * (total as f64) / (max_total as f64))
}

/// Scores all the categories of a questionnaire, in category order.
///
/// Arguments:
/// * `hierarchy` the categories and their sub items
/// * `answers` the answers of the participant. Missing answers count as 0.
pub fn aggregate(hierarchy: &Hierarchy, answers: &AnswerSet) -> Vec<CategoryScore> {
    info!(
        "Scoring {:?} categories with {:?} answers",
        hierarchy.len(),
        answers.len()
    );
    let mut res: Vec<CategoryScore> = Vec::new();
    for category in hierarchy.iter() {
        match category_percentage(category, answers) {
            Some(percentage) => {
                info!(
                    "Category {} {:?}: {:.1}%",
                    category.code, category.title, percentage
                );
                res.push(CategoryScore {
                    code: category.code.clone(),
                    title: category.title.clone(),
                    percentage,
                });
            }
            None => {
                debug!("aggregate: skipping empty category {:?}", category.code);
            }
        }
    }
    res
}

/// The labels and percentages of the scores, as parallel lists.
pub fn split_scores(scores: &[CategoryScore]) -> ScoreSummary {
    ScoreSummary {
        labels: scores.iter().map(|s| s.title.clone()).collect(),
        percentages: scores.iter().map(|s| s.percentage).collect(),
    }
}

/// Builds the closed series of a radar chart.
///
/// The angles are evenly spaced over the full circle, starting at 0. The first
/// point is repeated at the end so that the polygon is closed. Returns an empty
/// series if there are no scores.
pub fn chart_series(scores: &[CategoryScore]) -> ChartSeries {
    let ScoreSummary {
        mut labels,
        mut percentages,
    } = split_scores(scores);
    let n = scores.len();
    let mut angles: Vec<f64> = (0..n).map(|i| 2.0 * PI * (i as f64) / (n as f64)).collect();
    if let (Some(l), Some(p), Some(a)) = (
        labels.first().cloned(),
        percentages.first().cloned(),
        angles.first().cloned(),
    ) {
        labels.push(l);
        percentages.push(p);
        angles.push(a);
    }
    ChartSeries {
        labels,
        percentages,
        angles,
    }
}

/// Runs the scoring of a questionnaire end to end: grouping, aggregation and
/// chart series.
pub fn run_scoring(
    rows: &[QuestionRow],
    answers: &AnswerSet,
) -> Result<(Hierarchy, Vec<CategoryScore>, ChartSeries), ScoringErrors> {
    let hierarchy = build_hierarchy(rows)?;
    let scores = aggregate(&hierarchy, answers);
    let series = chart_series(&scores);
    Ok((hierarchy, scores, series))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn group(code: &str, children: &[&str]) -> CategoryGroup {
        let mut c = CategoryGroup::placeholder(code);
        for child in children {
            c.children.insert(child.to_string(), format!("question {}", child));
        }
        c
    }

    fn answers(pairs: &[(&str, u8)]) -> AnswerSet {
        let mut a = AnswerSet::new();
        for (code, v) in pairs {
            a.insert(code, *v).unwrap();
        }
        a
    }

    #[test]
    fn full_marks() {
        let c = group("1.0", &["1.1", "1.2"]);
        let p = category_percentage(&c, &answers(&[("1.1", 5), ("1.2", 5)]));
        assert_eq!(p, Some(100.0));
    }

    #[test]
    fn zero_marks() {
        let c = group("1.0", &["1.1", "1.2"]);
        let p = category_percentage(&c, &answers(&[("1.1", 0), ("1.2", 0)]));
        assert_eq!(p, Some(0.0));
    }

    #[test]
    fn unanswered_counts_as_zero() {
        let c = group("1.0", &["1.1", "1.2"]);
        let p = category_percentage(&c, &answers(&[("1.1", 5)]));
        assert_eq!(p, Some(50.0));
    }

    #[test]
    fn empty_category_is_skipped() {
        init();
        let rows = vec![
            QuestionRow::new("1.0", "Only a title"),
            QuestionRow::new("2.0", "Culture"),
            QuestionRow::new("2.1", "Q"),
        ];
        let (_, scores, _) = run_scoring(&rows, &answers(&[("2.1", 4)])).unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].code, "2.0");
        assert_eq!(scores[0].percentage, 80.0);
    }

    #[test]
    fn answer_above_max_is_rejected() {
        let mut a = AnswerSet::new();
        assert!(a.insert("1.1", 6).is_err());
        assert!(a.is_empty());
    }

    #[test]
    fn series_is_closed() {
        let scores: Vec<CategoryScore> = ["A", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, t)| CategoryScore {
                code: format!("{}.0", i + 1),
                title: t.to_string(),
                percentage: 10.0 * (i as f64),
            })
            .collect();
        let s = chart_series(&scores);
        assert_eq!(s.labels.len(), 4);
        assert_eq!(s.percentages.len(), 4);
        assert_eq!(s.angles.len(), 4);
        assert_eq!(s.labels.last(), s.labels.first());
        assert_eq!(s.percentages.last(), s.percentages.first());
        assert_eq!(s.angles.last(), s.angles.first());
        assert_eq!(s.num_categories(), 3);
        assert!((s.angles[1] - 2.0 * PI / 3.0).abs() < 1e-12);
    }

    #[test]
    fn series_of_nothing() {
        let s = chart_series(&[]);
        assert!(s.is_empty());
        assert_eq!(s.num_categories(), 0);
    }

    #[test]
    fn end_to_end_governance() {
        init();
        let rows = vec![
            QuestionRow::new("1.0", "Governance"),
            QuestionRow::new("1.1", "Q1"),
            QuestionRow::new("1.2", "Q2"),
        ];
        let (h, scores, series) =
            run_scoring(&rows, &answers(&[("1.1", 5), ("1.2", 3)])).unwrap();
        assert_eq!(h.len(), 1);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].title, "Governance");
        assert!((scores[0].percentage - 80.0).abs() < 1e-9);
        assert_eq!(series.labels, vec!["Governance", "Governance"]);
    }
}

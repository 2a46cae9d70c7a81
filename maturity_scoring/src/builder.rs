use log::{debug, warn};

pub use crate::config::*;

/// Returns true if the code is the title of a category (`3.0`).
pub fn is_parent_code(code: &str) -> bool {
    code.ends_with(".0")
}

/// The category a code belongs to: its integer part followed by `.0`.
///
/// ```
/// use maturity_scoring::builder::parent_code;
///
/// assert_eq!(parent_code("3.2"), "3.0");
/// assert_eq!(parent_code("12.10"), "12.0");
/// ```
pub fn parent_code(code: &str) -> String {
    let integer_part = code.split('.').next().unwrap_or(code);
    format!("{}.0", integer_part)
}

/// A builder for grouping the rows of a questionnaire into categories.
///
/// ```
/// use maturity_scoring::builder::HierarchyBuilder;
/// use maturity_scoring::QuestionRow;
/// # use maturity_scoring::ScoringErrors;
///
/// let mut builder = HierarchyBuilder::new();
/// builder.add_row(&QuestionRow::new("1.0", "Governance"))?;
/// builder.add_row(&QuestionRow::new("1.1", "Is there a code of conduct?"))?;
///
/// let hierarchy = builder.build();
/// assert_eq!(hierarchy.get("1.0").map(|c| c.children.len()), Some(1));
///
/// # Ok::<(), ScoringErrors>(())
/// ```
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    _hierarchy: Hierarchy,
}

impl HierarchyBuilder {
    pub fn new() -> HierarchyBuilder {
        HierarchyBuilder::default()
    }

    /// Adds a row to the hierarchy.
    ///
    /// A category row sets the title of its category, keeping the sub items that
    /// may already be attached to it. A sub item row is attached to its category,
    /// which is created without a title if it has not been seen yet.
    pub fn add_row(&mut self, row: &QuestionRow) -> Result<(), ScoringErrors> {
        let code = row.class_code.trim();
        let text = row.question_text.trim();
        if code.is_empty() {
            return Err(ScoringErrors::EmptyCode {
                question: text.to_string(),
            });
        }
        if text.is_empty() {
            return Err(ScoringErrors::EmptyQuestion {
                code: code.to_string(),
            });
        }

        if is_parent_code(code) {
            debug!("add_row: category {:?}: {:?}", code, text);
            let category = self
                ._hierarchy
                .categories
                .entry(code.to_string())
                .or_insert_with(|| CategoryGroup::placeholder(code));
            category.title = text.to_string();
        } else {
            let parent = parent_code(code);
            debug!("add_row: sub item {:?} -> {:?}", code, parent);
            let category = self
                ._hierarchy
                .categories
                .entry(parent.clone())
                .or_insert_with(|| CategoryGroup::placeholder(&parent));
            if let Some(previous) = category
                .children
                .insert(code.to_string(), text.to_string())
            {
                warn!(
                    "add_row: sub item {} appears more than once, replacing {:?}",
                    code, previous
                );
            }
        }
        Ok(())
    }

    pub fn build(self) -> Hierarchy {
        self._hierarchy
    }
}

/// Groups all the rows of a questionnaire.
pub fn build_hierarchy(rows: &[QuestionRow]) -> Result<Hierarchy, ScoringErrors> {
    let mut builder = HierarchyBuilder::new();
    for row in rows {
        builder.add_row(row)?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, &str)]) -> Vec<QuestionRow> {
        pairs
            .iter()
            .map(|(code, text)| QuestionRow::new(code, text))
            .collect()
    }

    #[test]
    fn category_row_sets_title() {
        let h = build_hierarchy(&rows(&[("3.0", "Risk management")])).unwrap();
        let cat = h.get("3.0").unwrap();
        assert_eq!(cat.title, "Risk management");
        assert_eq!(cat.code, "3.0");
        assert!(cat.children.is_empty());
    }

    #[test]
    fn sub_item_attaches_to_its_category() {
        let h = build_hierarchy(&rows(&[("3.0", "Risk"), ("3.2", "Is risk mapped?")])).unwrap();
        let cat = h.get("3.0").unwrap();
        assert_eq!(cat.children.get("3.2").unwrap(), "Is risk mapped?");
    }

    #[test]
    fn orphan_sub_item_creates_placeholder() {
        let h = build_hierarchy(&rows(&[("3.2", "Is risk mapped?")])).unwrap();
        let cat = h.get("3.0").unwrap();
        assert_eq!(cat.title, "");
        assert_eq!(cat.children.len(), 1);
    }

    #[test]
    fn late_title_keeps_children_and_position() {
        let h = build_hierarchy(&rows(&[
            ("2.1", "Q"),
            ("1.0", "First"),
            ("2.0", "Second"),
            ("2.2", "R"),
        ]))
        .unwrap();
        let codes: Vec<&String> = h.categories.keys().collect();
        assert_eq!(codes, vec!["2.0", "1.0"]);
        let cat = h.get("2.0").unwrap();
        assert_eq!(cat.title, "Second");
        let children: Vec<&String> = cat.children.keys().collect();
        assert_eq!(children, vec!["2.1", "2.2"]);
    }

    #[test]
    fn duplicate_sub_item_is_replaced() {
        let h = build_hierarchy(&rows(&[("1.0", "A"), ("1.1", "old"), ("1.1", "new")])).unwrap();
        let cat = h.get("1.0").unwrap();
        assert_eq!(cat.children.len(), 1);
        assert_eq!(cat.children.get("1.1").unwrap(), "new");
    }

    #[test]
    fn values_are_trimmed() {
        let h = build_hierarchy(&rows(&[(" 1.0 ", " Governance "), ("1.1 ", "Q1")])).unwrap();
        assert_eq!(h.get("1.0").unwrap().title, "Governance");
        assert!(h.contains_sub_item("1.1"));
    }

    #[test]
    fn empty_cells_are_rejected() {
        assert_eq!(
            build_hierarchy(&rows(&[("", "Q")])),
            Err(ScoringErrors::EmptyCode {
                question: "Q".to_string()
            })
        );
        assert_eq!(
            build_hierarchy(&rows(&[("1.1", "  ")])),
            Err(ScoringErrors::EmptyQuestion {
                code: "1.1".to_string()
            })
        );
    }

    #[test]
    fn parent_codes() {
        assert!(is_parent_code("10.0"));
        assert!(!is_parent_code("10.01"));
        assert_eq!(parent_code("7"), "7.0");
        assert_eq!(parent_code("7.1.3"), "7.0");
    }
}

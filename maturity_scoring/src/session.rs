use log::{debug, info};

pub use crate::config::*;

/// The screen a session is currently on.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Stage {
    Intake,
    Questionnaire,
}

/// The state of one participant filling in the questionnaire.
///
/// A session starts on the intake screen. Once the intake form is accepted,
/// answers can be recorded. Resetting the session clears everything and goes
/// back to the intake screen.
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    participant: Option<Participant>,
    answers: AnswerSet,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Session {
        Session {
            stage: Stage::Intake,
            participant: None,
            answers: AnswerSet::new(),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Accepts the intake form if all the fields are filled in.
    ///
    /// The session stays on the intake screen otherwise, and the error lists the
    /// fields that are missing.
    pub fn submit_intake(&mut self, form: &IntakeForm) -> Result<(), ScoringErrors> {
        let fields: [(&'static str, &String); 4] = [
            ("name", &form.name),
            ("email", &form.email),
            ("company", &form.company),
            ("phone", &form.phone),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| *k)
            .collect();
        if !missing.is_empty() {
            debug!("submit_intake: missing fields {:?}", missing);
            return Err(ScoringErrors::IncompleteIntake { missing });
        }
        self.participant = Some(Participant {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            company: form.company.trim().to_string(),
            phone: form.phone.trim().to_string(),
        });
        self.stage = Stage::Questionnaire;
        info!("Intake accepted for {}", form.name.trim());
        Ok(())
    }

    /// Records the answer to one sub item of the questionnaire.
    pub fn record_answer(
        &mut self,
        hierarchy: &Hierarchy,
        code: &str,
        value: i64,
    ) -> Result<(), ScoringErrors> {
        if self.stage != Stage::Questionnaire {
            return Err(ScoringErrors::IntakeRequired);
        }
        if !hierarchy.contains_sub_item(code) {
            return Err(ScoringErrors::UnknownSubItem {
                code: code.to_string(),
            });
        }
        if !(0..=(MAX_ANSWER as i64)).contains(&value) {
            return Err(ScoringErrors::AnswerOutOfRange {
                code: code.to_string(),
                value,
            });
        }
        self.answers.insert(code, value as u8)
    }

    pub fn reset(&mut self) {
        debug!("reset: clearing session");
        self.stage = Stage::Intake;
        self.participant = None;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_hierarchy;

    fn form() -> IntakeForm {
        IntakeForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            company: "ACME".to_string(),
            phone: "555-0100".to_string(),
        }
    }

    fn hierarchy() -> Hierarchy {
        build_hierarchy(&[
            QuestionRow::new("1.0", "Governance"),
            QuestionRow::new("1.1", "Q1"),
        ])
        .unwrap()
    }

    #[test]
    fn starts_on_intake() {
        let s = Session::new();
        assert_eq!(s.stage(), Stage::Intake);
        assert!(s.participant().is_none());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn incomplete_intake_blocks_progression() {
        let mut s = Session::new();
        let mut f = form();
        f.email = " ".to_string();
        f.phone = String::new();
        assert_eq!(
            s.submit_intake(&f),
            Err(ScoringErrors::IncompleteIntake {
                missing: vec!["email", "phone"]
            })
        );
        assert_eq!(s.stage(), Stage::Intake);
        assert!(s.participant().is_none());
    }

    #[test]
    fn answers_require_intake() {
        let h = hierarchy();
        let mut s = Session::new();
        assert_eq!(
            s.record_answer(&h, "1.1", 3),
            Err(ScoringErrors::IntakeRequired)
        );
        s.submit_intake(&form()).unwrap();
        assert_eq!(s.stage(), Stage::Questionnaire);
        s.record_answer(&h, "1.1", 3).unwrap();
        assert_eq!(s.answers().get("1.1"), 3);
    }

    #[test]
    fn answers_are_bounded() {
        let h = hierarchy();
        let mut s = Session::new();
        s.submit_intake(&form()).unwrap();
        assert!(s.record_answer(&h, "1.1", 6).is_err());
        assert!(s.record_answer(&h, "1.1", -1).is_err());
        assert!(s.record_answer(&h, "1.9", 1).is_err());
        assert_eq!(s.answers().get("1.1"), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let h = hierarchy();
        let mut s = Session::new();
        s.submit_intake(&form()).unwrap();
        s.record_answer(&h, "1.1", 5).unwrap();
        s.reset();
        assert_eq!(s.stage(), Stage::Intake);
        assert!(s.participant().is_none());
        assert_eq!(s.answers().get("1.1"), 0);
    }
}

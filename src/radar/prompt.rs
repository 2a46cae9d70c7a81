// The terminal rendering of the intake and questionnaire screens.

use std::io::{BufRead, Write};

use crate::radar::*;

/// The result of the questionnaire screen.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Submission {
    Submitted,
    StartOver,
}

pub struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Prompter<R, W> {
        Prompter { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> RadarResult<String> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line).context(PromptSnafu {})?;
        ensure!(n > 0, EndOfInputSnafu {});
        Ok(line.trim().to_string())
    }

    fn ask(&mut self, label: &str) -> RadarResult<String> {
        write!(self.output, "{}: ", label).context(PromptSnafu {})?;
        self.output.flush().context(PromptSnafu {})?;
        self.read_line()
    }

    fn say(&mut self, message: &str) -> RadarResult<()> {
        writeln!(self.output, "{}", message).context(PromptSnafu {})
    }

    /// Shows the intake screen until all the fields are filled in.
    ///
    /// Fields already known (from the command line or the configuration) are not asked again.
    pub fn intake(
        &mut self,
        session: &mut Session,
        title: &str,
        known: &IntakeForm,
    ) -> RadarResult<()> {
        self.say(title)?;
        self.say("Please fill in your information before proceeding.")?;
        let mut form = known.clone();
        loop {
            if form.name.trim().is_empty() {
                form.name = self.ask("Name")?;
            }
            if form.email.trim().is_empty() {
                form.email = self.ask("E-mail")?;
            }
            if form.company.trim().is_empty() {
                form.company = self.ask("Company")?;
            }
            if form.phone.trim().is_empty() {
                form.phone = self.ask("Phone")?;
            }
            match session.submit_intake(&form) {
                Ok(()) => {
                    self.say("Information filled in successfully! You can proceed to the questionnaire.")?;
                    return Ok(());
                }
                Err(e) => {
                    debug!("intake: {:?}", e);
                    self.say(&format!("{}", e))?;
                }
            }
        }
    }

    /// Shows the questionnaire screen: one block per category, one bounded prompt
    /// per sub item. An empty answer keeps the current value (0 if not answered yet).
    pub fn questionnaire(
        &mut self,
        session: &mut Session,
        hierarchy: &Hierarchy,
    ) -> RadarResult<Submission> {
        self.say("Please answer the questions of each item, from 0 to 5:")?;
        for category in hierarchy.iter() {
            self.say("")?;
            self.say(&format!("{} - {}", category.code, category.title))?;
            for (code, question) in category.children.iter() {
                self.ask_score(session, hierarchy, code, question)?;
            }
        }
        self.say("")?;
        let confirm = self.ask("Submit answers and generate the chart? [Y/n]")?;
        if confirm.eq_ignore_ascii_case("n") || confirm.eq_ignore_ascii_case("no") {
            Ok(Submission::StartOver)
        } else {
            Ok(Submission::Submitted)
        }
    }

    fn ask_score(
        &mut self,
        session: &mut Session,
        hierarchy: &Hierarchy,
        code: &str,
        question: &str,
    ) -> RadarResult<()> {
        loop {
            let current = session.answers().get(code);
            let s = self.ask(&format!("  {} - {} [{}]", code, question, current))?;
            if s.is_empty() {
                return session
                    .record_answer(hierarchy, code, current as i64)
                    .context(ScoringSnafu {});
            }
            match s.parse::<i64>() {
                Ok(v) => match session.record_answer(hierarchy, code, v) {
                    Ok(()) => return Ok(()),
                    Err(e) => self.say(&format!("  {}", e))?,
                },
                Err(_) => self.say(&format!(
                    "  {:?} is not a number, please type a score from 0 to {}",
                    s, MAX_ANSWER
                ))?,
            }
        }
    }

    /// Runs both screens until the participant submits.
    pub fn run(
        &mut self,
        session: &mut Session,
        hierarchy: &Hierarchy,
        title: &str,
        known: &IntakeForm,
    ) -> RadarResult<()> {
        loop {
            if session.stage() == Stage::Intake {
                self.intake(session, title, known)?;
            }
            match self.questionnaire(session, hierarchy)? {
                Submission::Submitted => {
                    let name = session
                        .participant()
                        .map(|p| p.name.clone())
                        .unwrap_or_default();
                    self.say(&format!("Thank you, {}!", name))?;
                    self.say("Answers submitted successfully!")?;
                    return Ok(());
                }
                Submission::StartOver => {
                    info!("Session reset by the participant");
                    session.reset();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn hierarchy() -> Hierarchy {
        build_hierarchy(&[
            QuestionRow::new("1.0", "Governance"),
            QuestionRow::new("1.1", "Q1"),
            QuestionRow::new("1.2", "Q2"),
        ])
        .unwrap()
    }

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(p: Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.into_output()).unwrap()
    }

    #[test]
    fn intake_asks_again_until_complete() {
        let mut session = Session::new();
        let mut p = prompter("Ana\n\nACME\n555\nana@example.com\n");
        p.intake(&mut session, "Title", &IntakeForm::default())
            .unwrap();
        assert_eq!(session.stage(), Stage::Questionnaire);
        assert_eq!(session.participant().unwrap().email, "ana@example.com");
        let out = output(p);
        assert!(out.contains("missing: email"));
    }

    #[test]
    fn known_fields_are_not_asked() {
        let mut session = Session::new();
        let known = IntakeForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            company: "ACME".to_string(),
            phone: String::new(),
        };
        let mut p = prompter("555\n");
        p.intake(&mut session, "Title", &known).unwrap();
        assert_eq!(session.participant().unwrap().phone, "555");
        assert!(!output(p).contains("Name:"));
    }

    #[test]
    fn scores_are_bounded_and_retried() {
        let h = hierarchy();
        let mut session = Session::new();
        let mut p = prompter("Ana\na@b.c\nACME\n555\n7\nfive\n5\n\ny\n");
        p.run(&mut session, &h, "Title", &IntakeForm::default())
            .unwrap();
        assert_eq!(session.answers().get("1.1"), 5);
        assert_eq!(session.answers().get("1.2"), 0);
        let out = output(p);
        assert!(out.contains("outside of the range"));
        assert!(out.contains("is not a number"));
        assert!(out.contains("Thank you, Ana!"));
        assert!(out.contains("Answers submitted successfully!"));
    }

    #[test]
    fn start_over_resets_the_session() {
        let h = hierarchy();
        let mut session = Session::new();
        let input = "Ana\na@b.c\nACME\n555\n5\n5\nn\nBia\nb@c.d\nInc\n777\n1\n\n\n";
        let mut p = prompter(input);
        p.run(&mut session, &h, "Title", &IntakeForm::default())
            .unwrap();
        assert_eq!(session.participant().unwrap().name, "Bia");
        assert_eq!(session.answers().get("1.1"), 1);
        assert_eq!(session.answers().get("1.2"), 0);
    }

    #[test]
    fn end_of_input_is_an_error() {
        let mut session = Session::new();
        let mut p = prompter("Ana\n");
        let err = p
            .intake(&mut session, "Title", &IntakeForm::default())
            .unwrap_err();
        assert!(matches!(err, RadarError::EndOfInput {}));
    }
}

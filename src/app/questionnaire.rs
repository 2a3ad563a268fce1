//! Interactive questionnaire over any line-based input.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::assessment::{AnswerSet, OptionId, Question, QuestionBank};

/// Ask every question in order and collect the answers.
///
/// Each prompt accepts an option letter. `q` stops early and keeps the
/// answers given so far, as does end of input. Anything else re-prompts.
pub fn run_questionnaire<R: BufRead, W: Write>(
    bank: &QuestionBank,
    mut input: R,
    output: &mut W,
) -> io::Result<AnswerSet> {
    let mut answers = AnswerSet::new();
    let total = bank.len();

    'questions: for (index, question) in bank.iter().enumerate() {
        write_question(output, question, index + 1, total)?;
        loop {
            write!(output, "Your answer [a-d, q to stop]: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                debug!("Input closed after {} answers", answers.len());
                break 'questions;
            }

            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                break 'questions;
            }
            match line.parse::<OptionId>() {
                Ok(option) => {
                    answers
                        .record(bank, question.id, option)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    writeln!(output)?;
                    break;
                }
                Err(e) => writeln!(output, "{}", e)?,
            }
        }
    }

    Ok(answers)
}

fn write_question<W: Write>(
    output: &mut W,
    question: &Question,
    number: usize,
    total: usize,
) -> io::Result<()> {
    writeln!(
        output,
        "Question {}/{} [{}]",
        number,
        total,
        question.category.name()
    )?;
    writeln!(output, "{}", question.prompt)?;
    for option in &question.options {
        writeln!(output, "  {}) {}", option.id, option.label)?;
    }
    Ok(())
}

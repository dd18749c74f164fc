use crate::error::AskError;
use crate::subject::Subject;

const PERSONA: &str = "You are an experienced S.Y B.Com professor at Mumbai University with 15+ years teaching experience.";

const EXAM_MODE_ON: &str = "ON. Strict 5-mark or 10-mark answer structure required.";
const EXAM_MODE_OFF: &str = "OFF. Explain clearly for understanding.";

const INSTRUCTIONS: &str = "\
INSTRUCTIONS:
1. Structure: Introduction, Body (with subheadings), Working/Calculation (if numerical), Conclusion.
2. If numerical: Show Step-by-Step Working Notes clearly.
3. Use MARKDOWN TABLES for all accounts, statements, and differences.
4. Language: Academic, clear English suitable for Mumbai University exams.
5. Include \"Key Takeaway\" and \"Exam Tip\" sections at the end.
6. If data is missing in a numerical problem, state assumptions.
7. Reference relevant Indian laws/standards (e.g., Companies Act 2013, AS-13) where applicable.

FORMATTING:
- Use **Bold** for key terms.
- Use | Tables | for differences and accounts.
- Start with a direct answer.";

/// Ways to ask again about the previous question
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FollowUp {
    /// A shorter, simpler explanation.
    Simplify,
    /// Two practice questions, unanswered.
    Practice,
    /// An exam scoring tip for the topic.
    Tip,
}

impl FollowUp {
    /// The question to send in place of `previous`.
    pub fn question(self, previous: &str) -> String {
        match self {
            FollowUp::Simplify => format!(
                "Simplify the previous explanation for a student who is struggling to understand. Keep it brief. Context: {previous}"
            ),
            FollowUp::Practice => format!(
                "Generate 2 practice questions (one theory, one numerical if applicable) based on this topic: {previous}. Don't answer them, just list them."
            ),
            FollowUp::Tip => format!(
                "Give me a specific exam scoring tip for this specific topic: {previous} in the context of Mumbai University evaluation patterns."
            ),
        }
    }
}

/// Build the full prompt for one question.
pub fn compose(subject: &Subject, question: &str, exam_mode: bool) -> Result<String, AskError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(AskError::EmptyQuestion);
    }

    let exam = if exam_mode { EXAM_MODE_ON } else { EXAM_MODE_OFF };

    Ok(format!(
        "{PERSONA}\n\
         Subject: {title}\n\
         Subject Rules: {rules}\n\
         \n\
         User Question: \"{question}\"\n\
         Exam Mode: {exam}\n\
         \n\
         {INSTRUCTIONS}\n",
        title = subject.title,
        rules = subject.instructions,
    ))
}

/// Upper bound on the source characters embedded in a prompt.
pub const MAX_SOURCE_CHARS: usize = 4000;

pub const MIN_QUESTIONS: usize = 10;
pub const MAX_QUESTIONS: usize = 50;

/// Placeholder replaced with the (truncated) source text.
pub const CONTENT_PLACEHOLDER: &str = "{content}";

pub const QUIZ_GENERATION_PROMPT: &str = r#"Generate a multiple-choice quiz based on the content below. Generate between 10 to 50 questions.
Each question must have:
- Four options
- The correct answer
- A short explanation
- A difficulty level (easy, medium, hard)

Content:
'''{content}'''

Output JSON format:
{
  "title": "Quiz Title",
  "questions": [
    {
      "question": "Sample Question?",
      "options": ["A", "B", "C", "D"],
      "correct_answer": "B",
      "explanation": "Explanation here",
      "difficulty": "easy"
    }
  ]
}"#;

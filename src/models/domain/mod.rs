pub mod quiz;
pub mod quiz_question;
pub use quiz::Quiz;
pub use quiz_question::{Difficulty, Question};

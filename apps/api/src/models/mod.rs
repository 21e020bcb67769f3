pub mod question_answer;
pub mod space;

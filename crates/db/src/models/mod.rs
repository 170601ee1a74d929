pub mod answer_row;
pub mod section;
pub mod submission;

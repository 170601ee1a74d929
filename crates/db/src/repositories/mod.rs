pub mod answer_row_repo;
pub mod section_repo;
pub mod submission_repo;

pub use answer_row_repo::AnswerRowRepo;
pub use section_repo::SectionRepo;
pub use submission_repo::SubmissionRepo;

pub mod answer;
pub mod catalog;
pub mod question;

pub use answer::{Answer, join_full_name, split_full_name};
pub use catalog::{Catalog, CatalogError};
pub use question::{Question, QuestionKind, QuestionRecord, QuestionType};

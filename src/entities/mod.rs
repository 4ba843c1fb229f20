//! Quiz and exam content types

pub mod category;
pub mod exam;
pub mod macros;
pub mod question;
pub mod user;

pub use category::{Category, NewCategory};
pub use exam::{Exam, NewExam};
pub use question::{NewQuestion, Question};
pub use user::{NewUser, User};

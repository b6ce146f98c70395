pub mod flashcard;
pub mod mcq;
pub mod study_pack;

pub use flashcard::Flashcard;
pub use mcq::Mcq;
pub use study_pack::StudyPack;

use serde::{Deserialize, Serialize};

/// Number of options every multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question with exactly four options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mcq {
    pub question: String,
    pub options: [String; OPTION_COUNT],
    /// Zero-based index into `options`.
    pub answer: usize,
}

impl Mcq {
    /// Map an answer letter `A`..=`D` to its option index.
    #[must_use]
    pub fn answer_index(letter: char) -> Option<usize> {
        match letter {
            'A'..='D' => Some(letter as usize - 'A' as usize),
            _ => None,
        }
    }

    /// The text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_letters_map_to_indices() {
        assert_eq!(Mcq::answer_index('A'), Some(0));
        assert_eq!(Mcq::answer_index('B'), Some(1));
        assert_eq!(Mcq::answer_index('C'), Some(2));
        assert_eq!(Mcq::answer_index('D'), Some(3));
        assert_eq!(Mcq::answer_index('E'), None);
        assert_eq!(Mcq::answer_index('a'), None);
    }

    #[test]
    fn options_serialize_as_array() {
        let mcq = Mcq {
            question: "Pick one".into(),
            options: ["w".into(), "x".into(), "y".into(), "z".into()],
            answer: 2,
        };
        let json = serde_json::to_value(&mcq).unwrap();
        assert_eq!(json["options"].as_array().map(Vec::len), Some(4));
        assert_eq!(json["answer"], 2);
        assert_eq!(mcq.correct_option(), "y");
    }
}

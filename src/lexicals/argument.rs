//! Arguments: a list of premises and a conclusion.

use crate::lexicals::sentence::Sentence;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub premises: Vec<Sentence>,
    pub conclusion: Sentence,
    pub title: Option<String>,
}

impl Argument {
    pub fn new(premises: Vec<Sentence>, conclusion: Sentence) -> Self {
        Self {
            premises,
            conclusion,
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

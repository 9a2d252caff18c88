use crate::model::ExamContent;

/// Visibility latch for a generated exam's answer key.
///
/// New content always lands hidden, even when the previous key was on
/// screen; the key is only togglable while the content it belongs to is
/// still current.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamReveal {
    content: Option<ExamContent>,
    show_answers: bool,
}

impl ExamReveal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs freshly generated content and hides the answer key.
    pub fn set_content(&mut self, content: ExamContent) {
        self.content = Some(content);
        self.show_answers = false;
    }

    /// Drops the content and hides the key.
    pub fn clear(&mut self) {
        self.content = None;
        self.show_answers = false;
    }

    /// Flips answer-key visibility; a no-op until content exists.
    ///
    /// Returns whether the key is visible afterwards.
    pub fn toggle(&mut self) -> bool {
        if self.content.is_some() {
            self.show_answers = !self.show_answers;
        }
        self.show_answers
    }

    #[must_use]
    pub fn content(&self) -> Option<&ExamContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn answers_visible(&self) -> bool {
        self.show_answers
    }

    /// The answer key, only while revealed.
    #[must_use]
    pub fn visible_answers(&self) -> Option<&str> {
        if self.show_answers {
            self.content.as_ref().map(ExamContent::answers)
        } else {
            None
        }
    }
}

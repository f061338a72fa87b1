use serde::{Deserialize, Serialize};

use crate::AnswerType;

/// A link to the content object a survey or submission belongs to.
///
/// Stored as a (content type, object id) pair, where the content type is an
/// `app_label.model` path resolved by the host application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLink {
    /// Content type path, e.g. `"blog.article"`.
    pub content_type: String,

    /// Primary key of the linked object.
    pub object_id: i64,
}

impl ContentLink {
    pub fn new(content_type: impl Into<String>, object_id: i64) -> Self {
        Self {
            content_type: content_type.into(),
            object_id,
        }
    }
}

/// An ordered collection of questions presented together for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: i64,

    pub title: String,

    /// Questions, not necessarily sorted; use `questions_in_order`.
    pub questions: Vec<Question>,

    /// The user who created the survey.
    pub creator: Option<i64>,

    pub is_published: bool,

    /// Whether submissions start out hidden until moderated.
    pub moderate_submissions: bool,

    /// Address notified on new submissions, if any.
    pub email: Option<String>,

    /// The content object this survey is attached to, if any.
    pub content: Option<ContentLink>,
}

impl Survey {
    /// Create a new unpublished survey with no questions.
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            questions: Vec::new(),
            creator: None,
            is_published: false,
            moderate_submissions: false,
            email: None,
            content: None,
        }
    }

    /// Add a question.
    pub fn with_question(mut self, question: Question) -> Self {
        self.questions.push(question);
        self
    }

    /// Set the creator.
    pub fn with_creator(mut self, creator: i64) -> Self {
        self.creator = Some(creator);
        self
    }

    /// Attach the survey to a content object.
    pub fn with_content(mut self, content: ContentLink) -> Self {
        self.content = Some(content);
        self
    }

    /// Questions sorted by their declared order.
    pub fn questions_in_order(&self) -> Vec<&Question> {
        let mut questions: Vec<_> = self.questions.iter().collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}

/// One prompt within a survey.
///
/// Immutable in practice once answers reference it, though not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,

    pub survey_id: i64,

    /// The prompt text shown to the user.
    pub question: String,

    /// Position within the survey.
    pub order: u32,

    pub required: bool,

    pub answer_type: AnswerType,

    pub help_text: String,

    /// Ordered option strings; only meaningful for choice-like types.
    /// May contain markup, which is kept for display and sanitized for keys.
    pub options: Vec<String>,
}

impl Question {
    pub fn new(
        id: i64,
        survey_id: i64,
        question: impl Into<String>,
        answer_type: AnswerType,
    ) -> Self {
        Self {
            id,
            survey_id,
            question: question.into(),
            order: 0,
            required: false,
            answer_type,
            help_text: String::new(),
            options: Vec::new(),
        }
    }

    /// Set the position within the survey.
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    /// Mark the question as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the help text.
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Set the option list for choice-like types.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_in_order_sorts_by_position() {
        let survey = Survey::new(1, "ordering")
            .with_question(Question::new(10, 1, "second", AnswerType::Char).with_order(2))
            .with_question(Question::new(11, 1, "first", AnswerType::Char).with_order(1));

        let ordered: Vec<_> = survey
            .questions_in_order()
            .into_iter()
            .map(|q| q.question.as_str())
            .collect();
        assert_eq!(ordered, vec!["first", "second"]);
    }
}

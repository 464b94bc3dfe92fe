use session_store::{Message, Role};

/// Borrowed, render-ready view of one transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEntry<'a> {
    pub role: Role,
    pub content: &'a str,
    pub steps: Option<&'a [String]>,
}

impl<'a> From<&'a Message> for DisplayEntry<'a> {
    fn from(message: &'a Message) -> Self {
        Self {
            role: message.role,
            content: &message.content,
            steps: message.steps.as_deref(),
        }
    }
}

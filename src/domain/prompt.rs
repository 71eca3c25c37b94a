/// Single-turn prompt templates sent to the completion model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Summarize,
    Analyze,
}

impl PromptKind {
    pub fn preamble(&self) -> &'static str {
        match self {
            Self::Summarize => "Please summarize the following text: ",
            Self::Analyze => "Please analyze the following text: ",
        }
    }

    pub fn render(&self, text: &str) -> String {
        let preamble = self.preamble();
        let mut prompt = String::with_capacity(preamble.len() + text.len());
        prompt.push_str(preamble);
        prompt.push_str(text);
        prompt
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Analyze => "analyze",
        }
    }
}

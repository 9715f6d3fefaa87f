use super::dns_message::Question;

/// Representation the caller wants the reply in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Wire,
    Json,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Wire => "wire",
            ResponseFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPayload {
    /// DNS wire-format query bytes.
    Wire(Vec<u8>),

    /// Questions from a query string or JSON body; a synthetic wire query is built from them.
    Questions(Vec<Question>),
}

#[derive(Debug, Clone)]
pub struct DohRequest {
    pub payload: RequestPayload,
    pub format: ResponseFormat,
}

impl DohRequest {
    pub fn wire(bytes: Vec<u8>, format: ResponseFormat) -> Self {
        Self {
            payload: RequestPayload::Wire(bytes),
            format,
        }
    }

    pub fn questions(questions: Vec<Question>, format: ResponseFormat) -> Self {
        Self {
            payload: RequestPayload::Questions(questions),
            format,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DohResponse {
    pub body: Vec<u8>,
    pub format: ResponseFormat,
}

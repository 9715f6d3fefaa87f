use ferrous_doh_domain::{DomainError, Question, RecordType};
use serde::Deserialize;

/// Query string of a DoH GET: either `dns=<base64url>` or `name=` with optional `type=`.
#[derive(Deserialize, Debug, Default)]
pub struct DohQueryParams {
    pub dns: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
}

impl DohQueryParams {
    pub fn question(&self) -> Option<Result<Question, DomainError>> {
        let name = self.name.as_deref()?;
        let record_type = self
            .record_type
            .as_deref()
            .map(TypeValue::from)
            .unwrap_or_default();
        Some(question(name, record_type))
    }
}

#[derive(Deserialize, Debug)]
pub struct QuestionsBody {
    pub questions: Vec<QuestionDto>,
}

impl QuestionsBody {
    pub fn into_questions(self) -> Result<Vec<Question>, DomainError> {
        self.questions
            .into_iter()
            .map(|q| question(&q.name, q.record_type))
            .collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct QuestionDto {
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: TypeValue,
}

/// A record type given by mnemonic (`"SRV"`) or numeric code (`33`).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TypeValue {
    Mnemonic(String),
    Code(u16),
}

impl Default for TypeValue {
    fn default() -> Self {
        Self::Code(RecordType::A.to_u16())
    }
}

impl From<&str> for TypeValue {
    fn from(value: &str) -> Self {
        match value.parse::<u16>() {
            Ok(code) => Self::Code(code),
            Err(_) => Self::Mnemonic(value.to_string()),
        }
    }
}

fn question(name: &str, record_type: TypeValue) -> Result<Question, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::Decode("question name is empty".to_string()));
    }

    let record_type = match record_type {
        TypeValue::Code(code) => RecordType::from_u16(code),
        TypeValue::Mnemonic(text) => text.parse::<RecordType>().map_err(DomainError::Decode)?,
    };

    Ok(Question::new(name, record_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_accepts_mnemonic_and_code() {
        let body: QuestionsBody = serde_json::from_str(
            r#"{"questions":[{"name":"a.com","type":"TXT"},{"name":"b.com","type":33},{"name":"c.com"}]}"#,
        )
        .unwrap();

        let questions = body.into_questions().unwrap();

        assert_eq!(questions[0].record_type, RecordType::TXT);
        assert_eq!(questions[1].record_type, RecordType::SRV);
        assert_eq!(questions[2].record_type, RecordType::A);
    }

    #[test]
    fn test_unknown_mnemonic_is_decode_error() {
        let params = DohQueryParams {
            name: Some("a.com".to_string()),
            record_type: Some("BOGUS".to_string()),
            ..Default::default()
        };

        assert!(matches!(params.question(), Some(Err(DomainError::Decode(_)))));
    }

    #[test]
    fn test_query_string_without_name_has_no_question() {
        assert!(DohQueryParams::default().question().is_none());
    }
}

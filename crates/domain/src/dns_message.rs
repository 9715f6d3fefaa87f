use super::dns_record::{Record, RecordType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub record_type: RecordType,
}

impl Question {
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Query,
    Response,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    Other(u16),
}

impl ResponseCode {
    pub fn to_u16(&self) -> u16 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormErr => 1,
            ResponseCode::ServFail => 2,
            ResponseCode::NXDomain => 3,
            ResponseCode::NotImp => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Other(code) => *code,
        }
    }

    pub fn from_u16(code: u16) -> Self {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NXDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            other => ResponseCode::Other(other),
        }
    }

    /// The upstream could not or would not answer.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ResponseCode::FormErr
                | ResponseCode::ServFail
                | ResponseCode::NotImp
                | ResponseCode::Refused
        )
    }

    pub fn as_status(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::FormErr => "FORMERR",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::Other(_) => "UNKNOWN",
        }
    }
}

/// Query/reply envelope exchanged with clients and upstreams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsMessage {
    pub id: u16,
    pub kind: MessageKind,
    pub recursion_desired: bool,
    pub response_code: ResponseCode,
    pub questions: Vec<Question>,
    pub answers: Vec<Record>,
}

impl DnsMessage {
    pub fn query(id: u16, questions: Vec<Question>) -> Self {
        Self {
            id,
            kind: MessageKind::Query,
            recursion_desired: true,
            response_code: ResponseCode::NoError,
            questions,
            answers: Vec::new(),
        }
    }

    /// Empty reply carrying the id, flags and questions of `query`.
    pub fn reply_to(query: &DnsMessage) -> Self {
        Self {
            id: query.id,
            kind: MessageKind::Response,
            recursion_desired: query.recursion_desired,
            response_code: ResponseCode::NoError,
            questions: query.questions.clone(),
            answers: Vec::new(),
        }
    }

    /// Appends `record` unless an identical answer is already present.
    pub fn push_answer(&mut self, record: Record) -> bool {
        if self.answers.iter().any(|existing| existing.same_answer(&record)) {
            return false;
        }
        self.answers.push(record);
        true
    }
}

//! DNS wire format conversion (RFC 1035 §4) on top of `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use ferrous_doh_domain::{
    DnsMessage, DomainError, MessageKind, Question, Record, RecordData, RecordType, ResponseCode,
};
use hickory_proto::op::{
    Message, MessageType, OpCode, Query, ResponseCode as HickoryResponseCode,
};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, NS, NULL, PTR, SRV, TXT};
use hickory_proto::rr::{DNSClass, Name, RData, Record as HickoryRecord};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder, NameEncoding};
use std::net::IpAddr;
use std::str::FromStr;

/// Parsed wire message plus the header bit the transports care about.
pub struct WireMessage {
    pub message: DnsMessage,
    pub truncated: bool,
}

pub fn decode(bytes: &[u8]) -> Result<WireMessage, DomainError> {
    let message = Message::from_vec(bytes)
        .map_err(|e| DomainError::Decode(format!("malformed DNS message: {}", e)))?;

    let questions = message
        .queries()
        .iter()
        .map(|query| {
            Question::new(
                name_to_string(query.name()),
                RecordTypeMapper::from_hickory(query.query_type()),
            )
        })
        .collect();

    let answers = message
        .answers()
        .iter()
        .map(record_from_hickory)
        .collect::<Result<Vec<_>, _>>()?;

    let kind = match message.message_type() {
        MessageType::Query => MessageKind::Query,
        MessageType::Response => MessageKind::Response,
    };

    Ok(WireMessage {
        message: DnsMessage {
            id: message.id(),
            kind,
            recursion_desired: message.recursion_desired(),
            response_code: ResponseCode::from_u16(u16::from(message.response_code())),
            questions,
            answers,
        },
        truncated: message.truncated(),
    })
}

pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let message_type = match message.kind {
        MessageKind::Query => MessageType::Query,
        MessageKind::Response => MessageType::Response,
    };

    let mut wire = Message::new(message.id, message_type, OpCode::Query);
    wire.set_recursion_desired(message.recursion_desired);
    if message.kind == MessageKind::Response {
        wire.set_recursion_available(true);
        wire.set_response_code(<HickoryResponseCode as From<u16>>::from(
            message.response_code.to_u16(),
        ));
    }

    for question in &message.questions {
        let mut query = Query::new();
        query.set_name(parse_name(&question.name)?);
        query.set_query_type(RecordTypeMapper::to_hickory(question.record_type));
        query.set_query_class(DNSClass::IN);
        wire.add_query(query);
    }

    for answer in &message.answers {
        wire.add_answer(record_to_hickory(answer)?);
    }

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    wire.emit(&mut encoder)
        .map_err(|e| DomainError::Encode(format!("failed to serialize DNS message: {}", e)))?;

    Ok(buf)
}

fn name_to_string(name: &Name) -> String {
    let mut text = name.to_utf8();
    if text.len() > 1 && text.ends_with('.') {
        text.pop();
    }
    text
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_str(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("'{}': {}", name, e)))
}

fn record_from_hickory(record: &HickoryRecord) -> Result<Record, DomainError> {
    let data = match record.data() {
        RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
        RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
        RData::CNAME(target) => RecordData::Name(name_to_string(&target.0)),
        RData::NS(target) => RecordData::Name(name_to_string(&target.0)),
        RData::PTR(target) => RecordData::Name(name_to_string(&target.0)),
        RData::SRV(srv) => RecordData::Srv {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: name_to_string(srv.target()),
        },
        RData::TXT(txt) => RecordData::Text(txt.txt_data().iter().map(|s| s.to_vec()).collect()),
        // Raw rdata is spliced into other messages later, so names must not be compressed.
        other => {
            let mut buf = Vec::new();
            let mut encoder = BinEncoder::new(&mut buf);
            encoder.set_name_encoding(NameEncoding::Uncompressed);
            other
                .emit(&mut encoder)
                .map_err(|e| DomainError::Decode(format!("unreadable rdata: {}", e)))?;
            RecordData::Raw(buf)
        }
    };

    Ok(Record::new(
        name_to_string(record.name()),
        RecordTypeMapper::from_hickory(record.record_type()),
        record.ttl(),
        data,
    ))
}

fn record_to_hickory(record: &Record) -> Result<HickoryRecord, DomainError> {
    let rdata = match &record.data {
        RecordData::Address(IpAddr::V4(ip)) => RData::A(A(*ip)),
        RecordData::Address(IpAddr::V6(ip)) => RData::AAAA(AAAA(*ip)),
        RecordData::Name(target) => {
            let target = parse_name(target)?;
            match record.record_type {
                RecordType::CNAME => RData::CNAME(CNAME(target)),
                RecordType::NS => RData::NS(NS(target)),
                RecordType::PTR => RData::PTR(PTR(target)),
                other => {
                    return Err(DomainError::Encode(format!(
                        "{} record cannot carry a bare name",
                        other
                    )))
                }
            }
        }
        RecordData::Srv {
            priority,
            weight,
            port,
            target,
        } => RData::SRV(SRV::new(*priority, *weight, *port, parse_name(target)?)),
        // An A record cannot carry a host/port pair; SRV rdata can.
        RecordData::HostPort { host, port } => {
            RData::SRV(SRV::new(0, 0, *port, parse_name(host)?))
        }
        RecordData::Text(strings) => {
            RData::TXT(TXT::from_bytes(strings.iter().map(Vec::as_slice).collect()))
        }
        RecordData::Raw(bytes) => RData::Unknown {
            code: RecordTypeMapper::to_hickory(record.record_type),
            rdata: NULL::with(bytes.clone()),
        },
    };

    Ok(HickoryRecord::from_rdata(
        parse_name(&record.name)?,
        record.ttl,
        rdata,
    ))
}

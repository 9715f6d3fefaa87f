use super::RecordType;
use std::net::IpAddr;

/// Payload of a resource record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordData {
    /// A / AAAA address.
    Address(IpAddr),

    /// Single target name (CNAME, NS, PTR).
    Name(String),

    /// SRV rdata as returned by an upstream.
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: String,
    },

    /// `{host, port}` pair synthesized from a cached SRV record.
    HostPort { host: String, port: u16 },

    /// TXT character-strings, untouched.
    Text(Vec<Vec<u8>>),

    /// Rdata of any other type, kept as wire bytes.
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,

    pub record_type: RecordType,

    /// Seconds, as reported on the wire.
    pub ttl: u32,

    pub data: RecordData,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        record_type: RecordType,
        ttl: u32,
        data: RecordData,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<String>, ttl: u32, address: std::net::Ipv4Addr) -> Self {
        Self::new(name, RecordType::A, ttl, RecordData::Address(IpAddr::V4(address)))
    }

    /// Same name (case-insensitive), type and payload; TTL is ignored.
    pub fn same_answer(&self, other: &Record) -> bool {
        self.record_type == other.record_type
            && self.data == other.data
            && self.name.eq_ignore_ascii_case(&other.name)
    }
}

use super::errors::DomainError;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIMARY_PORT: u16 = 53;
pub const DEFAULT_SECONDARY_PORT: u16 = 5300;

/// One configured upstream resolver.
///
/// Address syntax: `host`, `host:port` or `host:port,secondaryPort`. A bare
/// host gets the standard DNS port with the discovery port as fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UpstreamEndpoint {
    pub host: String,
    pub primary_port: u16,
    pub secondary_port: Option<u16>,
}

impl UpstreamEndpoint {
    pub fn new(host: impl Into<String>, primary_port: u16, secondary_port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            primary_port,
            secondary_port,
        }
    }

    /// Ports in the order they are attempted.
    pub fn ports(&self) -> impl Iterator<Item = u16> {
        std::iter::once(self.primary_port).chain(self.secondary_port)
    }

    /// Parses every address, failing on the first malformed one.
    pub fn parse_all<S: AsRef<str>>(addresses: &[S]) -> Result<Vec<Self>, DomainError> {
        addresses.iter().map(|a| a.as_ref().parse()).collect()
    }
}

fn parse_port(digits: &str, address: &str) -> Result<u16, DomainError> {
    let valid = !digits.is_empty() && digits.len() <= 5 && digits.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        return Err(DomainError::ParseConfig(address.to_string()));
    }
    match digits.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DomainError::ParseConfig(address.to_string())),
    }
}

impl FromStr for UpstreamEndpoint {
    type Err = DomainError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let Some((host, ports)) = address.split_once(':') else {
            if address.is_empty() {
                return Err(DomainError::ParseConfig(address.to_string()));
            }
            return Ok(Self::new(
                address,
                DEFAULT_PRIMARY_PORT,
                Some(DEFAULT_SECONDARY_PORT),
            ));
        };

        if host.is_empty() || ports.contains(':') {
            return Err(DomainError::ParseConfig(address.to_string()));
        }

        let (primary, secondary) = match ports.split_once(',') {
            Some((primary, secondary)) => (primary, Some(secondary)),
            None => (ports, None),
        };

        let primary_port = parse_port(primary, address)?;
        let secondary_port = secondary
            .map(|digits| parse_port(digits, address))
            .transpose()?;

        Ok(Self::new(host, primary_port, secondary_port))
    }
}

impl fmt::Display for UpstreamEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.primary_port)?;
        if let Some(secondary) = self.secondary_port {
            write!(f, ",{}", secondary)?;
        }
        Ok(())
    }
}

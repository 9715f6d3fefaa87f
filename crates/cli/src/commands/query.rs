use clap::Args;
use ferrous_doh_application::ports::MessageCodec;
use ferrous_doh_domain::{Question, RecordType};
use ferrous_doh_infrastructure::dns::{DnsCodec, DohClient};
use std::time::Duration;
use tracing::debug;

#[derive(Args)]
pub struct QueryArgs {
    /// Domain name to resolve
    name: String,

    /// Record type mnemonic or numeric code
    #[arg(short = 't', long = "type", default_value = "A")]
    record_type: String,

    /// DoH endpoint URL
    #[arg(short = 'u', long, default_value = "http://127.0.0.1:3000/dns-query")]
    url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,
}

pub async fn run_query(args: QueryArgs) -> anyhow::Result<()> {
    let record_type = match args.record_type.parse::<u16>() {
        Ok(code) => RecordType::from_u16(code),
        Err(_) => args
            .record_type
            .parse::<RecordType>()
            .map_err(anyhow::Error::msg)?,
    };

    let client = DohClient::new(args.url.clone(), Duration::from_millis(args.timeout_ms))?;
    debug!(url = %args.url, name = %args.name, record_type = %record_type, "Sending DoH query");

    let reply = client
        .query(vec![Question::new(args.name, record_type)])
        .await?;

    let json = DnsCodec::new().encode_json(&reply)?;
    println!("{}", String::from_utf8_lossy(&json));
    Ok(())
}

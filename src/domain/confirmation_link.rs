use std::net::IpAddr;

use serde::Deserialize;
use strum::{Display, EnumString};
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

/// How the confirmation link picks its scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemePolicy {
    /// `http` for loopback hosts, `https` for everything else. Not a security check.
    #[default]
    LoopbackHeuristic,
    Fixed(Scheme),
}

impl SchemePolicy {
    pub fn from_configured(scheme: Option<Scheme>) -> Self {
        scheme.map_or(SchemePolicy::LoopbackHeuristic, SchemePolicy::Fixed)
    }

    pub fn scheme_for(&self, host: &str) -> Scheme {
        match self {
            SchemePolicy::Fixed(scheme) => *scheme,
            SchemePolicy::LoopbackHeuristic if is_loopback_host(host) => Scheme::Http,
            SchemePolicy::LoopbackHeuristic => Scheme::Https,
        }
    }
}

/// Whether a `Host` header value points at this machine.
pub fn is_loopback_host(host: &str) -> bool {
    let hostname = strip_port(host.trim());

    if hostname.eq_ignore_ascii_case("localhost")
        || hostname.to_ascii_lowercase().ends_with(".localhost")
    {
        return true;
    }

    hostname
        .parse::<IpAddr>()
        .is_ok_and(|address| address.is_loopback())
}

fn strip_port(host: &str) -> &str {
    if let Some(bracketed) = host.strip_prefix('[') {
        return bracketed.split(']').next().unwrap_or(bracketed);
    }

    host.rsplit_once(':').map_or(host, |(hostname, _)| hostname)
}

/// Absolute URL of the confirmation page for one order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationLink(String);

impl ConfirmationLink {
    pub fn build(scheme: Scheme, host: &str, customer_type: &str, order_id: &str) -> Self {
        let order_id: String = form_urlencoded::byte_serialize(order_id.as_bytes()).collect();
        ConfirmationLink(format!(
            "{scheme}://{host}/{customer_type}.html?order_id={order_id}"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConfirmationLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConfirmationLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

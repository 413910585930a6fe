//! HTTP prober: one request per path, reduced to a [`ProbeOutcome`].

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Version};
use std::error::Error as _;

use crate::{Method, ProbeOpts, ProbeOutcome};

/// Turns one path into one outcome. Implementations are shared by every worker.
pub trait Probe: Send + Sync {
    fn probe(&self, path: &str) -> ProbeOutcome;
}

/// Blocking reqwest prober. The client (timeout, user agent, connection pool) is built once per run.
pub struct HttpProber {
    client: Client,
    opts: ProbeOpts,
}

impl HttpProber {
    pub fn new(opts: &ProbeOpts) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.as_str());
        if !opts.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("build HTTP client")?;
        Ok(Self {
            client,
            opts: opts.clone(),
        })
    }
}

impl Probe for HttpProber {
    fn probe(&self, path: &str) -> ProbeOutcome {
        let url = self.opts.target_for(path);
        let request = match self.opts.method {
            Method::Get => self.client.get(&url),
            Method::Head => self.client.head(&url),
        };
        // Dropping the response discards any unread body.
        match request.send() {
            Ok(resp) => responded(resp.version(), resp.status()),
            Err(e) => ProbeOutcome::Failed {
                description: describe_error(&e),
            },
        }
    }
}

pub fn responded(version: Version, status: StatusCode) -> ProbeOutcome {
    ProbeOutcome::Responded {
        version: version_str(version).to_string(),
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    }
}

/// `HTTP/<major>.<minor>` for a response version.
pub fn version_str(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2.0",
        Version::HTTP_3 => "HTTP/3.0",
        _ => "HTTP/?.?",
    }
}

/// `timeout: ...`, `connect: ...`, `request: ...` or `error: ...`, followed by the error chain.
pub fn describe_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_connect() {
        "connect"
    } else if err.is_request() {
        "request"
    } else {
        "error"
    };
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_str = cause.to_string();
        // reqwest often repeats the inner message in its own Display
        if !msg.contains(&cause_str) {
            msg.push_str(": ");
            msg.push_str(&cause_str);
        }
        source = cause.source();
    }
    format!("{kind}: {msg}")
}

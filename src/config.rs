//! Configuration Module
//!
//! Handles loading server configuration from command-line flags, falling back
//! to environment variables and then to built-in defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::Parser;

use crate::error::{KvError, Result};

/// Server configuration parameters.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "kvserver")]
#[command(about = "In-memory key-value server with per-entry TTL eviction")]
#[command(version)]
pub struct Config {
    /// Lifetime of a key-value pair in the storage, seconds
    #[arg(long, env = "KV_TTL", default_value_t = 60)]
    pub ttl: u64,

    /// IP address the server binds to
    #[arg(long, env = "KV_ADDR", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub addr: IpAddr,

    /// Port the server listens on
    #[arg(long, env = "KV_PORT", default_value_t = 8080)]
    pub port: u16,

    /// How many times the eviction scheduler wakes up before the oldest entry expires
    #[arg(long, env = "KV_TTL_DELIM", default_value_t = 2)]
    pub ttl_delim: u32,
}

impl Config {
    /// Checks values that clap cannot reject on its own.
    pub fn validate(&self) -> Result<()> {
        if self.ttl == 0 {
            return Err(KvError::Configuration(
                "ttl must be greater than zero".to_string(),
            ));
        }
        if self.ttl_delim == 0 {
            return Err(KvError::Configuration(
                "ttl-delim must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Entry lifetime as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }

    /// Address to bind the HTTP listener to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl: 60,
            addr: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            ttl_delim: 2,
        }
    }
}

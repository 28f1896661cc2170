//! Service port specifications.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Protocol used when a port doesn't declare one
pub const DEFAULT_PROTOCOL: &str = "TCP";

/// Service port specification
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortSpec {
    /// Published service port
    pub port: u16,

    /// Container port (defaults to port)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<u16>,

    /// Protocol (TCP or UDP)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl PortSpec {
    /// Container port, falling back to the published port when unset or zero
    pub fn container_port(&self) -> u16 {
        match self.target_port {
            Some(port) if port != 0 => port,
            _ => self.port,
        }
    }

    /// Protocol, falling back to TCP when unset or empty
    pub fn protocol(&self) -> &str {
        match self.protocol.as_deref() {
            Some(proto) if !proto.is_empty() => proto,
            _ => DEFAULT_PROTOCOL,
        }
    }
}

/// Service exposure specification
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ServiceSpec {
    /// Named network ports
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: BTreeMap<String, PortSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_defaults() {
        let port = PortSpec {
            port: 8080,
            target_port: None,
            protocol: None,
        };
        assert_eq!(port.container_port(), 8080);
        assert_eq!(port.protocol(), "TCP");
    }

    #[test]
    fn test_zero_target_port_falls_back() {
        let port = PortSpec {
            port: 80,
            target_port: Some(0),
            protocol: Some(String::new()),
        };
        assert_eq!(port.container_port(), 80);
        assert_eq!(port.protocol(), "TCP");
    }

    #[test]
    fn test_explicit_values_kept() {
        let port = PortSpec {
            port: 53,
            target_port: Some(5353),
            protocol: Some("UDP".to_string()),
        };
        assert_eq!(port.container_port(), 5353);
        assert_eq!(port.protocol(), "UDP");
    }
}

//! Service ports and ingress routes

use std::collections::BTreeMap;

use score_humanitec_common::spec::{
    IngressDelta, IngressPath, PortDelta, RouteRule, ServiceDelta, ServiceSpec,
};
use score_humanitec_common::template::{ReferenceResolver, Substitutor};

/// Module service block, `None` when no ports are declared
pub fn ports(service: Option<&ServiceSpec>) -> Option<ServiceDelta> {
    let service = service.filter(|s| !s.ports.is_empty())?;

    let ports = service
        .ports
        .iter()
        .map(|(name, port)| {
            (
                name.clone(),
                PortDelta {
                    protocol: port.protocol().to_string(),
                    service_port: port.port,
                    container_port: port.container_port(),
                },
            )
        })
        .collect();

    Some(ServiceDelta { ports })
}

/// Module ingress block from extension routes, `None` when there are none
///
/// Routes are keyed by protocol then path; the ingress is keyed by host
/// first, so the rules are re-grouped under their substituted `from`.
pub fn routes<R: ReferenceResolver + ?Sized>(
    routes: &BTreeMap<String, BTreeMap<String, RouteRule>>,
    subst: &Substitutor<'_, R>,
) -> Option<IngressDelta> {
    let mut ingress = IngressDelta::default();

    for (protocol, paths) in routes {
        for (path, rule) in paths {
            let host = subst.substitute(rule.from.as_str());
            ingress
                .rules
                .entry(host)
                .or_default()
                .entry(protocol.clone())
                .or_default()
                .insert(
                    path.clone(),
                    IngressPath {
                        type_: rule.type_.clone(),
                        port: rule.port,
                    },
                );
        }
    }

    (!ingress.rules.is_empty()).then_some(ingress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_humanitec_common::spec::PortSpec;
    use serde_json::json;

    #[test]
    fn test_ports_with_defaults() {
        let service = ServiceSpec {
            ports: BTreeMap::from([
                (
                    "www".to_string(),
                    PortSpec {
                        port: 80,
                        target_port: Some(8080),
                        protocol: None,
                    },
                ),
                (
                    "admin".to_string(),
                    PortSpec {
                        port: 8080,
                        target_port: None,
                        protocol: Some("UDP".to_string()),
                    },
                ),
            ]),
        };

        let delta = ports(Some(&service)).unwrap();
        assert_eq!(
            serde_json::to_value(&delta).unwrap(),
            json!({"ports": {
                "www": {"protocol": "TCP", "service_port": 80, "container_port": 8080},
                "admin": {"protocol": "UDP", "service_port": 8080, "container_port": 8080}
            }})
        );
    }

    #[test]
    fn test_no_ports_no_service() {
        assert!(ports(None).is_none());
        assert!(ports(Some(&ServiceSpec::default())).is_none());
    }

    #[test]
    fn test_routes_grouped_by_host() {
        let values = BTreeMap::from([("resources.dns".to_string(), "shared.dns".to_string())]);
        let rule = |path_type: &str, port| RouteRule {
            from: "${resources.dns}".into(),
            type_: path_type.to_string(),
            port,
        };
        let table = BTreeMap::from([(
            "http".to_string(),
            BTreeMap::from([
                ("/".to_string(), rule("prefix", 80)),
                ("/admin".to_string(), rule("exact", 8080)),
            ]),
        )]);

        let ingress = routes(&table, &Substitutor::new(&values)).unwrap();
        assert_eq!(
            serde_json::to_value(&ingress).unwrap(),
            json!({"rules": {"shared.dns": {"http": {
                "/": {"type": "prefix", "port": 80},
                "/admin": {"type": "exact", "port": 8080}
            }}}})
        );
    }

    #[test]
    fn test_no_routes_no_ingress() {
        let values = BTreeMap::<String, String>::new();
        assert!(routes(&BTreeMap::new(), &Substitutor::new(&values)).is_none());
    }
}

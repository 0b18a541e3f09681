//! Validation of the endpoint manifest (manifest/endpoints.toml).
//!
//! The manifest must stay syntactically valid and agree with the service
//! table compiled into the crate: every family maps to a known service host,
//! and contract versions match unless the operation pins its own.

use serde::Deserialize;
use xbox_webapi::service::Service;

#[derive(Debug, Deserialize)]
struct Manifest {
    meta: Meta,
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Meta {
    schema_version: u32,
    last_validated: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Endpoint {
    family: String,
    name: String,
    method: String,
    path: String,
    contract_version: u32,
    request_content_type: String,
    response_status: u16,
    implemented: bool,
    #[serde(default)]
    notes: String,
}

/// Operations that send a contract version other than their service's.
const PINNED_CONTRACT_VERSIONS: [(&str, u32); 1] = [("get_clubs_owned", 2)];

fn load() -> Manifest {
    let content = std::fs::read_to_string("manifest/endpoints.toml")
        .expect("manifest/endpoints.toml should exist and be readable");
    toml::from_str(&content).expect("manifest/endpoints.toml should be valid TOML")
}

fn service_for(family: &str) -> Option<Service> {
    let prefix = format!("https://{family}.");
    Service::ALL
        .into_iter()
        .find(|s| s.default_host().starts_with(&prefix))
}

#[test]
fn manifest_endpoints_toml_is_valid() {
    let manifest = load();

    assert!(
        manifest.meta.schema_version >= 1,
        "schema_version must be at least 1"
    );
    assert!(
        !manifest.endpoints.is_empty(),
        "manifest should contain at least one endpoint"
    );

    for ep in &manifest.endpoints {
        assert!(!ep.family.is_empty(), "endpoint family must not be empty");
        assert!(!ep.name.is_empty(), "endpoint name must not be empty");
        assert!(!ep.path.is_empty(), "endpoint path must not be empty");
        assert!(
            (200..300).contains(&ep.response_status),
            "endpoint '{}' should list a 2xx success status",
            ep.name
        );
    }
}

#[test]
fn manifest_endpoint_methods_are_valid_http_verbs() {
    let valid_methods = ["GET", "POST", "PUT", "PATCH", "DELETE"];
    for ep in &load().endpoints {
        assert!(
            valid_methods.contains(&ep.method.as_str()),
            "endpoint '{}' has invalid method '{}', expected one of {:?}",
            ep.name,
            ep.method,
            valid_methods
        );
    }
}

#[test]
fn manifest_families_match_service_table() {
    for ep in &load().endpoints {
        let service = service_for(&ep.family).unwrap_or_else(|| {
            panic!("endpoint '{}' has unknown family '{}'", ep.name, ep.family)
        });
        let expected = PINNED_CONTRACT_VERSIONS
            .iter()
            .find(|(name, _)| *name == ep.name)
            .map(|(_, version)| *version)
            .unwrap_or(service.contract_version());
        assert_eq!(
            ep.contract_version, expected,
            "endpoint '{}' contract version disagrees with the service table",
            ep.name
        );
    }
}

#[test]
fn every_service_has_an_implemented_endpoint() {
    let manifest = load();
    for service in Service::ALL {
        assert!(
            manifest
                .endpoints
                .iter()
                .any(|ep| ep.implemented && service_for(&ep.family) == Some(service)),
            "no implemented endpoint for {}",
            service.default_host()
        );
    }
}

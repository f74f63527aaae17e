//! ViaCEP postal-code lookup adapter
//!
//! ViaCEP is a public registry; requests are unauthenticated and go to its
//! own host rather than the backend, so this adapter carries its own HTTP
//! client instead of the shared `RestClient`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
};
use domain_registration::{BrState, PostalAddress, PostalLookupPort};

const VIACEP_BASE: &str = "https://viacep.com.br/ws";

/// One response row from ViaCEP
///
/// A syntactically valid but unknown code answers 200 with `{"erro": true}`,
/// so the miss marker is part of the schema.
#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    #[serde(default)]
    erro: bool,
    #[serde(default)]
    logradouro: String,
    #[serde(default)]
    bairro: String,
    #[serde(default)]
    localidade: String,
    #[serde(default)]
    uf: String,
}

/// Postal lookup against the public ViaCEP registry
#[derive(Debug, Clone)]
pub struct ViaCepAdapter {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepAdapter {
    pub fn new(timeout_secs: u64) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PortError::connection(e.to_string()))?;
        Ok(Self {
            http,
            base_url: VIACEP_BASE.to_string(),
        })
    }

    /// Points the adapter at a different host, for tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl DomainPort for ViaCepAdapter {}

#[async_trait]
impl HealthCheckable for ViaCepAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = self
            .http
            .get(format!("{}/01001000/json/", self.base_url))
            .send()
            .await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let (status, message) = match outcome {
            Ok(response) if response.status().is_success() => (AdapterHealth::Healthy, None),
            Ok(response) => (
                AdapterHealth::Degraded,
                Some(format!("viacep returned {}", response.status())),
            ),
            Err(error) => (AdapterHealth::Unhealthy, Some(error.to_string())),
        };

        HealthCheckResult {
            adapter_id: "viacep-adapter".to_string(),
            status,
            latency_ms,
            message,
            checked_at: chrono::Utc::now(),
        }
    }
}

#[async_trait]
impl PostalLookupPort for ViaCepAdapter {
    async fn lookup(
        &self,
        postal_code: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<PostalAddress>, PortError> {
        let response = self
            .http
            .get(format!("{}/{postal_code}/json/", self.base_url))
            .send()
            .await
            .map_err(|e| PortError::connection(format!("viacep: {e}")))?;

        if !response.status().is_success() {
            return Err(crate::client::map_status(response.status(), "postal lookup"));
        }

        let body: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| PortError::internal(format!("viacep: malformed response: {e}")))?;

        if body.erro {
            debug!(postal_code, "viacep miss");
            return Ok(None);
        }

        Ok(Some(PostalAddress {
            street: body.logradouro,
            neighborhood: body.bairro,
            city: body.localidade,
            state: BrState::parse(&body.uf),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_marker_is_parsed() {
        let body: ViaCepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(body.erro);
    }

    #[test]
    fn test_hit_row_is_parsed() {
        let body: ViaCepResponse = serde_json::from_str(
            r#"{
                "cep": "01310-100",
                "logradouro": "Avenida Paulista",
                "complemento": "de 612 a 1510 - lado par",
                "bairro": "Bela Vista",
                "localidade": "São Paulo",
                "uf": "SP",
                "ibge": "3550308"
            }"#,
        )
        .unwrap();
        assert!(!body.erro);
        assert_eq!(body.logradouro, "Avenida Paulista");
        assert_eq!(body.uf, "SP");
    }
}

use crate::config::RunConfig;
use crate::utils::error::{RemoverError, Result};
use quick_xml::escape::escape;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Deserializer};

/// One method call: target service and method plus named parameters.
/// A name may repeat; each value becomes its own element, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    service: String,
    method: String,
    params: Vec<(String, String)>,
}

impl MethodCall {
    pub fn new(service: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            method: method.into(),
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// `service::method`, as used in log lines.
    pub fn operation(&self) -> String {
        format!("{}::{}", self.service, self.method)
    }

    pub fn params_xml(&self) -> String {
        let mut xml = String::from("<params>");
        for (name, value) in &self.params {
            xml.push_str(&format!("<{name}>{}</{name}>", escape(value)));
        }
        xml.push_str("</params>");
        xml
    }

    pub fn to_xml(&self) -> String {
        format!(
            "<methodCall service=\"{}\" method=\"{}\">{}</methodCall>",
            escape(&self.service),
            escape(&self.method),
            self.params_xml()
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseState {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub error: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseParams {
    #[serde(default, rename = "role", deserialize_with = "string_or_list")]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct XmlmcResponse {
    #[serde(rename = "@status", default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub params: ResponseParams,
    #[serde(default)]
    pub state: ResponseState,
}

/// A lone value comes back as a bare string rather than a one-element list.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(role)) => vec![role],
        Some(OneOrMany::Many(roles)) => roles,
    })
}

#[derive(Debug, Deserialize)]
struct ZoneInfoResponse {
    zoneinfo: ZoneInfo,
}

#[derive(Debug, Deserialize)]
struct ZoneInfo {
    endpoint: String,
}

/// Authenticated session against one instance's method-call API.
pub struct XmlmcSession {
    client: Client,
    root: String,
    api_key: String,
    dry_run: bool,
}

impl XmlmcSession {
    /// Builds the HTTP client and works out where the instance lives.
    pub async fn connect(config: &RunConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let base = match &config.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => resolve_endpoint(&client, &config.zoneinfo_base, &config.instance_id).await?,
        };
        tracing::debug!("Instance endpoint: {}", base);
        Ok(Self::new(client, &base, &config.api_key, config.dry_run))
    }

    pub fn new(client: Client, base: &str, api_key: &str, dry_run: bool) -> Self {
        Self {
            client,
            root: format!("{}xmlmc/", with_trailing_slash(base)),
            api_key: api_key.to_string(),
            dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Sends `call`. Mutating calls are not sent at all during a dry run.
    pub async fn invoke(&self, call: &MethodCall, mutating: bool) -> Result<XmlmcResponse> {
        tracing::debug!("{}", call.params_xml());
        let operation = call.operation();

        if self.dry_run && mutating {
            tracing::debug!("Dry Run => Skipping {}", operation);
            return Err(RemoverError::DryRunSkipped { operation });
        }

        self.send(call, operation).await.inspect_err(|e| {
            tracing::error!("{}", e);
        })
    }

    async fn send(&self, call: &MethodCall, operation: String) -> Result<XmlmcResponse> {
        let transport = |message: String| RemoverError::TransportError {
            operation: operation.clone(),
            message,
        };

        let response = self
            .client
            .post(format!("{}{}/", self.root, call.service))
            .query(&[("method", call.method.as_str())])
            .header(AUTHORIZATION, format!("ESP-APIKEY {}", self.api_key))
            .header(CONTENT_TYPE, "text/xmlmc")
            .header(ACCEPT, "text/json")
            .body(call.to_xml())
            .send()
            .await
            .map_err(|e| transport(e.to_string()))?;

        let http_status = response.status();
        let body = response.text().await.map_err(|e| transport(e.to_string()))?;
        tracing::debug!("{}", body);

        let decoded: XmlmcResponse = match serde_json::from_str(&body) {
            Ok(decoded) => decoded,
            Err(_) if !http_status.is_success() => {
                return Err(transport(format!("HTTP status {}", http_status)));
            }
            Err(e) => {
                return Err(RemoverError::DecodeError {
                    operation: operation.clone(),
                    message: e.to_string(),
                });
            }
        };

        if !decoded.state.error.is_empty() {
            return Err(RemoverError::RemoteError {
                operation: operation.clone(),
                message: decoded.state.error,
            });
        }
        if decoded.status == Some(false) {
            return Err(RemoverError::RemoteError {
                operation: operation.clone(),
                message: "request reported failure without an error message".to_string(),
            });
        }
        if !http_status.is_success() {
            return Err(transport(format!("HTTP status {}", http_status)));
        }

        Ok(decoded)
    }
}

/// Looks up the API base URL for `instance_id` in the zone info directory.
pub async fn resolve_endpoint(client: &Client, zoneinfo_base: &str, instance_id: &str) -> Result<String> {
    let url = format!("{}/{}/zoneinfo", zoneinfo_base.trim_end_matches('/'), instance_id);
    tracing::debug!("Resolving instance endpoint from {}", url);

    let unresolved = |reason: String| RemoverError::ConfigError {
        message: format!("Unable to resolve endpoint for instance {}: {}", instance_id, reason),
    };

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| unresolved(e.to_string()))?;
    if !response.status().is_success() {
        return Err(unresolved(format!("HTTP status {}", response.status())));
    }
    let info: ZoneInfoResponse = response
        .json()
        .await
        .map_err(|e| unresolved(e.to_string()))?;
    if info.zoneinfo.endpoint.is_empty() {
        return Err(unresolved("empty endpoint".to_string()));
    }
    Ok(info.zoneinfo.endpoint)
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    }
}

use crate::error::{self, Result};
use base64::Engine;
use indexmap::IndexMap;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use snafu::ensure;
use std::fmt::Display;
use wave_operators::util::number::format_number;

/// Everything but the characters that `encodeURIComponent` leaves as they are
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes `value` like JavaScript's `encodeURIComponent`
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// A single request parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum RequestParameterValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Display for RequestParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestParameterValue::String(value) => f.write_str(value),
            RequestParameterValue::Integer(value) => write!(f, "{value}"),
            RequestParameterValue::Float(value) => f.write_str(&format_number(*value)),
            RequestParameterValue::Boolean(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for RequestParameterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for RequestParameterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for RequestParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for RequestParameterValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for RequestParameterValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for RequestParameterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// An ordered set of form parameters plus the headers to send them with.
///
/// Setting an existing key overwrites its value but keeps its position.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParameters {
    parameters: IndexMap<String, RequestParameterValue>,
    headers: Vec<(String, String)>,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            parameters: IndexMap::new(),
            headers: vec![(
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            )],
        }
    }
}

impl RequestParameters {
    pub fn new<K, V>(parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<RequestParameterValue>,
    {
        let mut request_parameters = Self::default();
        request_parameters.set_parameters(parameters);
        request_parameters
    }

    pub fn set_parameter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<RequestParameterValue>,
    ) {
        self.parameters.insert(key.into(), value.into());
    }

    pub fn set_parameters<K, V>(&mut self, parameters: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<RequestParameterValue>,
    {
        for (key, value) in parameters {
            self.set_parameter(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&RequestParameterValue> {
        self.parameters.get(key)
    }

    /// `key=value` pairs joined by `&`, with the values percent-encoded if `encode` is set
    pub fn to_message_body(&self, encode: bool) -> String {
        self.parameters
            .iter()
            .map(|(key, value)| {
                let value = value.to_string();
                if encode {
                    format!("{key}={}", encode_uri_component(&value))
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn as_map(&self) -> &IndexMap<String, RequestParameterValue> {
        &self.parameters
    }

    /// Adds a HTTP basic authentication header
    pub fn add_authentication(&mut self, username: &str, password: &str) {
        let credentials =
            base64::engine::general_purpose::STANDARD.encode(format!("{username}:{password}"));

        self.headers
            .push(("Authorization".to_string(), format!("Basic {credentials}")));
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Request parameters for the mapping engine.
///
/// `service`, `request` and the session token are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingRequestParameters {
    inner: RequestParameters,
}

impl MappingRequestParameters {
    pub const PROTECTED_KEYS: [&'static str; 4] =
        ["service", "request", "sessionToken", "sessiontoken"];

    pub fn new<K, V>(
        service: &str,
        request: &str,
        session_token: &str,
        parameters: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: Into<String>,
        V: Into<RequestParameterValue>,
    {
        let mut inner = RequestParameters::default();
        inner.set_parameter("service", service);
        inner.set_parameter("request", request);
        inner.set_parameter("sessiontoken", session_token);

        let mut mapping_parameters = Self { inner };
        mapping_parameters.set_parameters(parameters)?;

        Ok(mapping_parameters)
    }

    /// Fails for the keys that were fixed at construction
    pub fn set_parameter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<RequestParameterValue>,
    ) -> Result<()> {
        let key = key.into();

        ensure!(
            !Self::PROTECTED_KEYS.contains(&key.as_str()),
            error::ProtectedRequestParameter { parameter: key }
        );

        self.inner.set_parameter(key, value);

        Ok(())
    }

    /// Fails without changing anything if any key is protected
    pub fn set_parameters<K, V>(
        &mut self,
        parameters: impl IntoIterator<Item = (K, V)>,
    ) -> Result<()>
    where
        K: Into<String>,
        V: Into<RequestParameterValue>,
    {
        let parameters: Vec<(String, RequestParameterValue)> = parameters
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        if let Some((key, _)) = parameters
            .iter()
            .find(|(key, _)| Self::PROTECTED_KEYS.contains(&key.as_str()))
        {
            return error::ProtectedRequestParameter {
                parameter: key.clone(),
            }
            .fail();
        }

        self.inner.set_parameters(parameters);

        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RequestParameterValue> {
        self.inner.get(key)
    }

    pub fn to_message_body(&self, encode: bool) -> String {
        self.inner.to_message_body(encode)
    }

    pub fn as_map(&self) -> &IndexMap<String, RequestParameterValue> {
        self.inner.as_map()
    }

    pub fn add_authentication(&mut self, username: &str, password: &str) {
        self.inner.add_authentication(username, password);
    }

    pub fn headers(&self) -> &[(String, String)] {
        self.inner.headers()
    }
}

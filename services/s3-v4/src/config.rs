// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{DEFAULT_REGION, DEFAULT_SERVICE};
use http::Uri;
use s3sign_core::utils::Redact;
use s3sign_core::{Error, Result};
use std::fmt::{Debug, Formatter};

/// Config carries everything needed to reach and sign for an S3 endpoint.
///
/// Only `access_key`, `secret_key`, `session_token`, `region` and `service`
/// take part in signing. The endpoint and transport fields are kept for the
/// client layer that sends the signed request.
#[derive(Clone)]
pub struct Config {
    /// Endpoint of the service, like `http://localhost:9000`.
    pub endpoint: String,
    /// Port of the endpoint.
    pub port: u16,
    /// Whether the endpoint should be reached over https.
    pub secure: bool,
    /// Name of the transport the client layer should use.
    pub transport: Option<String>,

    /// Access key id.
    pub access_key: Option<String>,
    /// Secret access key.
    pub secret_key: Option<String>,
    /// Session token for temporary credentials.
    ///
    /// Signed as `x-amz-security-token` when set.
    pub session_token: Option<String>,

    /// Region of the endpoint, `us-east-1` by default.
    pub region: String,
    /// Service name in the credential scope, `s3` by default.
    pub service: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000".to_string(),
            port: 9000,
            secure: false,
            transport: None,
            access_key: None,
            secret_key: None,
            session_token: None,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("transport", &self.transport)
            .field("access_key", &Redact::from(&self.access_key))
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl Config {
    /// Create a config with the given static credentials and default everything else.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: Some(access_key.into()),
            secret_key: Some(secret_key.into()),
            ..Default::default()
        }
    }

    /// Render the endpoint as a base url with scheme, host and port.
    ///
    /// The scheme comes from `secure`, the port is omitted when it is the
    /// default of that scheme. Any scheme or port already present in
    /// `endpoint` is replaced.
    pub fn endpoint_url(&self) -> Result<String> {
        let uri: Uri = self.endpoint.parse()?;
        let host = uri.host().ok_or_else(|| {
            Error::request_invalid(format!("endpoint {:?} has no host", self.endpoint))
        })?;

        let (scheme, default_port) = if self.secure {
            ("https", 443)
        } else {
            ("http", 80)
        };

        Ok(if self.port == default_port {
            format!("{scheme}://{host}")
        } else {
            format!("{scheme}://{host}:{}", self.port)
        })
    }
}

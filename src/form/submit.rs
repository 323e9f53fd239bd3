// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Remote form submission.
//!
//! One blocking POST per submission with a JSON body of field name to value.
//! There is no retry; every failure is returned to the caller to be shown to
//! the user.

use std::time::Duration;

use reqwest::{
    StatusCode,
    blocking::Client,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Deserialize;

use crate::form::ContactPayload;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    #[serde(default)]
    pub(crate) success: bool,

    #[serde(default)]
    pub(crate) message: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum SubmitError {
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),

    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

pub(crate) struct SubmitClient {
    client: Client,
    endpoint: String,
}

impl SubmitClient {
    pub(crate) fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Posts `payload` to the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error for a transport failure, a non-success HTTP status,
    /// or a response body whose `success` flag is not set.
    pub(crate) fn submit(&self, payload: &ContactPayload) -> Result<SubmitResponse, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status(status));
        }

        let body: SubmitResponse = response.json()?;
        if !body.success {
            return Err(SubmitError::Rejected(
                body.message
                    .clone()
                    .unwrap_or_else(|| "Submission was not accepted".to_string()),
            ));
        }

        Ok(body)
    }
}

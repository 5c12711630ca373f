// Response envelope
//
// The backend answers `{ "success": bool, "data": ..., "message": "..." }`,
// but a handful of endpoints put their payload beside `data` instead of in
// it (`user` on login, `authorizationURL` and `orderId` on checkout,
// `balance` on wallet reads). Those land in `extra`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;

/// Error codes the backend uses to signal an expired or missing session
/// inside an otherwise well-formed envelope.
const AUTH_EXPIRED_CODES: &[&str] = &["AUTH_EXPIRED", "TOKEN_EXPIRED", "UNAUTHORIZED"];

/// Standard backend response envelope.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Envelope {
    /// `None` when the endpoint omits the flag; only an explicit `false`
    /// counts as a rejection.
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Turn a parsed envelope into `Ok(self)` or the error it declares.
    pub(crate) fn into_result(self) -> Result<Self, Error> {
        if self.declares_auth_expired() {
            return Err(Error::AuthExpired {
                message: self
                    .message
                    .unwrap_or_else(|| "please log in again".into()),
            });
        }
        if self.success == Some(false) {
            return Err(Error::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "request was not successful".into()),
            });
        }
        Ok(self)
    }

    fn declares_auth_expired(&self) -> bool {
        self.code
            .as_deref()
            .is_some_and(|code| AUTH_EXPIRED_CODES.contains(&code))
    }

    /// Deserialize `data` into `T`. A missing `data` is an error.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let value = self.data.clone().ok_or_else(|| Error::Deserialization {
            message: "response envelope has no `data`".into(),
            body: self.debug_body(),
        })?;
        decode(value, &self.debug_body())
    }

    /// Deserialize `data` into `T`, falling back to `T::default()` when absent
    /// or `null`.
    pub fn data_or_default<T: DeserializeOwned + Default>(&self) -> Result<T, Error> {
        match &self.data {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => decode(value.clone(), &self.debug_body()),
        }
    }

    /// Look up a named field, first at the top level, then inside `data`.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, Error> {
        let found = self
            .extra
            .get(name)
            .or_else(|| self.data.as_ref().and_then(|d| d.get(name)));
        match found {
            None | Some(Value::Null) => Ok(None),
            Some(value) => decode(value.clone(), &self.debug_body()).map(Some),
        }
    }

    fn debug_body(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn decode<T: DeserializeOwned>(value: Value, body: &str) -> Result<T, Error> {
    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

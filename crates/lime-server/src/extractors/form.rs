//! Lenient urlencoded form bodies

use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
};
use std::collections::HashMap;

/// Form fields decoded from the request body.
///
/// The body is parsed whatever the `Content-Type`; a repeated key keeps its
/// last value and an absent key reads as an empty string.
#[derive(Debug, Default)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        FormFields(
            form_urlencoded::parse(body)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        )
    }

    /// Remove a field, or an empty string if it was not sent
    pub fn take(&mut self, key: &str) -> String {
        self.0.remove(key).unwrap_or_default()
    }
}

#[async_trait]
impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await?;
        Ok(FormFields::parse(&body))
    }
}

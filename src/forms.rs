// forms.rs
use astra::{Body, Request};
use std::io::Read;

use crate::errors::ServerError;

/// Uploads and form posts larger than this are refused.
pub const MAX_BODY_BYTES: u64 = 16 * 1024 * 1024;

/// Decoded `application/x-www-form-urlencoded` pairs, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn parse(bytes: &[u8]) -> Self {
        url::form_urlencoded::parse(bytes).into_owned().collect()
    }

    pub fn from_query(req: &Request) -> Self {
        req.uri()
            .query()
            .map(|q| Self::parse(q.as_bytes()))
            .unwrap_or_default()
    }

    /// Last value wins when an input name repeats.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

pub fn read_body(body: &mut Body) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    body.reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut buf)
        .map_err(|e| ServerError::BadRequest(format!("Failed to read request body: {e}")))?;

    if buf.len() as u64 > MAX_BODY_BYTES {
        return Err(ServerError::BadRequest("Request body too large".into()));
    }
    Ok(buf)
}

pub fn read_form(req: Request) -> Result<FormFields, ServerError> {
    let mut body = req.into_body();
    Ok(FormFields::parse(&read_body(&mut body)?))
}

/// Value of cookie `name` from the `Cookie` header, if any.
pub fn cookie(req: &Request, name: &str) -> Option<String> {
    req.headers()
        .get_all("Cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

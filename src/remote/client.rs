// remote/client.rs
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::config::RemoteConfig;
use crate::domain::Report;
use crate::remote::{AccidentPayload, AccidentSink, CreatedAccident, RemoteError};
use crate::store::StoredImage;

/// Posts reports to the accident backend, then uploads their photos.
pub struct HttpAccidentSink {
    client: Client,
    accidents_url: Url,
    upload_url: Url,
    cfg: RemoteConfig,
}

impl HttpAccidentSink {
    pub fn new(cfg: &RemoteConfig) -> Result<Self, RemoteError> {
        let base = cfg.base_url.trim_end_matches('/');
        let accidents_url = Url::parse(base).map_err(|e| RemoteError::Setup(e.to_string()))?;
        let upload_url = Url::parse(&format!("{base}/uploadimages"))
            .map_err(|e| RemoteError::Setup(e.to_string()))?;

        let client = Client::builder()
            .timeout(cfg.timeout_secs.map(Duration::from_secs))
            .danger_accept_invalid_certs(cfg.accept_invalid_certs)
            .build()
            .map_err(|e| RemoteError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            accidents_url,
            upload_url,
            cfg: cfg.clone(),
        })
    }

    pub fn accidents_url(&self) -> &Url {
        &self.accidents_url
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    fn post_report(&self, report: &Report) -> Result<String, RemoteError> {
        const STAGE: &str = "report submission";

        let payload = AccidentPayload::from_report(report, &self.cfg);
        let resp = self
            .client
            .post(self.accidents_url.clone())
            .json(&payload)
            .send()
            .map_err(|e| RemoteError::Network {
                stage: STAGE,
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(RemoteError::Status {
                stage: STAGE,
                status: resp.status().as_u16(),
            });
        }

        let created: CreatedAccident = resp
            .json()
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(created.id_text())
    }

    fn upload_images(&self, accident_id: &str, images: &[Arc<StoredImage>]) -> Result<(), RemoteError> {
        const STAGE: &str = "image upload";

        let mut form = Form::new().text("AccidentId", accident_id.to_string());
        for (index, image) in images.iter().enumerate() {
            let part = Part::bytes(image.bytes.clone())
                .file_name(format!("image{}.jpg", index + 1))
                .mime_str(&image.content_type)
                .map_err(|e| RemoteError::Encode(e.to_string()))?;
            form = form.part("Images", part);
        }

        let resp = self
            .client
            .post(self.upload_url.clone())
            .multipart(form)
            .send()
            .map_err(|e| RemoteError::Network {
                stage: STAGE,
                message: e.to_string(),
            })?;

        if !resp.status().is_success() {
            return Err(RemoteError::Status {
                stage: STAGE,
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }
}

impl AccidentSink for HttpAccidentSink {
    fn submit(&self, report: &Report, images: &[Arc<StoredImage>]) -> Result<String, RemoteError> {
        let accident_id = self.post_report(report)?;
        tracing::debug!(%accident_id, "report accepted by backend");

        self.upload_images(&accident_id, images)?;
        tracing::debug!(%accident_id, count = images.len(), "images uploaded");

        Ok(accident_id)
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::asset::errors::AssetError;
use crate::domain::asset::models::Asset;
use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::models::UploadedFile;
use crate::domain::asset::ports::AssetStore;

/// Upload response; hosts answer with either `secure_url` or `url`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    #[serde(alias = "url")]
    secure_url: String,
}

#[derive(Debug, Serialize)]
struct DestroyRequest<'a> {
    public_id: &'a str,
}

/// Relays uploads to an external asset host over HTTP.
///
/// Uploads are `multipart/form-data` with a `file` part and a `folder` field.
/// Deletions are a JSON `{"public_id": ...}` POST.
pub struct HttpAssetStore {
    client: reqwest::Client,
    upload_url: String,
    destroy_url: String,
    api_key: String,
}

impl HttpAssetStore {
    pub fn new(
        upload_url: String,
        destroy_url: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, AssetError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AssetError::UploadFailed(e.to_string()))?;

        Ok(Self {
            client,
            upload_url,
            destroy_url,
            api_key,
        })
    }

    fn file_part(file: UploadedFile) -> Result<Part, AssetError> {
        let part = Part::bytes(file.bytes).file_name(file.file_name);
        match file.content_type {
            Some(content_type) => part
                .mime_str(&content_type)
                .map_err(|e| AssetError::UploadFailed(e.to_string())),
            None => Ok(part),
        }
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn upload(&self, file: UploadedFile, folder: AssetFolder) -> Result<Asset, AssetError> {
        let form = Form::new()
            .text("folder", folder.as_str())
            .part("file", Self::file_part(file)?);

        let response = self
            .client
            .post(&self.upload_url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AssetError::UploadFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, folder = %folder, "Asset upload rejected");
            return Err(AssetError::UploadFailed(format!("HTTP {}", status.as_u16())));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AssetError::InvalidResponse(e.to_string()))?;

        tracing::debug!(public_id = %uploaded.public_id, folder = %folder, "Asset uploaded");

        Ok(Asset {
            public_id: uploaded.public_id,
            url: uploaded.secure_url,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), AssetError> {
        let destroy_failed = |reason: String| AssetError::DestroyFailed {
            public_id: public_id.to_string(),
            reason,
        };

        let response = self
            .client
            .post(&self.destroy_url)
            .bearer_auth(&self.api_key)
            .json(&DestroyRequest { public_id })
            .send()
            .await
            .map_err(|e| destroy_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), public_id = %public_id, "Asset removal rejected");
            return Err(destroy_failed(format!("HTTP {}", status.as_u16())));
        }

        tracing::debug!(public_id = %public_id, "Asset destroyed");
        Ok(())
    }
}

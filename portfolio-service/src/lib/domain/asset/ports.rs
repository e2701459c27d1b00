use async_trait::async_trait;

use crate::domain::asset::errors::AssetError;
use crate::domain::asset::models::Asset;
use crate::domain::asset::models::AssetFolder;
use crate::domain::asset::models::UploadedFile;

/// External object storage for avatars, resumes, banners and icons.
#[async_trait]
pub trait AssetStore: Send + Sync + 'static {
    /// Upload a file into a folder on the asset host.
    ///
    /// # Arguments
    /// * `file` - File received from the client
    /// * `folder` - Destination folder
    ///
    /// # Returns
    /// Public identifier and URL of the stored asset
    ///
    /// # Errors
    /// * `UploadFailed` - Asset host rejected or did not answer the upload
    /// * `InvalidResponse` - Asset host answered with an unexpected body
    async fn upload(&self, file: UploadedFile, folder: AssetFolder) -> Result<Asset, AssetError>;

    /// Remove a stored asset.
    ///
    /// # Errors
    /// * `DestroyFailed` - Asset host refused or did not answer
    async fn destroy(&self, public_id: &str) -> Result<(), AssetError>;
}

use std::fmt;

/// A file stored on the external asset host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub public_id: String,
    pub url: String,
}

/// Destination folder on the asset host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetFolder {
    Avatars,
    Resumes,
    ProjectBanners,
    SkillSvgs,
    SoftwareApplications,
}

impl AssetFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetFolder::Avatars => "AVATARS",
            AssetFolder::Resumes => "RESUMES",
            AssetFolder::ProjectBanners => "PORTFOLIO_PROJECT_BANNERS",
            AssetFolder::SkillSvgs => "PORTFOLIO_SKILLS_SVGS",
            AssetFolder::SoftwareApplications => "PORTFOLIO_SOFTWARE_APPLICATIONS",
        }
    }
}

impl fmt::Display for AssetFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file received from a client, held in memory until it is relayed.
///
/// Dropping the value releases the upload; nothing touches the local disk.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

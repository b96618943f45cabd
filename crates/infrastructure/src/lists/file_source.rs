use super::parse_list;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tapguard_application::ports::BlockListSource;
use tapguard_domain::config::CloakConfig;
use tapguard_domain::{BlockSet, DomainError};
use tracing::{debug, info, instrument};

/// Reads the blocked, blacklist and whitelist files from disk and composes
/// `(blocked ∪ blacklist) − whitelist`.
pub struct FileBlockListSource {
    blocked_file: PathBuf,
    whitelist_file: PathBuf,
    blacklist_file: PathBuf,
}

impl FileBlockListSource {
    pub fn new(
        blocked_file: impl Into<PathBuf>,
        whitelist_file: impl Into<PathBuf>,
        blacklist_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            blocked_file: blocked_file.into(),
            whitelist_file: whitelist_file.into(),
            blacklist_file: blacklist_file.into(),
        }
    }

    pub fn from_config(config: &CloakConfig) -> Self {
        Self::new(
            &config.blocked_file,
            &config.whitelist_file,
            &config.blacklist_file,
        )
    }

    async fn read_list(path: &Path) -> Result<BlockSet, DomainError> {
        let contents =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DomainError::BlockListLoad {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
        let set = BlockSet::from_domains(parse_list(&contents));
        debug!(path = %path.display(), domains = set.len(), "List file read");
        Ok(set)
    }
}

#[async_trait]
impl BlockListSource for FileBlockListSource {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<BlockSet, DomainError> {
        let whitelist = Self::read_list(&self.whitelist_file).await?;
        let blacklist = Self::read_list(&self.blacklist_file).await?;
        let blocked = Self::read_list(&self.blocked_file).await?;

        let composed = BlockSet::compose(blocked, &blacklist, &whitelist);
        info!(
            blocked_domains = composed.len(),
            blacklisted = blacklist.len(),
            whitelisted = whitelist.len(),
            "Block lists loaded"
        );
        Ok(composed)
    }
}

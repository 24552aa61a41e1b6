use super::{CartRepository, RepositoryError};
use crate::model::{CartId, OrderLineItem};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, trace};

/// Stores each cart as `cart_<id>.json` under a data directory.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the target, so a crash mid-save
/// leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct JsonFileCartRepository {
    dir: PathBuf,
}

impl JsonFileCartRepository {
    /// The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, cart: CartId) -> PathBuf {
        self.dir.join(format!("cart_{}.json", cart.0))
    }
}

#[async_trait]
impl CartRepository for JsonFileCartRepository {
    async fn load(&self, cart: CartId) -> Result<Vec<OrderLineItem>, RepositoryError> {
        let path = self.path_for(cart);
        match fs::read(&path).await {
            Ok(bytes) => {
                let items: Vec<OrderLineItem> = serde_json::from_slice(&bytes)?;
                trace!(%cart, count = items.len(), "load");
                Ok(items)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, cart: CartId, items: &[OrderLineItem]) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(cart);
        let tmp = path.with_extension("json.tmp");
        let bytes = serde_json::to_vec_pretty(items)?;
        fs::write(&tmp, bytes).await?;
        fs::rename(&tmp, &path).await?;
        debug!(%cart, count = items.len(), path = %path.display(), "saved");
        Ok(())
    }

    async fn clear(&self, cart: CartId) -> Result<(), RepositoryError> {
        match fs::remove_file(self.path_for(cart)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

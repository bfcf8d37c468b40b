//! App Context

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    blobs::{BlobStore, LocalBlobStore},
    database::{self, Db},
    domain::{
        carts::{CartsService, PgCartsService},
        frames::{FramesService, PgFramesService},
        orders::{OrdersService, PgOrdersService},
        principals::{PgPrincipalsService, PrincipalsService},
        variants::{PgVariantsService, VariantsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub frames: Arc<dyn FramesService>,
    pub variants: Arc<dyn VariantsService>,
    pub principals: Arc<dyn PrincipalsService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL and a media directory.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        media_root: impl Into<PathBuf>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let media_root = media_root.into();

        info!(media_root = %media_root.display(), "using local blob store");

        let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(media_root));

        Ok(Self::with_db(Db::new(pool), blobs))
    }

    #[must_use]
    pub fn with_db(db: Db, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            frames: Arc::new(PgFramesService::new(db.clone(), Arc::clone(&blobs))),
            variants: Arc::new(PgVariantsService::new(db.clone(), Arc::clone(&blobs))),
            principals: Arc::new(PgPrincipalsService::new(db.clone(), Arc::clone(&blobs))),
            carts: Arc::new(PgCartsService::new(db.clone(), Arc::clone(&blobs))),
            orders: Arc::new(PgOrdersService::new(db.clone(), blobs)),
            auth: Arc::new(PgAuthService::new(db)),
        }
    }
}

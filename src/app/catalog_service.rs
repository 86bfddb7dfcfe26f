//! The catalog service.
//!
//! Owns the connection pool and is the only place SQL is written. It is responsible for:
//! 1.  Reading vendors, sweets, and a vendor's priced listings.
//! 2.  Creating and deleting `vendor_sweets` rows, each inside a single transaction that
//!     is committed or rolled back exactly once.
//! 3.  Classifying storage failures so the transport layer can map them to status codes.

use crate::domain::model::{NewVendorSweet, Sweet, ValidationError, Vendor, VendorSweet, VendorSweetListing};
use crate::infra::config::AppConfig;
use crate::storage::{self, StorageError};
use sqlx::error::ErrorKind;
use sqlx::SqlitePool;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("constraint violated: {0}")]
    ConstraintViolated(#[source] sqlx::Error),

    #[error("{entity} {id} does not exist")]
    DanglingReference { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl CatalogError {
    /// True for failures caused by the request payload rather than the server.
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, CatalogError::Database(_))
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        let is_constraint = match &err {
            sqlx::Error::Database(db_err) => matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::CheckViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::UniqueViolation
            ),
            _ => false,
        };
        if is_constraint {
            CatalogError::ConstraintViolated(err)
        } else {
            CatalogError::Database(err)
        }
    }
}

/// A freshly committed listing together with the two rows it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedVendorSweet {
    pub vendor_sweet: VendorSweet,
    pub sweet: Sweet,
    pub vendor: Vendor,
}

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    /// Wraps an existing pool. The schema is assumed to be migrated already.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connects using `config` and applies pending migrations.
    pub async fn connect(config: &AppConfig) -> Result<Self, StorageError> {
        let pool = storage::connect(config).await?;
        storage::run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn list_vendors(&self) -> Result<Vec<Vendor>, CatalogError> {
        let vendors = sqlx::query_as::<_, Vendor>("SELECT id, name FROM vendors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(vendors)
    }

    pub async fn get_vendor(&self, id: i64) -> Result<Option<Vendor>, CatalogError> {
        let vendor = sqlx::query_as::<_, Vendor>("SELECT id, name FROM vendors WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(vendor)
    }

    /// All listings of one vendor, each joined with its sweet, in id order.
    pub async fn vendor_listings(
        &self,
        vendor_id: i64,
    ) -> Result<Vec<VendorSweetListing>, CatalogError> {
        let listings = sqlx::query_as::<_, VendorSweetListing>(
            "SELECT vs.id, vs.price, vs.sweet_id, vs.vendor_id, s.name AS sweet_name
             FROM vendor_sweets vs
             JOIN sweets s ON s.id = vs.sweet_id
             WHERE vs.vendor_id = ?
             ORDER BY vs.id",
        )
        .bind(vendor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(listings)
    }

    pub async fn list_sweets(&self) -> Result<Vec<Sweet>, CatalogError> {
        let sweets = sqlx::query_as::<_, Sweet>("SELECT id, name FROM sweets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(sweets)
    }

    pub async fn get_sweet(&self, id: i64) -> Result<Option<Sweet>, CatalogError> {
        let sweet = sqlx::query_as::<_, Sweet>("SELECT id, name FROM sweets WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sweet)
    }

    pub async fn get_vendor_sweet(&self, id: i64) -> Result<Option<VendorSweet>, CatalogError> {
        let row = sqlx::query_as::<_, VendorSweet>(
            "SELECT id, price, sweet_id, vendor_id FROM vendor_sweets WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn count_vendor_sweets(&self) -> Result<i64, CatalogError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendor_sweets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts `new` and resolves the sweet and vendor it references, all in one
    /// transaction.
    ///
    /// If the insert or either lookup fails the transaction is dropped uncommitted, which
    /// rolls it back: no row persists.
    pub async fn create_vendor_sweet(
        &self,
        new: &NewVendorSweet,
    ) -> Result<CreatedVendorSweet, CatalogError> {
        let mut tx = self.pool.begin().await?;

        let vendor_sweet = sqlx::query_as::<_, VendorSweet>(
            "INSERT INTO vendor_sweets (price, sweet_id, vendor_id) VALUES (?, ?, ?)
             RETURNING id, price, sweet_id, vendor_id",
        )
        .bind(new.price())
        .bind(new.sweet_id())
        .bind(new.vendor_id())
        .fetch_one(&mut *tx)
        .await?;

        let sweet = sqlx::query_as::<_, Sweet>("SELECT id, name FROM sweets WHERE id = ?")
            .bind(vendor_sweet.sweet_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CatalogError::DanglingReference {
                entity: "sweet",
                id: vendor_sweet.sweet_id,
            })?;

        let vendor = sqlx::query_as::<_, Vendor>("SELECT id, name FROM vendors WHERE id = ?")
            .bind(vendor_sweet.vendor_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CatalogError::DanglingReference {
                entity: "vendor",
                id: vendor_sweet.vendor_id,
            })?;

        tx.commit().await?;

        tracing::info!(
            vendor_sweet_id = vendor_sweet.id,
            vendor_id = vendor.id,
            sweet_id = sweet.id,
            price = vendor_sweet.price,
            "Created vendor sweet."
        );

        Ok(CreatedVendorSweet {
            vendor_sweet,
            sweet,
            vendor,
        })
    }

    /// Deletes one listing. Returns `false` if no row had that id.
    ///
    /// Only the `vendor_sweets` row is touched; its sweet and vendor stay.
    pub async fn delete_vendor_sweet(&self, id: i64) -> Result<bool, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM vendor_sweets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }
        tx.commit().await?;
        tracing::info!(vendor_sweet_id = id, "Deleted vendor sweet.");
        Ok(true)
    }

    pub async fn insert_vendor(&self, name: &str) -> Result<Vendor, CatalogError> {
        let vendor = sqlx::query_as::<_, Vendor>(
            "INSERT INTO vendors (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(vendor)
    }

    pub async fn insert_sweet(&self, name: &str) -> Result<Sweet, CatalogError> {
        let sweet = sqlx::query_as::<_, Sweet>(
            "INSERT INTO sweets (name) VALUES (?) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(sweet)
    }

    /// Wipes all three tables, listings first so foreign keys hold throughout.
    pub async fn clear_all(&self) -> Result<(), CatalogError> {
        let mut tx = self.pool.begin().await?;
        for table in ["vendor_sweets", "vendors", "sweets"] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        // Restart AUTOINCREMENT ids so a reseed numbers rows from 1 again.
        sqlx::query("DELETE FROM sqlite_sequence")
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

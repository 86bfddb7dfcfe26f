//! Catalog entities: sweets, vendors, and the priced association between them.
//!
//! Rows only hold their own columns and foreign keys. Relationship expansion happens in
//! the response projections, never by following links from one entity to another.

pub mod vendor_sweet;

pub use vendor_sweet::{NewVendorSweet, ValidationError, VendorSweet};

/// A product that vendors sell.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Sweet {
    pub id: i64,
    pub name: String,
}

/// A seller of sweets.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Vendor {
    pub id: i64,
    pub name: String,
}

/// A vendor's association joined with the sweet it prices, as needed by the vendor
/// detail view.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VendorSweetListing {
    pub id: i64,
    pub price: i64,
    pub sweet_id: i64,
    pub vendor_id: i64,
    pub sweet_name: String,
}

impl VendorSweetListing {
    pub fn sweet(&self) -> Sweet {
        Sweet {
            id: self.sweet_id,
            name: self.sweet_name.clone(),
        }
    }
}

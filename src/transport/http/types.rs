use crate::app::catalog_service::{CatalogService, CreatedVendorSweet};
use crate::domain::model::{Sweet, Vendor, VendorSweetListing};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

/// `{id, name}` of a sweet. Never carries the sweet's own listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct SweetSummary {
    pub id: i64,
    pub name: String,
}

/// `{id, name}` of a vendor. Never carries the vendor's own listings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VendorSummary {
    pub id: i64,
    pub name: String,
}

/// One entry of `VendorDetail::vendor_sweets`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VendorSweetEntry {
    pub id: i64,
    pub price: i64,
    pub sweet: SweetSummary,
    pub sweet_id: i64,
    pub vendor_id: i64,
}

/// Response of `GET /vendors/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VendorDetail {
    pub id: i64,
    pub name: String,
    pub vendor_sweets: Vec<VendorSweetEntry>,
}

/// Response of `POST /vendor_sweets`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct VendorSweetCreated {
    pub id: i64,
    pub price: i64,
    pub sweet: SweetSummary,
    pub sweet_id: i64,
    pub vendor: VendorSummary,
    pub vendor_id: i64,
}

/// Body of `POST /vendor_sweets`.
///
/// Every field is optional at the wire level so a missing or `null` value reaches the
/// validation rule instead of failing inside the JSON extractor.
#[derive(Deserialize, Debug, Default, ToSchema)]
pub struct CreateVendorSweetRequest {
    pub price: Option<i64>,
    pub vendor_id: Option<i64>,
    pub sweet_id: Option<i64>,
}

/// `{"error": "..."}`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// `{"errors": [...]}`
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ValidationErrorsResponse {
    pub errors: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&Sweet> for SweetSummary {
    fn from(sweet: &Sweet) -> Self {
        Self {
            id: sweet.id,
            name: sweet.name.clone(),
        }
    }
}

impl From<&Vendor> for VendorSummary {
    fn from(vendor: &Vendor) -> Self {
        Self {
            id: vendor.id,
            name: vendor.name.clone(),
        }
    }
}

impl From<&VendorSweetListing> for VendorSweetEntry {
    fn from(listing: &VendorSweetListing) -> Self {
        Self {
            id: listing.id,
            price: listing.price,
            sweet: SweetSummary::from(&listing.sweet()),
            sweet_id: listing.sweet_id,
            vendor_id: listing.vendor_id,
        }
    }
}

impl VendorDetail {
    pub fn new(vendor: &Vendor, listings: &[VendorSweetListing]) -> Self {
        Self {
            id: vendor.id,
            name: vendor.name.clone(),
            vendor_sweets: listings.iter().map(VendorSweetEntry::from).collect(),
        }
    }
}

impl From<&CreatedVendorSweet> for VendorSweetCreated {
    fn from(created: &CreatedVendorSweet) -> Self {
        Self {
            id: created.vendor_sweet.id,
            price: created.vendor_sweet.price,
            sweet: SweetSummary::from(&created.sweet),
            sweet_id: created.vendor_sweet.sweet_id,
            vendor: VendorSummary::from(&created.vendor),
            vendor_id: created.vendor_sweet.vendor_id,
        }
    }
}

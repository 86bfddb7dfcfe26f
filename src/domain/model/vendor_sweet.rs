use thiserror::Error;

/// A persisted price listing: `vendor_id` sells `sweet_id` at `price`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct VendorSweet {
    pub id: i64,
    pub price: i64,
    pub sweet_id: i64,
    pub vendor_id: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("price must have a value")]
    MissingPrice,

    #[error("price must be a non-negative number, got {0}")]
    NegativePrice(i64),

    #[error("{0} is required")]
    MissingField(&'static str),
}

/// A validated, not yet persisted listing.
///
/// The only way to obtain one is [`NewVendorSweet::new`], so anything handed to the
/// storage layer has already passed the price rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendorSweet {
    price: i64,
    vendor_id: i64,
    sweet_id: i64,
}

impl NewVendorSweet {
    pub fn new(
        price: Option<i64>,
        vendor_id: Option<i64>,
        sweet_id: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let price = validate_price(price)?;
        let vendor_id = vendor_id.ok_or(ValidationError::MissingField("vendor_id"))?;
        let sweet_id = sweet_id.ok_or(ValidationError::MissingField("sweet_id"))?;
        Ok(Self {
            price,
            vendor_id,
            sweet_id,
        })
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn vendor_id(&self) -> i64 {
        self.vendor_id
    }

    pub fn sweet_id(&self) -> i64 {
        self.sweet_id
    }
}

/// Accepts any present, non-negative price unchanged.
pub fn validate_price(price: Option<i64>) -> Result<i64, ValidationError> {
    match price {
        None => Err(ValidationError::MissingPrice),
        Some(p) if p < 0 => Err(ValidationError::NegativePrice(p)),
        Some(p) => Ok(p),
    }
}

//! Product resolution from camera captures
//!
//! Turns a barcode photo or an ingredient-label photo into a `Product` the
//! classifier can work on. Real barcode decoding, product databases and OCR
//! plug in behind `ProductResolver`; `MockResolver` returns fixed data for
//! development and tests.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NutritionFacts, Product};

/// A photo taken by the user, tagged with what it shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Photo of a product barcode
    Barcode(Vec<u8>),
    /// Photo of the printed ingredient list
    IngredientLabel(Vec<u8>),
}

impl Capture {
    pub fn image(&self) -> &[u8] {
        match self {
            Self::Barcode(image) | Self::IngredientLabel(image) => image,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Barcode(_) => "barcode",
            Self::IngredientLabel(_) => "ingredients",
        }
    }
}

/// Resolves captures into products
#[async_trait]
pub trait ProductResolver: Send + Sync {
    /// Decode a barcode from an image
    async fn scan_barcode(&self, image: &[u8]) -> Result<String>;

    /// Look up a product by barcode
    async fn product_info(&self, barcode: &str) -> Result<Product>;

    /// Read the ingredient list off a label image
    async fn extract_ingredients(&self, image: &[u8]) -> Result<Vec<String>>;

    /// Resolve a capture into a product
    ///
    /// Label captures have no name, brand or nutrition facts, so they get
    /// placeholders and all-zero facts.
    async fn resolve_capture(&self, capture: Capture) -> Result<Product> {
        if capture.image().is_empty() {
            return Err(Error::EmptyCapture);
        }

        debug!(kind = capture.kind(), bytes = capture.image().len(), "Resolving capture");

        match capture {
            Capture::Barcode(image) => {
                let barcode = self.scan_barcode(&image).await?;
                self.product_info(&barcode).await
            }
            Capture::IngredientLabel(image) => {
                let ingredients = self.extract_ingredients(&image).await?;
                Ok(Product::from_ingredients(ingredients))
            }
        }
    }
}

/// Barcode returned by `MockResolver`
pub const MOCK_BARCODE: &str = "5901234123457";

const MOCK_INGREDIENTS: &[&str] = &[
    "Water",
    "Sugar",
    "High Fructose Corn Syrup",
    "Natural Flavors",
    "Citric Acid",
    "Sodium Benzoate (Preservative)",
    "Caffeine",
    "Yellow 5",
    "Red 40",
];

/// Resolver with fixed responses
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    /// Simulated latency applied to every call
    pub delay: Option<Duration>,
}

impl MockResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock resolver that sleeps before answering
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay) }
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn ingredients() -> Vec<String> {
        MOCK_INGREDIENTS.iter().map(|s| s.to_string()).collect()
    }
}

#[async_trait]
impl ProductResolver for MockResolver {
    async fn scan_barcode(&self, image: &[u8]) -> Result<String> {
        if image.is_empty() {
            return Err(Error::EmptyCapture);
        }
        self.wait().await;
        Ok(MOCK_BARCODE.to_string())
    }

    async fn product_info(&self, barcode: &str) -> Result<Product> {
        self.wait().await;
        if barcode.trim().is_empty() {
            return Err(Error::InvalidData("Barcode is empty".into()));
        }
        Ok(Product {
            name: "Energy Drink".into(),
            brand: "PowerBoost".into(),
            ingredients: Self::ingredients(),
            nutritional_info: NutritionFacts {
                calories: 240.0,
                protein: 0.0,
                carbs: 65.0,
                fat: 0.0,
                sugar: 60.0,
                sodium: 100.0,
            },
        })
    }

    async fn extract_ingredients(&self, image: &[u8]) -> Result<Vec<String>> {
        if image.is_empty() {
            return Err(Error::EmptyCapture);
        }
        self.wait().await;
        Ok(Self::ingredients())
    }
}

use crate::GeneratorError;
use getset::Getters;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;

/// First id handed out by [`Catalog::from_entries`].
pub const PRODUCT_ID_BASE: i64 = 1001;

/// A sellable item of the store.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct Product {
    product_id: i64,
    product_name: String,
    category: String,
    list_price: f64,
    /// `product_cost / list_price`.
    cost_factor: f64,
}

/// One category block of the hand-authored catalog: `(name, price, cost_factor)` items.
pub type CategoryEntry<'a> = (&'a str, &'a [(&'a str, f64, f64)]);

/// The static product catalog, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

const ELECTRONICS: &[(&str, f64, f64)] = &[
    ("Quantum Pro Soundbar", 399.99, 0.70),
    ("4K Ultra HD TV (55 inch)", 799.99, 0.78),
    ("4K Ultra HD TV (65 inch)", 1199.99, 0.80),
    ("High-End Laptop (16-inch)", 2399.99, 0.82),
    ("DSLR Camera Kit", 1499.99, 0.75),
    ("Wireless Noise-Cancelling Headphones", 249.99, 0.65),
    ("Premium In-Ear Headphones", 149.99, 0.60),
    ("Smart Home Hub", 129.99, 0.62),
    ("Smart Security Camera", 199.99, 0.68),
    ("10-inch Tablet", 329.99, 0.72),
    ("E-Reader Pro", 179.99, 0.70),
    ("Bluetooth Speaker", 99.99, 0.60),
    ("Gaming Mouse", 79.99, 0.55),
    ("Mechanical Keyboard", 129.99, 0.58),
    ("Portable Power Bank (20000mAh)", 49.99, 0.50),
    ("USB-C Hub", 59.99, 0.52),
    ("Webcam HD", 89.99, 0.57),
];

const APPAREL: &[(&str, f64, f64)] = &[
    ("All-Weather Jacket", 119.99, 0.55),
    ("Down Winter Coat", 249.99, 0.60),
    ("Lightweight Windbreaker", 79.99, 0.50),
    ("Denim Jacket", 99.99, 0.52),
    ("Classic Cotton T-Shirt", 24.99, 0.40),
    ("Graphic Print T-Shirt", 29.99, 0.42),
    ("Long-Sleeve Henley", 39.99, 0.45),
    ("Wool Sweater", 89.99, 0.50),
    ("Flannel Shirt", 59.99, 0.48),
    ("Denim Jeans", 89.99, 0.50),
    ("Slim-Fit Chinos", 79.99, 0.48),
    ("Performance Running Shorts", 39.99, 0.45),
    ("Linen Trousers", 69.99, 0.47),
    ("Leather Ankle Boots", 149.99, 0.58),
    ("Canvas Sneakers", 69.99, 0.45),
    ("Leather Belt", 49.99, 0.40),
    ("Wool Scarf", 34.99, 0.35),
    ("Designer Sunglasses", 179.99, 0.50),
];

const HOME_GOODS: &[(&str, f64, f64)] = &[
    ("Artisan Ceramic Mug Set (4-pack)", 49.99, 0.50),
    ("Non-Stick Cookware Set (10-piece)", 199.99, 0.65),
    ("High-Powered Blender", 149.99, 0.60),
    ("French Press Coffee Maker", 39.99, 0.48),
    ("Electric Kettle", 49.99, 0.55),
    ("Cast Iron Skillet", 69.99, 0.60),
    ("Knife Block Set", 129.99, 0.62),
    ("Air Fryer", 119.99, 0.68),
    ("Egyptian Cotton Sheet Set (Queen)", 129.99, 0.55),
    ("Down Alternative Comforter", 149.99, 0.58),
    ("Plush Bath Towel Set", 79.99, 0.52),
    ("Memory Foam Pillow", 59.99, 0.50),
    ("Aromatherapy Diffuser", 59.99, 0.45),
    ("Framed Wall Art", 99.99, 0.40),
    ("Scented Candle (Large)", 29.99, 0.38),
    ("Yoga Mat", 39.99, 0.42),
    ("Weighted Blanket", 89.99, 0.55),
];

const BOOKS: &[(&str, f64, f64)] = &[
    ("The Data Analyst's Handbook", 34.99, 0.35),
    ("A Brief History of Everything", 19.99, 0.35),
    ("The Art of Python Programming", 49.99, 0.40),
    ("Investing 101", 24.99, 0.33),
    ("Baking Illustrated", 29.99, 0.38),
    ("30-Minute Meals", 22.99, 0.36),
    ("Mystery of the Silent Lake", 14.99, 0.30),
    ("The Sci-Fi Omnibus", 39.99, 0.42),
    ("Bestselling Thriller", 18.99, 0.33),
    ("Historical Fiction Saga", 21.99, 0.34),
    ("Children's Picture Book", 12.99, 0.30),
    ("Young Adult Fantasy Novel", 16.99, 0.32),
];

const SPORTS_OUTDOORS: &[(&str, f64, f64)] = &[
    ("2-Person Camping Tent", 129.99, 0.60),
    ("Hiking Backpack (50L)", 149.99, 0.58),
    ("Insulated Water Bottle", 29.99, 0.45),
    ("Set of 2 Dumbbells (15lb)", 59.99, 0.65),
    ("Bicycle Helmet", 49.99, 0.55),
    ("Fishing Rod Combo", 89.99, 0.62),
];

impl Catalog {
    /// Builds the store's fixed five-category catalog.
    pub fn standard() -> Result<Self, GeneratorError> {
        Self::from_entries(&[
            ("Electronics", ELECTRONICS),
            ("Apparel", APPAREL),
            ("Home Goods", HOME_GOODS),
            ("Books", BOOKS),
            ("Sports & Outdoors", SPORTS_OUTDOORS),
        ])
    }

    /// Flattens category blocks into products, assigning ids from [`PRODUCT_ID_BASE`]
    /// in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::InvalidCatalog`] if the catalog is empty, a price is not
    /// positive, a cost factor lies outside `(0, 1)`, or a name repeats within a category.
    pub fn from_entries(entries: &[CategoryEntry<'_>]) -> Result<Self, GeneratorError> {
        let mut products = Vec::new();
        for (category, items) in entries {
            let mut seen = HashSet::new();
            for &(name, price, cost_factor) in items.iter() {
                if !seen.insert(name) {
                    return Err(GeneratorError::InvalidCatalog(format!(
                        "duplicate product '{}' in category '{}'",
                        name, category
                    )));
                }
                if price.is_nan() || price <= 0.0 {
                    return Err(GeneratorError::InvalidCatalog(format!(
                        "product '{}' has non-positive price {}",
                        name, price
                    )));
                }
                if !(cost_factor > 0.0 && cost_factor < 1.0) {
                    return Err(GeneratorError::InvalidCatalog(format!(
                        "product '{}' has cost factor {} outside (0, 1)",
                        name, cost_factor
                    )));
                }
                products.push(Product {
                    product_id: PRODUCT_ID_BASE + products.len() as i64,
                    product_name: name.to_string(),
                    category: category.to_string(),
                    list_price: price,
                    cost_factor,
                });
            }
        }
        if products.is_empty() {
            return Err(GeneratorError::InvalidCatalog(
                "catalog has no products".to_string(),
            ));
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category names in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }

    pub fn get(&self, product_id: i64) -> Option<&Product> {
        let index = usize::try_from(product_id - PRODUCT_ID_BASE).ok()?;
        self.products.get(index)
    }

    /// The catalog as a table with one row per product.
    pub fn to_dataframe(&self) -> Result<DataFrame, GeneratorError> {
        let df = df!(
            "product_id" => self.products.iter().map(|p| p.product_id).collect::<Vec<_>>(),
            "product_name" => self.products.iter().map(|p| p.product_name.as_str()).collect::<Vec<_>>(),
            "category" => self.products.iter().map(|p| p.category.as_str()).collect::<Vec<_>>(),
            "list_price" => self.products.iter().map(|p| p.list_price).collect::<Vec<_>>(),
            "cost_factor" => self.products.iter().map(|p| p.cost_factor).collect::<Vec<_>>()
        )?;
        Ok(df)
    }
}

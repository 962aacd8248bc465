//! Product Aggregate
//!
//! A product is stored as one flat row with fixed slots for sizes and images.
//! The API exposes those slots as arrays, and `image` as an alias for the
//! first image.

use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

use crate::domain::value_objects::{
    lenient_list, lenient_list_opt, lenient_text, lenient_text_opt, split_list, SheetRecord,
};

pub const PRODUCT_SHEET: &str = "Products";

/// Slots per array-valued field.
pub const MAX_SLOTS: usize = 5;

/// Column order of the product sheet. Must match the sheet's header row.
pub const PRODUCT_HEADER: [&str; 15] = [
    "id", "name", "price", "moq", "category",
    "size1", "size2", "size3", "size4", "size5",
    "image1", "image2", "image3", "image4", "image5",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: String,
    pub moq: String,
    pub category: String,
    pub images: Vec<String>,
    pub sizes_available: Vec<String>,
}

/// Body of a create request.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[serde(default, deserialize_with = "lenient_text")]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub moq: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub sizes_available: Vec<String>,
}

/// Body of an update request. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub moq: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_list_opt")]
    pub images: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text_opt")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_list_opt")]
    pub sizes_available: Option<Vec<String>>,
}

impl Product {
    /// Builds a new product from a create request, clamping arrays to the sheet's slots.
    pub fn create(id: impl Into<String>, input: ProductInput) -> Self {
        let mut images = input.images;
        if images.is_empty() {
            images.extend(input.image.filter(|i| !i.trim().is_empty()));
        }
        let mut product = Self {
            id: id.into(),
            name: input.name,
            price: input.price,
            moq: input.moq,
            category: input.category,
            images,
            sizes_available: input.sizes_available,
        };
        product.clamp_slots();
        product
    }

    /// First image, or empty when there is none.
    pub fn image(&self) -> &str { self.images.first().map(String::as_str).unwrap_or_default() }

    /// Shallow merge of `patch` onto this product.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(v) = patch.name { self.name = v; }
        if let Some(v) = patch.price { self.price = v; }
        if let Some(v) = patch.moq { self.moq = v; }
        if let Some(v) = patch.category { self.category = v; }
        if let Some(v) = patch.sizes_available { self.sizes_available = v; }
        match (patch.images, patch.image) {
            (Some(images), _) => self.images = images,
            (None, Some(image)) => self.set_primary_image(image),
            (None, None) => {}
        }
        self.clamp_slots();
    }

    fn set_primary_image(&mut self, image: String) {
        let image = image.trim().to_string();
        match (image.is_empty(), self.images.is_empty()) {
            (true, true) => {}
            (true, false) => { self.images.remove(0); }
            (false, true) => self.images.push(image),
            (false, false) => self.images[0] = image,
        }
    }

    fn clamp_slots(&mut self) {
        if self.images.len() > MAX_SLOTS || self.sizes_available.len() > MAX_SLOTS {
            tracing::warn!(
                product_id = %self.id,
                images = self.images.len(),
                sizes = self.sizes_available.len(),
                "Product exceeds {MAX_SLOTS} slots, extra values dropped"
            );
        }
        self.images.truncate(MAX_SLOTS);
        self.sizes_available.truncate(MAX_SLOTS);
    }

    /// Flattens the product into sheet cells in [`PRODUCT_HEADER`] order.
    pub fn to_row(&self) -> Vec<String> {
        PRODUCT_HEADER
            .iter()
            .map(|column| match *column {
                "id" => self.id.clone(),
                "name" => self.name.clone(),
                "price" => self.price.clone(),
                "moq" => self.moq.clone(),
                "category" => self.category.clone(),
                slot => slot_value(slot, "image", &self.images)
                    .or_else(|| slot_value(slot, "size", &self.sizes_available))
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Rebuilds a product from a header-keyed row.
    ///
    /// Numbered `image1..5`/`size1..5` columns take precedence. When none of
    /// them is filled, the legacy single-column `image`/`images` and
    /// `sizesAvailable` cells are read instead.
    pub fn from_row(record: &SheetRecord) -> Self {
        let mut images = numbered(record, "image");
        if images.is_empty() {
            images.extend(record.get("image").map(|i| i.trim().to_string()));
            images.extend(record.get("images").map(split_list).unwrap_or_default());
        }

        let mut sizes_available = numbered(record, "size");
        if sizes_available.is_empty() {
            sizes_available = record.get("sizesAvailable").map(split_list).unwrap_or_default();
        }

        Self {
            id: record.text("id"),
            name: record.text("name"),
            price: record.text("price"),
            moq: record.text("moq"),
            category: record.text("category"),
            images,
            sizes_available,
        }
    }

    pub fn matches(&self, category: Option<&str>, search: Option<&str>) -> bool {
        let category_ok = category.map_or(true, |c| self.category.trim().eq_ignore_ascii_case(c.trim()));
        let search_ok = search.map(|s| s.trim().to_lowercase()).map_or(true, |needle| {
            self.name.to_lowercase().contains(&needle) || self.category.to_lowercase().contains(&needle)
        });
        category_ok && search_ok
    }
}

fn slot_value(column: &str, prefix: &str, values: &[String]) -> Option<String> {
    let n: usize = column.strip_prefix(prefix)?.parse().ok()?;
    Some(values.get(n.checked_sub(1)?).cloned().unwrap_or_default())
}

fn numbered(record: &SheetRecord, prefix: &str) -> Vec<String> {
    (1..=MAX_SLOTS).filter_map(|i| record.get(&format!("{prefix}{i}")).map(str::to_string)).collect()
}

/// Returns `true` when `header` is exactly the product column layout.
pub fn header_matches(header: &[String]) -> bool {
    header.len() == PRODUCT_HEADER.len() && header.iter().zip(PRODUCT_HEADER).all(|(a, b)| a == b)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductJson<'a> {
    id: &'a str,
    name: &'a str,
    price: &'a str,
    moq: &'a str,
    category: &'a str,
    images: &'a [String],
    sizes_available: &'a [String],
    image: &'a str,
}

impl Serialize for Product {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ProductJson {
            id: &self.id,
            name: &self.name,
            price: &self.price,
            moq: &self.moq,
            category: &self.category,
            images: &self.images,
            sizes_available: &self.sizes_available,
            image: self.image(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> { PRODUCT_HEADER.iter().map(|h| h.to_string()).collect() }

    fn record_of(row: &[String]) -> SheetRecord { SheetRecord::from_row(&header(), row) }

    fn sample() -> Product {
        Product {
            id: "1700000000000".into(),
            name: "Crew Neck Tee".into(),
            price: "180".into(),
            moq: "50".into(),
            category: "Mens".into(),
            images: vec!["https://img/a.jpg".into(), "https://img/b.jpg".into()],
            sizes_available: vec!["S".into(), "M".into(), "L".into()],
        }
    }

    #[test]
    fn test_round_trip() {
        let p = sample();
        let row = p.to_row();
        assert_eq!(row.len(), PRODUCT_HEADER.len());
        assert_eq!(Product::from_row(&record_of(&row)), p);
    }

    #[test]
    fn test_row_layout() {
        let row = sample().to_row();
        assert_eq!(&row[..5], &["1700000000000", "Crew Neck Tee", "180", "50", "Mens"]);
        assert_eq!(&row[5..10], &["S", "M", "L", "", ""]);
        assert_eq!(&row[10..], &["https://img/a.jpg", "https://img/b.jpg", "", "", ""]);
    }

    #[test]
    fn test_seven_images_keep_five_slots() {
        let mut p = sample();
        p.images = (1..=7).map(|i| format!("https://img/{i}.jpg")).collect();
        let row = p.to_row();
        assert_eq!(row.len(), 15);
        let stored: Vec<_> = row[10..].iter().filter(|c| !c.is_empty()).collect();
        assert_eq!(stored.len(), MAX_SLOTS);
        assert_eq!(row[14], "https://img/5.jpg");
    }

    #[test]
    fn test_create_clamps_slots() {
        let input = ProductInput {
            name: "Polo".into(),
            images: (1..=7).map(|i| i.to_string()).collect(),
            sizes_available: (1..=6).map(|i| i.to_string()).collect(),
            ..Default::default()
        };
        let p = Product::create("42", input);
        assert_eq!(p.images.len(), MAX_SLOTS);
        assert_eq!(p.sizes_available.len(), MAX_SLOTS);
    }

    #[test]
    fn test_create_uses_single_image() {
        let input = ProductInput { name: "Polo".into(), image: Some("https://img/x.jpg".into()), ..Default::default() };
        assert_eq!(Product::create("1", input).images, vec!["https://img/x.jpg"]);
    }

    #[test]
    fn test_legacy_images_column() {
        let record = SheetRecord::from_pairs([("id", "9"), ("images", " https://a.jpg ,https://b.jpg,, ")]);
        let p = Product::from_row(&record);
        assert_eq!(p.images, split_list(" https://a.jpg ,https://b.jpg,, "));
        assert_eq!(p.image(), "https://a.jpg");
    }

    #[test]
    fn test_legacy_single_image_then_list() {
        let record = SheetRecord::from_pairs([("image", "https://main.jpg"), ("images", "https://b.jpg")]);
        assert_eq!(Product::from_row(&record).images, vec!["https://main.jpg", "https://b.jpg"]);
    }

    #[test]
    fn test_numbered_columns_win_over_legacy() {
        let record = SheetRecord::from_pairs([
            ("image2", "https://two.jpg"),
            ("images", "https://legacy.jpg"),
            ("size1", "XL"),
            ("sizesAvailable", "S,M"),
        ]);
        let p = Product::from_row(&record);
        assert_eq!(p.images, vec!["https://two.jpg"]);
        assert_eq!(p.sizes_available, vec!["XL"]);
    }

    #[test]
    fn test_legacy_sizes_column() {
        let record = SheetRecord::from_pairs([("sizesAvailable", "S, M ,L")]);
        assert_eq!(Product::from_row(&record).sizes_available, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_gaps_are_skipped() {
        let mut row = vec![String::new(); 15];
        row[0] = "1".into();
        row[7] = "M".into();
        row[13] = "https://four.jpg".into();
        let p = Product::from_row(&record_of(&row));
        assert_eq!(p.sizes_available, vec!["M"]);
        assert_eq!(p.images, vec!["https://four.jpg"]);
    }

    #[test]
    fn test_partial_patch_preserves_fields() {
        let mut p = sample();
        p.apply(ProductPatch { price: Some("200".into()), ..Default::default() });
        assert_eq!(p.price, "200");
        assert_eq!(p.name, "Crew Neck Tee");
        assert_eq!(p.images.len(), 2);
        assert_eq!(p.sizes_available, vec!["S", "M", "L"]);
    }

    #[test]
    fn test_patch_images_drive_primary_image() {
        let mut p = sample();
        p.apply(ProductPatch { images: Some(vec!["https://new.jpg".into()]), image: Some("ignored".into()), ..Default::default() });
        assert_eq!(p.image(), "https://new.jpg");
        assert_eq!(p.images.len(), 1);
    }

    #[test]
    fn test_patch_single_image_replaces_first() {
        let mut p = sample();
        p.apply(ProductPatch { image: Some("https://hero.jpg".into()), ..Default::default() });
        assert_eq!(p.images, vec!["https://hero.jpg", "https://img/b.jpg"]);
    }

    #[test]
    fn test_patch_deserializes_lenient_body() {
        let patch: ProductPatch = serde_json::from_value(serde_json::json!({"price": 99, "sizesAvailable": "S,M"})).unwrap();
        assert_eq!(patch.price.as_deref(), Some("99"));
        assert_eq!(patch.sizes_available, Some(vec!["S".to_string(), "M".to_string()]));
        assert!(patch.name.is_none());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["image"], "https://img/a.jpg");
        assert_eq!(json["sizesAvailable"][2], "L");
        assert!(json.get("size1").is_none());
    }

    #[test]
    fn test_filters() {
        let p = sample();
        assert!(p.matches(Some("mens"), None));
        assert!(!p.matches(Some("Kids"), None));
        assert!(p.matches(None, Some("neck")));
        assert!(!p.matches(Some("Mens"), Some("hoodie")));
    }

    #[test]
    fn test_header_matches() {
        assert!(header_matches(&header()));
        let mut drifted = header();
        drifted.swap(1, 2);
        assert!(!header_matches(&drifted));
    }
}

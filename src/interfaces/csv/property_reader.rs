use crate::domain::property::PropertySummary;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

/// Separator between image URLs inside the `images` column.
const IMAGE_SEPARATOR: char = '|';

#[derive(Debug, Deserialize)]
struct PropertyRow {
    id: String,
    title: String,
    price: Decimal,
    address: String,
    city: String,
    images: Option<String>,
}

impl From<PropertyRow> for PropertySummary {
    fn from(row: PropertyRow) -> Self {
        let images = row
            .images
            .as_deref()
            .unwrap_or_default()
            .split(IMAGE_SEPARATOR)
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            id: row.id,
            title: row.title,
            price: row.price,
            address: row.address,
            city: row.city,
            images,
        }
    }
}

/// Reads property summaries from a CSV export of the listings table.
///
/// Expected header: `id,title,price,address,city,images`, with image URLs
/// separated by `|`.
pub struct PropertyReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PropertyReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes rows so large exports are streamed.
    pub fn properties(self) -> impl Iterator<Item = Result<PropertySummary>> {
        self.reader
            .into_deserialize::<PropertyRow>()
            .map(|result| result.map(PropertySummary::from).map_err(PaymentError::from))
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const ORDER_ID_FIELD: &str = "order_id";
pub const CUSTOMER_TYPE_FIELD: &str = "customer_type";

/// One data row of the orders sheet, keyed by the header row.
///
/// Field order follows the header columns. A row shorter than the header simply
/// lacks the trailing fields, so callers must go through [`Order::get`] or
/// [`Order::has_field`] instead of assuming every header column is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order {
    fields: IndexMap<String, String>,
}

impl Order {
    /// Zips `headers` against `row` by position. Cells past the header width are
    /// dropped and missing cells produce no field. A repeated header keeps the
    /// value of its last column.
    pub fn from_row<H, C>(headers: &[H], row: &[C]) -> Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| (header.as_ref().to_owned(), cell.as_ref().to_owned()))
            .collect();

        Order { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn order_id(&self) -> Option<&str> {
        self.get(ORDER_ID_FIELD)
    }

    pub fn customer_type(&self) -> Option<&str> {
        self.get(CUSTOMER_TYPE_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Turns raw sheet rows into orders. Row 0 is the header; with fewer than two rows
/// there is no data and the result is empty.
pub fn orders_from_rows<C: AsRef<str>>(rows: &[Vec<C>]) -> Vec<Order> {
    let Some((headers, records)) = rows.split_first() else {
        return Vec::new();
    };

    records
        .iter()
        .map(|record| Order::from_row(headers, record))
        .collect()
}

use crate::models::errors::LineError;
use crate::models::LineItem;

const OPEN_BRACE: char = '{';
const CLOSE_BRACE: char = '}';
const ENTRY_SEPARATOR: char = '|';
const QUANTITY_SEPARATOR: char = ':';

/// Decodes an encoded item list such as `{SKU-7:3|"SKU-2":1}`.
///
/// Product ids are trimmed and one pair of surrounding double quotes is removed, so
/// `"SKU-2"` and `SKU-2` name the same product. `{}` decodes to an empty list.
///
/// # Errors
/// Returns `LineError` if the outer braces are missing, an entry has no `:` or no
/// product id, or a quantity is not an integer.
pub fn parse_items(encoded: &str) -> Result<Vec<LineItem>, LineError> {
    let inner = encoded.trim()
        .strip_prefix(OPEN_BRACE)
        .and_then(|rest| rest.strip_suffix(CLOSE_BRACE))
        .ok_or_else(|| LineError::MissingItemBraces { value: encoded.to_string() })?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner.split(ENTRY_SEPARATOR).map(parse_entry).collect()
}

fn parse_entry(entry: &str) -> Result<LineItem, LineError> {
    let (product, quantity) = entry.rsplit_once(QUANTITY_SEPARATOR)
        .ok_or_else(|| LineError::InvalidItemEntry { entry: entry.to_string() })?;

    let product = product.trim();
    let product = product.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(product);

    if product.is_empty() {
        return Err(LineError::InvalidItemEntry { entry: entry.to_string() });
    }

    let quantity = quantity.trim().parse().map_err(|source| LineError::InvalidQuantity {
        entry: entry.to_string(),
        source
    })?;

    Ok(LineItem {
        product_id: product.to_string(),
        quantity
    })
}

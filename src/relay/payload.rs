//! Shipping-fee patch for transaction payloads.
//!
//! The payload is an untyped JSON document: every field the rule reads is
//! optional and every lookup falls back to a default instead of failing.
//! Anything the rule does not touch is forwarded as received.

use serde_json::{Map, Value};

/// Courier recognised from the first item's `externalRef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Courier {
    /// `correios` or `sedex`.
    Correios,
    /// `jadlog`.
    Jadlog,
}

impl Courier {
    /// Map a lowercased product code to a courier.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "correios" | "sedex" => Some(Self::Correios),
            "jadlog" => Some(Self::Jadlog),
            _ => None,
        }
    }

    /// Shipping fee in minor currency units.
    pub fn fee(self) -> i64 {
        match self {
            Self::Correios => 3799,
            Self::Jadlog => 3499,
        }
    }

    /// Line-item title shown for the shipping charge.
    pub fn title(self) -> &'static str {
        match self {
            Self::Correios => "Frete Correios",
            Self::Jadlog => "Frete Jadlog",
        }
    }
}

/// Integer value of `amount`, or 0 when absent or not numeric.
pub fn extract_amount(payload: &Value) -> i64 {
    payload.get("amount").map_or(0, amount_from_value)
}

fn amount_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i
            } else if n.as_u64().is_some() {
                i64::MAX
            } else {
                // `as` saturates and truncates toward zero
                n.as_f64().filter(|f| f.is_finite()).map_or(0, |f| f as i64)
            }
        }
        Value::Bool(b) => i64::from(*b),
        Value::String(s) => amount_from_str(s.trim()),
        _ => 0,
    }
}

/// Decimal integer string; digit runs beyond `i64` saturate like JSON numbers.
fn amount_from_str(s: &str) -> i64 {
    if let Ok(i) = s.parse() {
        return i;
    }
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        0
    } else if negative {
        i64::MIN
    } else {
        i64::MAX
    }
}

fn first_item(payload: &Value) -> Option<&Map<String, Value>> {
    payload.get("items")?.as_array()?.first()?.as_object()
}

fn first_item_mut(payload: &mut Value) -> Option<&mut Map<String, Value>> {
    payload.get_mut("items")?.as_array_mut()?.first_mut()?.as_object_mut()
}

/// Lowercased `externalRef` of the first line item, if there is one.
pub fn product_code(payload: &Value) -> Option<String> {
    first_item(payload)?
        .get("externalRef")?
        .as_str()
        .map(str::to_lowercase)
}

/// Fill in the shipping fee when the caller sent no positive amount.
///
/// Returns the courier whose fee was applied, or `None` when the payload was
/// left untouched.
pub fn apply_shipping_fee(payload: &mut Value) -> Option<Courier> {
    if extract_amount(payload) > 0 {
        return None;
    }

    let courier = Courier::from_code(&product_code(payload)?)?;
    let fee = courier.fee();

    payload.as_object_mut()?.insert("amount".into(), Value::from(fee));
    if let Some(item) = first_item_mut(payload) {
        item.insert("unitPrice".into(), Value::from(fee));
        item.insert("title".into(), Value::from(courier.title()));
    }

    Some(courier)
}

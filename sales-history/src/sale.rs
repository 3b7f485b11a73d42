use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::prelude::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SalesError;

pub const NUM_DECIMAL_PLACES: u32 = 2;
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const CSV_HEADER: [&str; 6] = [
    "sale_id",
    "order_id",
    "time",
    "drink_id",
    "topping_id",
    "price",
];

/// A non-negative currency amount that always carries exactly [`NUM_DECIMAL_PLACES`] places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

/// The attributes drawn for a single order, before it is assigned its ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub timestamp: NaiveDateTime,
    pub drink_id: u8,
    pub topping_id: u8,
    pub price: Price,
}

/// One row of the sales history.
///
/// `sale_id` is unique across the whole history, `order_id` only within the day of `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub sale_id: u64,
    pub order_id: u32,
    #[serde(
        rename = "time",
        serialize_with = "serialize_time",
        deserialize_with = "deserialize_time"
    )]
    pub timestamp: NaiveDateTime,
    pub drink_id: u8,
    pub topping_id: u8,
    pub price: Price,
}

impl TryFrom<Decimal> for Price {
    type Error = SalesError;
    fn try_from(mut decimal: Decimal) -> Result<Self, Self::Error> {
        if decimal >= Decimal::ZERO {
            decimal.rescale(NUM_DECIMAL_PLACES);
            Ok(Price(decimal))
        } else {
            Err(SalesError::InvalidPrice)
        }
    }
}

impl TryFrom<f64> for Price {
    type Error = SalesError;
    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::try_from(Decimal::from_f64(amount).ok_or(SalesError::InvalidPrice)?)
    }
}

impl FromStr for Price {
    type Err = SalesError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::try_from(Decimal::from_str(s).map_err(|_| SalesError::InvalidPrice)?)
    }
}

impl Price {
    #[must_use]
    pub fn amount(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid price `{raw}`")))
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_time<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIME_FORMAT))
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT).map_err(de::Error::custom)
}

impl SaleRecord {
    #[must_use]
    pub fn new(sale_id: u64, order_id: u32, order: Order) -> Self {
        SaleRecord {
            sale_id,
            order_id,
            timestamp: order.timestamp,
            drink_id: order.drink_id,
            topping_id: order.topping_id,
            price: order.price,
        }
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

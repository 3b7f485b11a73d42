use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use rust_decimal::Decimal;

use crate::calendar::SeasonalWindow;
use crate::error::SalesError;
use crate::sale::Price;

pub const DEFAULT_SPAN_DAYS: i64 = 365;
/// 750,000.00 expressed in cents
pub const DEFAULT_TARGET_REVENUE_CENTS: i64 = 75_000_000;
pub const SECONDS_PER_DAY: u32 = 86_400;

/// An inclusive `[min, max]` band that values are drawn uniformly from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band<T> {
    pub min: T,
    pub max: T,
}

impl<T> Band<T> {
    #[must_use]
    pub const fn new(min: T, max: T) -> Self {
        Band { min, max }
    }
}

impl<T: PartialOrd> Band<T> {
    /// # Errors
    /// Errors when `min` is greater than `max` (or the two are not comparable)
    pub fn validate(&self, name: &'static str) -> Result<(), SalesError> {
        if self.min <= self.max {
            Ok(())
        } else {
            Err(SalesError::InvalidBand(name))
        }
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        &self.min <= value && value <= &self.max
    }
}

impl<T: SampleUniform + PartialOrd + Copy> Band<T> {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }
}

/// Every tunable of the generator. `Default` gives the one-year beverage shop history.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Number of days before the end date at which the history starts
    pub span_days: i64,
    /// Revenue floor the top-up pass raises the history to
    pub target_revenue: Decimal,
    pub orders_per_day: Band<u32>,
    pub peak_orders: Band<u32>,
    /// Unit price before rounding to cents
    pub price: Band<f64>,
    pub drink_ids: Band<u8>,
    /// `0` means no topping
    pub topping_ids: Band<u8>,
    /// Opening and closing time in seconds from midnight
    pub store_hours: Band<u32>,
    pub back_to_school: SeasonalWindow,
    pub new_year: SeasonalWindow,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            span_days: DEFAULT_SPAN_DAYS,
            target_revenue: Decimal::new(DEFAULT_TARGET_REVENUE_CENTS, 2),
            orders_per_day: Band::new(100, 300),
            peak_orders: Band::new(3000, 6000),
            price: Band::new(8.0, 12.0),
            drink_ids: Band::new(1, 16),
            topping_ids: Band::new(0, 4),
            store_hours: Band::new(8 * 3600, 21 * 3600 + 30 * 60),
            back_to_school: SeasonalWindow::new((8, 15), (9, 10)),
            new_year: SeasonalWindow::new((1, 10), (1, 25)),
        }
    }
}

impl GeneratorConfig {
    /// Windows in the order the peak day is looked for
    #[must_use]
    pub fn peak_windows(&self) -> [SeasonalWindow; 2] {
        [self.back_to_school, self.new_year]
    }

    /// # Errors
    /// Errors when any band is inverted, when the span is negative, when the store hours
    /// fall outside a day, or when the minimum price rounds to zero cents. A positive
    /// rounded minimum price is what bounds the top-up loop.
    pub fn validate(&self) -> Result<(), SalesError> {
        if self.span_days < 0 {
            return Err(SalesError::InvalidDateRange);
        }
        self.orders_per_day.validate("orders_per_day")?;
        self.peak_orders.validate("peak_orders")?;
        self.drink_ids.validate("drink_ids")?;
        self.topping_ids.validate("topping_ids")?;
        self.price.validate("price")?;
        if !self.price.max.is_finite()
            || Price::try_from(self.price.min)?.amount() <= Decimal::ZERO
            || self.target_revenue < Decimal::ZERO
        {
            return Err(SalesError::InvalidPrice);
        }
        if self.store_hours.min > self.store_hours.max
            || self.store_hours.max >= SECONDS_PER_DAY
        {
            return Err(SalesError::InvalidStoreHours);
        }
        Ok(())
    }
}

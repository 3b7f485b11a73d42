use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, info};
use rand::Rng;
use rust_decimal::Decimal;

use crate::calendar::{pick_peak_day, random_time_on, DateRange};
use crate::config::GeneratorConfig;
use crate::error::SalesError;
use crate::sale::{Order, Price, SaleRecord};

/// How many orders a day was planned to receive in the main pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub planned_orders: u32,
    pub is_peak: bool,
}

#[derive(Debug)]
pub struct SalesHistory {
    pub(crate) range: DateRange,
    pub(crate) peak_day: NaiveDate,
    pub(crate) records: Vec<SaleRecord>,
    pub(crate) day_plans: Vec<DayPlan>,
    /// Map of `<date, last order_id issued on that date>`
    pub(crate) day_order_counter: HashMap<NaiveDate, u32>,
    pub(crate) revenue: Decimal,
    pub(crate) top_up_orders: usize,
}

#[derive(Debug, Clone)]
pub struct SalesGenerator {
    config: GeneratorConfig,
}

impl SalesHistory {
    #[must_use]
    pub fn new(range: DateRange, peak_day: NaiveDate) -> Self {
        SalesHistory {
            range,
            peak_day,
            records: Vec::new(),
            day_plans: Vec::with_capacity(usize::try_from(range.num_days()).unwrap_or_default()),
            day_order_counter: HashMap::new(),
            revenue: Decimal::ZERO,
            top_up_orders: 0,
        }
    }

    /// Appends `order` as the next sale of its day and returns the stored record.
    pub fn add_order(&mut self, order: Order) -> &SaleRecord {
        let counter = self
            .day_order_counter
            .entry(order.timestamp.date())
            .or_insert(0);
        *counter += 1;
        let order_id = *counter;
        let sale_id = self.records.len() as u64 + 1;
        self.revenue += order.price.amount();
        self.records.push(SaleRecord::new(sale_id, order_id, order));
        &self.records[self.records.len() - 1]
    }

    #[must_use]
    pub fn range(&self) -> &DateRange {
        &self.range
    }

    #[must_use]
    pub fn peak_day(&self) -> NaiveDate {
        self.peak_day
    }

    #[must_use]
    pub fn records(&self) -> &Vec<SaleRecord> {
        &self.records
    }

    #[must_use]
    pub fn into_records(self) -> Vec<SaleRecord> {
        self.records
    }

    #[must_use]
    pub fn day_plans(&self) -> &Vec<DayPlan> {
        &self.day_plans
    }

    #[must_use]
    pub fn revenue(&self) -> Decimal {
        self.revenue
    }

    /// Number of orders appended by the revenue top-up
    #[must_use]
    pub fn top_up_orders(&self) -> usize {
        self.top_up_orders
    }
}

impl SalesGenerator {
    /// # Errors
    /// Errors when `config` does not pass [`GeneratorConfig::validate`]
    pub fn new(config: GeneratorConfig) -> Result<Self, SalesError> {
        config.validate()?;
        Ok(SalesGenerator { config })
    }

    /// Builds the full history for the configured span ending on `end`: one pass over every
    /// day followed by the revenue top-up.
    ///
    /// # Errors
    /// Errors when the range cannot be computed from `end`
    pub fn generate<R: Rng>(
        &self,
        end: NaiveDate,
        rng: &mut R,
    ) -> Result<SalesHistory, SalesError> {
        let range = DateRange::ending_on(end, self.config.span_days)?;
        let peak_day = pick_peak_day(&range, &self.config.peak_windows(), rng);
        let peak_orders = self.config.peak_orders.sample(rng);
        info!("Peak day: {} with {} orders", peak_day, peak_orders);

        let mut history = SalesHistory::new(range, peak_day);
        for date in range.days() {
            let is_peak = date == peak_day;
            let planned_orders = if is_peak {
                peak_orders
            } else {
                self.config.orders_per_day.sample(rng)
            };
            debug!("{}: {} orders planned", date, planned_orders);
            history.day_plans.push(DayPlan {
                date,
                planned_orders,
                is_peak,
            });
            history.day_order_counter.insert(date, 0);
            for _ in 0..planned_orders {
                let order = self.draw_order(date, rng)?;
                history.add_order(order);
            }
        }

        self.top_up(&mut history, rng)?;
        Ok(history)
    }

    /// Appends orders on the last day of the history's range until its revenue reaches the
    /// target. Returns how many orders were added.
    ///
    /// # Errors
    /// Errors when an order cannot be drawn
    pub fn top_up<R: Rng>(
        &self,
        history: &mut SalesHistory,
        rng: &mut R,
    ) -> Result<usize, SalesError> {
        let date = history.range.end();
        let mut added = 0;
        while history.revenue < self.config.target_revenue {
            let order = self.draw_order(date, rng)?;
            history.add_order(order);
            added += 1;
        }
        history.top_up_orders += added;
        info!("Added {} top-up orders on {}", added, date);
        Ok(added)
    }

    /// # Errors
    /// Errors when the drawn time or price is out of range
    pub fn draw_order<R: Rng>(&self, date: NaiveDate, rng: &mut R) -> Result<Order, SalesError> {
        let timestamp = random_time_on(date, &self.config.store_hours, rng)?;
        let drink_id = self.config.drink_ids.sample(rng);
        let topping_id = self.config.topping_ids.sample(rng);
        let price = Price::try_from(self.config.price.sample(rng))?;
        Ok(Order {
            timestamp,
            drink_id,
            topping_id,
            price,
        })
    }
}

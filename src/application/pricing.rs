//! Precise pricing use cases over the reference-data ports.
//!
//! Each call resolves everything price-independent (product data, fee
//! schedule, exchange rates, shipping) into a [`RateBundle`] and hands it to
//! the pure pricing functions in [`crate::domain::pricing`].

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::pricing::{
    compute_profit, select_optimal_price, solve_min_selling_price, MinPriceSolution,
    PricingStrategy, RateBundle, SolveOutcome,
};
use crate::domain::{
    CalculatedProfitDetails, CompetitorPrice, CountryCode, Currency, DomesticPlatform, HsCode,
    Jpy, OverseasPlatform, Price, ProfitError, Rate, Sku,
};
use crate::port::{ExchangeRateSource, ReferenceData};

/// What is being priced and along which route.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingRequest {
    pub sku: Sku,
    pub domestic: DomesticPlatform,
    pub overseas: OverseasPlatform,
    pub destination: CountryCode,
    /// Overrides the product's registered purchase price.
    pub purchase_price_jpy: Option<Jpy>,
}

impl PricingRequest {
    pub fn new(
        sku: impl Into<Sku>,
        domestic: DomesticPlatform,
        overseas: OverseasPlatform,
        destination: CountryCode,
    ) -> Self {
        Self {
            sku: sku.into(),
            domestic,
            overseas,
            destination,
            purchase_price_jpy: None,
        }
    }

    #[must_use]
    pub fn with_purchase_price(mut self, price: Jpy) -> Self {
        self.purchase_price_jpy = Some(price);
        self
    }
}

/// Final listing decision with its supporting numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalPrice {
    pub optimal_price: Price,
    pub currency: Currency,
    pub strategy: PricingStrategy,
    pub lowest_competitor: Option<Price>,
    /// Margin floor in local currency.
    pub min_selling_price_local: Price,
    pub solve_outcome: SolveOutcome,
    /// Breakdown at `optimal_price`.
    pub profit_details: CalculatedProfitDetails,
}

/// Everything price-independent for one request.
struct Resolved {
    hs_code: HsCode,
    purchase_price_jpy: Jpy,
    rates: RateBundle,
}

pub struct PricingService<R, X> {
    data: Arc<R>,
    rates: X,
}

impl<R, X> PricingService<R, X>
where
    R: ReferenceData,
    X: ExchangeRateSource,
{
    /// `rates` answers exchange-rate lookups; typically a cached view of
    /// `data`.
    pub fn new(data: Arc<R>, rates: X) -> Self {
        Self { data, rates }
    }

    pub fn data(&self) -> &R {
        &self.data
    }

    pub fn rates(&self) -> &X {
        &self.rates
    }

    fn rate_to_jpy(&self, currency: &Currency) -> Result<Rate, ProfitError> {
        if currency.is_jpy() {
            return Ok(Decimal::ONE);
        }
        let jpy = Currency::jpy();
        self.rates
            .exchange_rate(currency, &jpy)
            .ok_or_else(|| ProfitError::rate_unavailable(currency, &jpy))
    }

    fn resolve(&self, request: &PricingRequest) -> Result<Resolved, ProfitError> {
        let product =
            self.data
                .product(&request.sku)
                .ok_or_else(|| ProfitError::ProductNotFound {
                    sku: request.sku.clone(),
                })?;
        let shippable = product.shippable()?;
        let purchase_price_jpy = product.purchase_price_or(request.purchase_price_jpy)?;

        let schedule = self.data.fee_schedule(request.overseas).ok_or_else(|| {
            ProfitError::PlatformNotConfigured {
                platform: request.overseas.name().to_string(),
            }
        })?;

        let rate_to_jpy = self.rate_to_jpy(&schedule.currency)?;
        let usd = Currency::usd();
        let usd_to_jpy = if schedule.currency == usd {
            rate_to_jpy
        } else {
            self.rate_to_jpy(&usd)?
        };

        let shipping_jpy = self
            .data
            .shipping_cost(shippable.weight_kg, &request.destination)
            .ok_or_else(|| ProfitError::NoShippingRateFound {
                weight_kg: shippable.weight_kg,
                country: request.destination.clone(),
            })?;

        let rates = RateBundle {
            currency: schedule.currency.clone(),
            rate_to_jpy,
            usd_to_jpy,
            shipping_jpy,
            fee_rate: schedule.fee_rate_for(product.category),
            fixed_fee_local: schedule.fixed_fee_local,
        };
        debug!(
            sku = %request.sku,
            overseas = %request.overseas,
            rate_to_jpy = %rates.rate_to_jpy,
            shipping_jpy = %rates.shipping_jpy,
            fee_rate = %rates.fee_rate,
            "Resolved pricing inputs"
        );

        Ok(Resolved {
            hs_code: shippable.hs_code.clone(),
            purchase_price_jpy,
            rates,
        })
    }

    fn duty_rate<'a>(
        &'a self,
        hs_code: &'a HsCode,
        destination: &'a CountryCode,
    ) -> impl Fn(Decimal) -> Rate + 'a {
        move |value_usd| self.data.customs_duty_rate(hs_code, destination, value_usd)
    }

    /// Profit breakdown when listing at `selling_price_local`.
    pub fn compute_profit(
        &self,
        request: &PricingRequest,
        selling_price_local: Price,
    ) -> Result<CalculatedProfitDetails, ProfitError> {
        if selling_price_local <= Decimal::ZERO {
            return Err(ProfitError::InvalidSellingPrice {
                price: selling_price_local,
            });
        }
        let resolved = self.resolve(request)?;
        compute_profit(
            &request.sku,
            &resolved.rates,
            selling_price_local,
            resolved.purchase_price_jpy,
            self.duty_rate(&resolved.hs_code, &request.destination),
        )
    }

    /// Lowest listing price meeting `min_margin`.
    pub fn solve_min_selling_price(
        &self,
        request: &PricingRequest,
        min_margin: Rate,
    ) -> Result<MinPriceSolution, ProfitError> {
        if min_margin < Decimal::ZERO {
            return Err(ProfitError::InvalidMargin { margin: min_margin });
        }
        let resolved = self.resolve(request)?;
        let solution = solve_min_selling_price(
            &request.sku,
            &resolved.rates,
            resolved.purchase_price_jpy,
            min_margin,
            self.duty_rate(&resolved.hs_code, &request.destination),
        )?;

        if solution.outcome.is_degenerate() {
            warn!(
                sku = %request.sku,
                overseas = %request.overseas,
                variable_rate = %solution.problem.variable_rate,
                min_margin = %min_margin,
                "No finite price meets the margin; using doubled fixed costs"
            );
        }
        info!(
            sku = %request.sku,
            overseas = %request.overseas,
            min_price = %solution.min_selling_price_local,
            currency = %resolved.rates.currency,
            outcome = solution.outcome.label(),
            "Solved minimum selling price"
        );
        Ok(solution)
    }

    /// Solve the margin floor, then price against known competitors plus
    /// `extra_competitors`.
    pub fn determine_optimal_selling_price(
        &self,
        request: &PricingRequest,
        min_margin: Rate,
        extra_competitors: &[CompetitorPrice],
    ) -> Result<OptimalPrice, ProfitError> {
        let solution = self.solve_min_selling_price(request, min_margin)?;
        let currency = solution.profit_details.overseas_currency.clone();

        let mut competitors = self.data.competitor_prices(&request.sku, request.overseas);
        competitors.extend_from_slice(extra_competitors);

        let decision =
            select_optimal_price(solution.min_selling_price_local, &currency, &competitors);
        let profit_details = if decision.price == solution.min_selling_price_local {
            solution.profit_details
        } else {
            self.compute_profit(request, decision.price)?
        };

        info!(
            sku = %request.sku,
            price = %decision.price,
            strategy = %decision.strategy,
            competitors = competitors.len(),
            "Selected listing price"
        );

        Ok(OptimalPrice {
            optimal_price: decision.price,
            currency,
            strategy: decision.strategy,
            lowest_competitor: decision.lowest_competitor,
            min_selling_price_local: solution.min_selling_price_local,
            solve_outcome: solution.outcome,
            profit_details,
        })
    }
}

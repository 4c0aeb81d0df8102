//! Subcommand implementations.

use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use storefront_core::format::format_price;
use storefront_core::{
    price_with_coupon, ContextResolver, CouponDiscount, DiscountType, LocaleHints, MatchTier, Money,
    PriceResolver, PricingContext, PricingSettings, PromotionType,
};
use tracing::debug;

use crate::error::CliError;
use crate::output::{row, Output};
use crate::snapshot::CatalogSnapshot;

/// Everything a command needs: settings, catalog and the resolved context.
pub struct Session {
    pub settings: PricingSettings,
    pub snapshot: CatalogSnapshot,
    pub context: PricingContext,
    pub output: Output,
}

impl Session {
    pub fn new(
        settings: PricingSettings,
        snapshot: CatalogSnapshot,
        manual_currency: Option<&str>,
        hints: &LocaleHints,
        output: Output,
    ) -> Self {
        let context = ContextResolver::from_settings(&settings).resolve(manual_currency, hints);
        Session {
            settings,
            snapshot,
            context,
            output,
        }
    }

    fn resolver(&self) -> PriceResolver<'_> {
        PriceResolver::from_settings(&self.snapshot.registry, &self.settings)
    }

    fn symbol(&self, currency: &str) -> String {
        self.resolver().symbol(currency, &self.context)
    }
}

fn tier_label(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::ManualCurrency => "manual currency override",
        MatchTier::ExactCountry => "country override",
        MatchTier::PartialCountry => "country override (partial name match)",
        MatchTier::Fallback => "base price",
    }
}

fn price_lines(
    price: Money,
    discount_price: Option<Money>,
    currency: &str,
    symbol: &str,
) -> Vec<String> {
    let mut lines = vec![row("Price", format_price(price, currency, symbol))];
    if let Some(discounted) = discount_price.filter(|d| d.is_positive()) {
        lines.push(row("Sale price", format_price(discounted, currency, symbol)));
    }
    lines.push(row("Currency", currency));
    lines
}

// =============================================================================
// context
// =============================================================================

pub fn context(session: &Session) -> Result<()> {
    let ctx = &session.context;
    session.output.emit(ctx, || {
        vec![
            row("Country", format!("{} ({})", ctx.detected_country.name, ctx.detected_country.code)),
            row("Currency", format!("{} {}", ctx.currency, session.symbol(&ctx.currency))),
            row(
                "Chosen by",
                if ctx.has_manual_currency() { "customer" } else { "location" },
            ),
        ]
    })
}

// =============================================================================
// product / size
// =============================================================================

pub fn product(session: &Session, id: &str) -> Result<()> {
    let product = session.snapshot.product(id)?;
    let resolved = session.resolver().resolve_product_price(product, &session.context);

    session.output.emit(&resolved, || {
        let mut lines = price_lines(
            resolved.price,
            resolved.discount_price,
            &resolved.currency,
            &resolved.symbol,
        );
        lines.push(row("Source", tier_label(resolved.source)));
        for size in &resolved.size_overrides {
            lines.push(row(
                &format!("Size {}", size.size),
                format_price(size.price, &resolved.currency, &resolved.symbol),
            ));
        }
        lines
    })
}

pub fn size(session: &Session, id: &str, size: &str) -> Result<()> {
    let product = session.snapshot.product(id)?;
    let resolved = session
        .resolver()
        .resolve_size_price(product, size, &session.context);

    session.output.emit(&resolved, || {
        let mut lines = price_lines(
            resolved.price,
            resolved.discount_price,
            &resolved.currency,
            &resolved.symbol,
        );
        lines.push(row("Source", format!("{:?}", resolved.source)));
        lines
    })
}

// =============================================================================
// bundle
// =============================================================================

pub fn bundle(session: &Session, code: &str) -> Result<()> {
    let promotion = session.snapshot.promotion(code)?;
    if promotion.as_bundle().is_none() {
        return Err(CliError::WrongPromotionKind {
            code: promotion.code.clone(),
            expected: PromotionType::Bundle,
            actual: promotion.promotion_type(),
        }
        .into());
    }

    let resolved = session
        .resolver()
        .resolve_bundle_price(promotion, &session.context);

    session.output.emit(&resolved, || match &resolved {
        Some(bundle) => vec![
            row(
                "Bundle",
                format!(
                    "{} for {}",
                    bundle.bundle_quantity,
                    format_price(bundle.bundle_price, &bundle.currency, &bundle.symbol)
                ),
            ),
            row("Currency", &bundle.currency),
            row("Source", tier_label(bundle.source)),
        ],
        None => vec![format!(
            "{} is not offered in {} ({})",
            promotion.code, session.context.detected_country.name, session.context.currency
        )],
    })
}

// =============================================================================
// coupon
// =============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CouponQuote<'a> {
    #[serde(flatten)]
    coupon: &'a CouponDiscount,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_before: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price_after: Option<Money>,
}

pub fn coupon(session: &Session, code: &str, price: Option<Decimal>) -> Result<()> {
    let promotion = session.snapshot.promotion(code)?;
    let terms = promotion
        .as_coupon()
        .ok_or_else(|| CliError::WrongPromotionKind {
            code: promotion.code.clone(),
            expected: PromotionType::Coupon,
            actual: promotion.promotion_type(),
        })?;

    let resolved = session
        .resolver()
        .resolve_coupon_discount(terms, &session.context);

    let price_before = price.map(Money::new);
    let price_after = price_before.map(|p| price_with_coupon(p, None, &resolved));
    debug!(code = %promotion.code, ?price_before, ?price_after, "coupon quoted");

    let quote = CouponQuote {
        coupon: &resolved,
        price_before,
        price_after,
    };

    session.output.emit(&quote, || {
        let discount = match resolved.discount_type {
            DiscountType::Percentage => format!("{}%", resolved.discount.normalize()),
            DiscountType::Fixed => format_price(
                Money::new(resolved.discount),
                &resolved.currency,
                &resolved.symbol,
            ),
        };
        let mut lines = vec![
            row("Discount", discount),
            row("Currency", &resolved.currency),
            row("Source", tier_label(resolved.source)),
        ];
        if let (Some(before), Some(after)) = (price_before, price_after) {
            lines.push(row("Before", format_price(before, &resolved.currency, &resolved.symbol)));
            lines.push(row("After", format_price(after, &resolved.currency, &resolved.symbol)));
        }
        lines
    })
}

// =============================================================================
// currencies
// =============================================================================

pub fn currencies(session: &Session) -> Result<()> {
    let entries = session.snapshot.registry.selectable_entries();
    session.output.emit(&entries, || {
        if entries.is_empty() {
            return vec!["No active currencies in snapshot".to_string()];
        }
        entries
            .iter()
            .map(|e| {
                let marker = if e.is_for_country(&session.context.detected_country) {
                    "*"
                } else {
                    " "
                };
                format!(
                    "{marker} {:<4} {:<4} {:<6} {}",
                    e.currency, e.currency_symbol, e.country_code, e.country
                )
            })
            .collect()
    })
}

//! Engine configuration: the thresholds the analyzers apply.
//!
//! Defaults match the shipped rules (30-day window, 7-day stockout horizon,
//! P50/P80/P20/P60 significance bars, 40% discount-rate cutoff). A TOML file
//! can override any field; unknown keys are rejected so typos surface at
//! load time rather than as silently-default thresholds.
//!
//! Entrypoints:
//! - Parse + validate from a TOML string: [`load_config_str`]
//! - Parse + validate from a file path: [`load_config_path`]

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

/// Analyzer thresholds and window sizes for one engine instance.
///
/// Constructed via [`EngineConfig::default`] or the loaders; validated so a
/// nonsensical file (zero window, percentile out of range) fails fast.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct EngineConfig {
    /// Order window the analyzers look at, in days.
    pub window_days: i64,
    /// Recent sub-window for trend comparison, in days.
    pub recent_window_days: i64,
    /// Days-of-inventory below which a fast mover is flagged.
    pub stockout_horizon_days: f64,
    /// Percentile bar a product's sales must clear to count as a "winner".
    pub sales_significance_pct: f64,
    /// Inventory percentile above which stock counts as excessive.
    pub overstock_inventory_pct: f64,
    /// Sales percentile at or below which a product counts as a slow mover.
    pub slow_mover_sales_pct: f64,
    /// Revenue percentile a product must exceed before coupon overuse is flagged.
    pub cannibalization_revenue_pct: f64,
    /// Fraction of a product's orders that must be discounted to flag it.
    pub discount_rate_threshold: f64,
    /// Minimum |AOV change| in percent worth reporting.
    pub aov_change_threshold_pct: f64,
    /// Minimum orders in the recent window before the AOV trend is trusted.
    pub min_recent_orders: usize,
    /// Inventory level at or below which a tracked product is "low stock".
    pub low_stock_threshold: i64,
    /// Minimum revenue share (percent) for the concentration-risk insight.
    pub revenue_share_threshold_pct: f64,
    /// Optional TTL in days stamped on newly created insights; `None` means
    /// insights stay active until dismissed.
    pub expires_after_days: Option<i64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            recent_window_days: 7,
            stockout_horizon_days: 7.0,
            sales_significance_pct: 50.0,
            overstock_inventory_pct: 80.0,
            slow_mover_sales_pct: 20.0,
            cannibalization_revenue_pct: 60.0,
            discount_rate_threshold: 0.4,
            aov_change_threshold_pct: 5.0,
            min_recent_orders: 3,
            low_stock_threshold: 5,
            revenue_share_threshold_pct: 20.0,
            expires_after_days: None,
        }
    }
}

impl EngineConfig {
    /// Check field ranges; called by the loaders.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.window_days <= 0 {
            bail!("window_days must be positive, got {}", self.window_days);
        }
        if self.recent_window_days <= 0 || self.recent_window_days > self.window_days {
            bail!(
                "recent_window_days must be in 1..=window_days, got {}",
                self.recent_window_days
            );
        }
        for (name, pct) in [
            ("sales_significance_pct", self.sales_significance_pct),
            ("overstock_inventory_pct", self.overstock_inventory_pct),
            ("slow_mover_sales_pct", self.slow_mover_sales_pct),
            ("cannibalization_revenue_pct", self.cannibalization_revenue_pct),
        ] {
            if !(0.0..=100.0).contains(&pct) {
                bail!("{name} must be in 0..=100, got {pct}");
            }
        }
        if !(0.0..=1.0).contains(&self.discount_rate_threshold) {
            bail!(
                "discount_rate_threshold must be in 0..=1, got {}",
                self.discount_rate_threshold
            );
        }
        if self.stockout_horizon_days <= 0.0 {
            bail!(
                "stockout_horizon_days must be positive, got {}",
                self.stockout_horizon_days
            );
        }
        if self.low_stock_threshold < 0 {
            bail!(
                "low_stock_threshold must not be negative, got {}",
                self.low_stock_threshold
            );
        }
        if let Some(days) = self.expires_after_days {
            if days <= 0 {
                bail!("expires_after_days must be positive when set, got {days}");
            }
        }
        Ok(())
    }
}

/// Parse + validate an [`EngineConfig`] from a TOML string.
pub fn load_config_str(s: &str) -> anyhow::Result<EngineConfig> {
    let cfg: EngineConfig = toml::from_str(s).context("parse engine config TOML")?;
    cfg.validate()?;
    Ok(cfg)
}

/// Parse + validate an [`EngineConfig`] from a TOML file.
pub fn load_config_path(path: &std::path::Path) -> anyhow::Result<EngineConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read engine config: {}", path.display()))?;
    load_config_str(&raw)
}

//! Cloud cost model for hosting the payment service.
//!
//! Line items: virtual machines, SQL storage, SQL operations, blob storage,
//! reserved egress and on-demand functions. Defaults size the deployment for
//! 50 000 transactions a month at roughly 1 KB each.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Functions free tier per month.
pub const FREE_EXECUTIONS: f64 = 1_000_000.0;
pub const FREE_GB_SECONDS: f64 = 400_000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CostEstimator {
    pub vm_count: f64,
    pub vm_monthly_rate: f64,
    pub sql_storage_gb: f64,
    pub sql_rate_per_gb: f64,
    pub sql_read_ops: f64,
    pub sql_write_ops: f64,
    pub sql_read_rate_per_10k: f64,
    pub sql_write_rate_per_10k: f64,
    pub blob_storage_gb: f64,
    pub blob_rate_per_gb: f64,
    pub egress_tb_reserved: f64,
    pub egress_100tb_rate: f64,
    pub function_exec_count: f64,
    pub function_gb_seconds: f64,
    pub function_exec_price_per_million: f64,
    pub function_gb_second_rate: f64,
}

impl Default for CostEstimator {
    fn default() -> Self {
        Self {
            vm_count: 8.0,
            vm_monthly_rate: 49.0560,
            sql_storage_gb: 8000.0 / 1024.0,
            sql_rate_per_gb: 0.25,
            sql_read_ops: 50_000.0,
            sql_write_ops: 50_000.0,
            sql_read_rate_per_10k: 0.019,
            sql_write_rate_per_10k: 0.0228,
            blob_storage_gb: 100.0,
            blob_rate_per_gb: 0.15,
            egress_tb_reserved: 1.0,
            egress_100tb_rate: 1545.0,
            function_exec_count: 8000.0,
            function_gb_seconds: 8000.0 * 0.5,
            function_exec_price_per_million: 0.40,
            function_gb_second_rate: 0.000026,
        }
    }
}

impl CostEstimator {
    pub fn vm_cost(&self) -> f64 {
        self.vm_count * self.vm_monthly_rate
    }

    pub fn sql_storage_cost(&self) -> f64 {
        self.sql_storage_gb * self.sql_rate_per_gb
    }

    pub fn sql_ops_cost(&self) -> f64 {
        let reads = self.sql_read_ops / 10_000.0 * self.sql_read_rate_per_10k;
        let writes = self.sql_write_ops / 10_000.0 * self.sql_write_rate_per_10k;
        reads + writes
    }

    pub fn blob_storage_cost(&self) -> f64 {
        self.blob_storage_gb * self.blob_rate_per_gb
    }

    pub fn egress_cost(&self) -> f64 {
        self.egress_tb_reserved / 100.0 * self.egress_100tb_rate
    }

    /// Only usage above the free tier is billed.
    pub fn function_cost(&self) -> f64 {
        let billable_execs = (self.function_exec_count - FREE_EXECUTIONS).max(0.0);
        let billable_gb_s = (self.function_gb_seconds - FREE_GB_SECONDS).max(0.0);
        billable_execs / 1_000_000.0 * self.function_exec_price_per_million
            + billable_gb_s * self.function_gb_second_rate
    }

    pub fn total_monthly(&self) -> f64 {
        self.vm_cost()
            + self.sql_storage_cost()
            + self.sql_ops_cost()
            + self.blob_storage_cost()
            + self.egress_cost()
            + self.function_cost()
    }

    pub fn projected(&self, years: u32) -> f64 {
        self.total_monthly() * 12.0 * f64::from(years)
    }

    pub fn breakdown(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("VMs", self.vm_cost()),
            ("SQL Storage", self.sql_storage_cost()),
            ("SQL Operations", self.sql_ops_cost()),
            ("Blob Storage", self.blob_storage_cost()),
            ("Network Egress (Reserved)", self.egress_cost()),
            ("Azure Functions (On-Demand)", self.function_cost()),
            ("Total Monthly", self.total_monthly()),
            ("2-Year Total", self.projected(2)),
            ("5-Year Total", self.projected(5)),
        ]
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read estimate file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse estimate file: {}", path.display()))
    }
}

/// `$1,234.56`
pub fn format_dollars(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    let whole = (cents / 100).to_string();
    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// One line per item, labels padded to a fixed column.
pub fn render(estimator: &CostEstimator) -> String {
    estimator
        .breakdown()
        .into_iter()
        .map(|(label, cost)| format!("{label:<35}: {}", format_dollars(cost)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn default_line_items() {
        let e = CostEstimator::default();
        assert!(close(e.vm_cost(), 392.448));
        assert!(close(e.sql_storage_cost(), 1.953125));
        assert!(close(e.sql_ops_cost(), 0.209));
        assert!(close(e.blob_storage_cost(), 15.0));
        assert!(close(e.egress_cost(), 15.45));
        assert_eq!(e.function_cost(), 0.0);
    }

    #[test]
    fn default_totals() {
        let e = CostEstimator::default();
        assert!(close(e.total_monthly(), 425.060125));
        assert!(close(e.projected(2), 425.060125 * 24.0));
        assert_eq!(format_dollars(e.projected(2)), "$10,201.44");
    }

    #[test]
    fn functions_bill_only_above_free_tier() {
        let e = CostEstimator {
            function_exec_count: 3_000_000.0,
            function_gb_seconds: 500_000.0,
            ..CostEstimator::default()
        };
        assert!(close(e.function_cost(), 2.0 * 0.40 + 100_000.0 * 0.000026));
    }

    #[test]
    fn toml_overrides_single_rate() {
        let e: CostEstimator = toml::from_str("vm_count = 2.0").unwrap();
        assert!(close(e.vm_cost(), 98.112));
        assert_eq!(e.blob_rate_per_gb, 0.15);
    }

    #[test]
    fn dollars_are_grouped() {
        assert_eq!(format_dollars(0.0), "$0.00");
        assert_eq!(format_dollars(1234567.891), "$1,234,567.89");
        assert_eq!(format_dollars(999.999), "$1,000.00");
    }

    #[test]
    fn render_has_one_line_per_item() {
        let out = render(&CostEstimator::default());
        assert_eq!(out.lines().count(), 9);
        assert!(out.lines().next().unwrap().starts_with("VMs"));
        assert!(out.contains("Azure Functions (On-Demand)        : $0.00"));
    }
}

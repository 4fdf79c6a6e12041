//! Shared test fixtures.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Three products: one stocked out, one without the marker, one high-tech.
pub(crate) const REPORT: &str = "\
# Product Share Units Revised StockOut Pfmn Size Price MTBF Age Promo Aware Sales Access CSS Segment Round
Able 12.50% 1,234 6/2/2024 YES 5.3 14.7 $28.00 18000 2.1 $1,400 55% $1,500 60% 40 LOW 1

Acre 10.00% 987 5/25/2024 5.5 14.5 $20.00 17500 3.1 $1,000 50% $1,100 45% 35 LOW 1
Bold 8.00% 2,000 1/15/2025 9.1 10.9 $34.50 24000 0.8 $1,800 70% $2,000 65% 52 HIGH 2
";

pub(crate) fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,css_dataset=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

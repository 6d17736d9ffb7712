use async_trait::async_trait;

use crate::{data::earnings::EarningsData, error::FvResult};

pub mod fmp;

#[async_trait]
pub trait EarningsProvider: Send + Sync {
    async fn earnings(&self, symbol: &str) -> FvResult<EarningsData>;
}

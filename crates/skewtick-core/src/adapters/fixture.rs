use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::data_source::{BarsRequest, DataSource, SourceError};
use crate::{PriceSeries, ProviderId};

/// In-memory data source that replays a preset outcome.
///
/// The returned series is re-labelled with the requested symbol and interval
/// so a single fixture can stand in for any request.
#[derive(Debug)]
pub struct FixtureSource {
    outcome: Result<PriceSeries, SourceError>,
    requests: Mutex<Vec<BarsRequest>>,
}

impl FixtureSource {
    pub fn with_series(series: PriceSeries) -> Self {
        Self {
            outcome: Ok(series),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: SourceError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests seen so far, oldest first.
    pub fn requests(&self) -> Vec<BarsRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl DataSource for FixtureSource {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn bars<'a>(
        &'a self,
        req: BarsRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req.clone());
        }

        let outcome = self.outcome.clone().map(|mut series| {
            series.symbol = req.symbol;
            series.interval = req.interval;
            series
        });
        Box::pin(async move { outcome })
    }
}

//! Read-only inputs shared by every rule of one run.

use std::collections::BTreeMap;

use adex_model::{DataExchange, Indicator, MetadataPackage, Request, Snapshots};

use crate::options::ValidationOptions;
use crate::partition::{IndicatorPartition, categorize};
use crate::period::{PeriodType, Periodicity, classify_mixed};

/// A request together with the exchange it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct RequestRef<'a> {
    pub exchange: &'a DataExchange,
    pub request: &'a Request,
}

/// Period classification of every request, computed once per run.
#[derive(Debug, Clone, Default)]
pub struct PeriodAnalysis<'a> {
    /// Requests in exchange order with their combined period type.
    pub requests: Vec<(RequestRef<'a>, PeriodType)>,
    /// Indicator ids per single periodicity, deduplicated in first-seen order.
    pub buckets: BTreeMap<Periodicity, Vec<&'a str>>,
}

impl<'a> PeriodAnalysis<'a> {
    pub fn new(exchanges: &'a [DataExchange]) -> Self {
        let mut analysis = Self::default();
        for request in requests(exchanges) {
            let period_type = classify_mixed(&request.request.pe);
            if let PeriodType::Single(periodicity) = period_type {
                let bucket = analysis.buckets.entry(periodicity).or_default();
                for id in &request.request.dx {
                    if !bucket.contains(&id.as_str()) {
                        bucket.push(id.as_str());
                    }
                }
            }
            analysis.requests.push((request, period_type));
        }
        analysis
    }

    /// Indicator ids classified under the given periodicity.
    pub fn bucket(&self, periodicity: Periodicity) -> &[&'a str] {
        self.buckets
            .get(&periodicity)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Everything a rule may look at. Rules never mutate it.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub snapshots: &'a Snapshots,
    pub package: &'a MetadataPackage,
    pub partition: IndicatorPartition<'a>,
    pub periods: PeriodAnalysis<'a>,
    pub options: &'a ValidationOptions,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        snapshots: &'a Snapshots,
        package: &'a MetadataPackage,
        options: &'a ValidationOptions,
    ) -> Self {
        Self {
            snapshots,
            package,
            partition: categorize(snapshots.indicators()),
            periods: PeriodAnalysis::new(snapshots.exchanges()),
            options,
        }
    }

    pub fn exchanges(&self) -> &'a [DataExchange] {
        self.snapshots.exchanges()
    }

    pub fn indicators(&self) -> &'a [Indicator] {
        self.snapshots.indicators()
    }

    /// Every request of every exchange, in declaration order.
    pub fn requests(&self) -> impl Iterator<Item = RequestRef<'a>> + 'a {
        requests(self.exchanges())
    }

    /// Whether any request references the indicator.
    pub fn is_requested(&self, id: &str) -> bool {
        self.requests().any(|r| r.request.contains_indicator(id))
    }

    /// Names of the requests referencing the indicator.
    pub fn requests_with_indicator(&self, id: &str) -> Vec<&'a str> {
        self.requests()
            .filter(|r| r.request.contains_indicator(id))
            .map(|r| r.request.name.as_str())
            .collect()
    }

    /// Indicator name by id, looked up in the fetched indicators.
    pub fn indicator_name(&self, id: &str) -> Option<&'a str> {
        self.indicators()
            .iter()
            .find(|indicator| indicator.id == id)
            .map(|indicator| indicator.name.as_str())
    }
}

fn requests(exchanges: &[DataExchange]) -> impl Iterator<Item = RequestRef<'_>> {
    exchanges.iter().flat_map(|exchange| {
        exchange
            .requests()
            .iter()
            .map(move |request| RequestRef { exchange, request })
    })
}

use crate::core::extract::{extract_candidate, Candidate};
use crate::core::quality::is_problematic_url;
use crate::core::query::{build_event_query, build_impact_query};
use crate::domain::model::{Dataset, Event, EventImpact, ServiceLookup};
use crate::domain::ports::{ConfigProvider, Researcher, SourceValidator};
use crate::utils::monitor::SystemMonitor;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Fixed relevance terms appended to every event keyword set.
const EVENT_RELEVANCE_TERMS: [&str; 3] = ["AWS", "outage", "US-EAST-1"];

/// Fixed relevance terms appended to every impact keyword set.
const IMPACT_RELEVANCE_TERMS: [&str; 2] = ["AWS", "outage"];

/// Applies the enrichment pipeline (classify → query → research → extract →
/// validate → apply) across both record kinds: sequentially for events,
/// with bounded parallelism for impacts.
pub struct Enricher<R, V, C> {
    agent: Arc<R>,
    validator: Arc<V>,
    config: C,
    monitor: SystemMonitor,
}

impl<R, V, C> Enricher<R, V, C>
where
    R: Researcher + 'static,
    V: SourceValidator + 'static,
    C: ConfigProvider,
{
    pub fn new(agent: R, validator: V, config: C) -> Self {
        Self::new_with_monitoring(agent, validator, config, false)
    }

    pub fn new_with_monitoring(agent: R, validator: V, config: C, monitor_enabled: bool) -> Self {
        Self {
            agent: Arc::new(agent),
            validator: Arc::new(validator),
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Run one full enrichment pass over the dataset.
    ///
    /// Infallible: research failures, extraction misses and validation
    /// rejections all degrade to keeping the original reference value.
    /// Order and count of events and impacts are preserved exactly.
    pub async fn run(&self, mut dataset: Dataset) -> Dataset {
        self.log_problematic_counts(&dataset);

        tracing::info!("🔧 Enriching event sources...");
        self.enrich_events(&mut dataset.events).await;
        self.monitor.log_stats("Event enrichment");

        tracing::info!("🔧 Enriching event impact sources (parallel)...");
        let lookup = Arc::new(ServiceLookup::new(&dataset.services));
        self.enrich_impacts(&mut dataset.event_impacts, lookup).await;
        self.monitor.log_final_stats();

        dataset
    }

    /// 預檢統計：只記 log，不改資料、不打網路。
    fn log_problematic_counts(&self, dataset: &Dataset) {
        let problematic_sources = dataset
            .events
            .iter()
            .flat_map(|event| event.sources.iter())
            .filter(|source| is_problematic_url(source.url.as_deref()))
            .count();
        let problematic_impacts = dataset
            .event_impacts
            .iter()
            .filter(|impact| is_problematic_url(impact.source_url.as_deref()))
            .count();

        tracing::info!(
            "📊 Found {} events and {} event impacts",
            dataset.events.len(),
            dataset.event_impacts.len()
        );
        tracing::info!("   Problematic event sources: {}", problematic_sources);
        tracing::info!("   Problematic impact sources: {}", problematic_impacts);
    }

    /// Event enrichment is strictly sequential: events are few and share
    /// per-event context.
    async fn enrich_events(&self, events: &mut [Event]) {
        for event in events.iter_mut() {
            tracing::info!("🔍 Enriching event: {}", event.id);

            if !event
                .sources
                .iter()
                .any(|source| is_problematic_url(source.url.as_deref()))
            {
                continue;
            }

            // 同一事件的每個 source 用同一組 query 與 keywords
            let query = build_event_query(event);
            let keywords: Vec<String> = event
                .aws_services_affected
                .iter()
                .cloned()
                .chain(EVENT_RELEVANCE_TERMS.iter().map(|term| term.to_string()))
                .collect();

            for source in event.sources.iter_mut() {
                if !is_problematic_url(source.url.as_deref()) {
                    continue;
                }
                tracing::info!(
                    "   Problematic URL: {}",
                    source.url.as_deref().unwrap_or("null")
                );

                let Some(candidate) = research_candidate(self.agent.as_ref(), &query).await
                else {
                    continue;
                };

                tracing::info!("   Validating with keywords: {:?}", keywords);
                if self.validator.validate(&candidate, &keywords).await {
                    tracing::info!("   ✅ Validated and updated");
                    source.url = Some(candidate);
                } else {
                    tracing::warn!("   ⚠️  Validation failed, keeping original");
                }
            }
        }
    }

    /// Impact enrichment fans out into a bounded worker pool. Completions
    /// arrive in arbitrary order; results are written back by original
    /// index, so application order never matters.
    async fn enrich_impacts(&self, impacts: &mut [EventImpact], lookup: Arc<ServiceLookup>) {
        let total = impacts.len();
        tracing::info!("   Processing {} impacts...", total);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency()));
        let mut workers = JoinSet::new();

        for (index, impact) in impacts.iter().enumerate() {
            let impact = impact.clone();
            let semaphore = Arc::clone(&semaphore);
            let agent = Arc::clone(&self.agent);
            let validator = Arc::clone(&self.validator);
            let lookup = Arc::clone(&lookup);

            workers.spawn(async move {
                // 併發上限：限制同時在外的 research+validation 呼叫數
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    // The semaphore is never closed; keep the original on
                    // the impossible branch rather than unwrapping.
                    Err(_) => return (index, impact),
                };
                (index, enrich_impact(agent, validator, lookup, impact).await)
            });
        }

        let mut completed = 0usize;
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, enriched)) => impacts[index] = enriched,
                // A panicked worker only loses its own enrichment; the
                // original value at that index stays in place.
                Err(e) => tracing::warn!("⚠️  Impact worker failed, keeping original: {}", e),
            }

            completed += 1;
            if completed % 10 == 0 {
                tracing::info!("   Progress: {}/{}", completed, total);
            }
        }
    }
}

/// One impact worker: a pure function of the impact plus the read-only
/// service lookup. Always returns an impact; every failure path returns it
/// unchanged.
async fn enrich_impact<R: Researcher, V: SourceValidator>(
    agent: Arc<R>,
    validator: Arc<V>,
    lookup: Arc<ServiceLookup>,
    mut impact: EventImpact,
) -> EventImpact {
    if !is_problematic_url(impact.source_url.as_deref()) {
        return impact;
    }

    let ctx = lookup.resolve(&impact.service_id, &impact.feature_id);
    tracing::info!(
        "   {}/{}: {}",
        ctx.service_name,
        ctx.feature_name,
        impact.source_url.as_deref().unwrap_or("null")
    );

    let query = build_impact_query(&impact, &ctx);
    let Some(candidate) = research_candidate(agent.as_ref(), &query).await else {
        return impact;
    };

    let keywords: Vec<String> = [impact.service_id.replace('-', " "), impact.impact_type.clone()]
        .into_iter()
        .chain(IMPACT_RELEVANCE_TERMS.iter().map(|term| term.to_string()))
        .collect();

    if validator.validate(&candidate, &keywords).await {
        tracing::info!("      ✅ Validated");
        impact.source_url = Some(candidate);
    } else {
        tracing::warn!(
            "      ⚠️  Validation failed (keywords: {:?}), keeping original",
            keywords
        );
    }

    impact
}

/// Run the research agent and pull a candidate URL out of its reply.
///
/// `None` covers every no-answer case: agent failure, an explicit `NONE`,
/// or a reply without a URL line. All are logged; none are errors.
async fn research_candidate<R: Researcher>(agent: &R, query: &str) -> Option<String> {
    let response = match agent.research(query).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("   ⚠️  No response from research agent");
            return None;
        }
    };

    tracing::info!(
        "   Agent returned: {}...",
        response.chars().take(200).collect::<String>()
    );

    match extract_candidate(&response) {
        Candidate::Url(url) => {
            tracing::info!("   Extracted URL: {}", url);
            Some(url)
        }
        Candidate::ExplicitNone => {
            tracing::info!("   Agent returned NONE");
            None
        }
        Candidate::Missing => {
            tracing::warn!("   ⚠️  No URL found in response");
            None
        }
    }
}

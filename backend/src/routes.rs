use std::sync::Arc;

use rocket::{State, FromForm, get, post, form::Form, http::CookieJar, serde::json::{self, Json}};
use shared::models::*;
use tracing::{debug, instrument};

use crate::{
    clock::Clock,
    config::AppConfig,
    error::RejectedVote,
    health::HealthProbe,
    stats::StatsAggregator,
    store::{VoteLedgerStore, VoteQueueStore},
    submission::VoteSubmission,
    voter::VoterToken,
};

pub struct AppState {
    pub submission: VoteSubmission,
    pub stats: StatsAggregator,
    pub health: HealthProbe,
    pub clock: Arc<dyn Clock>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        queue: Arc<dyn VoteQueueStore>,
        ledger: Arc<dyn VoteLedgerStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            submission: VoteSubmission::new(queue.clone(), config.store_timeout),
            stats: StatsAggregator::new(ledger.clone(), queue.clone(), config.store_timeout),
            health: HealthProbe::new(queue, ledger, config.probe_timeout),
            clock,
            config,
        }
    }
}

#[derive(Debug, FromForm)]
pub struct VoteForm {
    pub vote: Option<String>,
}

async fn record_vote(
    state: &AppState,
    voter: &VoterToken,
    cookies: &CookieJar<'_>,
    option: &str,
) -> Result<Json<SubmitResponse>, RejectedVote> {
    voter.persist(cookies);

    state
        .submission
        .submit(option, voter.as_str(), state.clock.now())
        .await
        .map(|record| Json(SubmitResponse::accepted(record.vote, voter.as_str())))
        .map_err(|e| e.for_voter(voter.as_str()))
}

#[instrument(skip(state, cookies, request))]
#[post("/vote", format = "json", data = "<request>")]
pub async fn submit_vote(
    state: &State<AppState>,
    voter: VoterToken,
    cookies: &CookieJar<'_>,
    request: Result<Json<VoteRequest>, json::Error<'_>>,
) -> Result<Json<SubmitResponse>, RejectedVote> {
    let option = match request {
        Ok(request) => request.option_text(),
        Err(e) => {
            debug!("Unreadable vote body: {:?}", e);
            String::new()
        }
    };

    record_vote(state, &voter, cookies, &option).await
}

/// Plain form post, `vote=a` or `vote=b`.
#[instrument(skip(state, cookies, form))]
#[post("/", data = "<form>")]
pub async fn submit_vote_form(
    state: &State<AppState>,
    voter: VoterToken,
    cookies: &CookieJar<'_>,
    form: Form<VoteForm>,
) -> Result<Json<SubmitResponse>, RejectedVote> {
    record_vote(state, &voter, cookies, form.vote.as_deref().unwrap_or("")).await
}

#[get("/stats")]
pub async fn get_stats(state: &State<AppState>) -> Json<StatsResponse> {
    let votes = state.stats.compute_tally().await;
    debug!("Serving tally from {:?}", votes.source());

    Json(StatsResponse {
        votes,
        degraded: votes.is_degraded(),
        options: state.config.option_labels(),
        hostname: state.config.hostname.clone(),
        timestamp: state.clock.now(),
    })
}

#[get("/health")]
pub async fn get_health(state: &State<AppState>) -> Json<HealthResponse> {
    let report = state.health.check().await;
    let status = if report.all_reachable() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    Json(HealthResponse {
        status,
        report,
        hostname: state.config.hostname.clone(),
        timestamp: state.clock.now(),
    })
}

/// Assigns or reuses the voter token without casting a vote.
#[get("/voter")]
pub async fn get_voter(voter: VoterToken, cookies: &CookieJar<'_>) -> Json<VoterResponse> {
    voter.persist(cookies);
    Json(VoterResponse { voter_token: voter.0 })
}

pub mod catchers;
pub mod clock;
pub mod config;
pub mod error;
pub mod headers;
pub mod health;
pub mod ledger;
#[cfg(test)]
pub mod memory;
pub mod queue;
pub mod routes;
pub mod stats;
pub mod store;
pub mod submission;
pub mod voter;
pub use shared::{models::*, error::*, validation::*};

use rocket::{Build, Rocket, catchers, routes};

use crate::{
    catchers::{bad_request, internal_error, not_found, service_unavailable, unprocessable},
    headers::SecurityHeaders,
    routes::{AppState, get_health, get_stats, get_voter, submit_vote, submit_vote_form},
};

/// Assembles the server around already-constructed state.
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    rocket::build()
        .attach(SecurityHeaders)
        .manage(state)
        .mount("/api", routes![submit_vote, get_stats, get_health, get_voter])
        .mount("/", routes![submit_vote_form])
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                unprocessable,
                internal_error,
                service_unavailable
            ],
        )
}

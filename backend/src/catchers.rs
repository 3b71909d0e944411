use rocket::{Request, catch, serde::json::Json};
use shared::error::ErrorResponse;

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Vote request could not be understood.", 400))
}

#[catch(404)]
pub fn not_found(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("No such vote endpoint.", 404))
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> Json<ErrorResponse> {
    let error_msg = match req.uri().path().segments().last() {
        Some("vote") | Some("") | None => "Vote body could not be read.",
        _ => "Request body could not be processed.",
    };

    Json(ErrorResponse::new(error_msg, 422))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Vote service failed unexpectedly.", 500))
}

#[catch(503)]
pub fn service_unavailable(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Vote stores unavailable. Please try again.", 503))
}

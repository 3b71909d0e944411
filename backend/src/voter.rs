use ring::rand::{SecureRandom, SystemRandom};
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

pub const VOTER_COOKIE: &str = "voter_id";
pub const VOTER_TOKEN_MAX_AGE_DAYS: i64 = 30;
const TOKEN_BYTES: usize = 8;

/// Mints and reuses the per-client voter token.
///
/// Tokens are 64 random bits rendered as 16 lowercase hex characters. They
/// are not signed; two clients may in principle collide.
pub struct VoterIdentity {
    rng: SystemRandom,
}

impl Default for VoterIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl VoterIdentity {
    pub fn new() -> Self {
        Self { rng: SystemRandom::new() }
    }

    pub fn ensure(&self, existing: Option<&str>) -> String {
        match existing {
            Some(token) if !token.is_empty() => token.to_string(),
            _ => self.generate(),
        }
    }

    fn generate(&self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        if self.rng.fill(&mut bytes).is_err() {
            warn!("System RNG unavailable, deriving voter token from clock");
            bytes = (OffsetDateTime::now_utc().unix_timestamp_nanos() as u64).to_be_bytes();
        }
        debug!("Minted new voter token");
        hex::encode(bytes)
    }
}

/// Request guard yielding the caller's voter token, minting one if the
/// cookie is missing or empty. Never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoterToken(pub String);

impl VoterToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hands the token back to the client for the next 30 days.
    pub fn persist(&self, cookies: &CookieJar<'_>) {
        cookies.add(
            Cookie::build((VOTER_COOKIE, self.0.clone()))
                .path("/")
                .same_site(SameSite::Lax)
                .max_age(Duration::days(VOTER_TOKEN_MAX_AGE_DAYS)),
        );
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for VoterToken {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let existing = req.cookies().get(VOTER_COOKIE).map(|c| c.value());
        Outcome::Success(VoterToken(VoterIdentity::new().ensure(existing)))
    }
}

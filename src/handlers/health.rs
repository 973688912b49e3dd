/// GET /health - process liveness only. Deliberately does not touch the
/// database, so it answers even when storage is down.
pub async fn health() -> &'static str {
    "OK"
}

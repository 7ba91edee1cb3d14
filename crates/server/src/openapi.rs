use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc {
    pub id: u64,
    pub message: Option<String>,
}

#[derive(ToSchema)]
pub struct MessageInputDoc { pub message: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::greeting::hello,
        crate::routes::greeting::goodbye,
        crate::routes::greeting::json_greeting,
        crate::routes::greeting::create,
        crate::routes::greeting::read_all,
        crate::routes::greeting::read,
        crate::routes::greeting::update,
        crate::routes::greeting::delete,
        crate::routes::tvseries::get_by_id,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            MessageInputDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "greeting"),
        (name = "tvseries")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/greeting/hello",
            "/greeting/create",
            "/greeting/read/{id}",
            "/greeting/delete/{id}",
            "/tvseries/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}

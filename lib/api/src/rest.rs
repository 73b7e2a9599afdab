use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, ResponseError, Result as ActixResult};
use psyreco_core::BookCollection;
use psyreco_mood::{MoodExtraction, MoodExtractor, MoodProfile};
use psyreco_similarity::{
    ExplainedRecommendation, RankError, RankWeights, RecommendationStats, Recommender,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state behind every handler
pub struct AppState<M> {
    pub recommender: Arc<Recommender>,
    pub analyzer: Arc<M>,
    pub collection: Arc<BookCollection>,
}

impl<M> AppState<M> {
    pub fn new(
        recommender: Arc<Recommender>,
        analyzer: Arc<M>,
        collection: Arc<BookCollection>,
    ) -> Self {
        Self {
            recommender,
            analyzer,
            collection,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidParameters(#[from] RankError),

    #[error("Request needs either 'text' or 'tags'")]
    MissingQuery,

    #[error("Book not found: {0}")]
    BookNotFound(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameters(_) | ApiError::MissingQuery => StatusCode::BAD_REQUEST,
            ApiError::BookNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    mood: MoodProfile,
    extraction: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_reason: Option<String>,
}

impl From<MoodExtraction> for AnalyzeResponse {
    fn from(extraction: MoodExtraction) -> Self {
        let kind = extraction.kind();
        match extraction {
            MoodExtraction::Fallback { profile, reason } => Self {
                mood: profile,
                extraction: kind,
                fallback_reason: Some(reason.to_string()),
            },
            other => Self {
                mood: other.into_profile(),
                extraction: kind,
                fallback_reason: None,
            },
        }
    }
}

#[derive(Deserialize)]
struct RecommendRequest {
    /// Free text to analyze. Ignored when `tags` is given.
    text: Option<String>,
    /// Interest tags to rank against directly
    tags: Option<Vec<String>>,
    n: Option<usize>,
    alpha: Option<f32>,
    beta: Option<f32>,
}

#[derive(Serialize)]
struct RecommendResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    mood: Option<AnalyzeResponse>,
    query_tags: Vec<String>,
    result: Vec<ExplainedRecommendation>,
    stats: RecommendationStats,
}

pub struct RestApi;

impl RestApi {
    pub async fn start<M: MoodExtractor + 'static>(
        state: AppState<M>,
        port: u16,
    ) -> std::io::Result<()> {
        let state = web::Data::new(state);
        info!("Serving recommendations on port {}", port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure::<M>)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Register all routes. State must be added with `app_data(web::Data<AppState<M>>)`.
pub fn configure<M: MoodExtractor + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::<M>))
        .route("/books/{id}", web::get().to(get_book::<M>))
        .route("/analyze", web::post().to(analyze::<M>))
        .route("/recommend", web::post().to(recommend::<M>));
}

async fn health<M: MoodExtractor + 'static>(
    state: web::Data<AppState<M>>,
) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "books": state.collection.count()
    })))
}

async fn get_book<M: MoodExtractor + 'static>(
    state: web::Data<AppState<M>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    match state.collection.get(&id) {
        Some(book) => Ok(HttpResponse::Ok().json(book)),
        None => Err(ApiError::BookNotFound(id)),
    }
}

async fn analyze<M: MoodExtractor + 'static>(
    state: web::Data<AppState<M>>,
    req: web::Json<AnalyzeRequest>,
) -> ActixResult<HttpResponse> {
    let extraction = state.analyzer.analyze(&req.text).await;
    Ok(HttpResponse::Ok().json(AnalyzeResponse::from(extraction)))
}

async fn recommend<M: MoodExtractor + 'static>(
    state: web::Data<AppState<M>>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = req.into_inner();
    let config = state.recommender.config();
    let n = req.n.unwrap_or(config.default_n);
    let weights = RankWeights {
        alpha: req.alpha.unwrap_or(config.weights.alpha),
        beta: req.beta.unwrap_or(config.weights.beta),
    };

    let (mood, tags) = match (req.tags, req.text) {
        (Some(tags), _) => (None, tags),
        (None, Some(text)) if !text.trim().is_empty() => {
            let extraction = state.analyzer.analyze(&text).await;
            let tags = extraction.profile().interest_tags.clone();
            (Some(AnalyzeResponse::from(extraction)), tags)
        }
        _ => return Err(ApiError::MissingQuery),
    };

    let recs = state.recommender.recommend(&tags, n, weights)?;
    debug!("Recommended {} books for tags {:?}", recs.len(), recs.query_tags());

    Ok(HttpResponse::Ok().json(RecommendResponse {
        mood,
        query_tags: recs.query_tags().to_vec(),
        result: ExplainedRecommendation::from_recommendations(&recs),
        stats: RecommendationStats::from_recommendations(&recs),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use psyreco_core::{Book, CollectionConfig, Distance, TextEmbedder};
    use psyreco_mood::MoodError;
    use psyreco_similarity::{HashEmbedder, RecommendConfig};
    use serde_json::{json, Value};

    struct StubExtractor(MoodExtraction);

    impl MoodExtractor for StubExtractor {
        async fn analyze(&self, _text: &str) -> MoodExtraction {
            self.0.clone()
        }
    }

    fn state(extraction: MoodExtraction) -> web::Data<AppState<StubExtractor>> {
        let embedder = Arc::new(HashEmbedder::with_dim(64));
        let collection = Arc::new(BookCollection::new(CollectionConfig {
            name: "books".to_string(),
            vector_dim: embedder.dim(),
            distance: Distance::Cosine,
        }));
        let books = vec![
            Book::new("1", "Stillness Is the Key", "Ryan Holiday")
                .with_summary("calm focus and stillness for anxious minds")
                .with_emotion_tags(["anxious"])
                .with_mindset_tags(["calm"]),
            Book::new("2", "The Hound of the Baskervilles", "Arthur Conan Doyle")
                .with_summary("a mystery on the moors")
                .with_emotion_tags(["curious"]),
            Book::new("3", "Stillness Is the Key", "Ryan Holiday")
                .with_summary("calm focus and stillness, second edition"),
        ];
        collection.insert_books(books, embedder.as_ref()).unwrap();

        let recommender =
            Recommender::new(embedder, collection.clone(), RecommendConfig::default()).unwrap();
        web::Data::new(AppState::new(
            Arc::new(recommender),
            Arc::new(StubExtractor(extraction)),
            collection,
        ))
    }

    fn calm_mood() -> MoodExtraction {
        MoodExtraction::Direct(MoodProfile::new(Some("anxious"), Some("calm"), ["anxious", "calm"]))
    }

    #[actix_web::test]
    async fn test_health() {
        let app = test::init_service(
            App::new()
                .app_data(state(calm_mood()))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"status": "ok", "books": 3}));
    }

    #[actix_web::test]
    async fn test_recommend_from_text() {
        let app = test::init_service(
            App::new()
                .app_data(state(calm_mood()))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(json!({"text": "I feel anxious", "n": 5}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["mood"]["extraction"], "direct");
        assert_eq!(body["query_tags"], json!(["anxious", "calm"]));
        let result = body["result"].as_array().unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["title"], "Stillness Is the Key");
        assert_eq!(result[0]["rank"], 1);
        assert_eq!(body["stats"]["candidates_count"], 3);
    }

    #[actix_web::test]
    async fn test_recommend_with_empty_tags_uses_defaults() {
        let app = test::init_service(
            App::new()
                .app_data(state(calm_mood()))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/recommend")
            .set_json(json!({"tags": []}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["query_tags"], json!(["fiction", "self-help", "psychology"]));
        assert!(body.get("mood").is_none());
    }

    #[actix_web::test]
    async fn test_recommend_rejects_bad_parameters() {
        let app = test::init_service(
            App::new()
                .app_data(state(calm_mood()))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let zero_n = test::TestRequest::post()
            .uri("/recommend")
            .set_json(json!({"tags": ["calm"], "n": 0}))
            .to_request();
        let resp = test::call_service(&app, zero_n).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let negative = test::TestRequest::post()
            .uri("/recommend")
            .set_json(json!({"tags": ["calm"], "alpha": -1.0}))
            .to_request();
        let resp = test::call_service(&app, negative).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let empty = test::TestRequest::post()
            .uri("/recommend")
            .set_json(json!({"text": "   "}))
            .to_request();
        let resp = test::call_service(&app, empty).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_analyze_reports_fallback() {
        let fallback = MoodExtraction::fallback("lost", MoodError::MissingApiKey);
        let app = test::init_service(
            App::new()
                .app_data(state(fallback))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(json!({"text": "lost"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["extraction"], "fallback");
        assert_eq!(body["mood"]["interest_tags"], json!(["lost"]));
        assert_eq!(body["mood"]["emotion"], Value::Null);
        assert_eq!(body["fallback_reason"], "API key not configured");
    }

    #[actix_web::test]
    async fn test_get_book() {
        let app = test::init_service(
            App::new()
                .app_data(state(calm_mood()))
                .configure(configure::<StubExtractor>),
        )
        .await;

        let req = test::TestRequest::get().uri("/books/2").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["author"], "Arthur Conan Doyle");

        let missing = test::TestRequest::get().uri("/books/99").to_request();
        let resp = test::call_service(&app, missing).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

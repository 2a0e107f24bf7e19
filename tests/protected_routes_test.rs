use actix_web::{test, web, App, HttpResponse, Responder};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use mongodb::bson::oid::ObjectId;
use serial_test::serial;

use travel_planner_api::middleware::auth::{AuthMiddleware, Claims};

const TEST_SECRET: &str = "test_jwt_secret";

async fn whoami(claims: web::ReqData<Claims>) -> impl Responder {
    HttpResponse::Ok().body(claims.sub.clone())
}

fn protected_app() -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .route("/whoami", web::get().to(whoami)),
    )
}

fn make_token(email: &str, issued_offset_minutes: i64, expiry_offset_minutes: i64) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: email.to_string(),
        iat: (now + Duration::minutes(issued_offset_minutes)).timestamp() as usize,
        exp: (now + Duration::minutes(expiry_offset_minutes)).timestamp() as usize,
        user_id: ObjectId::new().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

#[actix_web::test]
#[serial]
async fn test_missing_authorization_header() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get().uri("/api/whoami").to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[serial]
async fn test_malformed_bearer_token() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[serial]
async fn test_non_bearer_scheme_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(protected_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[serial]
async fn test_expired_token_is_rejected() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(protected_app()).await;

    let token = make_token("traveler@example.com", -120, -90);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
#[serial]
async fn test_valid_token_reaches_handler() {
    std::env::set_var("JWT_SECRET", TEST_SECRET);
    let app = test::init_service(protected_app()).await;

    let token = make_token("traveler@example.com", 0, 30);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    assert_eq!(body, "traveler@example.com");
}

#[actix_web::test]
#[serial]
async fn test_token_signed_with_other_secret_is_rejected() {
    std::env::set_var("JWT_SECRET", "a_completely_different_secret");
    let app = test::init_service(protected_app()).await;

    let token = make_token("traveler@example.com", 0, 30);
    let req = test::TestRequest::get()
        .uri("/api/whoami")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

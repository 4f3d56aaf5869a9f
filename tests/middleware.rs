use actix_web::{
    App, HttpResponse,
    http::{StatusCode, header},
    test, web,
};

use workshop_crm::middleware::RedirectUnauthorized;

#[actix_web::test]
async fn unauthorized_becomes_a_signin_redirect_without_a_body() {
    let app = test::init_service(App::new().wrap(RedirectUnauthorized).route(
        "/",
        web::get().to(|| async { HttpResponse::Unauthorized().body("Unauthorized") }),
    ))
    .await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/auth/signin"
    );
    // The handler's error body must not leak into the redirect.
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn only_unauthorized_responses_are_rewritten() {
    let app = test::init_service(
        App::new()
            .wrap(RedirectUnauthorized)
            .route(
                "/",
                web::get().to(|| async { HttpResponse::Ok().body("board") }),
            )
            .route(
                "/broken",
                web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
            ),
    )
    .await;

    let ok = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(test::read_body(ok).await, "board");

    // Other error statuses pass through untouched.
    let broken =
        test::call_service(&app, test::TestRequest::get().uri("/broken").to_request()).await;
    assert_eq!(broken.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(broken.headers().get(header::LOCATION).is_none());
}

//! End-to-end API tests: the full router served in-process on an ephemeral port, backed by
//! an in-memory SQLite database, driven over HTTP with reqwest.

use reqwest::StatusCode;
use serde_json::{json, Value};
use sweet_shop_api::transport;
use sweet_shop_api::{AppConfig, CatalogService};

type TestResult = Result<(), Box<dyn std::error::Error>>;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    catalog: CatalogService,
}

impl TestApp {
    async fn spawn() -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = CatalogService::connect(&AppConfig::in_memory()).await?;
        let router = transport::http::build_app(transport::http::AppState {
            catalog: catalog.clone(),
        });

        // Ephemeral port so tests can run in parallel.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            catalog,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Vendor 1 "Candy Co" and sweet 1 "Gummy Bear".
    async fn seed_candy_co(&self) -> TestResult {
        self.catalog.insert_vendor("Candy Co").await?;
        self.catalog.insert_sweet("Gummy Bear").await?;
        Ok(())
    }

    async fn post_vendor_sweet(&self, body: Value) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url("/vendor_sweets"))
            .json(&body)
            .send()
            .await
    }
}

#[tokio::test]
async fn root_serves_html_greeting() -> TestResult {
    let app = TestApp::spawn().await?;
    let resp = app.client.get(app.url("/")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"), "{content_type}");
    assert!(resp.text().await?.contains("<h1>"));
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> TestResult {
    let app = TestApp::spawn().await?;
    let resp = app.client.get(app.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn list_endpoints_return_summaries_only() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;
    app.catalog.insert_vendor("Sugar Shack").await?;
    app.catalog.insert_sweet("Toffee").await?;
    app.post_vendor_sweet(json!({"price": 5, "vendor_id": 1, "sweet_id": 1}))
        .await?;

    let vendors: Value = app.client.get(app.url("/vendors")).send().await?.json().await?;
    assert_eq!(
        vendors,
        json!([{"id": 1, "name": "Candy Co"}, {"id": 2, "name": "Sugar Shack"}])
    );

    let sweets: Value = app.client.get(app.url("/sweets")).send().await?.json().await?;
    assert_eq!(
        sweets,
        json!([{"id": 1, "name": "Gummy Bear"}, {"id": 2, "name": "Toffee"}])
    );
    Ok(())
}

#[tokio::test]
async fn empty_catalog_lists_are_empty_arrays() -> TestResult {
    let app = TestApp::spawn().await?;
    for path in ["/vendors", "/sweets"] {
        let resp = app.client.get(app.url(path)).send().await?;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.json::<Value>().await?, json!([]));
    }
    Ok(())
}

#[tokio::test]
async fn get_sweet_by_id_and_missing_sweet() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    let resp = app.client.get(app.url("/sweets/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.json::<Value>().await?, json!({"id": 1, "name": "Gummy Bear"}));

    let resp = app.client.get(app.url("/sweets/42")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>().await?, json!({"error": "Sweet not found"}));
    Ok(())
}

#[tokio::test]
async fn missing_vendor_is_not_found() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    for id in [0, 2, 999, -5] {
        let resp = app.client.get(app.url(&format!("/vendors/{}", id))).send().await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "vendor {id}");
        assert_eq!(resp.json::<Value>().await?, json!({"error": "Vendor not found"}));
    }
    Ok(())
}

#[tokio::test]
async fn create_then_fetch_vendor_detail() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    let resp = app
        .post_vendor_sweet(json!({"price": 5, "vendor_id": 1, "sweet_id": 1}))
        .await?;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = resp.json().await?;
    assert_eq!(
        created,
        json!({
            "id": 1,
            "price": 5,
            "sweet": {"id": 1, "name": "Gummy Bear"},
            "sweet_id": 1,
            "vendor": {"id": 1, "name": "Candy Co"},
            "vendor_id": 1
        })
    );

    let resp = app.client.get(app.url("/vendors/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let vendor: Value = resp.json().await?;
    assert_eq!(
        vendor,
        json!({
            "id": 1,
            "name": "Candy Co",
            "vendor_sweets": [{
                "id": 1,
                "price": 5,
                "sweet": {"id": 1, "name": "Gummy Bear"},
                "sweet_id": 1,
                "vendor_id": 1
            }]
        })
    );
    Ok(())
}

#[tokio::test]
async fn vendor_detail_lists_every_listing_without_recursion() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;
    app.catalog.insert_sweet("Toffee").await?;

    let prices = [0, 3, 12, 3];
    for (i, price) in prices.iter().enumerate() {
        let sweet_id = if i % 2 == 0 { 1 } else { 2 };
        let resp = app
            .post_vendor_sweet(json!({"price": price, "vendor_id": 1, "sweet_id": sweet_id}))
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = resp.json().await?;
        assert_eq!(body["price"], json!(price));
    }

    let vendor: Value = app.client.get(app.url("/vendors/1")).send().await?.json().await?;
    let entries = vendor["vendor_sweets"].as_array().cloned().unwrap_or_default();
    assert_eq!(entries.len(), prices.len());
    for entry in &entries {
        let sweet = entry["sweet"].as_object().cloned().unwrap_or_default();
        assert!(sweet.get("vendor_sweets").is_none());
        assert_eq!(sweet.len(), 2);
    }
    Ok(())
}

#[tokio::test]
async fn negative_price_is_rejected_without_a_write() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    let resp = app
        .post_vendor_sweet(json!({"price": -1, "vendor_id": 1, "sweet_id": 1}))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>().await?, json!({"errors": ["validation errors"]}));
    assert_eq!(app.catalog.count_vendor_sweets().await?, 0);
    Ok(())
}

#[tokio::test]
async fn every_bad_payload_gets_the_same_generic_error() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    let bad_bodies = [
        json!({"price": null, "vendor_id": 1, "sweet_id": 1}),
        json!({"vendor_id": 1, "sweet_id": 1}),
        json!({"price": -100, "vendor_id": 1, "sweet_id": 1}),
        json!({"price": 5, "sweet_id": 1}),
        json!({"price": 5, "vendor_id": 1}),
        json!({"price": "five", "vendor_id": 1, "sweet_id": 1}),
        json!({"price": 5.5, "vendor_id": 1, "sweet_id": 1}),
        json!({"price": 5, "vendor_id": 99, "sweet_id": 1}),
        json!({"price": 5, "vendor_id": 1, "sweet_id": 99}),
        json!("price=5"),
    ];
    for body in bad_bodies {
        let resp = app.post_vendor_sweet(body.clone()).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(
            resp.json::<Value>().await?,
            json!({"errors": ["validation errors"]}),
            "{body}"
        );
    }

    // Not JSON at all.
    let resp = app
        .client
        .post(app.url("/vendor_sweets"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{price: 5")
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.catalog.count_vendor_sweets().await?, 0);
    Ok(())
}

#[tokio::test]
async fn delete_removes_one_row_and_then_reports_not_found() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;
    for price in [5, 6] {
        app.post_vendor_sweet(json!({"price": price, "vendor_id": 1, "sweet_id": 1}))
            .await?;
    }

    let resp = app.client.delete(app.url("/vendor_sweets/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.text().await?.is_empty());

    assert_eq!(app.catalog.count_vendor_sweets().await?, 1);
    assert!(app.catalog.get_vendor_sweet(2).await?.is_some());
    // The vendor and sweet are untouched.
    assert!(app.catalog.get_vendor(1).await?.is_some());
    assert!(app.catalog.get_sweet(1).await?.is_some());

    let resp = app.client.delete(app.url("/vendor_sweets/1")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({"error": "VendorSweet not found"})
    );
    Ok(())
}

#[tokio::test]
async fn delete_unknown_vendor_sweet_is_not_found() -> TestResult {
    let app = TestApp::spawn().await?;
    let resp = app.client.delete(app.url("/vendor_sweets/999")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({"error": "VendorSweet not found"})
    );
    Ok(())
}

#[tokio::test]
async fn openapi_document_lists_catalog_paths() -> TestResult {
    let app = TestApp::spawn().await?;
    let doc: Value = app
        .client
        .get(app.url("/api-docs/openapi.json"))
        .send()
        .await?
        .json()
        .await?;
    for path in ["/vendors", "/vendors/{id}", "/sweets", "/sweets/{id}", "/vendor_sweets", "/vendor_sweets/{id}"] {
        assert!(doc["paths"].get(path).is_some(), "missing {path}");
    }
    Ok(())
}

#[tokio::test]
async fn non_integer_ids_are_not_found() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;

    let cases = [
        ("/vendors/abc", "Vendor not found"),
        ("/sweets/1.5", "Sweet not found"),
    ];
    for (path, message) in cases {
        let resp = app.client.get(app.url(path)).send().await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        assert_eq!(resp.json::<Value>().await?, json!({"error": message}));
    }

    let resp = app.client.delete(app.url("/vendor_sweets/first")).send().await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await?,
        json!({"error": "VendorSweet not found"})
    );
    Ok(())
}

#[tokio::test]
async fn database_outage_maps_to_server_error_on_reads_and_generic_400_on_writes() -> TestResult {
    let app = TestApp::spawn().await?;
    app.seed_candy_co().await?;
    app.catalog.pool().close().await;

    for path in ["/vendors", "/vendors/1", "/sweets"] {
        let resp = app.client.get(app.url(path)).send().await?;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(
            resp.json::<Value>().await?,
            json!({"error": "An internal database error occurred"}),
            "{path}"
        );
    }

    let resp = app.client.get(app.url("/health")).send().await?;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let health: Value = resp.json().await?;
    assert_eq!(health["status"], json!("unhealthy"));

    let resp = app
        .post_vendor_sweet(json!({"price": 5, "vendor_id": 1, "sweet_id": 1}))
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>().await?, json!({"errors": ["validation errors"]}));
    Ok(())
}

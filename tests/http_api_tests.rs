//! End-to-end tests for the HTTP API.
//!
//! Each test starts the real router on an ephemeral port, with the
//! marketplace, completion API and counter store replaced by wiremock fakes.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use product_namer::{app, Container, ContainerConfig};

const FETCH_FAILED: &str = "خطا در دریافت اطلاعات محصول از باسلام";
const GENERATE_FAILED: &str = "خطا در تولید نام‌های پیشنهادی";
const MISSING_PRODUCT_REF: &str = "شناسه محصول یا URL باسلام را وارد کنید";
const MISSING_PRODUCT_FIELDS: &str = "عنوان، توضیحات و دسته‌بندی محصول الزامی است";

struct TestEnv {
    base_url: String,
    client: reqwest::Client,
    marketplace: MockServer,
    completions: MockServer,
}

impl TestEnv {
    async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// `customize` adjusts the config before the container is built.
    async fn start_with(customize: impl FnOnce(&mut ContainerConfig)) -> Self {
        let marketplace = MockServer::start().await;
        let completions = MockServer::start().await;

        let mut config = ContainerConfig {
            marketplace_base_url: marketplace.uri(),
            completion_base_url: completions.uri(),
            completion_api_key: "sk-test".to_string(),
            http_timeout: Duration::from_secs(5),
            ..ContainerConfig::default()
        };
        customize(&mut config);

        let container = Container::new(config).expect("container should build");
        let base_url = serve(container).await;

        Self {
            base_url,
            client: reqwest::Client::new(),
            marketplace,
            completions,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request should complete")
    }

    async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request should complete")
    }

    async fn total_requests(&self) -> u64 {
        let body: Value = self.get("/api/stats").await.json().await.unwrap();
        body["totalRequests"].as_u64().expect("totalRequests should be a number")
    }

    async fn mount_product(&self, id: &str, product: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/v3/products/{id}")))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product))
            .mount(&self.marketplace)
            .await;
    }

    async fn mount_completion(&self, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .mount(&self.completions)
            .await;
    }
}

async fn serve(container: Container) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    let router = app(Arc::new(container));
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

fn marketplace_product() -> Value {
    json!({
        "id": 12345,
        "title": "کیف چرمی دست‌دوز",
        "description": "کیف دوشی زنانه از چرم طبیعی گاوی با دوخت دستی",
        "photo": {"original": "https://img.example/p0.jpg", "lg": "https://img.example/p0-lg.jpg"},
        "photos": [
            {"original": "https://img.example/p1.jpg", "lg": "https://img.example/p1-lg.jpg"},
            {"original": "https://img.example/p2.jpg", "lg": "https://img.example/p2-lg.jpg"}
        ],
        "category": {
            "title": "کیف دوشی",
            "parent": {"title": "کیف زنانه", "parent": {"title": "پوشاک و اکسسوری"}}
        },
        "attribute_groups": [{
            "title": "مشخصات",
            "attributes": [
                {"id": 7, "title": "جنس", "value": "چرم طبیعی", "unit": null},
                {"id": 8, "title": "عرض", "value": 30, "unit": "سانتی‌متر"}
            ]
        }]
    })
}

fn naming_reply() -> Value {
    json!({
        "currentNameAnalysis": {
            "strengths": ["به جنس محصول اشاره می‌کند"],
            "weaknesses": ["نوع کیف مشخص نیست"]
        },
        "suggestions": [
            {"name": "کیف دوشی چرم طبیعی دست‌دوز", "reasoning": "نوع و جنس کیف را همزمان نشان می‌دهد"},
            {"name": "کیف زنانه چرمی دوخت دستی", "reasoning": "برای جستجوی کیف زنانه مناسب است"},
            {"name": "کیف چرم گاوی دوشی", "reasoning": "جنس دقیق چرم را مشخص می‌کند"},
            {"name": "کیف دوشی دست‌دوز زنانه", "reasoning": "کوتاه و خوانا است"},
            {"name": "کیف چرم طبیعی مدل دوشی", "reasoning": "مدل کیف را برجسته می‌کند"}
        ]
    })
}

fn persian_product_info() -> Value {
    json!({
        "title": "کیف چرمی",
        "description": "کیف دوشی زنانه از چرم طبیعی گاوی با دوخت دستی",
        "category": "کیف زنانه",
        "brandName": "چرم مشهد"
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let env = TestEnv::start().await;

    let response = env.get("/health").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn fetch_normalizes_marketplace_product() {
    let env = TestEnv::start().await;
    env.mount_product("12345", marketplace_product()).await;

    let response = env.get("/api/fetch-basalam-product?id=12345").await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "کیف چرمی دست‌دوز");
    assert_eq!(body["category"]["leaf"], "کیف دوشی");
    assert_eq!(body["category"]["sub"], "کیف زنانه");
    assert_eq!(body["category"]["main"], "پوشاک و اکسسوری");

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1 + 2);
    assert_eq!(images[0]["original"], "https://img.example/p0.jpg");
    assert_eq!(images[0]["large"], "https://img.example/p0-lg.jpg");

    let attributes = &body["attribute_groups"][0]["attributes"];
    assert_eq!(attributes[1]["id"], 8);
    assert_eq!(attributes[1]["unit"], "سانتی‌متر");
}

#[tokio::test]
async fn product_url_and_id_resolve_to_the_same_record() {
    let env = TestEnv::start().await;
    env.mount_product("12345", marketplace_product()).await;

    let by_id: Value = env
        .get("/api/fetch-basalam-product?id=12345")
        .await
        .json()
        .await
        .unwrap();

    let url = "https://basalam.com/chaarm-shop/product/12345?utm_source=share";
    let response = env
        .client
        .get(env.url("/api/fetch-basalam-product"))
        .query(&[("url", url)])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let by_url: Value = response.json().await.unwrap();

    assert_eq!(by_id, by_url);
}

#[tokio::test]
async fn fetch_without_identifier_is_rejected() {
    let env = TestEnv::start().await;

    for query in [
        "",
        "?id=",
        "?url=https%3A%2F%2Fbasalam.com%2Fvendor%2Fchaarm-shop",
    ] {
        let response = env.get(&format!("/api/fetch-basalam-product{query}")).await;
        assert_eq!(response.status(), 400, "query {query:?}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], MISSING_PRODUCT_REF);
    }

    assert!(env.marketplace.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_fetch_query_gets_json_error() {
    let env = TestEnv::start().await;

    let response = env
        .get("/api/fetch-basalam-product?id=12345&id=12345")
        .await;
    assert_eq!(response.status(), 400);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], MISSING_PRODUCT_REF);

    assert!(env.marketplace.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn marketplace_failure_is_reported_generically() {
    let env = TestEnv::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/products/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&env.marketplace)
        .await;

    let response = env.get("/api/fetch-basalam-product?id=999").await;
    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], FETCH_FAILED);
}

#[tokio::test]
async fn generate_returns_model_reply_verbatim() {
    let env = TestEnv::start().await;
    let reply = naming_reply();
    env.mount_completion(&reply.to_string()).await;

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({
                "productInfo": persian_product_info(),
                "preferences": {
                    "includeBrand": true,
                    "includeCategory": true,
                    "includeFeatures": true,
                    "nameLength": "medium"
                }
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, reply);

    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    for suggestion in suggestions {
        assert!(!suggestion["name"].as_str().unwrap().is_empty());
        assert!(!suggestion["reasoning"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn generate_sends_prompt_and_json_mode_to_completion_api() {
    let env = TestEnv::start().await;
    env.mount_completion(&naming_reply().to_string()).await;

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;
    assert_eq!(response.status(), 200);

    let requests = env.completions.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(sent["model"], "gpt-4o-mini-2024-07-18");
    assert_eq!(sent["temperature"].as_f64().map(|t| (t * 10.0).round()), Some(7.0));
    assert_eq!(sent["response_format"]["type"], "json_object");
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][1]["role"], "user");

    let prompt = sent["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("کیف چرمی"));
    assert!(prompt.contains("چرم مشهد"));
    assert!(prompt.contains("کیف زنانه"));
}

#[tokio::test]
async fn fenced_and_bare_replies_parse_identically() {
    let reply = naming_reply();
    let mut bodies = Vec::new();

    for content in [
        reply.to_string(),
        format!("```json\n{}\n```", reply),
        format!("```\n{}\n```", serde_json::to_string_pretty(&reply).unwrap()),
    ] {
        let env = TestEnv::start().await;
        env.mount_completion(&content).await;

        let response = env
            .post_json(
                "/api/generate-names",
                &json!({"productInfo": persian_product_info()}),
            )
            .await;
        assert_eq!(response.status(), 200);
        bodies.push(response.json::<Value>().await.unwrap());
    }

    assert!(bodies.iter().all(|b| *b == reply));
}

#[tokio::test]
async fn missing_description_is_rejected_before_calling_the_model() {
    let env = TestEnv::start().await;

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({
                "productInfo": {"title": "کیف چرمی", "category": "کیف زنانه"},
                "preferences": {}
            }),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], MISSING_PRODUCT_FIELDS);
    assert!(env.completions.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let env = TestEnv::start().await;

    let response = env
        .client
        .post(env.url("/api/generate-names"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unparseable_model_reply_is_a_server_error() {
    let env = TestEnv::start().await;
    env.mount_completion("متاسفانه نمی‌توانم پاسخ دهم").await;

    let before = env.total_requests().await;
    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], GENERATE_FAILED);
    assert_eq!(env.total_requests().await, before);
}

#[tokio::test]
async fn completion_api_failure_is_a_server_error() {
    let env = TestEnv::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_json(json!({"error": {"message": "rate limited"}})),
        )
        .mount(&env.completions)
        .await;

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], GENERATE_FAILED);
}

#[tokio::test]
async fn generate_can_fetch_the_product_by_url() {
    let env = TestEnv::start().await;
    env.mount_product("12345", marketplace_product()).await;
    env.mount_completion(&naming_reply().to_string()).await;

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productUrl": "https://basalam.com/chaarm-shop/product/12345"}),
        )
        .await;

    assert_eq!(response.status(), 200);
    let requests = env.completions.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.contains("کیف چرمی دست‌دوز"));
    assert!(prompt.contains("پوشاک و اکسسوری > کیف زنانه > کیف دوشی"));
}

#[tokio::test]
async fn stats_are_stable_and_count_successful_generations() {
    let env = TestEnv::start().await;
    env.mount_completion(&naming_reply().to_string()).await;

    let first = env.total_requests().await;
    let second = env.total_requests().await;
    assert_eq!(first, second);

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;
    assert_eq!(response.status(), 200);

    assert_eq!(env.total_requests().await, first + 1);
}

#[tokio::test]
async fn stats_are_never_cached() {
    let env = TestEnv::start().await;

    let response = env.get("/api/stats").await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["cache-control"],
        "no-store, no-cache, must-revalidate, max-age=0"
    );
    assert_eq!(response.headers()["pragma"], "no-cache");
}

#[tokio::test]
async fn stats_read_from_the_counter_store() {
    let store = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get/total_requests"))
        .and(header("authorization", "Bearer store-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "41"})))
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/incr/total_requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 42})))
        .expect(1)
        .mount(&store)
        .await;

    let store_url = store.uri();
    let env = TestEnv::start_with(|config| {
        config.counter_url = Some(store_url);
        config.counter_token = "store-token".to_string();
    })
    .await;
    env.mount_completion(&naming_reply().to_string()).await;

    assert_eq!(env.total_requests().await, 41);

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;
    assert_eq!(response.status(), 200);

    store.verify().await;
}

#[tokio::test]
async fn counter_store_errors_degrade_to_zero_and_do_not_fail_generation() {
    let store = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get/total_requests"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})),
        )
        .mount(&store)
        .await;
    Mock::given(method("POST"))
        .and(path("/incr/total_requests"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})),
        )
        .mount(&store)
        .await;

    let store_url = store.uri();
    let env = TestEnv::start_with(|config| {
        config.counter_url = Some(store_url);
    })
    .await;
    env.mount_completion(&naming_reply().to_string()).await;

    let response = env.get("/api/stats").await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"totalRequests": 0}));

    let response = env
        .post_json(
            "/api/generate-names",
            &json!({"productInfo": persian_product_info()}),
        )
        .await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn missing_counter_key_reads_as_zero() {
    let store = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get/total_requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": null})))
        .mount(&store)
        .await;

    let store_url = store.uri();
    let env = TestEnv::start_with(|config| {
        config.counter_url = Some(store_url);
    })
    .await;

    assert_eq!(env.total_requests().await, 0);
}

//! End-to-end tests for the storefront HTTP surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The storefront server running (cargo run -p leafbound-storefront)
//!
//! Run with: cargo test -p leafbound-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect};

use leafbound_core::Username;

/// Base URL for the storefront (configurable via environment).
fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A browser-like client: holds cookies and follows redirects.
fn browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A client that holds cookies but surfaces redirects for inspection.
fn no_redirect_browser() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Credentials no other test run has used.
fn fresh_credentials() -> (String, String) {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch");
    let username = format!("shopper{}{}", now.as_secs(), now.subsec_nanos());
    assert!(Username::parse(&username).is_ok());
    let email = format!("{username}@test.example");
    (username, email)
}

/// Test helper: register an account and log the client in.
async fn register_and_login(client: &Client, username: &str, email: &str, password: &str) {
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[("username", username), ("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to login");
    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Health & Catalog Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health_endpoints() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to reach /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to reach /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_home_shows_three_featured_books() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert_eq!(body.matches("book-card").count(), 3);
    assert!(body.contains("The Great Gatsby"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_catalog_and_detail_pages() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/books"))
        .send()
        .await
        .expect("Failed to get catalog");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("1984"));
    assert!(body.contains("To Kill a Mockingbird"));

    let resp = client
        .get(format!("{base_url}/book/1"))
        .send()
        .await
        .expect("Failed to get book detail");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_book_redirects_to_catalog_with_notice() {
    let client = no_redirect_browser();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/book/999999"))
        .send()
        .await
        .expect("Failed to get missing book");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("redirect without location");
    assert_eq!(location, "/books");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_search_matches_and_misses() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .get(format!("{base_url}/search"))
        .query(&[("q", "orwell")])
        .send()
        .await
        .expect("Failed to search");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("1984"));

    let resp = client
        .get(format!("{base_url}/search"))
        .query(&[("q", "xyzzy-no-such-book")])
        .send()
        .await
        .expect("Failed to search");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("No books matched"));
}

// ============================================================================
// Authentication Gating Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_pages_require_login() {
    let client = no_redirect_browser();
    let base_url = storefront_base_url();

    for path in ["/cart", "/checkout", "/orders", "/remove-from-cart/1"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to request gated page");
        assert!(
            resp.status().is_redirection(),
            "{path} should redirect anonymous visitors"
        );
        let location = resp
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .expect("redirect without location");
        assert_eq!(location, "/login", "{path} should redirect to /login");
    }

    let resp = client
        .post(format!("{base_url}/add-to-cart/1"))
        .form(&[("quantity", "1")])
        .send()
        .await
        .expect("Failed to post add-to-cart");
    assert!(resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_login_rejects_bad_credentials() {
    let client = browser();
    let base_url = storefront_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("username", "nobody-here"), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to post login");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Invalid username or password"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_duplicate_registration_is_rejected() {
    let client = browser();
    let base_url = storefront_base_url();
    let (username, email) = fresh_credentials();

    register_and_login(&client, &username, &email, "a-strong-password").await;

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", "different@test.example"),
            ("password", "a-strong-password"),
        ])
        .send()
        .await
        .expect("Failed to post duplicate registration");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Username or email already exists"));
}

// ============================================================================
// Cart Flow Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_full_shopping_flow() {
    let client = browser();
    let base_url = storefront_base_url();
    let (username, email) = fresh_credentials();

    register_and_login(&client, &username, &email, "a-strong-password").await;

    // Add two copies, then three more of the same book
    for quantity in ["2", "3"] {
        let resp = client
            .post(format!("{base_url}/add-to-cart/1"))
            .form(&[("quantity", quantity)])
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    // Cart shows one accumulated line
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("<td>5</td>"), "quantities should accumulate");

    // Checkout lands on the orders page with a confirmation
    let resp = client
        .get(format!("{base_url}/checkout"))
        .send()
        .await
        .expect("Failed to checkout");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Order placed successfully!"));

    // The cart is empty afterwards
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_invalid_quantity_does_not_change_cart() {
    let client = browser();
    let base_url = storefront_base_url();
    let (username, email) = fresh_credentials();

    register_and_login(&client, &username, &email, "a-strong-password").await;

    for bad in ["0", "-2", "abc"] {
        let resp = client
            .post(format!("{base_url}/add-to-cart/1"))
            .form(&[("quantity", bad)])
            .send()
            .await
            .expect("Failed to post add-to-cart");
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.expect("Failed to read response");
        assert!(body.contains("Invalid quantity"), "quantity {bad} should be rejected");
    }

    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_logout_ends_the_session() {
    let client = no_redirect_browser();
    let base_url = storefront_base_url();
    let (username, email) = fresh_credentials();

    // Log in with a redirect-following client sharing no cookies is
    // awkward, so drive the forms manually here.
    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("username", username.as_str()),
            ("email", email.as_str()),
            ("password", "a-strong-password"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_redirection());

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("username", username.as_str()), ("password", "a-strong-password")])
        .send()
        .await
        .expect("Failed to login");
    assert!(resp.status().is_redirection());

    // Logged in: cart renders
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to logout");
    assert!(resp.status().is_redirection());

    // Logged out: cart redirects to login again
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart");
    assert!(resp.status().is_redirection());
}

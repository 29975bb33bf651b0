use std::fs;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;
use vitrina::core::config::AppConfig;
use vitrina::core::{Country, PreferenceStore, RateSource};
use vitrina::session::PricingSession;
use vitrina::store::open_preferences;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// One server answering both the geo-IP and the exchange-rate endpoints.
    pub async fn create_mock_server(country_code: &str, rates_body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/json/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(format!(r#"{{"country_code": "{country_code}"}}"#)),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v6/latest/ARS"))
            .respond_with(ResponseTemplate::new(200).set_body_string(rates_body.to_string()))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &std::path::Path, base_url: &str, extra: &str) -> std::path::PathBuf {
        let config_path = dir.join("config.yaml");
        let config = format!(
            r#"
base_country: AR
request_timeout_secs: 2
data_path: "{data}"
providers:
  geo:
    base_url: "{base_url}"
  rates:
    base_url: "{base_url}"
whatsapp:
  phone_number: "+595 981 123456"
{extra}
"#,
            data = dir.join("data").display(),
        );
        std::fs::write(&config_path, config).expect("Failed to write config file");
        config_path
    }
}

const RATES_BODY: &str = r#"{"result": "success", "base_code": "ARS", "rates": {"PYG": 5.9}}"#;

#[test_log::test(tokio::test)]
async fn test_first_visit_detects_and_converts() {
    let mock_server = test_utils::create_mock_server("PY", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");
    let config = AppConfig::load_from_path(&config_path).unwrap();

    let preferences = open_preferences(&config);
    let session = PricingSession::from_config(&config, Arc::clone(&preferences), None)
        .await
        .unwrap();
    let ctx = session.settled().await;
    info!(?ctx, "Settled pricing context");

    assert_eq!(ctx.country(), Country::Paraguay);
    assert_eq!(ctx.rate().source(), RateSource::Live);
    assert_eq!(session.format_price(25000.0), "Gs. 147.990");

    // Detection is persisted for the next session
    assert_eq!(preferences.load_country().unwrap(), Some(Country::Paraguay));
}

#[test_log::test(tokio::test)]
async fn test_rate_outage_falls_back() {
    let mock_server = test_utils::create_mock_server("PY", r#"{"result": "error"}"#).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");
    let config = AppConfig::load_from_path(&config_path).unwrap();

    let session = PricingSession::from_config(&config, open_preferences(&config), None)
        .await
        .unwrap();
    let ctx = session.settled().await;

    assert_eq!(ctx.rate().source(), RateSource::Fallback);
    assert_eq!(ctx.rate().value(), 1000.0);
    assert_eq!(session.format_price(49.0), "Gs. 48.990");
}

#[test_log::test(tokio::test)]
async fn test_unreachable_services_still_render() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:9", "");
    let config = AppConfig::load_from_path(&config_path).unwrap();

    let session = PricingSession::from_config(&config, open_preferences(&config), None)
        .await
        .unwrap();
    let ctx = session.settled().await;

    assert_eq!(ctx.country(), Country::Argentina);
    assert_eq!(session.format_price(49900.0), "$ 49.900");
}

#[test_log::test(tokio::test)]
async fn test_guarani_base_currency_shown_as_stored() {
    let mock_server = test_utils::create_mock_server("PY", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");
    let mut config = AppConfig::load_from_path(&config_path).unwrap();
    config.base_country = Country::Paraguay;

    let session = PricingSession::from_config(&config, open_preferences(&config), None)
        .await
        .unwrap();

    assert_eq!(session.settled().await.rate().source(), RateSource::Identity);
    assert_eq!(session.format_price(49900.0), "Gs. 49.900");
}

#[test_log::test(tokio::test)]
async fn test_switching_country_persists_and_reprices() {
    let mock_server = test_utils::create_mock_server("AR", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");
    let config = AppConfig::load_from_path(&config_path).unwrap();
    let preferences: Arc<dyn PreferenceStore> = open_preferences(&config);

    let session = PricingSession::from_config(&config, Arc::clone(&preferences), None)
        .await
        .unwrap();
    assert_eq!(session.format_price(25000.0), "$ 25.000");

    session.select_country(Country::Paraguay);
    assert!(session.context().rate().is_pending());
    let ctx = session.settled().await;
    assert_eq!(ctx.rate().value(), 5.9);
    assert_eq!(session.format_price(25000.0), "Gs. 147.990");
    assert_eq!(preferences.load_country().unwrap(), Some(Country::Paraguay));
}

#[test_log::test(tokio::test)]
async fn test_checkout_command_flow() {
    let mock_server = test_utils::create_mock_server("PY", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");

    let order_path = dir.path().join("order.yaml");
    fs::write(
        &order_path,
        r#"
items:
  - name: "Remera Oversize"
    price: 25000
    quantity: 2
customer_name: "Ana"
"#,
    )
    .unwrap();

    let result = vitrina::run_command(
        vitrina::AppCommand::Checkout {
            order_path,
            country: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Checkout failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_price_command_flow() {
    let mock_server = test_utils::create_mock_server("PY", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");

    let result = vitrina::run_command(
        vitrina::AppCommand::Price {
            amounts: vec![25000.0, 12000.0],
            country: Some(Country::Paraguay),
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Price failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_share_command_flow() {
    let mock_server = test_utils::create_mock_server("PY", RATES_BODY).await;
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");

    let item_path = dir.path().join("item.yaml");
    fs::write(
        &item_path,
        r#"
name: "Buzo Canguro"
description: "Algodón peinado"
price: 30000
compare_price: 40000
collection: "Invierno"
"#,
    )
    .unwrap();

    let result = vitrina::run_command(
        vitrina::AppCommand::Share {
            item_path,
            country: None,
        },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Share failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_guarani_base_falls_back_to_inverse_rate() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), "http://127.0.0.1:9", "");
    let mut config = AppConfig::load_from_path(&config_path).unwrap();
    config.base_country = Country::Paraguay;

    let session = PricingSession::from_config(
        &config,
        open_preferences(&config),
        Some(Country::Argentina),
    )
    .await
    .unwrap();
    let ctx = session.settled().await;

    assert_eq!(ctx.rate().source(), RateSource::Fallback);
    assert_eq!(ctx.rate().value(), 0.001);
    assert_eq!(session.format_price(49900.0), "$ 49");
}

#[test_log::test(tokio::test)]
async fn test_slow_rate_service_times_out_to_fallback() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/latest/ARS"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(RATES_BODY)
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config_path = test_utils::write_config(dir.path(), &mock_server.uri(), "");
    let config = AppConfig::load_from_path(&config_path).unwrap();

    let started = Instant::now();
    let session = PricingSession::from_config(
        &config,
        open_preferences(&config),
        Some(Country::Paraguay),
    )
    .await
    .unwrap();
    let ctx = session.settled().await;

    assert_eq!(ctx.rate().source(), RateSource::Fallback);
    assert_eq!(ctx.rate().value(), 1000.0);
    assert!(started.elapsed() < Duration::from_secs(8));
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config_path =
        test_utils::write_config(dir.path(), "http://127.0.0.1:9", "fallback_rate: 0");

    let result = vitrina::run_command(
        vitrina::AppCommand::Country { select: None },
        Some(config_path.to_str().unwrap()),
    )
    .await;
    assert!(result.is_err());
}

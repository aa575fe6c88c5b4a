// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use pricewatch::config::settings::Settings;
use pricewatch::engines::traits::FetchConfig;
use std::time::Duration;

#[test]
fn test_environment_overrides_defaults() {
    std::env::set_var("PRICEWATCH__SCRAPER__RETRY_ATTEMPTS", "7");
    std::env::set_var("PRICEWATCH__STORAGE__MERGE_ON_SAVE", "true");
    std::env::set_var("PRICEWATCH__AUTH__API_TOKEN", "from-env");

    let settings = Settings::new();

    std::env::remove_var("PRICEWATCH__SCRAPER__RETRY_ATTEMPTS");
    std::env::remove_var("PRICEWATCH__STORAGE__MERGE_ON_SAVE");
    std::env::remove_var("PRICEWATCH__AUTH__API_TOKEN");

    let settings = settings.expect("settings should load");
    assert_eq!(settings.scraper.retry_attempts, 7);
    assert!(settings.storage.merge_on_save);
    assert_eq!(settings.auth.api_token, "from-env");
    assert_eq!(settings.redis.ttl_secs, 3600);
}

#[test]
fn test_fetch_config_from_default_settings() {
    let settings = Settings::defaults().unwrap();
    let config = FetchConfig::from_settings(&settings.scraper);

    assert_eq!(config.retry.max_retries, 3);
    assert_eq!(config.retry.calculate_backoff(2), Duration::from_secs(10));
    assert_eq!(config.retry.fixed_backoff(), Duration::from_secs(5));
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.referer.as_deref(), Some("https://dentalstall.com/"));
    assert!(config.user_agent.starts_with("Mozilla/5.0"));
}

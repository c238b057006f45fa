use hearth_core::ResourceConnector;
use hearth_nyc311::Nyc311Connector;

#[test]
fn rate_limited_builder_produces_expected_stack_and_name() {
    let builder = Nyc311Connector::rate_limited().unwrap();
    let stack = builder.to_stack();

    assert_eq!(stack.names(), vec!["RateLimitedConnector", "RawConnector"]);
    let limits = &stack.find("RateLimitedConnector").unwrap().config;
    assert_eq!(limits["requests_per_day"], 10_000);
    assert_eq!(limits["requests_per_minute"], 100);
    assert_eq!(stack.find("RawConnector").unwrap().config["name"], "nyc311");

    let wrapped = builder.build();
    assert_eq!(wrapped.name(), "nyc311");
    assert_eq!(wrapped.label(), "NYC 311 open data");
    assert!(wrapped.rate_limit_status().is_some());
}

#[test]
fn plain_builder_has_no_limits() {
    let wrapped = Nyc311Connector::new().unwrap().build();
    assert!(wrapped.rate_limit_status().is_none());
}

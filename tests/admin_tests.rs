//! Tests for keeper authorization and administrative configuration.

use alloy_primitives::Address;
use sentinel::domain::error::DomainError;
use sentinel::domain::TokenMonitorConfig;
use sentinel::error::SentinelError;
use sentinel::port::outbound::access::Operation;
use sentinel::port::outbound::notifier::Event;
use sentinel::testkit::domain::{addr, ADMIN, KEEPER, MARKET, STRANGER, TOKEN};
use sentinel::testkit::fixture::Fixture;

#[test]
fn untrusted_keeper_is_rejected_before_any_price_read() {
    let fixture = Fixture::new();
    fixture.skew_high();

    let err = fixture
        .sentinel
        .handle_deviation(STRANGER, MARKET)
        .unwrap_err();

    assert_eq!(err, SentinelError::UntrustedKeeper { caller: STRANGER });
    assert_eq!(fixture.feed_reads(), 0);
    assert!(fixture.multi_pool.calls().is_empty());
}

#[test]
fn admin_manages_trusted_keepers() {
    let fixture = Fixture::new();
    let keeper = addr(0x57);

    fixture
        .sentinel
        .set_trusted_keeper(ADMIN, keeper, true)
        .unwrap();
    assert!(fixture.sentinel.is_trusted_keeper(keeper));
    assert!(fixture.sentinel.handle_deviation(keeper, MARKET).is_ok());

    fixture
        .sentinel
        .set_trusted_keeper(ADMIN, keeper, false)
        .unwrap();
    assert_eq!(
        fixture.sentinel.handle_deviation(keeper, MARKET).unwrap_err(),
        SentinelError::UntrustedKeeper { caller: keeper }
    );

    assert_eq!(
        fixture.events.events(),
        vec![
            Event::TrustedKeeperUpdated {
                keeper,
                trusted: true,
            },
            Event::TrustedKeeperUpdated {
                keeper,
                trusted: false,
            },
        ]
    );
}

#[test]
fn unauthorized_caller_is_rejected_before_validation() {
    let fixture = Fixture::new();

    let err = fixture
        .sentinel
        .set_trusted_keeper(STRANGER, Address::ZERO, true)
        .unwrap_err();

    assert_eq!(
        err,
        SentinelError::Unauthorized {
            operation: Operation::SetTrustedKeeper,
            caller: STRANGER,
        }
    );
    assert!(fixture.events.is_empty());
}

#[test]
fn zero_addresses_are_rejected() {
    let fixture = Fixture::new();
    let config = TokenMonitorConfig::try_new(5, true).unwrap();

    assert_eq!(
        fixture
            .sentinel
            .set_trusted_keeper(ADMIN, Address::ZERO, true)
            .unwrap_err(),
        SentinelError::Domain(DomainError::ZeroAddress)
    );
    assert_eq!(
        fixture
            .sentinel
            .set_token_config(ADMIN, Address::ZERO, config)
            .unwrap_err(),
        SentinelError::Domain(DomainError::ZeroAddress)
    );
    assert_eq!(
        fixture
            .sentinel
            .set_token_monitoring_enabled(ADMIN, Address::ZERO, false)
            .unwrap_err(),
        SentinelError::Domain(DomainError::ZeroAddress)
    );
}

#[test]
fn thresholds_outside_one_to_hundred_are_rejected() {
    assert_eq!(
        TokenMonitorConfig::try_new(0, true).unwrap_err(),
        DomainError::InvalidThreshold { value: 0 }
    );
    assert_eq!(
        TokenMonitorConfig::try_new(101, true).unwrap_err(),
        DomainError::InvalidThreshold { value: 101 }
    );
    assert!(TokenMonitorConfig::try_new(1, true).is_ok());
    assert!(TokenMonitorConfig::try_new(100, false).is_ok());
}

#[test]
fn updated_threshold_applies_to_next_evaluation() {
    let fixture = Fixture::new();
    fixture.skew_high();
    assert!(fixture
        .sentinel
        .check_price_deviation(MARKET)
        .unwrap()
        .has_deviation());

    let relaxed = TokenMonitorConfig::try_new(60, true).unwrap();
    fixture
        .sentinel
        .set_token_config(ADMIN, TOKEN, relaxed)
        .unwrap();

    assert!(!fixture
        .sentinel
        .check_price_deviation(MARKET)
        .unwrap()
        .has_deviation());
    assert_eq!(fixture.sentinel.token_config(TOKEN), Some(relaxed));
    assert_eq!(
        fixture.events.events(),
        vec![Event::TokenConfigUpdated {
            token: TOKEN,
            config: relaxed,
        }]
    );
}

#[test]
fn toggling_monitoring_requires_a_config() {
    let fixture = Fixture::new();
    let token = addr(0x23);

    assert_eq!(
        fixture
            .sentinel
            .set_token_monitoring_enabled(ADMIN, token, true)
            .unwrap_err(),
        SentinelError::NotConfigured { token }
    );

    fixture
        .sentinel
        .set_token_monitoring_enabled(ADMIN, TOKEN, false)
        .unwrap();
    let config = fixture.sentinel.token_config(TOKEN).unwrap();
    assert!(!config.enabled());
    assert_eq!(config.deviation_percent(), 10);
    assert_eq!(
        fixture.events.events(),
        vec![Event::TokenMonitoringStatusChanged {
            token: TOKEN,
            enabled: false,
        }]
    );
}

#[test]
fn permissions_are_per_operation() {
    let fixture = Fixture::new();
    let operator = addr(0x67);
    fixture.access.grant(operator, Operation::SetTokenConfig);
    let config = TokenMonitorConfig::try_new(20, true).unwrap();

    assert!(fixture
        .sentinel
        .set_token_config(operator, TOKEN, config)
        .is_ok());
    assert_eq!(
        fixture
            .sentinel
            .set_token_monitoring_enabled(operator, TOKEN, false)
            .unwrap_err(),
        SentinelError::Unauthorized {
            operation: Operation::SetTokenMonitoringEnabled,
            caller: operator,
        }
    );
}

#[test]
fn restrictions_outlive_disabled_monitoring() {
    let fixture = Fixture::new();
    fixture.skew_low();
    fixture.handle(MARKET).unwrap();

    fixture
        .sentinel
        .set_token_monitoring_enabled(ADMIN, TOKEN, false)
        .unwrap();
    fixture.realign();
    assert!(fixture.handle(MARKET).is_err());
    assert!(fixture.state.market_state(MARKET).is_restricted());

    fixture
        .sentinel
        .set_token_monitoring_enabled(ADMIN, TOKEN, true)
        .unwrap();
    let outcome = fixture.sentinel.handle_deviation(KEEPER, MARKET).unwrap();
    assert!(!outcome.state.is_restricted());
}

//! Tests for deviation evaluation and market state transitions.

use alloy_primitives::U256;
use sentinel::adapter::outbound::memory::EngineCall;
use sentinel::domain::{Action, PoolId, RiskParameters, Skew};
use sentinel::error::SentinelError;
use sentinel::port::inbound::sentinel::MarketAction;
use sentinel::port::outbound::notifier::{DeviationEvent, Event};
use sentinel::testkit::domain::{
    addr, params, wad, ADMIN, MARKET, MULTI_POOL, SINGLE_MARKET, TOKEN,
};
use sentinel::testkit::fixture::Fixture;

#[test]
fn aligned_prices_report_no_deviation() {
    let fixture = Fixture::new();
    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();

    assert!(!report.has_deviation());
    assert_eq!(report.deviation_percent(), U256::ZERO);
    assert_eq!(report.threshold(), 10);
}

#[test]
fn deviation_equal_to_threshold_counts() {
    let fixture = Fixture::new();

    fixture.set_prices(100, 110);
    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();
    assert!(report.has_deviation());
    assert_eq!(report.deviation_percent(), U256::from(10));

    fixture.set_prices(100, 109);
    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();
    assert!(!report.has_deviation());
    assert_eq!(report.deviation_percent(), U256::from(9));
}

#[test]
fn zero_price_is_maximal_deviation() {
    let fixture = Fixture::new();

    fixture.set_raw_prices(U256::ZERO, wad(1_000));
    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();
    assert!(report.has_deviation());
    assert_eq!(report.deviation_percent(), U256::MAX);

    fixture.set_raw_prices(wad(1_000), U256::ZERO);
    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();
    assert!(report.has_deviation());
    assert_eq!(report.skew(), Skew::Low);
}

#[test]
fn check_is_open_to_any_caller_and_ignores_enabled_flag() {
    let fixture = Fixture::new();
    fixture
        .sentinel
        .set_token_monitoring_enabled(ADMIN, TOKEN, false)
        .unwrap();
    fixture.skew_high();

    let report = fixture.sentinel.check_price_deviation(MARKET).unwrap();
    assert!(report.has_deviation());
    assert!(fixture.multi_pool.calls().is_empty());
}

#[test]
fn high_skew_pauses_borrow_only() {
    let fixture = Fixture::new();
    fixture.set_prices(100, 115);

    let outcome = fixture.handle(MARKET).unwrap();

    assert_eq!(outcome.actions, vec![MarketAction::BorrowPaused]);
    assert!(outcome.state.borrow_paused());
    assert!(!outcome.state.supply_paused());
    assert!(!outcome.state.cf_modified());
    assert_eq!(
        fixture.multi_pool.calls(),
        vec![EngineCall::SetActionPaused {
            market: MARKET,
            action: Action::Borrow,
            paused: true,
        }]
    );
    assert_eq!(
        fixture.multi_pool.params(PoolId::new(0), MARKET),
        Some(Fixture::default_params())
    );
}

#[test]
fn low_skew_zeroes_collateral_and_pauses_supply() {
    let fixture = Fixture::new();
    fixture.set_prices(100, 85);

    let outcome = fixture.handle(MARKET).unwrap();

    assert_eq!(
        outcome.actions,
        vec![
            MarketAction::CollateralFactorZeroed {
                pool: Some(PoolId::new(0)),
            },
            MarketAction::SupplyPaused,
        ]
    );
    assert!(!outcome.state.borrow_paused());
    assert!(outcome.state.supply_paused());
    assert!(outcome.state.cf_modified());
    assert!(
        fixture
            .sentinel
            .market_status(MARKET)
            .unwrap()
            .supply_paused_on_comptroller
    );
}

#[test]
fn repeated_enforcement_is_a_noop() {
    let fixture = Fixture::new();
    fixture.skew_high();
    fixture.handle(MARKET).unwrap();
    fixture.multi_pool.clear_calls();
    let before = fixture.state.market_state(MARKET);
    let published = fixture.events.len();

    let outcome = fixture.handle(MARKET).unwrap();

    assert!(outcome.is_noop());
    assert!(fixture.multi_pool.calls().is_empty());
    assert_eq!(fixture.state.market_state(MARKET), before);
    assert_eq!(fixture.events.len(), published);
}

#[test]
fn repeated_low_skew_keeps_first_snapshot() {
    let fixture = Fixture::new();
    fixture.skew_low();
    fixture.handle(MARKET).unwrap();
    fixture.multi_pool.clear_calls();

    let outcome = fixture.handle(MARKET).unwrap();

    assert!(outcome.is_noop());
    assert!(fixture.multi_pool.calls().is_empty());
    assert_eq!(
        outcome.state.pool_snapshot(PoolId::new(0)),
        Some(Fixture::default_params())
    );
}

#[test]
fn recovery_without_flags_calls_nothing() {
    let fixture = Fixture::new();

    let outcome = fixture.handle(MARKET).unwrap();

    assert!(outcome.is_noop());
    assert!(fixture.multi_pool.calls().is_empty());
    assert!(fixture.events.is_empty());
}

#[test]
fn recovery_lifts_every_restriction_in_one_call() {
    let fixture = Fixture::new();
    fixture.skew_high();
    fixture.handle(MARKET).unwrap();
    fixture.skew_low();
    fixture.handle(MARKET).unwrap();

    let state = fixture.state.market_state(MARKET);
    assert!(state.borrow_paused() && state.supply_paused() && state.cf_modified());

    fixture.realign();
    let outcome = fixture.handle(MARKET).unwrap();

    assert_eq!(
        outcome.actions,
        vec![
            MarketAction::BorrowUnpaused,
            MarketAction::CollateralFactorRestored {
                pool: Some(PoolId::new(0)),
            },
            MarketAction::SupplyUnpaused,
        ]
    );
    assert!(!outcome.state.is_restricted());
    assert_eq!(outcome.state.pool_snapshots().count(), 0);
    assert_eq!(
        fixture.multi_pool.params(PoolId::new(0), MARKET),
        Some(Fixture::default_params())
    );

    let status = fixture.sentinel.market_status(MARKET).unwrap();
    assert!(!status.borrow_paused_on_comptroller);
    assert!(!status.supply_paused_on_comptroller);
}

#[test]
fn single_pool_snapshot_round_trip() {
    let fixture = Fixture::new();
    let original = params(72, 81);
    fixture.single_pool.list(SINGLE_MARKET, original);

    fixture.skew_low();
    let outcome = fixture.handle(SINGLE_MARKET).unwrap();
    assert_eq!(
        outcome.actions,
        vec![
            MarketAction::CollateralFactorZeroed { pool: None },
            MarketAction::SupplyPaused,
        ]
    );
    assert_eq!(outcome.state.original(), original);

    let zeroed = fixture.single_pool.params(SINGLE_MARKET).unwrap();
    assert_eq!(zeroed.collateral_factor, U256::ZERO);
    assert_eq!(zeroed.liquidation_threshold, original.liquidation_threshold);

    fixture.realign();
    let outcome = fixture.handle(SINGLE_MARKET).unwrap();

    assert_eq!(fixture.single_pool.params(SINGLE_MARKET), Some(original));
    assert!(!outcome.state.cf_modified());
    assert_eq!(outcome.state.original(), RiskParameters::default());
}

#[test]
fn events_follow_the_committed_transition() {
    let fixture = Fixture::new();
    fixture.skew_high();

    fixture.handle(MARKET).unwrap();

    assert_eq!(
        fixture.events.take(),
        vec![
            Event::DeviationDetected(DeviationEvent {
                market: MARKET,
                primary: wad(1_000),
                secondary: wad(1_500),
                deviation_percent: U256::from(50),
                skew: Skew::High,
            }),
            Event::BorrowPaused { market: MARKET },
        ]
    );

    fixture.realign();
    fixture.handle(MARKET).unwrap();
    assert_eq!(
        fixture.events.take(),
        vec![Event::BorrowUnpaused { market: MARKET }]
    );
}

#[test]
fn markets_keep_independent_state() {
    let fixture = Fixture::new();
    fixture.skew_high();

    fixture.handle(MARKET).unwrap();

    assert!(fixture.state.market_state(MARKET).borrow_paused());
    assert!(!fixture.state.market_state(SINGLE_MARKET).is_restricted());
    assert_eq!(fixture.state.restricted_markets(), vec![MARKET]);
}

#[test]
fn unconfigured_token_is_rejected() {
    let fixture = Fixture::new();
    let market = addr(0x35);
    let token = addr(0x23);
    fixture.directory.register(market, token, MULTI_POOL);

    assert_eq!(
        fixture.sentinel.check_price_deviation(market).unwrap_err(),
        SentinelError::NotConfigured { token }
    );
    assert_eq!(
        fixture.handle(market).unwrap_err(),
        SentinelError::NotConfigured { token }
    );
}

#[test]
fn disabled_monitoring_blocks_transitions() {
    let fixture = Fixture::new();
    fixture
        .sentinel
        .set_token_monitoring_enabled(ADMIN, TOKEN, false)
        .unwrap();
    fixture.skew_low();

    assert_eq!(
        fixture.handle(MARKET).unwrap_err(),
        SentinelError::MonitoringDisabled { token: TOKEN }
    );
    assert!(fixture.multi_pool.calls().is_empty());
}

#[test]
fn unknown_comptroller_is_rejected() {
    let fixture = Fixture::new();
    let market = addr(0x36);
    let comptroller = addr(0x13);
    fixture.directory.register(market, TOKEN, comptroller);

    assert_eq!(
        fixture.handle(market).unwrap_err(),
        SentinelError::UnknownRiskEngine { comptroller }
    );
}

#[test]
fn unknown_market_is_rejected() {
    let fixture = Fixture::new();
    let result = fixture.handle(addr(0x37));
    assert!(matches!(result, Err(SentinelError::MarketLookup { .. })));
}

#[test]
fn flipped_skew_then_realignment_lifts_everything_once() {
    let fixture = Fixture::new();
    let markets = [(MARKET, Some(PoolId::new(0))), (SINGLE_MARKET, None)];

    fixture.skew_high();
    for (market, _) in markets {
        fixture.handle(market).unwrap();
    }
    fixture.skew_low();
    for (market, _) in markets {
        let state = fixture.handle(market).unwrap().state;
        assert!(state.borrow_paused() && state.supply_paused() && state.cf_modified());
    }

    fixture.realign();
    for (market, pool) in markets {
        let outcome = fixture.handle(market).unwrap();
        assert_eq!(
            outcome.actions,
            vec![
                MarketAction::BorrowUnpaused,
                MarketAction::CollateralFactorRestored { pool },
                MarketAction::SupplyUnpaused,
            ]
        );
        assert!(!outcome.state.is_restricted());
    }
    assert_eq!(
        fixture.multi_pool.params(PoolId::new(0), MARKET),
        Some(Fixture::default_params())
    );
    assert_eq!(
        fixture.single_pool.params(SINGLE_MARKET),
        Some(Fixture::default_params())
    );

    for (market, _) in markets {
        assert!(fixture.handle(market).unwrap().is_noop());
    }
}

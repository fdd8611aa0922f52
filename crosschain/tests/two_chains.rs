//! Two-chain replication: updates, transfers, replays and cooldowns.
//!
//! Each test wires two registries, two proxies and two paired gateways over
//! one nullable transport, then pumps deliveries by hand to play the
//! asynchronous half of the protocol.

use persona_crosschain::{BridgeGateway, CrossChainError, CrossChainProxy};
use persona_nullables::{NullArbitrator, NullTransport};
use persona_registry::{HumanityRegistry, RegistryError};
use persona_types::{Address, HumanityId, RegistryParams, Timestamp};

const ARBITRATION_COST: u128 = 1000;
const TOTAL_COST: u128 = 6000;
const CHALLENGE_PERIOD: u64 = 600;
const LIFESPAN: u64 = 86_400;
const TRANSFER_COOLDOWN: u64 = 500;

const GOVERNOR: Address = Address([90u8; 20]);
const HOME_PROXY: Address = Address([91u8; 20]);
const FOREIGN_PROXY: Address = Address([92u8; 20]);
const HOME_GATEWAY: Address = Address([81u8; 20]);
const FOREIGN_GATEWAY: Address = Address([82u8; 20]);

fn addr(n: u8) -> Address {
    Address::new([n; 20])
}

fn id(n: u8) -> HumanityId {
    HumanityId::new([n; 20])
}

fn params() -> RegistryParams {
    RegistryParams {
        base_deposit: TOTAL_COST - ARBITRATION_COST,
        humanity_lifespan: LIFESPAN,
        renewal_period: 6_000,
        challenge_period: CHALLENGE_PERIOD,
        failed_revocation_cooldown: 2_400,
        required_vouches: 2,
        shared_stake_multiplier: 5_000,
        winner_stake_multiplier: 2_000,
        loser_stake_multiplier: 8_000,
    }
}

struct Chain {
    registry: HumanityRegistry,
    proxy: CrossChainProxy,
    gateway: BridgeGateway,
}

impl Chain {
    fn new(proxy_address: Address, gateway_address: Address) -> Self {
        let mut registry = HumanityRegistry::new(GOVERNOR, params(), vec![0x85]);
        registry
            .change_cross_chain_proxy(GOVERNOR, proxy_address)
            .unwrap();
        Self {
            registry,
            proxy: CrossChainProxy::new(proxy_address, GOVERNOR, TRANSFER_COOLDOWN),
            gateway: BridgeGateway::new(gateway_address, GOVERNOR, proxy_address),
        }
    }

    fn grant(&mut self, n: u8, expiration: Timestamp, now: Timestamp) {
        assert!(self
            .registry
            .cc_grant_humanity(self.proxy.address(), id(n), addr(n), expiration, now)
            .unwrap());
    }

    fn is_human(&self, n: u8, now: Timestamp) -> bool {
        self.proxy.is_human(&self.registry, addr(n), now)
    }
}

/// A paired home/foreign setup with one shared transport.
fn two_chains() -> (Chain, Chain, NullTransport) {
    persona_utils::logging::init_tracing();
    let mut home = Chain::new(HOME_PROXY, HOME_GATEWAY);
    let mut foreign = Chain::new(FOREIGN_PROXY, FOREIGN_GATEWAY);

    home.gateway
        .set_foreign_gateway(GOVERNOR, FOREIGN_GATEWAY)
        .unwrap();
    foreign
        .gateway
        .set_foreign_gateway(GOVERNOR, HOME_GATEWAY)
        .unwrap();
    home.proxy
        .add_bridge_gateway(GOVERNOR, HOME_GATEWAY, FOREIGN_PROXY)
        .unwrap();
    foreign
        .proxy
        .add_bridge_gateway(GOVERNOR, FOREIGN_GATEWAY, HOME_PROXY)
        .unwrap();

    (home, foreign, NullTransport::new())
}

/// Deliver every queued message to whichever chain it addresses.
fn pump(transport: &mut NullTransport, home: &mut Chain, foreign: &mut Chain, now: Timestamp) {
    while let Some(delivery) = transport.deliver_next() {
        let chain = if delivery.to_gateway == home.gateway.address() {
            &mut *home
        } else {
            &mut *foreign
        };
        chain
            .proxy
            .receive_message(
                &chain.gateway,
                delivery.from_gateway,
                &delivery.payload,
                &mut chain.registry,
                now,
            )
            .unwrap();
    }
}

#[test]
fn update_mirrors_a_live_humanity() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    assert!(home.is_human(1, now));
    assert!(!foreign.is_human(1, now));

    // A chain holding only mirrors cannot originate updates.
    assert!(matches!(
        foreign.proxy.update_humanity(
            &foreign.gateway,
            id(1),
            &foreign.registry,
            &mut transport,
            now
        ),
        Err(CrossChainError::NotHomeChain)
    ));

    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now)
        .unwrap();
    assert_eq!(transport.pending(), 1);
    pump(&mut transport, &mut home, &mut foreign, now);

    assert!(foreign.is_human(1, now));
    assert_eq!(
        foreign.proxy.bound_to(&foreign.registry, id(1), now),
        Some(addr(1))
    );
    assert_eq!(
        foreign.proxy.humanity_of(&foreign.registry, addr(1), now),
        Some(id(1))
    );
    let mirror = foreign.proxy.humanity_data(id(1)).unwrap();
    assert_eq!(mirror.owner, Some(addr(1)));
    assert_eq!(mirror.expiration_time, now.plus(LIFESPAN));
    assert!(!mirror.is_home_chain);

    // The mirror is advisory only; the foreign registry knows nothing.
    assert!(!foreign.registry.is_human(addr(1), now));
    // Home keeps answering from its own registry.
    assert!(home.is_human(1, now));
    assert!(home.proxy.humanity_data(id(1)).unwrap().is_home_chain);

    // Mirrors expire on their own clock.
    let lapsed = now.plus(LIFESPAN);
    assert!(!foreign.is_human(1, lapsed));
}

#[test]
fn update_propagates_a_revocation() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);
    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.is_human(1, now));

    // Revoke on the home registry.
    let arbitrator = NullArbitrator::new(ARBITRATION_COST);
    home.registry
        .revoke_humanity(addr(7), id(1), "", TOTAL_COST, now, &arbitrator)
        .unwrap();
    let later = now.plus(CHALLENGE_PERIOD);
    home.registry.execute_request(id(1), 0, later).unwrap();

    // The home proxy reflects its registry at once; the foreign mirror is
    // stale until informed.
    assert!(!home.is_human(1, later));
    assert!(foreign.is_human(1, later));

    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, later)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, later);

    assert!(!foreign.is_human(1, later));
    assert_eq!(foreign.proxy.bound_to(&foreign.registry, id(1), later), None);
    let mirror = foreign.proxy.humanity_data(id(1)).unwrap();
    assert_eq!(mirror.owner, None);
    // The stored expiration survives; only the claim is gone.
    assert_eq!(mirror.expiration_time, now.plus(LIFESPAN));
}

#[test]
fn transfer_moves_the_humanity_and_keeps_a_grace_mirror() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    let tx_hash = home
        .proxy
        .transfer_humanity(addr(1), &home.gateway, &mut home.registry, &mut transport, now)
        .unwrap();

    // Discharged from the home registry, yet still visible through the
    // proxy's grace mirror until an update says otherwise.
    assert!(!home.registry.is_human(addr(1), now));
    assert!(home.is_human(1, now));
    let record = home.proxy.transfer_record(id(1)).unwrap();
    assert_eq!(record.transfer_hash, tx_hash);
    assert_eq!(record.destination_proxy, FOREIGN_PROXY);
    assert_eq!(record.expiration_time, now.plus(LIFESPAN));

    pump(&mut transport, &mut home, &mut foreign, now);

    // The receiving chain is the new home: its registry holds the claim.
    assert!(foreign.registry.is_human(addr(1), now));
    assert!(foreign.is_human(1, now));
    assert_eq!(foreign.registry.bound_to(id(1), now), Some(addr(1)));
    let mirror = foreign.proxy.humanity_data(id(1)).unwrap();
    assert!(mirror.is_home_chain);
    assert_eq!(mirror.owner, Some(addr(1)));
    assert_eq!(mirror.expiration_time, now.plus(LIFESPAN));
    assert_eq!(mirror.last_transfer_time, now);
    assert!(foreign.proxy.has_received_transfer(tx_hash));

    // Scenario: the old home syncs itself and tells the other side, which
    // stays authoritative through its registry.
    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now)
        .unwrap();
    assert!(!home.is_human(1, now));
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.is_human(1, now));
    assert_eq!(
        foreign
            .registry
            .get_humanity_info(id(1))
            .unwrap()
            .expiration_time,
        now.plus(LIFESPAN)
    );
}

#[test]
fn replayed_transfer_is_a_noop() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    home.proxy
        .transfer_humanity(addr(1), &home.gateway, &mut home.registry, &mut transport, now)
        .unwrap();
    let delivery = transport.deliver_next().unwrap();
    transport.requeue(delivery.clone());
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.registry.is_human(addr(1), now));

    // The transport redelivers; application stays exactly-once.
    let before = foreign
        .proxy
        .humanity_data(id(1))
        .unwrap()
        .last_transfer_time;
    transport.requeue(delivery);
    pump(&mut transport, &mut home, &mut foreign, now.plus(50));
    assert!(foreign.registry.is_human(addr(1), now.plus(50)));
    assert_eq!(
        foreign
            .proxy
            .humanity_data(id(1))
            .unwrap()
            .last_transfer_time,
        before
    );
}

#[test]
fn transfer_cooldown_gates_the_next_hop() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    home.proxy
        .transfer_humanity(addr(1), &home.gateway, &mut home.registry, &mut transport, now)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, now);

    // Bouncing straight back is blocked by the cooldown stamped on receipt.
    assert!(matches!(
        foreign.proxy.transfer_humanity(
            addr(1),
            &foreign.gateway,
            &mut foreign.registry,
            &mut transport,
            now.plus(TRANSFER_COOLDOWN - 1)
        ),
        Err(CrossChainError::TransferCooldown)
    ));

    let later = now.plus(TRANSFER_COOLDOWN);
    foreign
        .proxy
        .transfer_humanity(addr(1), &foreign.gateway, &mut foreign.registry, &mut transport, later)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, later);
    assert!(home.registry.is_human(addr(1), later));
    assert!(!foreign.registry.is_human(addr(1), later));
}

#[test]
fn failed_send_leaves_no_discharged_state() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    transport.make_unreachable(FOREIGN_GATEWAY);
    assert!(matches!(
        home.proxy.transfer_humanity(
            addr(1),
            &home.gateway,
            &mut home.registry,
            &mut transport,
            now
        ),
        Err(CrossChainError::Transport(_))
    ));

    // Nothing moved: the registry still claims, no record, no queue entry.
    assert!(home.registry.is_human(addr(1), now));
    assert!(home.proxy.transfer_record(id(1)).is_none());
    assert!(transport.is_empty());

    transport.make_reachable(FOREIGN_GATEWAY);
    home.proxy
        .transfer_humanity(addr(1), &home.gateway, &mut home.registry, &mut transport, now)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.registry.is_human(addr(1), now));
}

#[test]
fn transfer_requires_an_unencumbered_live_owner() {
    let now = Timestamp::new(10_000);
    let (mut home, _, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    // Not an owner at all.
    assert!(matches!(
        home.proxy.transfer_humanity(
            addr(5),
            &home.gateway,
            &mut home.registry,
            &mut transport,
            now
        ),
        Err(CrossChainError::NotHuman)
    ));

    // A pending revocation pins the humanity to its home chain.
    let arbitrator = NullArbitrator::new(ARBITRATION_COST);
    home.registry
        .revoke_humanity(addr(7), id(1), "", TOTAL_COST, now, &arbitrator)
        .unwrap();
    assert!(matches!(
        home.proxy.transfer_humanity(
            addr(1),
            &home.gateway,
            &mut home.registry,
            &mut transport,
            now
        ),
        Err(CrossChainError::Registry(RegistryError::RequestUnresolved))
    ));
}

#[test]
fn gateways_are_statically_paired_and_removable_once() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    // An unapproved gateway is rejected outright.
    let rogue = BridgeGateway::new(addr(60), GOVERNOR, HOME_PROXY);
    assert!(matches!(
        home.proxy
            .update_humanity(&rogue, id(1), &home.registry, &mut transport, now),
        Err(CrossChainError::GatewayNotApproved(_))
    ));

    // Governance is credential-checked, additions validated, removals loud.
    assert!(matches!(
        home.proxy.remove_bridge_gateway(addr(5), HOME_GATEWAY),
        Err(CrossChainError::UnauthorizedCaller)
    ));
    home.proxy
        .remove_bridge_gateway(GOVERNOR, HOME_GATEWAY)
        .unwrap();
    assert!(matches!(
        home.proxy.remove_bridge_gateway(GOVERNOR, HOME_GATEWAY),
        Err(CrossChainError::GatewayNotApproved(_))
    ));
    assert!(matches!(
        home.proxy
            .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now),
        Err(CrossChainError::GatewayNotApproved(_))
    ));

    assert!(matches!(
        home.proxy
            .add_bridge_gateway(GOVERNOR, Address::ZERO, FOREIGN_PROXY),
        Err(CrossChainError::ZeroAddress)
    ));
    home.proxy
        .add_bridge_gateway(GOVERNOR, HOME_GATEWAY, FOREIGN_PROXY)
        .unwrap();
    assert!(matches!(
        home.proxy
            .add_bridge_gateway(GOVERNOR, HOME_GATEWAY, FOREIGN_PROXY),
        Err(CrossChainError::GatewayAlreadyApproved(_))
    ));

    // Back in business.
    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now)
        .unwrap();
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.is_human(1, now));

    // Inbound messages from a non-paired origin are rejected.
    home.proxy
        .update_humanity(&home.gateway, id(1), &home.registry, &mut transport, now)
        .unwrap();
    let delivery = transport.deliver_next().unwrap();
    assert!(matches!(
        foreign.proxy.receive_message(
            &foreign.gateway,
            addr(60),
            &delivery.payload,
            &mut foreign.registry,
            now
        ),
        Err(CrossChainError::WrongOrigin(_))
    ));
}

#[test]
fn receive_side_gateway_removal_defers_the_transfer() {
    let now = Timestamp::new(10_000);
    let (mut home, mut foreign, mut transport) = two_chains();
    home.grant(1, now.plus(LIFESPAN), now);

    // The destination drops its gateway while a transfer is in flight. The
    // delivery fails, and the transport redelivers once it is re-approved.
    foreign
        .proxy
        .remove_bridge_gateway(GOVERNOR, FOREIGN_GATEWAY)
        .unwrap();
    home.proxy
        .transfer_humanity(addr(1), &home.gateway, &mut home.registry, &mut transport, now)
        .unwrap();
    let delivery = transport.deliver_next().unwrap();
    assert!(foreign
        .proxy
        .receive_message(
            &foreign.gateway,
            delivery.from_gateway,
            &delivery.payload,
            &mut foreign.registry,
            now
        )
        .is_err());
    assert!(!foreign.registry.is_human(addr(1), now));

    foreign
        .proxy
        .add_bridge_gateway(GOVERNOR, FOREIGN_GATEWAY, HOME_PROXY)
        .unwrap();
    transport.requeue(delivery);
    pump(&mut transport, &mut home, &mut foreign, now);
    assert!(foreign.registry.is_human(addr(1), now));
}

#[test]
fn proxy_governance_is_credential_checked() {
    let (mut home, _, _) = two_chains();

    assert!(matches!(
        home.proxy.change_governor(addr(5), addr(5)),
        Err(CrossChainError::UnauthorizedCaller)
    ));
    assert!(matches!(
        home.proxy.set_transfer_cooldown(addr(5), 11),
        Err(CrossChainError::UnauthorizedCaller)
    ));
    home.proxy.set_transfer_cooldown(GOVERNOR, 11).unwrap();
    assert_eq!(home.proxy.transfer_cooldown(), 11);

    home.proxy.change_governor(GOVERNOR, addr(50)).unwrap();
    assert!(matches!(
        home.proxy.set_transfer_cooldown(GOVERNOR, 12),
        Err(CrossChainError::UnauthorizedCaller)
    ));
    home.proxy.set_transfer_cooldown(addr(50), 12).unwrap();

    assert!(matches!(
        home.gateway.change_governor(addr(5), addr(5)),
        Err(CrossChainError::UnauthorizedCaller)
    ));
    home.gateway.change_governor(GOVERNOR, addr(50)).unwrap();
    assert_eq!(home.gateway.governor(), addr(50));
}

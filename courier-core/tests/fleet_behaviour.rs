//! Behavioural tests for least-marginal-distance package assignment.

use std::cell::RefCell;
use std::sync::Arc;

use courier_core::test_support::{city, shared_reference_map};
use courier_core::{
    Assignment, ClassConfig, Courier, CourierClass, Edge, Fleet, FleetConfig, FleetError, Graph,
    GraphError, build_graph,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct FleetWorld {
    graph: RefCell<Option<Arc<Graph>>>,
    fleet: RefCell<Option<Fleet>>,
    outcome: RefCell<Option<Result<Assignment, FleetError>>>,
}

impl FleetWorld {
    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn graph(&self) -> Arc<Graph> {
        self.graph
            .borrow()
            .clone()
            .expect("a map should be loaded first")
    }

    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn assign(&self, package: u64, from: &str, to: &str) {
        let graph = self.graph();
        let outcome = self
            .fleet
            .borrow_mut()
            .as_mut()
            .expect("a fleet should exist")
            .assign_package(package, city(&graph, from), city(&graph, to), CourierClass::Basic);
        self.outcome.replace(Some(outcome));
    }

    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn assert_assigned(&self, courier: u64, distance: u64) {
        let assignment = self
            .outcome
            .borrow()
            .clone()
            .expect("an assignment should have been attempted")
            .expect("assignment should succeed");
        assert_eq!(assignment.courier, courier);
        assert_eq!(assignment.distance, distance);
        assert_eq!(assignment.class, CourierClass::Basic);
    }
}

#[fixture]
fn world() -> FleetWorld {
    FleetWorld::default()
}

#[given("the reference map")]
fn given_reference_map(world: &FleetWorld) {
    world.graph.replace(Some(shared_reference_map()));
}

#[given("a map with two separate components")]
fn given_split_map(world: &FleetWorld) {
    let graph = build_graph([Edge::new("A", "B", 1), Edge::new("X", "Y", 1)]);
    world.graph.replace(Some(Arc::new(graph)));
}

#[given("two basic couriers in A travelling 4 km per day")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn given_two_couriers(world: &FleetWorld) {
    let config = FleetConfig::new("A").with_basic(ClassConfig::new(2, 4));
    let fleet = Fleet::new(world.graph(), &config).expect("fleet should be valid");
    world.fleet.replace(Some(fleet));
}

#[when("package 101 from F to B is assigned")]
fn when_first_package(world: &FleetWorld) {
    world.assign(101, "F", "B");
}

#[when("package 102 from F to G is assigned")]
fn when_second_package(world: &FleetWorld) {
    world.assign(102, "F", "G");
}

#[when("package 103 from G to D is assigned")]
fn when_third_package(world: &FleetWorld) {
    world.assign(103, "G", "D");
}

#[when("a package from A to Y is assigned")]
fn when_unreachable_package(world: &FleetWorld) {
    world.assign(101, "A", "Y");
}

#[then("courier 1001 takes it at distance 14")]
fn then_first_courier(world: &FleetWorld) {
    world.assert_assigned(1001, 14);
}

#[then("courier 1002 takes it at distance 15")]
fn then_second_courier(world: &FleetWorld) {
    world.assert_assigned(1002, 15);
}

#[then("courier 1002 takes it at distance 18")]
fn then_second_courier_again(world: &FleetWorld) {
    world.assert_assigned(1002, 18);
}

#[then("the assignment fails because no path exists")]
fn then_no_path(world: &FleetWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(
        outcome.as_ref(),
        Some(Err(FleetError::Graph(GraphError::NoPathExists { .. })))
    ));
}

#[then("every courier is still idle")]
fn then_all_idle(world: &FleetWorld) {
    let fleet = world.fleet.borrow();
    let idle = fleet.as_ref().is_some_and(|fleet| {
        CourierClass::ALL
            .into_iter()
            .flat_map(|class| fleet.couriers(class))
            .all(Courier::is_idle)
    });
    assert!(idle);
}

#[scenario(path = "tests/features/fleet_assignment.feature", index = 0)]
fn cheapest_courier_wins(world: FleetWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fleet_assignment.feature", index = 1)]
fn unreachable_destination(world: FleetWorld) {
    let _ = world;
}

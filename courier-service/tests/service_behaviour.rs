//! Behavioural tests for `DeliveryService` backed by real files.

use std::cell::RefCell;
use std::fs;
use std::sync::Arc;

use camino::Utf8PathBuf;
use courier_core::{ClassConfig, FleetConfig, PackageStatus};
use courier_fs::Utf8File;
use courier_service::{DeliveryService, Quote, ServiceError, Tariff, load_map};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const REFERENCE_ROADS: &str = "\
A B 4
A C 4
B C 2
C E 1
E F 3
E F 2
D E -3
C D 2
D G 3
F G 7
";

#[derive(Debug)]
struct ServiceWorld {
    dir: TempDir,
    map_path: RefCell<Option<Utf8PathBuf>>,
    service: RefCell<Option<DeliveryService<Utf8File>>>,
    quote: RefCell<Option<Result<Quote, ServiceError>>>,
    shift: RefCell<Option<Result<usize, ServiceError>>>,
}

impl ServiceWorld {
    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
            map_path: RefCell::new(None),
            service: RefCell::new(None),
            quote: RefCell::new(None),
            shift: RefCell::new(None),
        }
    }

    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name)).expect("temp paths are UTF-8")
    }

    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn with_service<R>(&self, f: impl FnOnce(&mut DeliveryService<Utf8File>) -> R) -> R {
        let mut slot = self.service.borrow_mut();
        f(slot.as_mut().expect("a service should exist"))
    }

    fn send(&self, line: &str) {
        let quote = self.with_service(|service| service.send_receipt(line));
        self.quote.replace(Some(quote));
    }

    fn shift(&self, days: i64) {
        let outcome = self.with_service(|service| service.shift_time(days).map(|c| c.len()));
        self.shift.replace(Some(outcome));
    }

    #[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
    fn assert_report(&self, location: &str, status: PackageStatus) {
        let report = self
            .with_service(|service| service.package_report(101))
            .expect("package 101 should exist");
        assert_eq!(report.location, location);
        assert_eq!(report.status, status);
    }
}

#[fixture]
fn world() -> ServiceWorld {
    ServiceWorld::new()
}

#[given("a map file with the reference roads")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn given_map_file(world: &ServiceWorld) {
    let path = world.path("roads.txt");
    fs::write(&path, REFERENCE_ROADS).expect("write map file");
    world.map_path.replace(Some(path));
}

#[given("a service in A with one basic courier travelling 4 km per day")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn given_service(world: &ServiceWorld) {
    let map_path = world.map_path.borrow().clone().expect("map file written");
    let graph = Arc::new(load_map(&map_path).expect("load map"));
    let config = FleetConfig::new("A").with_basic(ClassConfig::new(1, 4));
    let service = DeliveryService::with_log_file(
        graph,
        &config,
        Tariff::default(),
        &world.path("logs/deliveries.log"),
    )
    .expect("create service");
    world.service.replace(Some(service));
}

#[when("the receipt F,B,500,basic is sent")]
fn when_valid_receipt(world: &ServiceWorld) {
    world.send("F,B,500,basic");
}

#[when("the receipt F,Z,500,basic is sent")]
fn when_unknown_city_receipt(world: &ServiceWorld) {
    world.send("F,Z,500,basic");
}

#[when("three days pass")]
fn when_three_days(world: &ServiceWorld) {
    world.shift(3);
}

#[when("five days pass")]
fn when_five_days(world: &ServiceWorld) {
    world.shift(5);
}

#[when("time is shifted by minus one day")]
fn when_negative_shift(world: &ServiceWorld) {
    world.shift(-1);
}

#[then("package 101 is quoted at 140")]
fn then_quoted(world: &ServiceWorld) {
    let quote = world.quote.borrow();
    assert!(matches!(
        quote.as_ref(),
        Some(Ok(Quote {
            id: 101,
            price: 140,
            courier: 1001,
            distance: 14,
        }))
    ));
}

#[then("the report for package 101 says it is in delivery in C")]
fn then_in_delivery(world: &ServiceWorld) {
    world.assert_report("C", PackageStatus::InDelivery);
}

#[then("the report for package 101 says it was delivered in B")]
fn then_delivered(world: &ServiceWorld) {
    world.assert_report("B", PackageStatus::Delivered);
}

#[then("the log file holds three lines ending with the delivery on day 3")]
#[expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]
fn then_log_file(world: &ServiceWorld) {
    let log = fs::read_to_string(world.path("logs/deliveries.log")).expect("read log");
    let lines: Vec<_> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines.last().copied(),
        Some("Status of package 101 was changed on the day 3 to: delivered")
    );
}

#[then("the request fails because city Z is unknown")]
fn then_unknown_city(world: &ServiceWorld) {
    let quote = world.quote.borrow();
    assert!(matches!(
        quote.as_ref(),
        Some(Err(ServiceError::UnknownCity { name })) if name == "Z"
    ));
}

#[then("the request fails because days cannot be negative")]
fn then_negative_days(world: &ServiceWorld) {
    let shift = world.shift.borrow();
    assert!(matches!(
        shift.as_ref(),
        Some(Err(ServiceError::NegativeDays { days: -1 }))
    ));
    assert_eq!(world.with_service(|service| service.day()), 0);
}

#[then("the next package id is still 101")]
fn then_next_id(world: &ServiceWorld) {
    assert_eq!(world.with_service(|service| service.next_package_id()), 101);
}

#[scenario(path = "tests/features/delivery_service.feature", index = 0)]
fn receipt_lifecycle(world: ServiceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/delivery_service.feature", index = 1)]
fn invalid_requests(world: ServiceWorld) {
    let _ = world;
}

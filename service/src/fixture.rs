//! Shared fixtures of the test suite.

use crate::{
    command::{CreateDriver, CreateOrder, CreateTrailer},
    domain::driver,
    infra::Memory,
    Service,
};

/// Creates a new [`Service`] over an empty [`Memory`] database.
pub(crate) fn service() -> Service<Memory> {
    Service::new(Memory::new())
}

/// Prepares a [`CreateDriver`] with the provided full name.
pub(crate) fn driver(full_name: &str) -> CreateDriver {
    CreateDriver {
        full_name: full_name.parse().unwrap(),
        passport_number: "AB 123456".parse().unwrap(),
        experience: "5".parse().unwrap(),
        class: driver::Class::Second,
        partner: None,
    }
}

/// Prepares a [`CreateTrailer`] with the provided brand and license plate.
pub(crate) fn trailer(brand: &str, license_plate: &str) -> CreateTrailer {
    CreateTrailer {
        brand: brand.parse().unwrap(),
        company: "Cargo Lines".parse().unwrap(),
        license_plate: license_plate.parse().unwrap(),
        load_capacity: "20".parse().unwrap(),
        fuel_consumption: "32.5".parse().unwrap(),
        length: "13.6".parse().unwrap(),
        cost_per_km: None,
        driver: None,
    }
}

/// Prepares a [`CreateOrder`] with the provided name and distance.
pub(crate) fn order(name: &str, distance: &str) -> CreateOrder {
    CreateOrder {
        name: name.parse().unwrap(),
        weight: "1.5".parse().unwrap(),
        items_count: "3".parse().unwrap(),
        departure_point: "Kyiv".parse().unwrap(),
        destination_point: "Lviv".parse().unwrap(),
        distance: distance.parse().unwrap(),
        trailer: None,
        driver: None,
        completed: false,
    }
}

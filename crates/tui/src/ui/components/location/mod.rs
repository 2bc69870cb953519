mod location_component;

pub use location_component::LocationComponent;

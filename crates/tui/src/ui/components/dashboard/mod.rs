mod dashboard_component;

pub use dashboard_component::DashboardComponent;

pub mod api;
pub mod gui;

// Re-export the main error types for convenience
pub use api::FetchError;

// Re-export API client and core models
pub use api::{DashboardApi, DashboardBackend, FallbackChain};
pub use api::{DailyStat, PlateNumber, SessionRecord, Severity, StatsPeriod};

// Re-export GUI entry points
pub use gui::{DashboardWindow, DashboardService};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        // Test that the main modules are accessible
        assert!(std::any::type_name::<api::DashboardApi>().contains("DashboardApi"));
        assert!(std::any::type_name::<gui::ChartRegistry>().contains("ChartRegistry"));
    }

    #[test]
    fn test_data_structures_creation() {
        let plate = PlateNumber("RAB 123 C".to_string());
        assert_eq!(plate.to_string(), "RAB 123 C");

        let period = StatsPeriod::default();
        assert_eq!(period.tag(), "7d");
    }

    #[test]
    fn test_error_types_re_exported() {
        let error = FetchError::Status {
            endpoint: "/api/revenue".to_string(),
            status: 500,
        };
        assert!(error.to_string().contains("500"));
    }
}

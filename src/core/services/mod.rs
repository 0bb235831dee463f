pub mod feasibility_service;

pub use feasibility_service::FeasibilityService;

// ABOUTME: Step wizard navigation core
// Single authority for forward/backward/jump transitions between screens

pub mod state;

pub use state::{Step, StepInfo, StepWizard};

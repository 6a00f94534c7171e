mod simulated;
mod smtp;

pub use simulated::SimulatedSubmissionService;
pub use smtp::SmtpSubmissionService;

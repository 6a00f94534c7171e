pub mod courses;
pub mod enroll;
pub mod smtp;
